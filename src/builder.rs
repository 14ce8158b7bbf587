//! Creates the project directory and its template entries.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    error::{Result, ScaffoldError},
    registry::{Entry, EntryKind, Registry},
    request::ProjectRequest,
    secrets::SecretStore,
};

pub const GITIGNORE_FILE: &str = ".gitignore";
pub const ENV_FILE: &str = ".env";

pub const DEFAULT_GITIGNORE: &str = "venv/\n__pycache__/\n.DS_Store\n.env\n*.pyc\noutput/\n";
pub const DEFAULT_ENV: &str = "# Environment Variables\nAPI_KEY=\nSECRET_KEY=\n";

/// Outcome of [`StructureBuilder::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub path: PathBuf,
    /// Entries created by this run, in creation order.
    pub created: Vec<PathBuf>,
    /// Entries that already existed and were left alone.
    pub skipped: Vec<PathBuf>,
}

pub struct StructureBuilder<'a> {
    registry: &'a Registry,
    root: PathBuf,
    env_template: Option<&'a str>,
    secrets: &'a dyn SecretStore,
}

impl<'a> StructureBuilder<'a> {
    pub fn new(registry: &'a Registry, root: impl Into<PathBuf>, secrets: &'a dyn SecretStore) -> Self {
        StructureBuilder {
            registry,
            root: root.into(),
            env_template: None,
            secrets,
        }
    }

    /// Use a tera template instead of [`DEFAULT_ENV`] for the starter `.env`.
    /// It can refer to `project` and `template`.
    #[must_use]
    pub fn env_template(mut self, template: Option<&'a str>) -> Self {
        self.env_template = template;
        self
    }

    #[must_use]
    pub fn project_path(&self, request: &ProjectRequest) -> PathBuf {
        self.root.join(request.name())
    }

    /// Materializes the project on disk.
    ///
    /// Running it again over an existing project only rewrites `.gitignore` and `.env`.
    /// Nothing is rolled back on failure; the error names the path that was reached.
    ///
    /// # Errors
    ///
    /// Unknown template or a bad `.env` template fail before any write.
    /// [`ScaffoldError::PathConflict`] if the project path is not a directory.
    pub fn build(&self, request: &ProjectRequest) -> Result<BuildReport> {
        let template = self.registry.lookup(request.template_key())?;
        let starter_env = self.render_env(request)?;

        let path = self.project_path(request);
        crate::info!("Creating project at {}", path.display());
        ensure_dir(&path)?;

        let mut report = BuildReport {
            path: path.clone(),
            ..Default::default()
        };

        let entries: Vec<&Entry> = template
            .entries
            .iter()
            .chain(self.registry.common())
            .collect();

        for entry in &entries {
            ensure_entry(&path, entry, &mut report)?;
        }

        let gitignore = path.join(GITIGNORE_FILE);
        let wants_gitignore = entries
            .iter()
            .any(|e| e.name == GITIGNORE_FILE && e.kind == EntryKind::File);
        if wants_gitignore && gitignore.is_file() {
            fs::write(&gitignore, DEFAULT_GITIGNORE).map_err(ScaffoldError::fs(&gitignore))?;
            crate::trace!("Wrote default {GITIGNORE_FILE}");
        }

        match request.credentials() {
            Some(credentials) => self.secrets.store(&path, credentials)?,
            None => {
                let env = path.join(ENV_FILE);
                fs::write(&env, starter_env).map_err(ScaffoldError::fs(&env))?;
                crate::trace!("Wrote starter {ENV_FILE}");
            }
        }

        Ok(report)
    }

    fn render_env(&self, request: &ProjectRequest) -> Result<String> {
        let Some(template) = self.env_template else {
            return Ok(DEFAULT_ENV.to_string());
        };

        let mut context = tera::Context::new();
        context.insert("project", request.name());
        context.insert("template", request.template_key());

        tera::Tera::one_off(template, &context, false)
            .map_err(|e| ScaffoldError::Config(format!("invalid {ENV_FILE} template: {e}")))
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            crate::trace!("{} already exists", path.display());
            Ok(())
        }
        Ok(_) => Err(ScaffoldError::PathConflict(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(ScaffoldError::fs(path))
        }
        Err(e) => Err(ScaffoldError::fs(path)(e)),
    }
}

fn ensure_entry(project: &Path, entry: &Entry, report: &mut BuildReport) -> Result<()> {
    let target = project.join(entry.name);

    if let Ok(meta) = fs::symlink_metadata(&target) {
        let matches = match entry.kind {
            EntryKind::File => meta.is_file(),
            EntryKind::Directory => meta.is_dir(),
        };
        if !matches {
            crate::warn!(
                "{} exists but is not a {}; leaving it as is",
                target.display(),
                kind_name(entry.kind)
            );
        }
        report.skipped.push(target);
        return Ok(());
    }

    match entry.kind {
        EntryKind::File => fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .map(drop),
        EntryKind::Directory => fs::create_dir(&target),
    }
    .map_err(ScaffoldError::fs(&target))?;

    crate::info!("Created {} {}", kind_name(entry.kind), entry.name);
    report.created.push(target);
    Ok(())
}

fn kind_name(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::File => "file",
        EntryKind::Directory => "folder",
    }
}

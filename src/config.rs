use derive_builder::Builder;
use directories::UserDirs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

const ROOT_FILE: &str = "root_dir";
const ENV_TEMPLATE_FILE: &str = "env.template";

/// Locations of kickoff's own configuration.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct KickoffDirs {
    user_home: PathBuf,
    config_dir: PathBuf,
}

/// Configuration loaded once at startup and handed to the scaffolder.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Directory new projects are created in.
    pub root: Option<PathBuf>,
    /// Deployment override for the starter `.env` content, as a tera template.
    pub env_template: Option<String>,
}

impl KickoffDirs {
    #[must_use]
    pub fn builder() -> KickoffDirsBuilder {
        KickoffDirsBuilder::create_empty()
    }

    /// Resolve the default locations for the current user.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the user's home directory can not be found.
    pub fn default_paths() -> Result<Self> {
        let home = Self::get_user_home()?;
        Ok(Self {
            config_dir: Self::get_config_dir(&home),
            user_home: home,
        })
    }

    /// Returns the path for the user home `~/`
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a path for the users home can not be found
    pub fn get_user_home() -> Result<PathBuf> {
        Ok(UserDirs::new()
            .ok_or_else(|| ScaffoldError::Config("failed to get user's home directory".into()))?
            .home_dir()
            .to_owned())
    }

    /// Returns the directory holding kickoff's configuration.
    ///
    /// Looks for, in order:
    /// - `$XDG_CONFIG_HOME/kickoff`
    /// - `~/.config/kickoff` if `~/.config` exists
    /// - `~/.kickoff`
    #[must_use]
    pub fn get_config_dir(home: &Path) -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            return PathBuf::from(xdg).join("kickoff");
        }

        let config_home = home.join(".config");
        if config_home.is_dir() {
            config_home.join("kickoff")
        } else {
            home.join(".kickoff")
        }
    }

    #[must_use]
    pub fn user_home(&self) -> &Path {
        self.user_home.as_path()
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        self.config_dir.as_path()
    }

    #[must_use]
    pub fn root_file(&self) -> PathBuf {
        self.config_dir.join(ROOT_FILE)
    }

    #[must_use]
    pub fn env_template_file(&self) -> PathBuf {
        self.config_dir.join(ENV_TEMPLATE_FILE)
    }

    /// Reads the persisted root directory. A missing or blank file means none is set.
    ///
    /// The value is not checked against the filesystem here; a stale root fails later,
    /// when the project is created inside it.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the file exists but can not be read.
    pub fn load_root(&self) -> Result<Option<PathBuf>> {
        let Some(contents) = read_optional(&self.root_file())? else {
            return Ok(None);
        };

        let line = contents.trim();
        if line.is_empty() {
            return Ok(None);
        }

        Ok(Some(self.resolve_root(line)))
    }

    /// Persists `root` for future runs, creating the config directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] on any IO error, or if the config path exists and is not a directory.
    pub fn store_root(&self, root: &Path) -> Result<()> {
        if self.config_dir.exists() && !self.config_dir.is_dir() {
            return Err(ScaffoldError::PathConflict(self.config_dir.clone()));
        }
        std::fs::create_dir_all(&self.config_dir).map_err(ScaffoldError::fs(&self.config_dir))?;

        let file = self.root_file();
        crate::trace!("Writing root directory to {}", file.display());
        std::fs::write(&file, format!("{}\n", root.display())).map_err(ScaffoldError::fs(file))
    }

    /// Loads the persisted root and the optional `.env` template.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if either file exists but can not be read.
    pub fn load_settings(&self) -> Result<Settings> {
        Ok(Settings {
            root: self.load_root()?,
            env_template: self.load_env_template()?,
        })
    }

    /// Reads the deployment's `.env` template, if one is installed.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the file exists but can not be read.
    pub fn load_env_template(&self) -> Result<Option<String>> {
        read_optional(&self.env_template_file())
    }

    /// Turns a root as typed or stored into a path, expanding a leading `~`.
    #[must_use]
    pub fn resolve_root(&self, raw: &str) -> PathBuf {
        self.expand_home(raw.trim())
    }

    fn expand_home(&self, raw: &str) -> PathBuf {
        match raw.strip_prefix('~') {
            Some("") => self.user_home.clone(),
            Some(rest) if rest.starts_with('/') => self.user_home.join(&rest[1..]),
            _ => PathBuf::from(raw),
        }
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ScaffoldError::fs(path)(e)),
    }
}

//! Gathers a [`ProjectRequest`] from command-line values and interactive prompts.

use std::path::PathBuf;

use crate::{
    config::KickoffDirs,
    error::{Result, ScaffoldError},
    registry::Registry,
    request::{Credentials, ProjectRequest},
};

/// A line-oriented console. Implementations return the raw answer; defaults are
/// applied by the caller.
pub trait Prompter {
    fn ask(&mut self, message: &str) -> Result<String>;

    /// Like [`Prompter::ask`] without echoing the answer.
    fn ask_secret(&mut self, message: &str) -> Result<String>;

    fn show(&mut self, line: &str);
}

/// Terminal prompts backed by `inquire`.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn ask(&mut self, message: &str) -> Result<String> {
        Ok(inquire::Text::new(message).prompt()?)
    }

    fn ask_secret(&mut self, message: &str) -> Result<String> {
        Ok(inquire::Password::new(message)
            .without_confirmation()
            .with_display_mode(inquire::PasswordDisplayMode::Hidden)
            .prompt()?)
    }

    fn show(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Values already known before prompting, usually from the command line.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub name: Option<String>,
    pub template: Option<String>,
    pub is_public: Option<bool>,
    pub use_env_setup: Option<bool>,
    pub ask_credentials: bool,
}

/// Anything starting with `y` or `Y` is a yes, everything else a no.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

pub struct InputCollector<'r, P> {
    registry: &'r Registry,
    prompter: P,
    interactive: bool,
}

impl<'r, P: Prompter> InputCollector<'r, P> {
    pub fn new(registry: &'r Registry, prompter: P) -> Self {
        InputCollector {
            registry,
            prompter,
            interactive: true,
        }
    }

    /// Never prompt: missing flags become `false`, a missing name or template is an error.
    #[must_use]
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    /// Fill in every missing answer and validate the result.
    ///
    /// # Errors
    ///
    /// Fails on an invalid name or template selection, before anything touches the disk.
    pub fn collect(&mut self, given: Answers) -> Result<ProjectRequest> {
        let name = match given.name {
            Some(name) => name,
            None => self.required("Enter project name")?,
        };
        crate::request::validate_name(&name)?;

        let template = match given.template {
            Some(selection) => self.registry.select(&selection)?,
            None => self.choose_template()?,
        };

        let is_public = match given.is_public {
            Some(flag) => flag,
            None => self.confirm("Make remote repository public? (y/n)")?,
        };
        let use_env_setup = match given.use_env_setup {
            Some(flag) => flag,
            None => self.confirm("Set up virtual environment? (y/n)")?,
        };

        let mut builder = ProjectRequest::builder();
        builder
            .name(name)
            .template_key(template.name)
            .is_public(is_public)
            .use_env_setup(use_env_setup);

        if given.ask_credentials {
            builder.credentials(self.credentials()?);
        }

        builder.build()
    }

    /// The directory projects are created in: `given` for this run only, else the persisted
    /// value, else asked for once and persisted.
    ///
    /// # Errors
    ///
    /// Fails if the config can not be read or written, or no root is known in
    /// non-interactive mode.
    pub fn collect_root(&mut self, dirs: &KickoffDirs, given: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(root) = given {
            return Ok(root);
        }
        if let Some(root) = dirs.load_root()? {
            crate::trace!("Using persisted root {}", root.display());
            return Ok(root);
        }
        if !self.interactive {
            return Err(ScaffoldError::MissingField("root directory (run `kickoff init <DIR>`)".into()));
        }

        let fallback = std::env::current_dir()
            .map_err(ScaffoldError::fs("."))?
            .display()
            .to_string();
        let answer = self.with_default("Where should projects be created?", &fallback)?;
        let root = dirs.resolve_root(&answer);

        dirs.store_root(&root)?;
        crate::info!(
            "Saved {} as the project root in {}",
            root.display(),
            dirs.root_file().display()
        );

        Ok(root)
    }

    fn choose_template(&mut self) -> Result<&'static crate::registry::TemplateDefinition> {
        if !self.interactive {
            return Err(ScaffoldError::MissingField("template".into()));
        }

        self.prompter.show("Select project type:");
        for (i, key) in self.registry.list_keys().iter().enumerate() {
            self.prompter.show(&format!("  {}. {key}", i + 1));
        }

        let answer = self.prompter.ask("Type number")?;
        self.registry.select(&answer)
    }

    fn credentials(&mut self) -> Result<Credentials> {
        if !self.interactive {
            return Err(ScaffoldError::MissingField("credentials".into()));
        }

        let username = self.prompter.ask("Hosting username")?.trim().to_string();
        let token = self.prompter.ask_secret("Hosting token")?.trim().to_string();

        Ok(Credentials { username, token })
    }

    fn required(&mut self, message: &str) -> Result<String> {
        if !self.interactive {
            return Err(ScaffoldError::MissingField("project name".into()));
        }
        self.prompter.ask(message)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        if !self.interactive {
            return Ok(false);
        }
        Ok(is_affirmative(&self.with_default(message, "n")?))
    }

    fn with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let answer = self.prompter.ask(&format!("{message} [{default}]"))?;
        let answer = answer.trim();

        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }
}

use std::path::{Path, PathBuf};

use crate::{error::Result, process::ToolCommand};

/// Folder the isolated environment is created in, relative to the project.
pub const ENV_DIR: &str = "venv";

/// Creates an isolated language runtime inside a project.
pub trait EnvironmentProvisioner {
    /// Create the environment at `project/venv`.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the environment tool can not be run or fails.
    fn provision(&self, project: &Path) -> Result<()>;
}

/// `python3 -m venv`. The interpreter can be overridden with `KICKOFF_PYTHON`.
#[derive(Debug, Clone)]
pub struct PythonVenv {
    interpreter: PathBuf,
}

impl Default for PythonVenv {
    fn default() -> Self {
        PythonVenv {
            interpreter: std::env::var_os("KICKOFF_PYTHON")
                .map_or_else(|| PathBuf::from("python3"), PathBuf::from),
        }
    }
}

impl PythonVenv {
    #[must_use]
    pub fn with_interpreter(interpreter: impl Into<PathBuf>) -> Self {
        PythonVenv {
            interpreter: interpreter.into(),
        }
    }

    /// `<interpreter> -m venv <project>/venv`.
    #[must_use]
    pub fn command(&self, project: &Path) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.interpreter);
        cmd.args(["-m", "venv"]).arg(project.join(ENV_DIR));
        cmd
    }
}

impl EnvironmentProvisioner for PythonVenv {
    fn provision(&self, project: &Path) -> Result<()> {
        self.command(project).run()
    }
}

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use crate::error::{Result, ScaffoldError};

/// A blocking external command whose exit status is always checked.
pub struct ToolCommand {
    tool: String,
    cmd: Command,
}

impl ToolCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        Self {
            tool: program.to_string_lossy().into_owned(),
            cmd: Command::new(program),
        }
    }

    pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
        self.cmd.arg(arg);
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn current_dir(&mut self, dir: &Path) -> &mut Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Runs to completion, inheriting stdio.
    ///
    /// # Errors
    ///
    /// [`ScaffoldError::ToolUnavailable`] if the program can not be started,
    /// [`ScaffoldError::ExternalToolFailure`] on a non-zero exit.
    pub fn run(&mut self) -> Result<()> {
        crate::trace!("+ {}", self.format_command());

        let status = self
            .cmd
            .status()
            .map_err(|source| ScaffoldError::ToolUnavailable {
                tool: self.tool.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ScaffoldError::ExternalToolFailure {
                tool: self.tool.clone(),
                status,
            });
        }
        Ok(())
    }

    /// The command line as a shell would show it, for logs.
    #[must_use]
    pub fn format_command(&self) -> String {
        std::iter::once(self.cmd.get_program())
            .chain(self.cmd.get_args())
            .map(|part| {
                let part = part.to_string_lossy();
                if part.contains(char::is_whitespace) {
                    format!("'{part}'")
                } else {
                    part.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Whether `program` resolves on `PATH`.
#[must_use]
pub fn is_available(program: &str) -> bool {
    which::which(program).is_ok()
}

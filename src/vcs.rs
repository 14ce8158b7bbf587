//! Local version control and remote hosting for a freshly scaffolded project.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

use crate::{error::Result, process::ToolCommand, request::ProjectRequest};

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    #[must_use]
    pub fn from_public(is_public: bool) -> Self {
        if is_public {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

pub trait VersionControl {
    /// # Errors
    ///
    /// Returns an [`Err`] if the tool can not be run or fails.
    fn init(&self, repo: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an [`Err`] if the tool can not be run or fails.
    fn stage_all(&self, repo: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an [`Err`] if the tool can not be run or fails.
    fn commit(&self, repo: &Path, message: &str) -> Result<()>;
}

pub trait RemoteHostingClient {
    /// Create a remote repository named `name` from `source` and push to it.
    /// Authentication comes from the client's own session, never from arguments.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the tool can not be run or fails.
    fn create_and_push(&self, name: &str, visibility: Visibility, source: &Path) -> Result<()>;
}

/// The `git` command-line client.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    /// `git <args>` run inside `repo`.
    #[must_use]
    pub fn command<I, S>(repo: &Path, args: I) -> ToolCommand
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = ToolCommand::new("git");
        cmd.args(args).current_dir(repo);
        cmd
    }
}

impl VersionControl for GitCli {
    fn init(&self, repo: &Path) -> Result<()> {
        Self::command(repo, ["init"]).run()
    }

    fn stage_all(&self, repo: &Path) -> Result<()> {
        Self::command(repo, ["add", "."]).run()
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<()> {
        Self::command(repo, ["commit", "-m", message]).run()
    }
}

/// The GitHub `gh` command-line client.
#[derive(Debug, Clone, Copy, Default)]
pub struct GhCli;

impl GhCli {
    pub const PROGRAM: &'static str = "gh";

    /// `gh repo create` for `source`, adding it as `origin` and pushing.
    #[must_use]
    pub fn command(name: &str, visibility: Visibility, source: &Path) -> ToolCommand {
        let mut source_arg = OsString::from("--source=");
        source_arg.push(source);

        let mut cmd = ToolCommand::new(Self::PROGRAM);
        cmd.args(["repo", "create", name])
            .arg(format!("--{visibility}"))
            .arg(source_arg)
            .args(["--remote=origin", "--push"])
            .current_dir(source);
        cmd
    }
}

impl RemoteHostingClient for GhCli {
    fn create_and_push(&self, name: &str, visibility: Visibility, source: &Path) -> Result<()> {
        Self::command(name, visibility, source).run()
    }
}

/// What happened to an optional step of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Skipped(&'static str),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOutcome {
    pub local: StepOutcome,
    pub remote: StepOutcome,
}

/// Init, stage and commit locally, then create and push the remote if a client is given.
///
/// Failures are reported as warnings and stop the steps that depend on them; they never
/// abort the run.
pub fn initialize(
    path: &Path,
    request: &ProjectRequest,
    vcs: &dyn VersionControl,
    remote: Option<&dyn RemoteHostingClient>,
) -> RepositoryOutcome {
    crate::info!("Initializing repository in {}", path.display());

    let local = vcs
        .init(path)
        .and_then(|()| vcs.stage_all(path))
        .and_then(|()| vcs.commit(path, INITIAL_COMMIT_MESSAGE));

    let local = match local {
        Ok(()) => StepOutcome::Done,
        Err(e) => {
            crate::warn!("Local repository setup failed: {e}");
            return RepositoryOutcome {
                local: StepOutcome::Failed(e.to_string()),
                remote: StepOutcome::Skipped("local commit failed"),
            };
        }
    };

    let Some(remote) = remote else {
        return RepositoryOutcome {
            local,
            remote: StepOutcome::Skipped("no hosting client configured"),
        };
    };

    let visibility = Visibility::from_public(request.is_public());
    crate::info!(
        "Creating remote repository '{}' ({visibility})",
        request.name()
    );

    let remote = match remote.create_and_push(request.name(), visibility, path) {
        Ok(()) => StepOutcome::Done,
        Err(e) => {
            crate::warn!("Remote repository setup failed: {e}");
            StepOutcome::Failed(e.to_string())
        }
    };

    RepositoryOutcome { local, remote }
}

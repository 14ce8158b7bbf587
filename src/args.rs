pub use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(version, about = "Scaffold a new project from a built-in template")]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,

    /// Do not print the final error message
    #[clap(long, short, global = true)]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn no_errors(&self) -> bool {
        self.quiet
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    New(NewArgs),
    /// List the available templates
    List {
        /// Print only the template names, on one line
        #[clap(long, short)]
        short: bool,
    },
    /// Save the directory new projects are created in
    Init {
        /// Directory to create projects in
        root: PathBuf,
    },
    /// Show where configuration is read from
    ShowConfig,
}

#[derive(clap::Args, Debug, Default)]
pub struct NewArgs {
    /// Name of the project [prompted if missing]
    pub name: Option<String>,

    /// Template name or menu number [prompted if missing]
    #[clap(long, short)]
    pub template: Option<String>,

    /// Make the remote repository public
    #[clap(long)]
    pub public: bool,

    /// Make the remote repository private
    #[clap(long, conflicts_with = "public")]
    pub private: bool,

    /// Create a virtual environment in the project
    #[clap(long)]
    pub venv: bool,

    /// Do not create a virtual environment
    #[clap(long, conflicts_with = "venv")]
    pub no_venv: bool,

    /// Create the project in this directory instead of the saved root, for this run only
    #[clap(long)]
    pub root: Option<PathBuf>,

    /// Ask for hosting credentials and store them in the project's .env
    #[clap(long)]
    pub credentials: bool,

    /// Skip local repository setup (implies --no-remote)
    #[clap(long)]
    pub no_git: bool,

    /// Skip remote repository creation
    #[clap(long)]
    pub no_remote: bool,

    /// Never prompt; unanswered yes/no questions count as no
    #[clap(long, short)]
    pub yes: bool,
}

impl NewArgs {
    #[must_use]
    pub fn is_public(&self) -> Option<bool> {
        tri_state(self.public, self.private)
    }

    #[must_use]
    pub fn use_env_setup(&self) -> Option<bool> {
        tri_state(self.venv, self.no_venv)
    }
}

fn tri_state(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

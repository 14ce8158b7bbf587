pub mod args;
pub mod builder;
pub mod config;
pub mod error;
pub mod log;
pub mod process;
pub mod prompt;
pub mod provision;
pub mod registry;
pub mod request;
pub mod scaffold;
pub mod secrets;
pub mod vcs;

pub use error::{Result, ScaffoldError};
pub use registry::Registry;
pub use request::{Credentials, ProjectRequest};
pub use scaffold::{ScaffoldReport, Scaffolder};

use derive_builder::Builder;
use std::path::PathBuf;

use crate::{
    builder::StructureBuilder,
    error::{Result, ScaffoldError},
    provision::EnvironmentProvisioner,
    registry::{LauncherFolder, Registry},
    request::ProjectRequest,
    secrets::SecretStore,
    vcs::{self, RemoteHostingClient, RepositoryOutcome, StepOutcome, VersionControl},
};

/// Runs one scaffold: structure, then environment, then repository.
///
/// The root directory and every external collaborator are handed in; the scaffolder
/// reads no configuration of its own.
#[derive(Builder)]
#[builder(pattern = "owned", build_fn(error = "ScaffoldError"))]
pub struct Scaffolder<'a> {
    registry: &'a Registry,
    #[builder(setter(into))]
    root: PathBuf,
    #[builder(default)]
    env_template: Option<&'a str>,
    secrets: &'a dyn SecretStore,
    provisioner: &'a dyn EnvironmentProvisioner,
    /// No local repository is created when unset.
    #[builder(default, setter(strip_option))]
    vcs: Option<&'a dyn VersionControl>,
    /// No remote repository is created when unset.
    #[builder(default, setter(strip_option))]
    remote: Option<&'a dyn RemoteHostingClient>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub path: PathBuf,
    pub launcher_folder: Option<LauncherFolder>,
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub environment: StepOutcome,
    pub repository: RepositoryOutcome,
}

impl<'a> Scaffolder<'a> {
    #[must_use]
    pub fn builder() -> ScaffolderBuilder<'a> {
        ScaffolderBuilder::default()
    }

    /// # Errors
    ///
    /// Validation and filesystem errors abort the run. Environment and repository
    /// failures do not; they are recorded in the report.
    pub fn run(&self, request: &ProjectRequest) -> Result<ScaffoldReport> {
        crate::request::validate_name(request.name())?;
        let template = self.registry.lookup(request.template_key())?;

        let built = StructureBuilder::new(self.registry, &self.root, self.secrets)
            .env_template(self.env_template)
            .build(request)?;

        let environment = if request.use_env_setup() {
            crate::info!("Creating virtual environment");
            match self.provisioner.provision(&built.path) {
                Ok(()) => StepOutcome::Done,
                Err(e) => {
                    crate::warn!("Virtual environment setup failed: {e}");
                    StepOutcome::Failed(e.to_string())
                }
            }
        } else {
            StepOutcome::Skipped("not requested")
        };

        let repository = match self.vcs {
            Some(vcs) => vcs::initialize(&built.path, request, vcs, self.remote),
            None => RepositoryOutcome {
                local: StepOutcome::Skipped("version control disabled"),
                remote: StepOutcome::Skipped("version control disabled"),
            },
        };

        Ok(ScaffoldReport {
            path: built.path,
            launcher_folder: template.launcher_folder,
            created: built.created,
            skipped: built.skipped,
            environment,
            repository,
        })
    }
}

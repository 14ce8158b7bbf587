use std::io::Write;
use std::path::Path;

use crate::{
    error::{Result, ScaffoldError},
    request::Credentials,
};

/// Where hosting credentials end up for a project.
pub trait SecretStore {
    /// # Errors
    ///
    /// Returns an [`Err`] if the credentials can not be stored.
    fn store(&self, project: &Path, credentials: &Credentials) -> Result<()>;
}

/// Writes credentials to the project's `.env`, readable by the owner only.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvFileSecretStore;

impl EnvFileSecretStore {
    #[must_use]
    pub fn render(credentials: &Credentials) -> String {
        format!(
            "GITHUB_USERNAME={}\nGITHUB_TOKEN={}\n",
            credentials.username, credentials.token
        )
    }
}

impl SecretStore for EnvFileSecretStore {
    fn store(&self, project: &Path, credentials: &Credentials) -> Result<()> {
        let path = project.join(crate::builder::ENV_FILE);

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path).map_err(ScaffoldError::fs(&path))?;

        // `mode` only applies on creation; tighten a pre-existing file too.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(ScaffoldError::fs(&path))?;
        }

        file.write_all(Self::render(credentials).as_bytes())
            .map_err(ScaffoldError::fs(&path))?;

        crate::trace!("Stored credentials in {}", path.display());
        Ok(())
    }
}

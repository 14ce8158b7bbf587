use derive_builder::Builder;
use std::fmt;

use crate::error::{Result, ScaffoldError};

/// Hosting account details for the project's `.env`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Everything one scaffold run needs to know about the project. Immutable once built.
#[derive(Debug, Clone, Builder)]
#[builder(
    setter(into),
    build_fn(error = "ScaffoldError", validate = "Self::check")
)]
pub struct ProjectRequest {
    name: String,
    template_key: String,
    #[builder(default)]
    is_public: bool,
    #[builder(default)]
    use_env_setup: bool,
    #[builder(default, setter(strip_option))]
    credentials: Option<Credentials>,
}

impl ProjectRequest {
    #[must_use]
    pub fn builder() -> ProjectRequestBuilder {
        ProjectRequestBuilder::default()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn template_key(&self) -> &str {
        &self.template_key
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        self.is_public
    }

    #[must_use]
    pub fn use_env_setup(&self) -> bool {
        self.use_env_setup
    }

    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

impl ProjectRequestBuilder {
    fn check(&self) -> Result<()> {
        match self.name {
            Some(ref name) => validate_name(name),
            None => Ok(()),
        }
    }
}

/// A project name must be usable as a single path component.
///
/// # Errors
///
/// [`ScaffoldError::InvalidName`] describing the first problem found.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        "name is empty"
    } else if name != name.trim() {
        "name has leading or trailing whitespace"
    } else if name == "." || name == ".." {
        "name is a relative path component"
    } else if name.contains(['/', '\\']) {
        "name contains a path separator"
    } else if name.contains('\0') {
        "name contains a NUL byte"
    } else {
        return Ok(());
    };

    Err(ScaffoldError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

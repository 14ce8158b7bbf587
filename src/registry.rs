//! Built-in project templates.
//!
//! The table is fixed at compile time. Adding a template means editing [`TEMPLATES`].

use std::fmt;

use crate::error::{Result, ScaffoldError};

/// Reserved key of the entry set applied to every project.
pub const COMMON_KEY: &str = "common";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One file or folder a template materializes, relative to the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub name: &'static str,
    pub kind: EntryKind,
}

impl Entry {
    pub const fn dir(name: &'static str) -> Self {
        Entry {
            name,
            kind: EntryKind::Directory,
        }
    }

    pub const fn file(name: &'static str) -> Self {
        Entry {
            name,
            kind: EntryKind::File,
        }
    }
}

/// Where launcher scripts for a project belong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherFolder {
    /// Shared launchers location outside the project.
    General,
    /// The project's own `launchers/` folder.
    Own,
}

impl fmt::Display for LauncherFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LauncherFolder::General => write!(f, "general"),
            LauncherFolder::Own => write!(f, "own"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct TemplateDefinition {
    pub name: &'static str,
    pub entries: &'static [Entry],
    pub launcher_folder: Option<LauncherFolder>,
}

macro_rules! template {
    ($name:literal, [$($entry:expr),* $(,)?], $launcher:expr) => {
        TemplateDefinition {
            name: $name,
            entries: &[$($entry),*],
            launcher_folder: $launcher,
        }
    };
}

use Entry as E;
use LauncherFolder::{General, Own};

/// Every template in menu order, followed by the common set.
pub static TEMPLATES: &[TemplateDefinition] = &[
    template!(
        "python_tool",
        [E::dir("src"), E::dir("scripts"), E::dir("docs"), E::dir("tests"), E::dir("output"), E::dir("sync")],
        Some(General)
    ),
    template!(
        "shortcuts",
        [E::dir("shortcuts"), E::dir("media"), E::dir("docs"), E::dir("scripts"), E::dir("sync"), E::dir("notes")],
        Some(Own)
    ),
    template!(
        "raspberry_pi",
        [
            E::dir("configs"),
            E::dir("scripts"),
            E::dir("hardware"),
            E::dir("docs"),
            E::dir("tests"),
            E::dir("assets"),
            E::dir("logs"),
            E::dir("launchers"),
        ],
        Some(Own)
    ),
    template!(
        "automation_workflow",
        [E::dir("automations"), E::dir("api_test_data"), E::dir("logs"), E::dir("docs"), E::dir("assets")],
        Some(General)
    ),
    template!(
        "books",
        [
            E::dir("chapters"),
            E::dir("docs"),
            E::dir("notes"),
            E::dir("references"),
            E::dir("exports"),
            E::dir("markdown"),
            E::dir("icons"),
        ],
        Some(Own)
    ),
    template!(
        "writing_project",
        [E::dir("chapters"), E::dir("media"), E::dir("references"), E::dir("export"), E::dir("formatting"), E::dir("sync")],
        Some(General)
    ),
    template!(
        "wordpress_site",
        [E::dir("html"), E::dir("shortcodes"), E::dir("assets"), E::dir("plugins"), E::dir("wp_imports"), E::dir("docs")],
        Some(Own)
    ),
    template!(
        "financial_tool",
        [
            E::dir("input_data"),
            E::dir("cleaned_data"),
            E::dir("rules"),
            E::dir("scripts"),
            E::dir("exports"),
            E::dir("logs"),
            E::dir("documents"),
        ],
        Some(General)
    ),
    template!(
        "diy_product",
        [E::dir("designs"), E::dir("mockups"), E::dir("print_files"), E::dir("packaging"), E::dir("docs"), E::dir("promo")],
        Some(Own)
    ),
    template!(
        "video_project",
        [E::dir("scripts"), E::dir("recordings"), E::dir("assets"), E::dir("captions"), E::dir("edits"), E::dir("upload_ready")],
        Some(Own)
    ),
    template!(
        "common",
        [E::file(".gitignore"), E::file("README.md"), E::dir("sync"), E::dir("launchers")],
        None
    ),
];

/// Read-only view over a template table.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    templates: &'static [TemplateDefinition],
}

impl Default for Registry {
    fn default() -> Self {
        Registry {
            templates: TEMPLATES,
        }
    }
}

impl Registry {
    /// Registry over a custom table. The table must contain a [`COMMON_KEY`] entry.
    #[must_use]
    pub fn with_templates(templates: &'static [TemplateDefinition]) -> Self {
        Registry { templates }
    }

    /// Finds a selectable template by key. The reserved common set is not selectable.
    ///
    /// # Errors
    ///
    /// [`ScaffoldError::UnknownTemplate`] when no template has that key.
    pub fn lookup(&self, key: &str) -> Result<&'static TemplateDefinition> {
        self.selectable()
            .find(|t| t.name == key)
            .ok_or_else(|| ScaffoldError::UnknownTemplate {
                key: key.to_string(),
                available: self.list_keys().join(", "),
            })
    }

    /// Template keys in menu order, without the common set.
    #[must_use]
    pub fn list_keys(&self) -> Vec<&'static str> {
        self.selectable().map(|t| t.name).collect()
    }

    /// The entries every project receives.
    #[must_use]
    pub fn common(&self) -> &'static [Entry] {
        self.templates
            .iter()
            .find(|t| t.name == COMMON_KEY)
            .map(|t| t.entries)
            .unwrap_or(&[])
    }

    /// Resolves a menu answer: a 1-based index into [`Registry::list_keys`] or a key.
    ///
    /// # Errors
    ///
    /// [`ScaffoldError::InvalidTemplateSelection`] for an out of range index,
    /// [`ScaffoldError::UnknownTemplate`] for an unknown key.
    pub fn select(&self, input: &str) -> Result<&'static TemplateDefinition> {
        let input = input.trim();

        match input.parse::<usize>() {
            Ok(index) => {
                let count = self.selectable().count();
                index
                    .checked_sub(1)
                    .and_then(|i| self.selectable().nth(i))
                    .ok_or_else(|| ScaffoldError::InvalidTemplateSelection {
                        input: input.to_string(),
                        count,
                    })
            }
            Err(_) => self.lookup(input),
        }
    }

    fn selectable(&self) -> impl Iterator<Item = &'static TemplateDefinition> {
        self.templates.iter().filter(|t| t.name != COMMON_KEY)
    }
}

//! # Repository Records
//!
//! A [`Repository`] is one browsable project in the catalog. Records are built
//! when the catalog is loaded and are read-only afterwards: the only state that
//! changes while a view is computed is the last-activity time, and that lives
//! in [`crate::cache::ModTimeCache`] keyed by [`RepoId`] instead of on the
//! record itself.
//!
//! Most text fields are optional. A missing field never matches a search term
//! and sorts after every present value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Branch whose ref file is consulted when a repository names no default branch.
pub const FALLBACK_BRANCH: &str = "master";

/// Identity of a repository within a catalog.
///
/// Two records with the same storage path are the same repository as far as
/// timestamp memoization is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoId(PathBuf);

impl RepoId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Repository {
    /// Routing key used to build links to the repository.
    #[serde(default)]
    pub url: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Storage location on disk.
    pub path: PathBuf,
    #[serde(default, rename = "desc", alias = "description")]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    /// Group label. Blank and missing labels both mean "top level".
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default, rename = "defbranch", alias = "default-branch")]
    pub default_branch: Option<String>,
    #[serde(default, rename = "hide", alias = "hidden")]
    pub hidden: bool,
    #[serde(default, rename = "ignore", alias = "ignored")]
    pub ignored: bool,
}

impl Repository {
    /// Create a repository whose name and url are both `url`.
    pub fn new(url: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            url: Some(url.to_string()),
            name: Some(url.to_string()),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    pub fn with_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    pub fn with_default_branch(mut self, branch: &str) -> Self {
        self.default_branch = Some(branch.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    pub fn id(&self) -> RepoId {
        RepoId::new(&self.path)
    }

    /// The section label, or `None` when the section is missing or blank.
    pub fn section_label(&self) -> Option<&str> {
        self.section.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether the repository sits outside every section.
    pub fn is_top_level(&self) -> bool {
        self.section_label().is_none()
    }

    /// Branch whose ref file dates the repository.
    pub fn branch_for_modtime(&self) -> &str {
        self.default_branch.as_deref().unwrap_or(FALLBACK_BRANCH)
    }

    /// Name to show in listings, falling back to the url and then the path.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.url.clone())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

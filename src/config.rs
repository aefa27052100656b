//! # Deployment Settings and Catalog Files
//!
//! This module defines the deployment settings that shape every listing
//! ([`ViewConfig`]) and the on-disk catalog format that supplies them together
//! with the repository records ([`Catalog`]).
//!
//! ## Catalog format
//!
//! A catalog is YAML by default, or TOML when the file ends in `.toml`:
//!
//! ```yaml
//! settings:
//!   page-size: 25
//!   section-sort: paged
//!   repository-sort: age
//! repos:
//!   - url: tools/cgit
//!     path: /srv/git/cgit.git
//!     desc: A hyperfast web frontend for git
//!     owner: Jason
//!     section: tools
//! ```
//!
//! Every setting is optional and falls back to the value in
//! [`crate::defaults`]. Every repository needs a non-empty `path`.

use crate::defaults::{
    DEFAULT_AGEFILE, DEFAULT_MAX_DESC_LEN, DEFAULT_PAGE_SIZE, DEFAULT_ROOT_TITLE,
};
use crate::error::{Error, Result};
use crate::repository::Repository;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How sections organize the default listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionMode {
    /// Keep catalog order; headings still appear wherever the section changes.
    Off,
    /// Sort by section when the request names no sort field.
    #[default]
    Sort,
    /// Sort by section, and collapse large listings into one row per section.
    Paged,
}

impl SectionMode {
    pub fn sorts_by_section(self) -> bool {
        !matches!(self, SectionMode::Off)
    }

    pub fn allows_summary(self) -> bool {
        matches!(self, SectionMode::Paged)
    }
}

/// Tie-break applied inside a section before falling back to the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondarySort {
    #[default]
    Name,
    /// Most recently active first.
    Age,
}

/// Deployment settings for the repository index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ViewConfig {
    /// Rows per page.
    pub page_size: usize,
    pub section_sort: SectionMode,
    /// When false, text comparisons ignore ASCII case.
    pub case_sensitive_sort: bool,
    pub repository_sort: SecondarySort,
    /// Show the owner column.
    pub enable_index_owner: bool,
    /// Show the summary/log/tree links column.
    pub enable_index_links: bool,
    /// Characters of description shown before truncating with `...`.
    pub max_repodesc_len: usize,
    /// Age marker path, relative to each repository.
    pub agefile: PathBuf,
    pub root_title: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            section_sort: SectionMode::default(),
            case_sensitive_sort: true,
            repository_sort: SecondarySort::default(),
            enable_index_owner: true,
            enable_index_links: false,
            max_repodesc_len: DEFAULT_MAX_DESC_LEN,
            agefile: PathBuf::from(DEFAULT_AGEFILE),
            root_title: DEFAULT_ROOT_TITLE.to_string(),
        }
    }
}

impl ViewConfig {
    /// Columns in a repository row: name, description and idle, plus the
    /// optional owner and links columns.
    pub fn column_count(&self) -> usize {
        3 + usize::from(self.enable_index_owner) + usize::from(self.enable_index_links)
    }

    /// Reject settings the planner cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidSetting {
                key: "page-size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// A catalog file: deployment settings plus the repository records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub settings: ViewConfig,
    #[serde(default)]
    pub repos: Vec<Repository>,
}

impl Catalog {
    fn check(self) -> Result<Self> {
        self.settings.validate()?;
        if let Some(index) = self
            .repos
            .iter()
            .position(|repo| repo.path.as_os_str().is_empty())
        {
            return Err(Error::CatalogParse {
                message: format!("repository at index {} has an empty path", index),
                hint: Some("Every entry under 'repos' needs a 'path:'".to_string()),
            });
        }
        Ok(self)
    }
}

/// Parse a YAML catalog
pub fn parse_yaml(content: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_yaml::from_str(content)?;
    catalog.check()
}

/// Parse a TOML catalog
pub fn parse_toml(content: &str) -> Result<Catalog> {
    let catalog: Catalog = toml::from_str(content)?;
    catalog.check()
}

/// Load a catalog, choosing the format from the file extension
pub fn from_file(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_toml(&content),
        Some("yaml") | Some("yml") | None => parse_yaml(&content),
        Some(other) => Err(Error::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

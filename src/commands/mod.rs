//! # CLI Command Implementations
//!
//! Each subcommand of the `repolist` tool lives in its own file with:
//! - An `Args` struct deriving `clap::Args` for the command's options.
//! - An `execute` function taking the parsed `Args` and doing the work by
//!   calling into the `repolist` library.

use anyhow::Result;
use std::path::{Path, PathBuf};

use repolist::config::{self, Catalog};
use repolist::defaults::resolve_catalog_path;
use repolist::suggestions;

pub mod completions;
pub mod list;
pub mod validate;

/// Find the catalog file the command should read.
pub fn catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let working_dir = std::env::current_dir()?;
    Ok(resolve_catalog_path(explicit, &working_dir))
}

/// Load the catalog at `path`, turning failures into errors with hints.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(suggestions::catalog_not_found(path));
    }
    config::from_file(path).map_err(|e| suggestions::invalid_catalog(path, &e))
}

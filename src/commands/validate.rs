//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a catalog
//! file without listing it.
//!
//! ## Functionality
//!
//! - **Parsing**: loads the catalog and its settings, reporting syntax errors
//!   and invalid settings.
//! - **Statistics**: counts repositories, hidden and ignored entries, and
//!   distinct sections.
//! - **Warnings**: repositories sharing a path (they would share one activity
//!   time) and repositories without a url.
//!
//! Warnings only fail the command with `--strict`.

use anyhow::Result;
use clap::Args;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use repolist::config::Catalog;
use repolist::output::OutputStyle;

/// Check a catalog file for problems
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog file to validate.
    #[arg(short, long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Facts gathered from a parsed catalog.
#[derive(Debug, Default, PartialEq, Eq)]
struct CatalogReport {
    repositories: usize,
    hidden: usize,
    ignored: usize,
    sections: BTreeSet<String>,
    /// Paths listed more than once, with their counts.
    duplicate_paths: BTreeMap<PathBuf, usize>,
    /// Display names of repositories lacking a url.
    missing_urls: Vec<String>,
}

impl CatalogReport {
    fn from_catalog(catalog: &Catalog) -> Self {
        let mut report = CatalogReport {
            repositories: catalog.repos.len(),
            ..Default::default()
        };
        let mut paths: BTreeMap<&Path, usize> = BTreeMap::new();

        for repo in &catalog.repos {
            report.hidden += usize::from(repo.hidden);
            report.ignored += usize::from(repo.ignored);
            if let Some(label) = repo.section_label() {
                report.sections.insert(label.to_string());
            }
            if repo.url.as_deref().is_none_or(str::is_empty) {
                report.missing_urls.push(repo.display_name());
            }
            *paths.entry(repo.path.as_path()).or_default() += 1;
        }

        report.duplicate_paths = paths
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(path, count)| (path.to_path_buf(), count))
            .collect();
        report
    }

    fn warning_count(&self) -> usize {
        self.duplicate_paths.len() + self.missing_urls.len()
    }
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, style: OutputStyle) -> Result<()> {
    let path = super::catalog_path(args.catalog.as_deref())?;
    println!(
        "{} Validating catalog: {}",
        style.marker("🔍", "[SCAN]"),
        path.display()
    );

    let catalog = match super::load_catalog(&path) {
        Ok(catalog) => {
            println!("{} Catalog parsed successfully", style.marker("✅", "[OK]"));
            catalog
        }
        Err(e) => {
            println!("{} Catalog parsing failed", style.marker("❌", "[ERR]"));
            return Err(e);
        }
    };

    let report = CatalogReport::from_catalog(&catalog);
    println!("\n{} Catalog Summary:", style.marker("📊", "[INFO]"));
    println!("   Repositories: {}", report.repositories);
    println!("   Hidden: {}", report.hidden);
    println!("   Ignored: {}", report.ignored);
    println!("   Sections: {}", report.sections.len());
    println!("   Page size: {}", catalog.settings.page_size);

    let warn = style.marker("⚠️", "[WARN]");
    for (dup, count) in &report.duplicate_paths {
        println!("{} Path {} is listed {} times", warn, dup.display(), count);
    }
    for name in &report.missing_urls {
        println!("{} Repository {} has no url", warn, name);
    }

    let warnings = report.warning_count();
    if warnings > 0 && args.strict {
        println!(
            "\n{} Validation failed: {} warning(s) in strict mode",
            style.marker("❌", "[ERR]"),
            warnings
        );
        anyhow::bail!("Validation failed with {} warning(s)", warnings);
    }

    if warnings > 0 {
        println!(
            "\n{} Catalog is valid with {} warning(s)",
            style.marker("✅", "[OK]"),
            warnings
        );
    } else {
        println!("\n{} Catalog is valid", style.marker("✅", "[OK]"));
    }
    Ok(())
}

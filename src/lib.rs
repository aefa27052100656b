//! # Repository Index Views
//!
//! This library computes what a repository index page shows: which
//! repositories are visible for a request, in which order, grouped under which
//! section headings, and which page of them to render. It is used by the
//! `repolist` command-line tool but has no opinion about markup; rows are
//! handed to a [`render::RenderSink`] supplied by the caller.
//!
//! ## Quick Example
//!
//! ```
//! use repolist::config::{SectionMode, ViewConfig};
//! use repolist::filter::Query;
//! use repolist::modtime::{ModTimeResolver, NoModTimeSource};
//! use repolist::planner::{ViewOutcome, ViewPlanner};
//! use repolist::render::RowCollector;
//! use repolist::repository::Repository;
//!
//! let mut repos = vec![
//!     Repository::new("cgit", "/srv/git/cgit.git").with_section("web"),
//!     Repository::new("git", "/srv/git/git.git").with_section("core"),
//! ];
//! let config = ViewConfig {
//!     section_sort: SectionMode::Sort,
//!     ..ViewConfig::default()
//! };
//! let modtimes = ModTimeResolver::new(Box::new(NoModTimeSource));
//! let mut sink = RowCollector::new();
//!
//! let outcome = ViewPlanner::new(&config, &modtimes).plan(&mut repos, &Query::new(), &mut sink);
//!
//! assert!(matches!(outcome, ViewOutcome::Listing(_)));
//! assert_eq!(sink.labels(), ["# core", "git", "# web", "cgit"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Repositories (`repository`)**: the catalog records.
//! - **Activity times (`modtime`, `cache`)**: last-activity lookup with a
//!   fallback chain of on-disk sources and a shared memo.
//! - **Visibility (`filter`)**: hide/ignore flags, free-text search and url
//!   prefix matching.
//! - **Sort orders (`sort`)**: the named comparators behind `?s=`.
//! - **Sections (`section`)**: heading boundaries, nesting heuristic and the
//!   flat versus section-summary decision.
//! - **Planning (`planner`)**: the orchestrator producing one page of rows.
//! - **Paging (`pager`)**: page links for long listings.
//! - **Settings and catalogs (`config`, `defaults`)**: deployment settings and
//!   the YAML/TOML catalog format.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod error;
pub mod filter;
pub mod modtime;
pub mod output;
pub mod pager;
pub mod planner;
pub mod render;
pub mod repository;
pub mod section;
pub mod sort;
pub mod suggestions;

#[cfg(test)]
mod view_proptest;

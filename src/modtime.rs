//! # Repository Activity Times
//!
//! Resolves when a repository was last active. The lookup walks a fixed list of
//! sources and stops at the first one that yields a non-zero time:
//!
//! 1.  A time already memoized in the [`ModTimeCache`].
//! 2.  The age marker file (`agefile` setting, relative to the repository
//!     path), whose contents are parsed as a date.
//! 3.  The modification time of `refs/heads/<default branch>`.
//! 4.  The modification time of `packed-refs`.
//!
//! When every source comes up empty the result is time zero with
//! `found == false`. Zero is never memoized, so the next lookup tries the
//! sources again. A missing source is not an error.
//!
//! Reading the artifacts is delegated to a [`ModTimeSource`] so the resolution
//! order can be tested without touching the filesystem.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{trace, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::cache::{ModTimeCache, Timestamp};
use crate::defaults::DEFAULT_AGEFILE;
use crate::repository::Repository;

/// Access to the on-disk artifacts that date a repository.
pub trait ModTimeSource: Send + Sync {
    /// Contents of the age marker file, if it exists and can be read.
    fn age_marker(&self, repo: &Repository) -> Option<String>;

    /// Modification time of the ref file for `branch`.
    fn branch_ref_mtime(&self, repo: &Repository, branch: &str) -> Option<Timestamp>;

    /// Modification time of the packed-refs file.
    fn packed_refs_mtime(&self, repo: &Repository) -> Option<Timestamp>;
}

/// Reads the artifacts from the repository directory on disk.
#[derive(Debug, Clone)]
pub struct FsModTimeSource {
    agefile: PathBuf,
}

impl FsModTimeSource {
    /// `agefile` is resolved relative to each repository path.
    pub fn new(agefile: impl Into<PathBuf>) -> Self {
        Self {
            agefile: agefile.into(),
        }
    }
}

impl Default for FsModTimeSource {
    fn default() -> Self {
        Self::new(DEFAULT_AGEFILE)
    }
}

fn file_mtime(path: &Path) -> Option<Timestamp> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    let secs = modified.duration_since(UNIX_EPOCH).ok()?.as_secs();
    Timestamp::try_from(secs).ok()
}

impl ModTimeSource for FsModTimeSource {
    fn age_marker(&self, repo: &Repository) -> Option<String> {
        let path = repo.path.join(&self.agefile);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(err) => {
                warn!("Could not read age file {}: {}", path.display(), err);
                None
            }
        }
    }

    fn branch_ref_mtime(&self, repo: &Repository, branch: &str) -> Option<Timestamp> {
        file_mtime(&repo.path.join("refs").join("heads").join(branch))
    }

    fn packed_refs_mtime(&self, repo: &Repository) -> Option<Timestamp> {
        file_mtime(&repo.path.join("packed-refs"))
    }
}

/// A source with no artifacts; times come only from a pre-filled cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModTimeSource;

impl ModTimeSource for NoModTimeSource {
    fn age_marker(&self, _repo: &Repository) -> Option<String> {
        None
    }

    fn branch_ref_mtime(&self, _repo: &Repository, _branch: &str) -> Option<Timestamp> {
        None
    }

    fn packed_refs_mtime(&self, _repo: &Repository) -> Option<Timestamp> {
        None
    }
}

/// Outcome of a lookup. `time` is zero whenever `found` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModTime {
    pub time: Timestamp,
    pub found: bool,
}

impl ModTime {
    const UNRESOLVED: ModTime = ModTime {
        time: 0,
        found: false,
    };

    fn resolved(time: Timestamp) -> Self {
        Self { time, found: true }
    }
}

/// Resolves and memoizes repository activity times.
pub struct ModTimeResolver {
    source: Box<dyn ModTimeSource>,
    cache: ModTimeCache,
}

impl ModTimeResolver {
    /// Create a resolver with a fresh cache
    pub fn new(source: Box<dyn ModTimeSource>) -> Self {
        Self::with_cache(source, ModTimeCache::new())
    }

    /// Create a resolver backed by an existing, possibly shared, cache
    pub fn with_cache(source: Box<dyn ModTimeSource>, cache: ModTimeCache) -> Self {
        Self { source, cache }
    }

    /// Resolver reading the repository directories on disk
    pub fn filesystem(agefile: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FsModTimeSource::new(agefile)))
    }

    pub fn cache(&self) -> &ModTimeCache {
        &self.cache
    }

    /// Look up the activity time of `repo`.
    pub fn resolve(&self, repo: &Repository) -> ModTime {
        let id = repo.id();
        match self
            .cache
            .get_or_resolve(&id, || self.resolve_from_sources(repo))
        {
            Some(time) => ModTime::resolved(time),
            None => {
                trace!("No activity time found for {}", id);
                ModTime::UNRESOLVED
            }
        }
    }

    /// The activity time, with unresolved repositories at zero.
    pub fn time_or_zero(&self, repo: &Repository) -> Timestamp {
        self.resolve(repo).time
    }

    fn resolve_from_sources(&self, repo: &Repository) -> Option<Timestamp> {
        if let Some(contents) = self.source.age_marker(repo) {
            match parse_age_marker(&contents) {
                Some(time) if time != 0 => {
                    trace!("{}: age file gives {}", repo.path.display(), time);
                    return Some(time);
                }
                _ => trace!("{}: age file has no usable date", repo.path.display()),
            }
        }

        let branch = repo.branch_for_modtime();
        if let Some(time) = self.source.branch_ref_mtime(repo, branch) {
            trace!("{}: refs/heads/{} gives {}", repo.path.display(), branch, time);
            return Some(time);
        }

        if let Some(time) = self.source.packed_refs_mtime(repo) {
            trace!("{}: packed-refs gives {}", repo.path.display(), time);
            return Some(time);
        }

        None
    }
}

/// Parse the contents of an age marker file into epoch seconds.
///
/// Accepts raw epoch times (`@1700000000`, optionally followed by a zone),
/// RFC 2822, RFC 3339, git's default date format, ISO-like
/// `YYYY-MM-DD HH:MM:SS [+ZZZZ]`, and a bare `YYYY-MM-DD`. Dates without a
/// zone are read as UTC. Only the first line is considered.
pub fn parse_age_marker(contents: &str) -> Option<Timestamp> {
    let line = contents.lines().next()?.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(raw) = line.strip_prefix('@') {
        let secs = raw.split_whitespace().next()?;
        return secs.parse().ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(line) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(line) {
        return Some(dt.timestamp());
    }
    for format in ["%Y-%m-%d %H:%M:%S %z", "%a %b %e %H:%M:%S %Y %z"] {
        if let Ok(dt) = DateTime::parse_from_str(line, format) {
            return Some(dt.timestamp());
        }
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(line, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc().timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(line, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp());
    }

    None
}

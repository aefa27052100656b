//! # Sort Orders
//!
//! The repository index can be ordered by one of five named fields. Each name
//! maps to a [`SortField`], and each field to a total order over repositories:
//!
//! - `name`, `desc`, `owner`: text order on that field. Repositories without
//!   the field come last.
//! - `idle`: most recently active first; repositories with no known activity
//!   time count as time zero.
//! - `section`: section label first, then (with `repository-sort: age`) most
//!   recently active first, then name.
//!
//! Case sensitivity follows the `case-sensitive-sort` setting. Asking for a
//! field that does not exist leaves the catalog untouched and reports that
//! nothing was sorted.

use log::{debug, warn};
use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

use crate::config::SecondarySort;
use crate::modtime::ModTimeResolver;
use crate::repository::Repository;

/// A named sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Section,
    Name,
    Desc,
    Owner,
    Idle,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Section,
        SortField::Name,
        SortField::Desc,
        SortField::Owner,
        SortField::Idle,
    ];

    /// The name used in queries.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Section => "section",
            SortField::Name => "name",
            SortField::Desc => "desc",
            SortField::Owner => "owner",
            SortField::Idle => "idle",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a query names a field with no sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortField(pub String);

impl fmt::Display for UnknownSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort field '{}'", self.0)
    }
}

impl std::error::Error for UnknownSortField {}

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownSortField(s.to_string()))
    }
}

/// Everything a comparison may consult besides the two repositories.
pub struct SortContext<'a> {
    pub case_sensitive: bool,
    pub secondary: SecondarySort,
    pub modtimes: &'a ModTimeResolver,
}

impl SortContext<'_> {
    /// Compare optional text, with missing values last.
    pub fn compare_text(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) if self.case_sensitive => a.cmp(b),
            (Some(a), Some(b)) => a
                .bytes()
                .map(|c| c.to_ascii_lowercase())
                .cmp(b.bytes().map(|c| c.to_ascii_lowercase())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    fn most_recent_first(&self, a: &Repository, b: &Repository) -> Ordering {
        Reverse(self.modtimes.time_or_zero(a)).cmp(&Reverse(self.modtimes.time_or_zero(b)))
    }

    /// Order `a` and `b` by `field`.
    pub fn compare(&self, field: SortField, a: &Repository, b: &Repository) -> Ordering {
        match field {
            SortField::Name => self.compare_text(a.name.as_deref(), b.name.as_deref()),
            SortField::Desc => {
                self.compare_text(a.description.as_deref(), b.description.as_deref())
            }
            SortField::Owner => self.compare_text(a.owner.as_deref(), b.owner.as_deref()),
            SortField::Idle => self.most_recent_first(a, b),
            SortField::Section => self
                .compare_text(a.section.as_deref(), b.section.as_deref())
                .then_with(|| match self.secondary {
                    SecondarySort::Age => self.most_recent_first(a, b),
                    SecondarySort::Name => Ordering::Equal,
                })
                .then_with(|| self.compare_text(a.name.as_deref(), b.name.as_deref())),
        }
    }
}

/// Sort `repos` in place by `field`.
pub fn sort_by_field(repos: &mut [Repository], field: SortField, ctx: &SortContext<'_>) {
    debug!("Sorting {} repositories by {}", repos.len(), field);
    repos.sort_by(|a, b| ctx.compare(field, a, b));
}

/// Sort `repos` by the field called `name`.
///
/// Returns `false`, leaving `repos` untouched, when no such field exists.
pub fn sort_by_name(repos: &mut [Repository], name: &str, ctx: &SortContext<'_>) -> bool {
    match name.parse::<SortField>() {
        Ok(field) => {
            sort_by_field(repos, field, ctx);
            true
        }
        Err(err) => {
            warn!("Ignoring sort request: {}", err);
            false
        }
    }
}

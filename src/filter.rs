//! Deciding which repositories take part in a listing.

use serde::Serialize;

use crate::repository::Repository;

/// Request parameters that shape a listing. Read-only during planning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Free text matched case-insensitively against url, name, description
    /// and owner.
    pub search: Option<String>,
    /// Case-sensitive prefix the url must start with.
    pub url_prefix: Option<String>,
    /// Requested sort field; unknown names leave the catalog order alone.
    pub sort: Option<String>,
    /// Number of rows to skip.
    pub offset: usize,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_url_prefix(mut self, prefix: &str) -> Self {
        self.url_prefix = Some(prefix.to_string());
        self
    }

    pub fn with_sort(mut self, field: &str) -> Self {
        self.sort = Some(field.to_string());
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_search(repo: &Repository, search: Option<&str>) -> bool {
    let Some(search) = search else {
        return true;
    };
    let needle = search.to_lowercase();
    [&repo.url, &repo.name, &repo.description, &repo.owner]
        .into_iter()
        .flatten()
        .any(|field| contains_ignore_case(field, &needle))
}

fn matches_url_prefix(repo: &Repository, prefix: Option<&str>) -> bool {
    match prefix {
        None => true,
        Some(prefix) => repo.url.as_deref().is_some_and(|url| url.starts_with(prefix)),
    }
}

/// Whether `repo` appears in the listing for `query`.
///
/// Hidden and ignored repositories never appear. Otherwise the repository must
/// match the search text (if any) and the url prefix (if any).
pub fn is_visible(repo: &Repository, query: &Query) -> bool {
    if repo.hidden || repo.ignored {
        return false;
    }
    matches_search(repo, query.search.as_deref())
        && matches_url_prefix(repo, query.url_prefix.as_deref())
}

/// Whether at least one repository in `repos` is visible for `query`.
pub fn any_visible(repos: &[Repository], query: &Query) -> bool {
    repos.iter().any(|repo| is_visible(repo, query))
}

//! # Error Suggestions
//!
//! Errors shown by the CLI should say what went wrong and how to fix it.
//! These helpers build `anyhow` errors carrying `hint:` lines.

use std::path::Path;

use crate::defaults::{CATALOG_ENV, DEFAULT_CATALOG_FILENAME};
use crate::filter::Query;
use crate::sort::SortField;

/// The catalog file does not exist.
pub fn catalog_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Catalog file not found: {path}\n\n\
         hint: Create a {DEFAULT_CATALOG_FILENAME} listing your repositories\n\
         hint: Use -c/--catalog to specify a different path\n\
         hint: Set the {CATALOG_ENV} environment variable",
        path = path.display()
    )
}

/// The catalog file exists but could not be loaded.
pub fn invalid_catalog(path: &Path, error: &crate::error::Error) -> anyhow::Error {
    anyhow::anyhow!(
        "Failed to load catalog from {path}: {error}\n\n\
         hint: Run 'repolist validate --catalog {path}' for details",
        path = path.display()
    )
}

/// Nothing is visible for the request.
pub fn no_repositories_found(query: &Query) -> anyhow::Error {
    let mut hints = Vec::new();
    if let Some(search) = &query.search {
        hints.push(format!("hint: No repository matches the search '{search}'"));
    }
    if let Some(prefix) = &query.url_prefix {
        hints.push(format!("hint: No repository url starts with '{prefix}'"));
    }
    if hints.is_empty() {
        hints.push("hint: Every repository in the catalog is hidden or ignored".to_string());
    }
    anyhow::anyhow!("No repositories found\n\n{}", hints.join("\n"))
}

/// Hint for a sort field that does not exist, or `None` if it does.
pub fn unknown_sort_field(field: &str) -> Option<String> {
    if field.parse::<SortField>().is_ok() {
        return None;
    }
    let names: Vec<&str> = SortField::ALL.iter().map(|f| f.as_str()).collect();
    let did_you_mean = closest_match(field, &names)
        .map(|name| format!(" Did you mean '{name}'?"))
        .unwrap_or_default();
    Some(format!(
        "Unknown sort field '{field}', keeping catalog order.{did_you_mean}\n\
         hint: Valid sort fields are: {}",
        names.join(", ")
    ))
}

/// Closest candidate within two edits of `input`.
fn closest_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let input = input.to_ascii_lowercase();
    candidates
        .iter()
        .map(|&candidate| (candidate, levenshtein(&input, candidate)))
        .filter(|&(_, distance)| distance <= 2 && distance < input.len())
        .min_by_key(|&(_, distance)| distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance over chars, keeping a single row.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_not_found_includes_hints() {
        let message = catalog_not_found(Path::new("/etc/repolist.yaml")).to_string();
        assert!(message.contains("Catalog file not found"));
        assert!(message.contains("/etc/repolist.yaml"));
        assert!(message.contains("-c/--catalog"));
        assert!(message.contains("REPOLIST_CATALOG"));
    }

    #[test]
    fn test_invalid_catalog_mentions_validate() {
        let error = crate::error::Error::UnsupportedFormat {
            extension: "ini".to_string(),
        };
        let message = invalid_catalog(Path::new("x.ini"), &error).to_string();
        assert!(message.contains("Unsupported catalog format: ini"));
        assert!(message.contains("repolist validate"));
    }

    #[test]
    fn test_no_repositories_found_hints() {
        let message = no_repositories_found(&Query::new()).to_string();
        assert!(message.starts_with("No repositories found"));
        assert!(message.contains("hidden or ignored"));

        let message = no_repositories_found(&Query::new().with_search("kernel")).to_string();
        assert!(message.contains("'kernel'"));
        assert!(!message.contains("hidden or ignored"));
    }

    #[test]
    fn test_unknown_sort_field_suggestions() {
        assert_eq!(unknown_sort_field("idle"), None);

        let hint = unknown_sort_field("nmae").unwrap();
        assert!(hint.contains("Did you mean 'name'?"));
        assert!(hint.contains("section, name, desc, owner, idle"));

        let hint = unknown_sort_field("popularity").unwrap();
        assert!(!hint.contains("Did you mean"));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("owner", "owner"), 0);
        assert_eq!(levenshtein("idel", "idle"), 2);
    }
}

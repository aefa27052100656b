//! # Section Boundaries and Rendering Mode
//!
//! Repositories sharing a section label are grouped under one heading. A new
//! heading starts wherever the label changes, so the grouping only looks right
//! when the listing is sorted by section; an explicitly sorted listing (any
//! `?s=` field) gets no headings at all.
//!
//! The boundary rule lives in [`is_section_boundary`] and is applied through
//! [`SectionTracker`] by both the counting pass below and the emission pass in
//! [`crate::planner`], so the two can never disagree on where sections start.
//!
//! Counting also estimates how many sections are nested inside the previous
//! one: a label that begins with the previous label (`lib` then `lib/sub`)
//! counts as nested. This is a textual heuristic. It only makes sense on a
//! listing sorted by section and assumes labels share a separator convention.

use log::debug;
use serde::Serialize;

use crate::repository::Repository;

/// Whether `repo` opens a new section after a section labelled `last`.
///
/// Never true in a sorted listing or for a repository without a non-blank
/// section.
pub fn is_section_boundary(last: Option<&str>, repo: &Repository, sorted: bool) -> bool {
    if sorted {
        return false;
    }
    match repo.section_label() {
        Some(label) => last != Some(label),
        None => false,
    }
}

/// Whether `current` looks like a sub-section of `previous`.
pub fn is_nested(previous: &str, current: &str) -> bool {
    current.starts_with(previous)
}

/// Remembers the last heading emitted during one walk.
#[derive(Debug, Clone, Default)]
pub struct SectionTracker<'a> {
    last: Option<&'a str>,
}

impl<'a> SectionTracker<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label of the most recent heading.
    pub fn last(&self) -> Option<&'a str> {
        self.last
    }

    /// Apply the boundary rule to `repo`, moving past it if it opens a section.
    pub fn observe(&mut self, repo: &'a Repository, sorted: bool) -> bool {
        if !is_section_boundary(self.last, repo, sorted) {
            return false;
        }
        self.last = repo.section_label();
        true
    }
}

/// Totals gathered by the counting pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionCounts {
    /// Visible repositories walked.
    pub hits: usize,
    /// Section headings that would be emitted.
    pub sections: usize,
    /// Headings whose label extends the previous heading's label.
    pub nested: usize,
}

impl SectionCounts {
    /// Sections that are not nested in their predecessor.
    pub fn top_level_sections(&self) -> usize {
        self.sections.saturating_sub(self.nested)
    }
}

/// Walk the visible repositories once and count sections.
pub fn count_sections<'a, I>(visible: I, sorted: bool) -> SectionCounts
where
    I: IntoIterator<Item = &'a Repository>,
{
    let mut tracker = SectionTracker::new();
    let mut counts = SectionCounts::default();

    for repo in visible {
        let previous = tracker.last();
        if tracker.observe(repo, sorted) {
            counts.sections += 1;
            if let (Some(previous), Some(current)) = (previous, repo.section_label()) {
                if is_nested(previous, current) {
                    counts.nested += 1;
                }
            }
        }
        counts.hits += 1;
    }

    counts
}

/// How the emission pass lays out rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Every visible repository gets a row, with headings at section starts.
    #[default]
    Flat,
    /// Only section headings and top-level repositories get rows.
    SectionSummary,
}

/// Pick the rendering mode.
///
/// Summary mode needs all three: the deployment allows it, the listing does
/// not fit on one page, and more than one top-level section would show.
pub fn choose_mode(summary_allowed: bool, counts: &SectionCounts, page_size: usize) -> RenderMode {
    let mode = if summary_allowed && counts.hits > page_size && counts.top_level_sections() > 1 {
        RenderMode::SectionSummary
    } else {
        RenderMode::Flat
    };
    debug!(
        "Render mode {:?}: {} hits, {} sections ({} nested), page size {}",
        mode, counts.hits, counts.sections, counts.nested, page_size
    );
    mode
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, section: Option<&str>) -> Repository {
        let repo = Repository::new(name, format!("/srv/{name}.git"));
        match section {
            Some(section) => repo.with_section(section),
            None => repo,
        }
    }

    #[test]
    fn test_boundary_rules() {
        let lib = repo("a", Some("lib"));
        assert!(is_section_boundary(None, &lib, false));
        assert!(is_section_boundary(Some("tools"), &lib, false));
        assert!(!is_section_boundary(Some("lib"), &lib, false));
        assert!(!is_section_boundary(None, &lib, true));
        assert!(!is_section_boundary(None, &repo("b", None), false));
        assert!(!is_section_boundary(None, &repo("c", Some("")), false));
    }

    #[test]
    fn test_tracker_only_moves_on_boundaries() {
        let repos = [
            repo("a", Some("lib")),
            repo("b", Some("lib")),
            repo("c", None),
            repo("d", Some("tools")),
        ];
        let mut tracker = SectionTracker::new();
        let emitted: Vec<bool> = repos.iter().map(|r| tracker.observe(r, false)).collect();
        assert_eq!(emitted, [true, false, false, true]);
        assert_eq!(tracker.last(), Some("tools"));
    }

    #[test]
    fn test_top_level_repo_does_not_reset_section() {
        let repos = [repo("a", Some("lib")), repo("b", None), repo("c", Some("lib"))];
        let counts = count_sections(&repos, false);
        assert_eq!(counts.sections, 1);
        assert_eq!(counts.hits, 3);
    }

    #[test]
    fn test_three_sections() {
        let repos = [
            repo("a1", Some("A")),
            repo("a2", Some("A")),
            repo("b1", Some("B")),
            repo("c1", Some("C")),
            repo("c2", Some("C")),
            repo("c3", Some("C")),
            repo("c4", Some("C")),
        ];
        let counts = count_sections(&repos, false);
        assert_eq!(
            counts,
            SectionCounts {
                hits: 7,
                sections: 3,
                nested: 0
            }
        );
        assert_eq!(choose_mode(true, &counts, 5), RenderMode::SectionSummary);
        assert_eq!(choose_mode(true, &counts, 7), RenderMode::Flat);
        assert_eq!(choose_mode(false, &counts, 5), RenderMode::Flat);
    }

    #[test]
    fn test_nested_detection() {
        let repos = [
            repo("a", Some("lib")),
            repo("b", Some("lib/sub")),
            repo("c", Some("tools")),
        ];
        let counts = count_sections(&repos, false);
        assert_eq!(counts.sections, 3);
        assert_eq!(counts.nested, 1);
        assert_eq!(counts.top_level_sections(), 2);
    }

    #[test]
    fn test_nested_sections_can_force_flat_mode() {
        let repos = [
            repo("a", Some("lib")),
            repo("b", Some("lib/sub")),
            repo("c", Some("lib/sub/deep")),
        ];
        let counts = count_sections(&repos, false);
        assert_eq!(counts.top_level_sections(), 1);
        assert_eq!(choose_mode(true, &counts, 1), RenderMode::Flat);
    }

    #[test]
    fn test_sorted_listing_has_no_sections() {
        let repos = [repo("a", Some("lib")), repo("b", Some("tools"))];
        let counts = count_sections(&repos, true);
        assert_eq!(counts.sections, 0);
        assert_eq!(counts.hits, 2);
    }

    #[test]
    fn test_is_nested() {
        assert!(is_nested("lib", "lib/sub"));
        assert!(!is_nested("lib/sub", "tools"));
        assert!(!is_nested("tools", "lib"));
    }
}

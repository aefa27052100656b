//! Property-based tests for visibility, sorting and paging.
//!
//! These tests use proptest to generate random catalogs and verify that
//! invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::config::{SecondarySort, SectionMode, ViewConfig};
    use crate::filter::{is_visible, Query};
    use crate::modtime::{ModTimeResolver, NoModTimeSource};
    use crate::pager::{build_pages, page_count};
    use crate::planner::{ViewOutcome, ViewPlanner};
    use crate::render::{Row, RowCollector};
    use crate::repository::Repository;
    use crate::sort::{sort_by_field, SortContext, SortField};
    use proptest::prelude::*;

    fn section_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            Just(Some("lib".to_string())),
            Just(Some("lib/sub".to_string())),
            Just(Some("tools".to_string())),
        ]
    }

    fn repo_strategy() -> impl Strategy<Value = Repository> {
        (
            "[a-zA-Z]{1,8}",
            section_strategy(),
            proptest::option::of("[a-z ]{0,12}"),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(name, section, description, hidden, ignored)| {
                let mut repo = Repository::new(&name, format!("/srv/git/{}.git", name));
                repo.section = section;
                repo.description = description;
                repo.hidden = hidden;
                repo.ignored = ignored;
                repo
            })
    }

    // ============================================================================
    // Visibility
    // ============================================================================

    proptest! {
        /// Property: hidden and ignored repositories never appear, whatever the query
        #[test]
        fn hidden_or_ignored_never_visible(
            mut repo in repo_strategy(),
            hide in any::<bool>(),
            search in proptest::option::of("[a-z]{0,3}"),
        ) {
            if hide {
                repo.hidden = true;
            } else {
                repo.ignored = true;
            }
            let mut query = Query::new();
            query.search = search;
            prop_assert!(!is_visible(&repo, &query));
        }

        /// Property: a search matching only the owner, in any case, keeps the repository
        #[test]
        fn owner_match_ignores_case(owner in "[a-z]{3,10}", upper in any::<bool>()) {
            let repo = Repository::new("zzz", "/srv/git/zzz.git").with_owner(&owner);
            let needle = if upper { owner.to_uppercase() } else { owner.clone() };
            prop_assert!(is_visible(&repo, &Query::new().with_search(&needle)));
        }
    }

    // ============================================================================
    // Sorting
    // ============================================================================

    proptest! {
        /// Property: sorting twice by the same field changes nothing the second time
        #[test]
        fn sort_is_idempotent(
            mut repos in prop::collection::vec(repo_strategy(), 0..30),
            case_sensitive in any::<bool>(),
            field_index in 0usize..4,
        ) {
            let field = [SortField::Section, SortField::Name, SortField::Desc, SortField::Owner][field_index];
            let modtimes = ModTimeResolver::new(Box::new(NoModTimeSource));
            let ctx = SortContext {
                case_sensitive,
                secondary: SecondarySort::Name,
                modtimes: &modtimes,
            };
            sort_by_field(&mut repos, field, &ctx);
            let once = repos.clone();
            sort_by_field(&mut repos, field, &ctx);
            prop_assert_eq!(once, repos);
        }
    }

    // ============================================================================
    // Paging
    // ============================================================================

    proptest! {
        /// Property: the pager offers ceil(hits / page size) pages, exactly one current
        #[test]
        fn page_count_is_ceiling(hits in 0usize..10_000, size in 1usize..200) {
            let expected = (hits + size - 1) / size;
            prop_assert_eq!(page_count(hits, size), expected);

            let pages = build_pages(hits, size, 0);
            prop_assert_eq!(pages.len(), expected);
            if expected > 0 {
                prop_assert_eq!(pages.iter().filter(|page| page.current).count(), 1);
            }
        }

        /// Property: a flat page never holds more repositories than the page size,
        /// and hits count every visible repository
        #[test]
        fn flat_page_respects_window(
            mut repos in prop::collection::vec(repo_strategy(), 0..40),
            page_size in 1usize..10,
            offset in 0usize..50,
            sectioned in any::<bool>(),
        ) {
            let config = ViewConfig {
                page_size,
                section_sort: if sectioned { SectionMode::Sort } else { SectionMode::Off },
                ..ViewConfig::default()
            };
            let query = Query::new().with_offset(offset);
            let expected_visible = repos.iter().filter(|repo| is_visible(repo, &query)).count();

            let modtimes = ModTimeResolver::new(Box::new(NoModTimeSource));
            let mut sink = RowCollector::new();
            let outcome = ViewPlanner::new(&config, &modtimes).plan(&mut repos, &query, &mut sink);

            match outcome {
                ViewOutcome::NotFound => prop_assert_eq!(expected_visible, 0),
                ViewOutcome::Listing(summary) => {
                    prop_assert_eq!(summary.hits, expected_visible);
                    prop_assert_eq!(summary.visible, expected_visible);
                    prop_assert_eq!(summary.rendered, sink.rows.len());

                    let repo_rows = sink
                        .rows
                        .iter()
                        .filter(|row| matches!(row, Row::Repository { .. }))
                        .count();
                    let expected_rows = expected_visible.saturating_sub(offset).min(page_size);
                    prop_assert_eq!(repo_rows, expected_rows);
                }
            }
        }
    }
}

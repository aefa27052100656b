//! Benchmarks for planning index pages over a large catalog.
//!
//! Activity times come from a pre-filled cache so the numbers reflect
//! sorting, sectioning and the page walk rather than disk access.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use repolist::cache::ModTimeCache;
use repolist::config::{SecondarySort, SectionMode, ViewConfig};
use repolist::filter::Query;
use repolist::modtime::{ModTimeResolver, NoModTimeSource};
use repolist::planner::ViewPlanner;
use repolist::render::RowCollector;
use repolist::repository::Repository;

/// Creates a catalog of 5000 repositories spread over 40 sections, with a
/// tenth of them at top level and a few hidden.
fn create_catalog() -> Vec<Repository> {
    (0..5000)
        .map(|i| {
            let url = format!("group{}/repo{:04}", i % 40, i);
            let mut repo = Repository::new(&url, format!("/srv/git/repo{}.git", i))
                .with_description(&format!("Repository number {}", i))
                .with_owner(if i % 3 == 0 { "alice" } else { "bob" });
            if i % 10 != 0 {
                repo = repo.with_section(&format!("group{}", i % 40));
            }
            if i % 97 == 0 {
                repo = repo.hidden();
            }
            repo
        })
        .collect()
}

fn prefilled_resolver(repos: &[Repository]) -> ModTimeResolver {
    let cache = ModTimeCache::new();
    for (i, repo) in repos.iter().enumerate() {
        cache.insert(repo.id(), 1_600_000_000 + (i as i64 * 7919) % 86_400_000);
    }
    ModTimeResolver::with_cache(Box::new(NoModTimeSource), cache)
}

fn bench_plan(c: &mut Criterion, name: &str, config: ViewConfig, query: Query) {
    let catalog = create_catalog();
    let modtimes = prefilled_resolver(&catalog);
    let planner = ViewPlanner::new(&config, &modtimes);

    c.bench_function(name, |b| {
        b.iter(|| {
            let mut repos = catalog.clone();
            let mut sink = RowCollector::new();
            black_box(planner.plan(&mut repos, black_box(&query), &mut sink))
        })
    });
}

fn bench_flat_sections(c: &mut Criterion) {
    let config = ViewConfig {
        section_sort: SectionMode::Sort,
        ..ViewConfig::default()
    };
    bench_plan(c, "plan_flat_by_section", config, Query::new().with_offset(2500));
}

fn bench_section_summary(c: &mut Criterion) {
    let config = ViewConfig {
        section_sort: SectionMode::Paged,
        repository_sort: SecondarySort::Age,
        ..ViewConfig::default()
    };
    bench_plan(c, "plan_section_summary_by_age", config, Query::new());
}

fn bench_search_and_idle_sort(c: &mut Criterion) {
    let config = ViewConfig {
        case_sensitive_sort: false,
        ..ViewConfig::default()
    };
    let query = Query::new().with_search("ALICE").with_sort("idle");
    bench_plan(c, "plan_search_idle_sort", config, query);
}

criterion_group!(
    benches,
    bench_flat_sections,
    bench_section_summary,
    bench_search_and_idle_sort
);
criterion_main!(benches);

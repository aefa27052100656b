//! # View Planner
//!
//! Turns a catalog, a request and the deployment settings into the rows of one
//! page of the repository index. A single call runs these stages in order:
//!
//! 1.  **Filtering**: bail out with [`ViewOutcome::NotFound`] when no
//!     repository is visible at all. Visibility is otherwise evaluated lazily
//!     during each walk; sorting moves hidden repositories too.
//! 2.  **Sorting**: apply the requested sort field, or sort by section when the
//!     deployment organizes by section and the request names no field.
//! 3.  **Mode selection**: with section paging enabled, count sections and
//!     choose between a flat listing and a section summary.
//! 4.  **Emitting**: walk the visible repositories and hand the rows inside the
//!     page window to the [`RenderSink`]. Rows outside the window are counted
//!     but never rendered.
//! 5.  **Done**: report the totals the pager needs.
//!
//! An offset past the end is not an error; it simply renders nothing.

use log::debug;
use serde::Serialize;

use crate::config::ViewConfig;
use crate::filter::{any_visible, is_visible, Query};
use crate::modtime::ModTimeResolver;
use crate::pager::{build_pages, PageLink};
use crate::render::RenderSink;
use crate::repository::Repository;
use crate::section::{choose_mode, count_sections, RenderMode, SectionCounts, SectionTracker};
use crate::sort::{sort_by_field, sort_by_name, SortContext, SortField};

/// Totals of a rendered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    pub mode: RenderMode,
    /// The request's sort field was applied.
    pub sorted: bool,
    /// Paginated entries: visible repositories in flat mode, headings plus
    /// top-level repositories in summary mode.
    pub hits: usize,
    /// Visible repositories, regardless of mode or window.
    pub visible: usize,
    /// Rows handed to the sink on this page, headings included.
    pub rendered: usize,
    pub columns: usize,
    /// Present when section paging was considered.
    pub sections: Option<SectionCounts>,
}

impl ViewSummary {
    /// Whether the listing spans more than one page.
    pub fn needs_pager(&self, page_size: usize) -> bool {
        self.hits > page_size
    }

    /// Pager links, or nothing when everything fits on one page.
    pub fn pages(&self, page_size: usize, current_offset: usize) -> Vec<PageLink> {
        if !self.needs_pager(page_size) {
            return Vec::new();
        }
        build_pages(self.hits, page_size, current_offset)
    }
}

/// Result of planning a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ViewOutcome {
    /// No repository is visible; show a "not found" page instead of a table.
    NotFound,
    /// A listing was produced, possibly with an empty page.
    Listing(ViewSummary),
}

impl ViewOutcome {
    pub fn summary(&self) -> Option<&ViewSummary> {
        match self {
            ViewOutcome::NotFound => None,
            ViewOutcome::Listing(summary) => Some(summary),
        }
    }
}

/// Rows per page and the index of the first one.
#[derive(Debug, Clone, Copy)]
struct PageWindow {
    offset: usize,
    size: usize,
}

impl PageWindow {
    /// `position` is 1-based.
    fn contains(&self, position: usize) -> bool {
        position > self.offset && position <= self.offset.saturating_add(self.size)
    }
}

/// Per-walk accumulator.
struct WalkState<'a> {
    hits: usize,
    visible: usize,
    rendered: usize,
    sections: SectionTracker<'a>,
    sorted: bool,
    columns: usize,
}

impl WalkState<'_> {
    fn new(sorted: bool, columns: usize) -> Self {
        Self {
            hits: 0,
            visible: 0,
            rendered: 0,
            sections: SectionTracker::new(),
            sorted,
            columns,
        }
    }
}

/// Plans repository index pages for one deployment.
pub struct ViewPlanner<'a> {
    config: &'a ViewConfig,
    modtimes: &'a ModTimeResolver,
}

impl<'a> ViewPlanner<'a> {
    pub fn new(config: &'a ViewConfig, modtimes: &'a ModTimeResolver) -> Self {
        Self { config, modtimes }
    }

    /// Plan one page of the index for `query`, emitting its rows into `sink`.
    ///
    /// `repos` is reordered in place by whatever sort applies.
    pub fn plan<S>(&self, repos: &mut [Repository], query: &Query, sink: &mut S) -> ViewOutcome
    where
        S: RenderSink + ?Sized,
    {
        if !any_visible(repos, query) {
            debug!("No visible repositories among {}", repos.len());
            return ViewOutcome::NotFound;
        }

        let (sorted, summary_allowed) = self.sort(repos, query);
        let repos: &[Repository] = repos;

        let sections = summary_allowed.then(|| {
            count_sections(repos.iter().filter(|repo| is_visible(repo, query)), sorted)
        });
        let mode = match &sections {
            Some(counts) => choose_mode(true, counts, self.config.page_size),
            None => RenderMode::Flat,
        };

        let window = PageWindow {
            offset: query.offset,
            size: self.config.page_size,
        };
        let mut state = WalkState::new(sorted, self.config.column_count());
        let visible = repos.iter().filter(|repo| is_visible(repo, query));
        match mode {
            RenderMode::Flat => emit_flat(visible, window, &mut state, sink),
            RenderMode::SectionSummary => emit_summary(visible, window, &mut state, sink),
        }

        debug!(
            "Planned {:?} listing: {} hits, {} visible, {} rows rendered at offset {}",
            mode, state.hits, state.visible, state.rendered, query.offset
        );

        ViewOutcome::Listing(ViewSummary {
            mode,
            sorted,
            hits: state.hits,
            visible: state.visible,
            rendered: state.rendered,
            columns: state.columns,
            sections,
        })
    }

    /// Returns whether the request's sort applied, and whether section
    /// summaries may be used.
    fn sort(&self, repos: &mut [Repository], query: &Query) -> (bool, bool) {
        let ctx = SortContext {
            case_sensitive: self.config.case_sensitive_sort,
            secondary: self.config.repository_sort,
            modtimes: self.modtimes,
        };

        if let Some(field) = query.sort.as_deref() {
            return (sort_by_name(repos, field, &ctx), false);
        }
        if self.config.section_sort.sorts_by_section() {
            sort_by_field(repos, SortField::Section, &ctx);
            return (false, self.config.section_sort.allows_summary());
        }
        (false, false)
    }
}

fn emit_flat<'a, I, S>(visible: I, window: PageWindow, state: &mut WalkState<'a>, sink: &mut S)
where
    I: Iterator<Item = &'a Repository>,
    S: RenderSink + ?Sized,
{
    for repo in visible {
        state.visible += 1;
        state.hits += 1;
        if !window.contains(state.hits) {
            continue;
        }

        // Headings are tracked per page so each page starts with one.
        if state.sections.observe(repo, state.sorted) {
            if let Some(label) = repo.section_label() {
                sink.render_section(label, state.columns);
                state.rendered += 1;
            }
        }
        sink.render_repository(repo, state.sorted);
        state.rendered += 1;
    }
}

fn emit_summary<'a, I, S>(visible: I, window: PageWindow, state: &mut WalkState<'a>, sink: &mut S)
where
    I: Iterator<Item = &'a Repository>,
    S: RenderSink + ?Sized,
{
    for repo in visible {
        state.visible += 1;
        let heading = state.sections.observe(repo, state.sorted);
        let top_level = repo.is_top_level();
        if !heading && !top_level {
            continue;
        }

        state.hits += 1;
        if !window.contains(state.hits) {
            continue;
        }

        if top_level {
            sink.render_repository(repo, state.sorted);
        } else if let Some(label) = repo.section_label() {
            sink.render_section(label, state.columns);
        }
        state.rendered += 1;
    }
}

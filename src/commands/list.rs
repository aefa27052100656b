//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which prints one page of the
//! repository index for a catalog.
//!
//! ## Functionality
//!
//! - **Filtering**: `--search` and `--url` narrow the listing the same way the
//!   `q` and `url` request parameters do.
//! - **Sorting**: `--sort` picks a named order; without it the catalog's
//!   section settings apply.
//! - **Paging**: `--offset` and `--page-size` select the window, and a pager
//!   line is printed when the listing spans several pages.
//! - **Formats**: an aligned text table, or a JSON document for scripting.
//!
//! This command is read-only. Activity times are read from each repository's
//! age file and refs on disk.

use anyhow::Result;
use chrono::Utc;
use clap::{Args, ValueEnum};
use console::{measure_text_width, pad_str, Alignment};
use serde::Serialize;
use std::path::PathBuf;

use repolist::cache::Timestamp;
use repolist::config::ViewConfig;
use repolist::filter::Query;
use repolist::modtime::ModTimeResolver;
use repolist::output::OutputStyle;
use repolist::pager::PageLink;
use repolist::planner::{ViewOutcome, ViewPlanner, ViewSummary};
use repolist::render::{
    format_age, header_columns, truncate_description, HeaderColumn, RenderSink, Row,
    RowCollector, RowLevel,
};
use repolist::repository::Repository;
use repolist::section::RenderMode;
use repolist::suggestions;

/// Show one page of the repository index
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Catalog file listing the repositories.
    ///
    /// Defaults to `REPOLIST_CATALOG`, then `./repolist.yaml`, then
    /// `repolist/repolist.yaml` in the user configuration directory.
    #[arg(short, long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Only show repositories whose url, name, description or owner contains
    /// this text (case-insensitive).
    #[arg(short = 'q', long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Only show repositories whose url starts with this prefix.
    #[arg(long = "url", value_name = "PREFIX")]
    pub url_prefix: Option<String>,

    /// Sort by field: section, name, desc, owner or idle.
    #[arg(short, long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Number of entries to skip.
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub offset: usize,

    /// Entries per page, overriding the catalog's `page-size`.
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output formats for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned table with section headings
    #[default]
    Text,
    /// Machine-readable JSON document
    Json,
}

impl ListArgs {
    fn query(&self) -> Query {
        Query {
            search: self.search.clone(),
            url_prefix: self.url_prefix.clone(),
            sort: self.sort.clone(),
            offset: self.offset,
        }
    }
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, style: OutputStyle) -> Result<()> {
    let path = super::catalog_path(args.catalog.as_deref())?;
    let catalog = super::load_catalog(&path)?;

    let mut settings = catalog.settings;
    if let Some(size) = args.page_size {
        settings.page_size = size;
        settings.validate()?;
    }

    let query = args.query();
    if let Some(hint) = query.sort.as_deref().and_then(suggestions::unknown_sort_field) {
        eprintln!("{} {}", style.marker("⚠️", "[WARN]"), hint);
    }

    let modtimes = ModTimeResolver::filesystem(settings.agefile.clone());
    let planner = ViewPlanner::new(&settings, &modtimes);
    let mut repos = catalog.repos;

    match args.format {
        OutputFormat::Text => {
            let now = Utc::now().timestamp();
            let mut sink = TextTable::new(&settings, &modtimes, style, now);
            let outcome = planner.plan(&mut repos, &query, &mut sink);
            let summary = into_listing(outcome, &query)?;
            print!("{}", sink.finish(&summary, &query));
        }
        OutputFormat::Json => {
            let mut sink = RowCollector::new();
            let outcome = planner.plan(&mut repos, &query, &mut sink);
            let summary = into_listing(outcome, &query)?;
            let document = JsonListing {
                title: &settings.root_title,
                mode: summary.mode,
                sorted: summary.sorted,
                hits: summary.hits,
                visible: summary.visible,
                columns: summary.columns,
                header: header_columns(&settings),
                rows: sink.rows,
                pages: summary
                    .pages(settings.page_size, query.offset)
                    .iter()
                    .map(|page| JsonPage::new(page, &query))
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}

fn into_listing(outcome: ViewOutcome, query: &Query) -> Result<ViewSummary> {
    match outcome {
        ViewOutcome::NotFound => Err(suggestions::no_repositories_found(query)),
        ViewOutcome::Listing(summary) => Ok(summary),
    }
}

#[derive(Serialize)]
struct JsonListing<'a> {
    title: &'a str,
    mode: RenderMode,
    sorted: bool,
    hits: usize,
    visible: usize,
    columns: usize,
    header: Vec<HeaderColumn>,
    rows: Vec<Row>,
    pages: Vec<JsonPage>,
}

/// A pager link with everything a front end needs to render it.
#[derive(Serialize)]
struct JsonPage {
    #[serde(flatten)]
    link: PageLink,
    label: String,
    title: String,
    query: String,
}

impl JsonPage {
    fn new(link: &PageLink, query: &Query) -> Self {
        Self {
            label: link.label(),
            title: link.title(),
            query: link.query_string(query),
            link: link.clone(),
        }
    }
}

enum Line {
    Heading(String),
    Cells(Vec<String>),
}

/// Sink that lays rows out as an aligned text table.
struct TextTable<'a> {
    config: &'a ViewConfig,
    modtimes: &'a ModTimeResolver,
    style: OutputStyle,
    now: Timestamp,
    lines: Vec<Line>,
}

impl<'a> TextTable<'a> {
    fn new(
        config: &'a ViewConfig,
        modtimes: &'a ModTimeResolver,
        style: OutputStyle,
        now: Timestamp,
    ) -> Self {
        Self {
            config,
            modtimes,
            style,
            now,
            lines: Vec::new(),
        }
    }

    fn idle(&self, repo: &Repository) -> String {
        let modtime = self.modtimes.resolve(repo);
        if modtime.found {
            self.style.dim(&format_age(modtime.time, self.now))
        } else {
            String::new()
        }
    }

    /// Render the title, header, collected rows and pager.
    fn finish(self, summary: &ViewSummary, query: &Query) -> String {
        let header: Vec<String> = header_columns(self.config)
            .iter()
            .map(|column| self.style.header(column.title))
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|cell| measure_text_width(cell)).collect();
        for line in &self.lines {
            if let Line::Cells(cells) = line {
                for (width, cell) in widths.iter_mut().zip(cells) {
                    *width = (*width).max(measure_text_width(cell));
                }
            }
        }

        let layout = |cells: &[String]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| pad_str(cell, width, Alignment::Left, None).into_owned())
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        let mut out = String::new();
        out.push_str(&self.style.heading(&self.config.root_title));
        out.push_str("\n\n");
        out.push_str(&layout(&header));
        out.push('\n');
        for line in &self.lines {
            match line {
                Line::Heading(label) => out.push_str(label),
                Line::Cells(cells) => out.push_str(&layout(cells)),
            }
            out.push('\n');
        }

        let pages = summary.pages(self.config.page_size, query.offset);
        if !pages.is_empty() {
            let labels: Vec<String> = pages
                .iter()
                .map(|page| {
                    if page.current {
                        self.style.current_page(&page.label())
                    } else {
                        page.label()
                    }
                })
                .collect();
            out.push('\n');
            out.push_str(&labels.join(" "));
            out.push('\n');
        }
        out
    }
}

impl RenderSink for TextTable<'_> {
    fn render_repository(&mut self, repo: &Repository, sorted: bool) {
        let name = match RowLevel::of(repo, sorted) {
            RowLevel::SubLevel => format!("  {}", repo.display_name()),
            RowLevel::TopLevel => repo.display_name(),
        };
        let description = repo.description.as_deref().unwrap_or_default();

        let mut cells = vec![
            name,
            truncate_description(description, self.config.max_repodesc_len),
        ];
        if self.config.enable_index_owner {
            cells.push(repo.owner.clone().unwrap_or_default());
        }
        cells.push(self.idle(repo));
        if self.config.enable_index_links {
            cells.push("summary log tree".to_string());
        }
        self.lines.push(Line::Cells(cells));
    }

    fn render_section(&mut self, label: &str, _columns: usize) {
        self.lines.push(Line::Heading(self.style.heading(label)));
    }
}

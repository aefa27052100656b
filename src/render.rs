//! # Rendering Seam
//!
//! The planner does not produce markup. It calls a [`RenderSink`] once per row,
//! in display order, and only for rows inside the requested page. Front ends
//! implement the sink; [`RowCollector`] is a sink that simply records rows.
//!
//! This module also carries the small display helpers every front end needs:
//! the header columns, relative idle times, and description truncation.

use serde::Serialize;

use crate::cache::Timestamp;
use crate::config::ViewConfig;
use crate::repository::Repository;
use crate::sort::SortField;

/// Receives rows from the planner.
pub trait RenderSink {
    /// Emit one repository row. `sorted` is true when the listing was sorted
    /// by an explicit request.
    fn render_repository(&mut self, repo: &Repository, sorted: bool);

    /// Emit a section heading spanning `columns` columns.
    fn render_section(&mut self, label: &str, columns: usize);
}

/// Indentation level of a repository row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowLevel {
    TopLevel,
    /// Listed under a section heading.
    SubLevel,
}

impl RowLevel {
    pub fn of(repo: &Repository, sorted: bool) -> Self {
        if !sorted && !repo.is_top_level() {
            RowLevel::SubLevel
        } else {
            RowLevel::TopLevel
        }
    }
}

/// A row as handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Row {
    Repository { repo: Repository, level: RowLevel },
    Section { label: String, columns: usize },
}

/// Sink that keeps every row it is given.
#[derive(Debug, Clone, Default)]
pub struct RowCollector {
    pub rows: Vec<Row>,
}

impl RowCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels of the collected rows: repository names and `# section` headings.
    pub fn labels(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| match row {
                Row::Repository { repo, .. } => repo.display_name(),
                Row::Section { label, .. } => format!("# {}", label),
            })
            .collect()
    }
}

impl RenderSink for RowCollector {
    fn render_repository(&mut self, repo: &Repository, sorted: bool) {
        self.rows.push(Row::Repository {
            repo: repo.clone(),
            level: RowLevel::of(repo, sorted),
        });
    }

    fn render_section(&mut self, label: &str, columns: usize) {
        self.rows.push(Row::Section {
            label: label.to_string(),
            columns,
        });
    }
}

/// A column in the listing header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderColumn {
    pub title: &'static str,
    /// Field requested when the title is clicked; `None` for fixed columns.
    pub sort: Option<SortField>,
}

/// Header columns for `config`, in display order.
pub fn header_columns(config: &ViewConfig) -> Vec<HeaderColumn> {
    let mut columns = vec![
        HeaderColumn {
            title: "Name",
            sort: Some(SortField::Name),
        },
        HeaderColumn {
            title: "Description",
            sort: Some(SortField::Desc),
        },
    ];
    if config.enable_index_owner {
        columns.push(HeaderColumn {
            title: "Owner",
            sort: Some(SortField::Owner),
        });
    }
    columns.push(HeaderColumn {
        title: "Idle",
        sort: Some(SortField::Idle),
    });
    if config.enable_index_links {
        columns.push(HeaderColumn {
            title: "Links",
            sort: None,
        });
    }
    columns
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const YEAR: i64 = 365 * DAY;
const MONTH: f64 = YEAR as f64 / 12.0;

/// Relative age of `time` as seen at `now`, e.g. `3 days`.
///
/// Each unit is used once the age exceeds twice that unit. Future times read
/// as `0 secs`.
pub fn format_age(time: Timestamp, now: Timestamp) -> String {
    let secs = (now - time).max(0);
    let (value, unit) = if secs > YEAR * 2 {
        (secs as f64 / YEAR as f64, "years")
    } else if secs as f64 > MONTH * 2.0 {
        (secs as f64 / MONTH, "months")
    } else if secs > WEEK * 2 {
        (secs as f64 / WEEK as f64, "weeks")
    } else if secs > DAY * 2 {
        (secs as f64 / DAY as f64, "days")
    } else if secs > HOUR * 2 {
        (secs as f64 / HOUR as f64, "hours")
    } else if secs > MINUTE * 2 {
        (secs as f64 / MINUTE as f64, "min")
    } else {
        (secs as f64, "secs")
    };
    format!("{:.0} {}", value, unit)
}

/// Cut `text` to `max_chars` characters, marking the cut with `...`.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

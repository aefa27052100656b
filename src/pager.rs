//! Page navigation for long listings.

use serde::Serialize;

use crate::filter::Query;

/// One link in the pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    /// 1-based page number.
    pub number: usize,
    /// Row offset to request for this page.
    pub offset: usize,
    /// Whether this is the page being shown.
    pub current: bool,
}

impl PageLink {
    /// Link text, e.g. `[2]`.
    pub fn label(&self) -> String {
        format!("[{}]", self.number)
    }

    /// Link tooltip, e.g. `Page 2`.
    pub fn title(&self) -> String {
        format!("Page {}", self.number)
    }

    /// Query string for the link, carrying the search and sort along.
    pub fn query_string(&self, query: &Query) -> String {
        let mut params = Vec::new();
        if let Some(search) = &query.search {
            params.push(format!("q={}", urlencoding::encode(search)));
        }
        if let Some(sort) = &query.sort {
            params.push(format!("s={}", urlencoding::encode(sort)));
        }
        if self.offset > 0 {
            params.push(format!("ofs={}", self.offset));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Number of pages needed for `total_hits` rows.
pub fn page_count(total_hits: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_hits.div_ceil(page_size)
}

/// Build one link per page, marking the page whose offset is `current_offset`.
///
/// Callers normally only show a pager when `total_hits > page_size`.
pub fn build_pages(total_hits: usize, page_size: usize, current_offset: usize) -> Vec<PageLink> {
    (0..page_count(total_hits, page_size))
        .map(|index| {
            let offset = index * page_size;
            PageLink {
                number: index + 1,
                offset,
                current: offset == current_offset,
            }
        })
        .collect()
}

//! Derivation pipeline
//!
//! Pure functions turning the raw collection plus [`ViewState`] into the
//! [`ListView`] handed to the presentation layer. No I/O, no locking.
//!
//! Order of operations:
//! 1. filter by search text, then by status
//! 2. count pages
//! 3. slice the current page
//! 4. sort the slice
//! 5. resolve header columns

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;
use shared_types::RequestKind;

use crate::domain::entities::Request;
use crate::domain::value_objects::{
    Column, PageSize, Selection, SortDescriptor, SortDirection, StatusFilter, ViewState,
};

/// Everything the presentation layer needs to draw one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub kind: RequestKind,
    pub items: Vec<Request>,
    pub header_columns: Vec<Column>,
    pub page: usize,
    pub page_count: usize,
    pub rows_per_page: PageSize,
    pub total_count: usize,
    pub filtered_count: usize,
    pub sort: SortDescriptor,
    pub selection: Selection,
    pub transaction_pending: bool,
}

/// Case-insensitive substring match against the title only.
pub fn matches_search(request: &Request, needle_lower: &str) -> bool {
    needle_lower.is_empty() || request.title.to_lowercase().contains(needle_lower)
}

/// Apply search text, then status filter. Preserves input order.
pub fn filter_requests(
    requests: &[Request],
    search_text: &str,
    status_filter: &StatusFilter,
) -> Vec<Request> {
    let needle = search_text.to_lowercase();
    requests
        .iter()
        .filter(|r| matches_search(r, &needle))
        .filter(|r| status_filter.matches(r.status))
        .cloned()
        .collect()
}

/// Number of pages for `len` rows; never less than one.
pub fn page_count(len: usize, rows_per_page: usize) -> usize {
    len.div_ceil(rows_per_page.max(1)).max(1)
}

/// Rows on a 1-based page. Out-of-range pages yield an empty slice; page 0
/// reads as page 1.
pub fn page_slice<T: Clone>(items: &[T], page: usize, rows_per_page: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(rows_per_page);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(rows_per_page).min(items.len());
    items[start..end].to_vec()
}

/// Natural ordering of two requests on one column.
///
/// Ids compare as their displayed string, so `IR-10` sorts before `IR-2`.
pub fn compare_by(a: &Request, b: &Request, column: Column) -> Ordering {
    match column {
        Column::Id => a.id.to_string().cmp(&b.id.to_string()),
        Column::Title => a.title.cmp(&b.title),
        Column::Description => a.description.cmp(&b.description),
        Column::Status => a.status.cmp(&b.status),
        Column::Votes => a.votes.cmp(&b.votes),
        Column::RaisedBy => a.raised_by.to_checksum().cmp(&b.raised_by.to_checksum()),
        Column::Actions => Ordering::Equal,
    }
}

/// Stable in-place sort of one page.
pub fn sort_page(items: &mut [Request], sort: SortDescriptor) {
    items.sort_by(|a, b| {
        let ord = compare_by(a, b, sort.column);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Visible headers in canonical order.
pub fn header_columns(visible: &BTreeSet<Column>) -> Vec<Column> {
    if visible.len() == Column::ALL.len() {
        return Column::ALL.to_vec();
    }
    Column::ALL
        .into_iter()
        .filter(|c| visible.contains(c))
        .collect()
}

/// Run the whole pipeline.
pub fn derive_view(
    kind: RequestKind,
    raw: &[Request],
    state: &ViewState,
    transaction_pending: bool,
) -> ListView {
    let rows = state.rows_per_page.rows();
    let filtered = filter_requests(raw, &state.search_text, &state.status_filter);
    let mut items = page_slice(&filtered, state.page, rows);
    sort_page(&mut items, state.sort);

    ListView {
        kind,
        items,
        header_columns: header_columns(&state.visible_columns),
        page: state.page.max(1),
        page_count: page_count(filtered.len(), rows),
        rows_per_page: state.rows_per_page,
        total_count: raw.len(),
        filtered_count: filtered.len(),
        sort: state.sort,
        selection: state.selection.clone(),
        transaction_pending,
    }
}

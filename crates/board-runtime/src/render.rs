//! Plain-text rendering of a [`ListView`].

use std::fmt::Write as _;

use eb_01_request_list::{Column, ListView, Request, SortDirection};
use shared_types::RequestKind;

const DESCRIPTION_WIDTH: usize = 48;

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn short_address(checksummed: &str) -> String {
    if checksummed.len() <= 12 {
        return checksummed.to_string();
    }
    format!(
        "{}...{}",
        &checksummed[..6],
        &checksummed[checksummed.len() - 4..]
    )
}

/// Text of one cell.
pub fn cell(request: &Request, column: Column) -> String {
    match column {
        Column::Id => request.id.to_string(),
        Column::Title => request.title.clone(),
        Column::Description => truncate(&request.description, DESCRIPTION_WIDTH),
        Column::Status => format!(
            "{} ({})",
            request.status.label(),
            request.status.color().as_str()
        ),
        Column::Votes => request.votes.to_string(),
        Column::RaisedBy => short_address(&request.raised_by.to_checksum()),
        Column::Actions => "upvote | status-N".to_string(),
    }
}

fn empty_message(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Integration => "No Integrations found",
        RequestKind::ProblemReport => "No Problem Reports found",
    }
}

/// Aligned table followed by a paging footer.
pub fn render_table(view: &ListView) -> String {
    let columns = &view.header_columns;
    let rows: Vec<Vec<String>> = view
        .items
        .iter()
        .map(|request| columns.iter().map(|c| cell(request, *c)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.name().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total {} {}s",
        view.total_count,
        view.kind.label()
    );

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(text, width)| {
                let pad = width.saturating_sub(text.chars().count());
                format!("{text}{}", " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    out.push_str(&line(columns.iter().map(|c| c.name().to_string()).collect()));
    out.push('\n');
    out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    out.push('\n');

    if rows.is_empty() {
        out.push_str(empty_message(view.kind));
        out.push('\n');
    }
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }

    let direction = match view.sort.direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    let _ = write!(
        out,
        "page {}/{} | {} matching | {} per page | sorted by {} {}",
        view.page,
        view.page_count,
        view.filtered_count,
        view.rows_per_page,
        view.sort.column.uid(),
        direction
    );
    if view.transaction_pending {
        out.push_str(" | transaction pending");
    }
    out.push('\n');
    out
}

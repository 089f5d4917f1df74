//! Plain-text rendering of decoded response tables.
//!
//! Presentation layer over the codec, for the CLI's inspect mode: the
//! decoded header is used verbatim as display column headers, `Submitted At`
//! cells are reformatted into a human-readable date, empty cells render as
//! `-`, and embedded line breaks are shown escaped so every record stays on
//! one display line. None of this feeds back into encoding.

use crate::csv::Table;
use crate::export::{parse_submitted_at, SUBMITTED_AT_COLUMN};

/// Display format for `Submitted At` cells, e.g. `Jan 15, 2024 10:30 AM`.
const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y %I:%M %p";

/// Formats a `Submitted At` cell for display.
///
/// Returns the original string unchanged when it does not parse as a
/// timestamp, so malformed data still renders rather than erroring.
#[must_use]
pub fn format_submitted_at(value: &str) -> String {
    match parse_submitted_at(value) {
        Some(dt) => dt.format(DISPLAY_DATE_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Renders a table as an aligned plain-text grid.
///
/// The [`Table::empty`] "no data" value renders as a short placeholder line.
#[must_use]
pub fn render_table(table: &Table) -> String {
    if !table.has_header() {
        return "(no data)\n".to_string();
    }

    let header: Vec<String> = table.header().to_vec();

    let mut display_rows: Vec<Vec<String>> = Vec::with_capacity(table.len());
    for record in table.records() {
        let cells = record
            .iter()
            .map(|(column, cell)| display_cell(column, cell))
            .collect();
        display_rows.push(cells);
    }

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &display_rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("-+-");
        }
        out.push_str(&"-".repeat(*width));
    }
    out.push('\n');
    for row in &display_rows {
        push_row(&mut out, row, &widths);
    }

    out
}

fn display_cell(column: &str, cell: &str) -> String {
    if column == SUBMITTED_AT_COLUMN {
        return format_submitted_at(cell);
    }
    if cell.is_empty() {
        return "-".to_string();
    }
    cell.replace('\r', "\\r").replace('\n', "\\n")
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        out.push_str(cell);
        let pad = widths[i].saturating_sub(cell.chars().count());
        if i + 1 < cells.len() {
            out.push_str(&" ".repeat(pad));
        }
    }
    out.push('\n');
}

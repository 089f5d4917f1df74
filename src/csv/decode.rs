//! CSV decoding for response tables.
//!
//! The decoder scans the whole input as a single token stream, character by
//! character, tracking a quoted/unquoted state. It must never pre-split the
//! text on newlines: a newline inside an open quoted field is cell content,
//! not a row separator, and a line split before tokenizing would sever such
//! rows.
//!
//! Decoding is deliberately lenient about row shape. Short rows are padded
//! with empty cells and long rows are truncated against the header, so a
//! partially corrupted export still loads. The only structural failure is a
//! quoted field left open at end of input.

use crate::csv::table::{RowAdjustment, Table};
use crate::error::ResponseExportError;

/// Counters for the repairs the decoder applied.
///
/// Returned by [`decode_with_stats`] for callers that surface repair
/// information to users (the normalizer and the CLI). A fully well-formed
/// input produces all-zero stats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    /// Data rows that had fewer cells than the header and were padded.
    pub padded_rows: u64,
    /// Data rows that had more cells than the header and were truncated.
    pub truncated_rows: u64,
    /// Blank rows (a single empty unquoted field) that were skipped.
    pub skipped_blank_rows: u64,
}

impl DecodeStats {
    /// Whether any repair was applied.
    #[must_use]
    pub fn any_repairs(&self) -> bool {
        self.padded_rows > 0 || self.truncated_rows > 0
    }
}

/// One tokenized row, before header/record assignment.
///
/// Exposed crate-internally so the validator can report per-row issues the
/// lenient decoder repairs silently.
pub(crate) struct RawRow {
    pub(crate) cells: Vec<String>,
    /// Whether any quote character appeared in the row. A quoted empty cell
    /// (`""`) is a real row, not a blank line.
    pub(crate) saw_quote: bool,
    /// 1-indexed physical line the row started on.
    pub(crate) start_line: u64,
}

impl RawRow {
    pub(crate) fn is_blank(&self) -> bool {
        self.cells.len() == 1 && self.cells[0].is_empty() && !self.saw_quote
    }
}

/// Tokenizes CSV text into raw rows without assembling a table.
pub(crate) fn raw_rows(text: &str) -> Result<Vec<RawRow>, ResponseExportError> {
    tokenize(text)
}

/// Decodes CSV text into a [`Table`].
///
/// The first decoded row becomes the header; every subsequent row becomes a
/// record with cells mapped to header columns by position. Empty or
/// whitespace-only input yields [`Table::empty`] — the "no data" result, not
/// an error. Callers detect it via [`Table::has_header`].
///
/// Row repair is silent here; use [`decode_with_stats`] to observe it.
///
/// # Errors
///
/// - [`ResponseExportError::MalformedCsv`] when a quoted field is still open
///   at end of input.
/// - [`ResponseExportError::InvalidTable`] when the header row contains
///   duplicate column names, which a keyed table cannot represent.
///
/// # Example
///
/// ```
/// use response_export::csv::decode;
///
/// let table = decode("A,B\n1,\"x,y\"\n").unwrap();
/// assert_eq!(table.header(), ["A", "B"]);
/// assert_eq!(table.get(0, "B"), Some("x,y"));
/// ```
pub fn decode(text: &str) -> Result<Table, ResponseExportError> {
    decode_with_stats(text).map(|(table, _)| table)
}

/// Decodes CSV text, also reporting the repairs that were applied.
///
/// See [`decode`] for the decoding rules and error conditions.
pub fn decode_with_stats(text: &str) -> Result<(Table, DecodeStats), ResponseExportError> {
    if text.trim().is_empty() {
        return Ok((Table::empty(), DecodeStats::default()));
    }

    let rows = tokenize(text)?;
    assemble(rows)
}

/// Scans the whole input into raw rows.
///
/// State machine per the quoting rules:
/// - `"` toggles quoted mode, except that `""` while inside quotes emits one
///   literal quote and stays quoted.
/// - `,` ends a field only outside quotes.
/// - `\n` outside quotes ends a row; `\r` outside quotes is treated as line
///   termination too (an immediately following `\n` is consumed with it),
///   for interoperability with spreadsheet output. Inside quotes both are
///   cell content.
/// - End of input flushes the pending field and row, even if empty.
fn tokenize(text: &str) -> Result<Vec<RawRow>, ResponseExportError> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut cells: Vec<String> = Vec::new();
    let mut in_quotes = false;
    let mut saw_quote = false;
    let mut line: u64 = 1;
    let mut row_start_line: u64 = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
                saw_quote = true;
            }
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut field));
            }
            '\r' | '\n' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                cells.push(std::mem::take(&mut field));
                rows.push(RawRow {
                    cells: std::mem::take(&mut cells),
                    saw_quote,
                    start_line: row_start_line,
                });
                saw_quote = false;
                row_start_line = line;
            }
            _ => {
                if c == '\n' {
                    line += 1;
                }
                field.push(c);
            }
        }
    }

    if in_quotes {
        return Err(ResponseExportError::MalformedCsv {
            line: row_start_line,
            reason: "unterminated quoted field at end of input".to_string(),
        });
    }

    // Input that does not end in a newline still carries a final row.
    if !cells.is_empty() || !field.is_empty() || saw_quote {
        cells.push(field);
        rows.push(RawRow {
            cells,
            saw_quote,
            start_line: row_start_line,
        });
    }

    Ok(rows)
}

/// Turns raw rows into a table: first non-blank row is the header, the rest
/// are records repaired against it.
fn assemble(rows: Vec<RawRow>) -> Result<(Table, DecodeStats), ResponseExportError> {
    let mut stats = DecodeStats::default();
    let mut table: Option<Table> = None;

    for row in rows {
        if row.is_blank() {
            stats.skipped_blank_rows += 1;
            continue;
        }
        match table.as_mut() {
            None => table = Some(Table::new(row.cells)?),
            Some(table) => match table.push_row_lenient(row.cells) {
                RowAdjustment::Exact => {}
                RowAdjustment::Padded => stats.padded_rows += 1,
                RowAdjustment::Truncated => stats.truncated_rows += 1,
            },
        }
    }

    Ok((table.unwrap_or_else(Table::empty), stats))
}

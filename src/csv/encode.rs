//! CSV encoding for response tables.
//!
//! Produces the header row followed by one row per record, `\n`-separated,
//! with a trailing newline (file-style output, matching what the export
//! endpoint serves for download). Encoding is a pure function of the table:
//! no I/O, no logging, no partial output.

use crate::csv::table::Table;
use crate::error::ResponseExportError;

/// Quoting policy for encoded cells.
///
/// Both policies decode back to the same table; they only differ in how the
/// text looks. [`QuoteStyle::Necessary`] matches the dashboard's re-export
/// behavior, [`QuoteStyle::Always`] matches the server export endpoint's
/// quote-everything output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Quote a cell only when it contains a comma, a double quote, or a
    /// line break. Cells without special characters are emitted bare.
    #[default]
    Necessary,
    /// Quote every cell, including empty ones.
    Always,
}

/// Configurable CSV encoder.
///
/// # Example
///
/// ```
/// use response_export::csv::{CsvEncoder, QuoteStyle, Table};
///
/// let mut table = Table::new(vec!["A".into(), "B".into()]).unwrap();
/// table.push_row(vec!["1".into(), "x,y".into()]).unwrap();
///
/// let text = CsvEncoder::new(QuoteStyle::Necessary).encode(&table).unwrap();
/// assert_eq!(text, "A,B\n1,\"x,y\"\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvEncoder {
    quote_style: QuoteStyle,
}

impl CsvEncoder {
    /// Creates an encoder with the given quoting policy.
    #[must_use]
    pub fn new(quote_style: QuoteStyle) -> Self {
        Self { quote_style }
    }

    /// Encodes a table to CSV text.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseExportError::InvalidTable`] when the table's header
    /// is empty (the [`Table::empty`] "no data" value cannot be encoded) or
    /// when a row's cell count disagrees with the header.
    pub fn encode(&self, table: &Table) -> Result<String, ResponseExportError> {
        if !table.has_header() {
            return Err(ResponseExportError::InvalidTable(
                "cannot encode a table with an empty header".to_string(),
            ));
        }

        let columns = table.column_count();
        let mut out = String::new();
        self.write_row(&mut out, table.header());

        for (i, row) in table.rows().iter().enumerate() {
            if row.len() != columns {
                return Err(ResponseExportError::InvalidTable(format!(
                    "record {} has {} cells but header has {} columns",
                    i,
                    row.len(),
                    columns
                )));
            }
            self.write_row(&mut out, row);
        }

        Ok(out)
    }

    fn write_row(&self, out: &mut String, cells: &[String]) {
        // A lone empty cell must be quoted: a bare empty line would read
        // back as a blank row, not as a one-cell record.
        if cells.len() == 1 && cells[0].is_empty() {
            out.push_str("\"\"\n");
            return;
        }
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_cell(out, cell);
        }
        out.push('\n');
    }

    fn write_cell(&self, out: &mut String, cell: &str) {
        let must_quote = match self.quote_style {
            QuoteStyle::Always => true,
            QuoteStyle::Necessary => cell.contains([',', '"', '\n', '\r']),
        };
        if must_quote {
            out.push('"');
            for c in cell.chars() {
                if c == '"' {
                    out.push('"');
                }
                out.push(c);
            }
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
}

/// Encodes a table with [`QuoteStyle::Necessary`].
///
/// Convenience wrapper over [`CsvEncoder`]; see [`CsvEncoder::encode`] for
/// the error conditions.
pub fn encode(table: &Table) -> Result<String, ResponseExportError> {
    CsvEncoder::default().encode(table)
}

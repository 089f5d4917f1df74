//! In-memory response table types for CSV serialization.
//!
//! Defines [`Table`] (an ordered header plus ordered rows of cells) and
//! [`Record`] (a borrowing view of one row keyed by column name).

use crate::error::ResponseExportError;

/// How a row was adjusted when inserted leniently.
///
/// Returned by [`Table::push_row_lenient`] so callers that care about
/// repairs (the decoder, the normalizer) can count them. Callers that do
/// not care can ignore the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAdjustment {
    /// The row matched the header's column count exactly.
    Exact,
    /// The row was short; missing trailing cells were filled with empty
    /// strings.
    Padded,
    /// The row was long; excess trailing cells were dropped.
    Truncated,
}

/// An ordered table of response data.
///
/// A `Table` is a header (ordered sequence of unique column names) plus an
/// ordered sequence of rows. Every row holds exactly one cell per header
/// column; a missing value is an empty string, never an absent slot. Tables
/// are transient values: they are assembled per call, compared structurally,
/// and discarded — nothing here has a stored lifecycle.
///
/// # Invariants
///
/// - The header is non-empty and its column names are unique (enforced by
///   [`Table::new`]). The one exception is [`Table::empty`], the documented
///   "no data" value produced by decoding empty input.
/// - Every row has exactly `header.len()` cells (enforced by
///   [`Table::push_row`]; [`Table::push_row_lenient`] repairs instead).
///
/// # Example
///
/// ```
/// use response_export::csv::Table;
///
/// let mut table = Table::new(vec!["Response ID".into(), "Q1".into()]).unwrap();
/// table.push_row(vec!["r1".into(), "5".into()]).unwrap();
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get(0, "Q1"), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Ordered column names. Order determines cell order in every row.
    header: Vec<String>,
    /// Ordered rows; each row has exactly `header.len()` cells.
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given header and no rows.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseExportError::InvalidTable`] when the header is
    /// empty or contains duplicate column names.
    pub fn new(header: Vec<String>) -> Result<Self, ResponseExportError> {
        if header.is_empty() {
            return Err(ResponseExportError::InvalidTable(
                "header must not be empty".to_string(),
            ));
        }
        for (i, name) in header.iter().enumerate() {
            if header[..i].contains(name) {
                return Err(ResponseExportError::InvalidTable(format!(
                    "duplicate column name \"{}\"",
                    name
                )));
            }
        }
        Ok(Self {
            header,
            rows: Vec::new(),
        })
    }

    /// The documented "no data" table: empty header, zero rows.
    ///
    /// This is what [`decode`](crate::csv::decode) returns for empty or
    /// whitespace-only input. Callers detect the empty case by checking
    /// [`Table::has_header`] rather than by catching an error.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The ordered column names.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Whether this table has any columns at all.
    ///
    /// `false` only for the [`Table::empty`] "no data" value.
    #[must_use]
    pub fn has_header(&self) -> bool {
        !self.header.is_empty()
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Position of a column by name, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The raw rows, in order. Each row's cells align with [`Table::header`].
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The cell at `(row, column name)`, if both exist.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Appends a row whose cell count must match the header exactly.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseExportError::InvalidTable`] when the cell count
    /// differs from the header's column count, or when the table has no
    /// header.
    pub fn push_row(&mut self, cells: Vec<String>) -> Result<(), ResponseExportError> {
        if self.header.is_empty() {
            return Err(ResponseExportError::InvalidTable(
                "cannot add rows to a table with no header".to_string(),
            ));
        }
        if cells.len() != self.header.len() {
            return Err(ResponseExportError::InvalidTable(format!(
                "row has {} cells but header has {} columns",
                cells.len(),
                self.header.len()
            )));
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Appends a row, repairing its length against the header.
    ///
    /// Short rows are padded with empty strings; long rows have their excess
    /// trailing cells dropped. This is the lenient path used by the decoder
    /// for ragged rows.
    ///
    /// # Panics
    ///
    /// Panics if the table has no header. The decoder always installs the
    /// header row before any data row, so library callers go through
    /// [`Table::new`] first.
    pub fn push_row_lenient(&mut self, mut cells: Vec<String>) -> RowAdjustment {
        assert!(
            !self.header.is_empty(),
            "push_row_lenient requires a header"
        );
        let expected = self.header.len();
        let adjustment = match cells.len() {
            n if n < expected => {
                cells.resize(expected, String::new());
                RowAdjustment::Padded
            }
            n if n > expected => {
                cells.truncate(expected);
                RowAdjustment::Truncated
            }
            _ => RowAdjustment::Exact,
        };
        self.rows.push(cells);
        adjustment
    }

    /// Iterates the rows as [`Record`] views.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |cells| Record {
            header: &self.header,
            cells,
        })
    }
}

/// A borrowing view of one table row, keyed by column name.
///
/// Cell order follows the table's header order. Records are cheap to copy
/// and only live as long as the table they view.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    header: &'a [String],
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// The cell under the given column name, if the column exists.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.header
            .iter()
            .position(|h| h == column)
            .map(|i| self.cells[i].as_str())
    }

    /// The cells in header order.
    #[must_use]
    pub fn cells(&self) -> &'a [String] {
        self.cells
    }

    /// Iterates `(column name, cell)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.header
            .iter()
            .zip(self.cells.iter())
            .map(|(h, c)| (h.as_str(), c.as_str()))
    }
}

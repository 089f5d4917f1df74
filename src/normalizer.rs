//! CSV normalization module
//!
//! Rewrites a response CSV file through a decode/encode round trip: ragged
//! rows are repaired against the header, blank rows dropped, line endings
//! and quoting normalized to the chosen style. This is the file-level form
//! of the dashboard's export → re-import → re-export loop.
//!
//! # Example
//!
//! ```rust,ignore
//! use response_export::csv::QuoteStyle;
//! use response_export::normalizer::CsvNormalizer;
//! use std::path::Path;
//!
//! let normalizer = CsvNormalizer::new(QuoteStyle::Necessary);
//! let stats = normalizer.normalize(
//!     Path::new("export.csv"),
//!     Path::new("normalized.csv"),
//! )?;
//!
//! println!("Rewrote {} records", stats.total_records);
//! ```

use std::fmt;
use std::path::Path;

use crate::csv::{decode_with_stats, write_table, QuoteStyle};
use crate::error::ResponseExportError;

/// Statistics collected during normalization.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Number of records written to the output file.
    pub total_records: u64,
    /// Rows that were short and padded with empty cells.
    pub padded_rows: u64,
    /// Rows that were long and had excess cells dropped.
    pub truncated_rows: u64,
    /// Blank rows that were dropped.
    pub skipped_blank_rows: u64,
}

impl NormalizeStats {
    /// Whether the input needed any repair beyond requoting.
    #[must_use]
    pub fn any_repairs(&self) -> bool {
        self.padded_rows > 0 || self.truncated_rows > 0 || self.skipped_blank_rows > 0
    }
}

impl fmt::Display for NormalizeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Normalization complete")?;
        writeln!(f, "  Records written:   {:>10}", self.total_records)?;
        writeln!(f, "  Padded rows:       {:>10}", self.padded_rows)?;
        writeln!(f, "  Truncated rows:    {:>10}", self.truncated_rows)?;
        write!(f, "  Blank rows dropped:{:>10}", self.skipped_blank_rows)
    }
}

/// Normalizes response CSV files by round-tripping them through the codec.
#[derive(Debug, Clone, Copy)]
pub struct CsvNormalizer {
    quote_style: QuoteStyle,
}

impl CsvNormalizer {
    /// Creates a normalizer that writes with the given quoting policy.
    #[must_use]
    pub fn new(quote_style: QuoteStyle) -> Self {
        Self { quote_style }
    }

    /// Reads `input`, repairs and re-encodes it, and writes to `output`.
    ///
    /// # Errors
    ///
    /// - [`ResponseExportError::Io`] when either file cannot be accessed
    /// - [`ResponseExportError::MalformedCsv`] when the input has an
    ///   unterminated quoted field (the whole input is unusable)
    /// - [`ResponseExportError::InvalidTable`] when the input's header has
    ///   duplicate column names, or when the input is empty (there is no
    ///   table to write)
    pub fn normalize(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<NormalizeStats, ResponseExportError> {
        let text = std::fs::read_to_string(input)?;
        let (table, decode_stats) = decode_with_stats(&text)?;

        if !table.has_header() {
            return Err(ResponseExportError::InvalidTable(
                "input contains no data to normalize".to_string(),
            ));
        }

        write_table(output, &table, self.quote_style)?;

        let stats = NormalizeStats {
            total_records: table.len() as u64,
            padded_rows: decode_stats.padded_rows,
            truncated_rows: decode_stats.truncated_rows,
            skipped_blank_rows: decode_stats.skipped_blank_rows,
        };

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            records = stats.total_records,
            padded = stats.padded_rows,
            truncated = stats.truncated_rows,
            "normalized response CSV"
        );

        Ok(stats)
    }
}

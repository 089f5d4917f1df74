//! CSV codec module
//!
//! Bidirectional, round-trip-safe conversion between response [`Table`]s and
//! their CSV text representation, plus thin file helpers for the CLI tools.
//!
//! The codec itself operates entirely on in-memory strings: decode assumes
//! the full text is materialized, encode returns the full text. For any
//! table `T` with a valid header, `decode(encode(T)) == T` — column order,
//! record order, and cell values all survive the trip. The reverse direction
//! normalizes quoting, so `encode(decode(s))` may differ from `s` byte for
//! byte while still decoding back to an equal table.

pub mod decode;
pub mod encode;
pub mod table;

pub use decode::{decode, decode_with_stats, DecodeStats};
pub use encode::{encode, CsvEncoder, QuoteStyle};
pub use table::{Record, RowAdjustment, Table};

use std::path::Path;

use crate::error::ResponseExportError;

/// Reads and decodes a CSV file into a [`Table`].
pub fn read_table(path: &Path) -> Result<Table, ResponseExportError> {
    let text = std::fs::read_to_string(path)?;
    decode(&text)
}

/// Encodes a table and writes it to a file.
pub fn write_table(
    path: &Path,
    table: &Table,
    quote_style: QuoteStyle,
) -> Result<(), ResponseExportError> {
    let text = CsvEncoder::new(quote_style).encode(table)?;
    std::fs::write(path, text)?;
    Ok(())
}

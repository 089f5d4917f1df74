//! Error module
//!
//! Defines custom error types using `thiserror` for the response export
//! tooling. This module provides a unified error type that wraps all possible
//! error sources and implements the `From` trait for automatic conversion
//! from underlying error types.

use thiserror::Error;

/// The main error type for the response export tooling.
///
/// This enum represents all possible errors that can occur while encoding,
/// decoding, exporting, or validating response tables.
///
/// # Error Categories
///
/// - **Codec contract errors**: [`InvalidTable`](ResponseExportError::InvalidTable)
///   for encode-time precondition failures (empty header, header/row
///   mismatch, duplicate column names)
/// - **Codec structural errors**: [`MalformedCsv`](ResponseExportError::MalformedCsv)
///   for unrecoverable decode failures (an unterminated quoted field)
/// - **File I/O errors**: reading/writing CSV and answer-row files
/// - **Configuration errors**: invalid CLI arguments and validation failures
///
/// Row-length mismatches against the header are deliberately *not* errors:
/// the decoder repairs them (short rows are padded, long rows truncated) and
/// the validator reports them, but the codec itself stays lenient.
#[derive(Error, Debug)]
pub enum ResponseExportError {
    /// Encode-time contract violation.
    ///
    /// Raised when a table's header is empty, when a row's cell count does
    /// not match the header, or when duplicate column names make a table
    /// unrepresentable. Not retried; surfaced to the caller as a
    /// precondition failure.
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Decode-time structural failure.
    ///
    /// Raised only for unrecoverable problems in the CSV text, such as a
    /// quoted field still open at end of input. The caller should treat the
    /// whole input as unusable rather than attempt partial recovery.
    #[error("Malformed CSV at line {line}: {reason}")]
    MalformedCsv {
        /// 1-indexed line on which the offending row started.
        line: u64,
        /// Description of the structural problem.
        reason: String,
    },

    /// General I/O error.
    ///
    /// This error occurs for file system operations like opening, reading,
    /// or writing files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    ///
    /// This error occurs when parsing an answer-rows JSON file fails due to
    /// invalid JSON syntax or structure.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line argument error.
    ///
    /// This error occurs when CLI arguments are invalid or have incompatible
    /// combinations (e.g., missing required arguments for a specific mode).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV validation failure error.
    ///
    /// This error occurs when validation finds structural issues in a
    /// response CSV file. The validation report has already been printed;
    /// this error signals that the process should exit with code 3.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

//! Response CSV validation module
//!
//! Provides strict structural checking of response CSV files. The codec
//! itself is lenient — ragged rows are repaired, not rejected — so this
//! module is the place where those irregularities become visible: it reports
//! every issue with its line number instead of silently normalizing.
//!
//! # Overview
//!
//! The validator checks:
//! - Header presence and uniqueness of column names
//! - The two fixed leading columns (`Response ID`, `Submitted At`) when the
//!   file claims to be a response export
//! - Row cell counts against the header (ragged rows)
//! - `Submitted At` timestamp parseability
//! - An optional per-field size limit
//!
//! # Example
//!
//! ```rust,ignore
//! use response_export::validator::CsvValidator;
//! use std::path::Path;
//!
//! let validator = CsvValidator::new(true, None);
//! let report = validator.validate_file(Path::new("form_42_responses.csv"))?;
//!
//! println!("{}", report);
//! if !report.is_valid() {
//!     // exit with a validation failure
//! }
//! ```

use std::fmt;
use std::path::Path;

use crate::csv::decode::raw_rows;
use crate::error::ResponseExportError;
use crate::export::{parse_submitted_at, RESPONSE_ID_COLUMN, SUBMITTED_AT_COLUMN};

/// Result of validating a single row (or the header).
///
/// # Variants
///
/// - `Valid`: the row passed all checks
/// - `DuplicateColumn`: the header repeats a column name
/// - `MissingLeadingColumns`: a response export lacks its fixed columns
/// - `RaggedRow`: the row's cell count disagrees with the header
/// - `InvalidTimestamp`: the `Submitted At` cell is not a timestamp
/// - `OversizedField`: a cell exceeds the configured size limit
/// - `Structural`: the text could not be tokenized at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The row is valid.
    Valid,

    /// The header contains the same column name more than once.
    ///
    /// Records are keyed by column name, so a duplicated name makes the
    /// table ambiguous and the file will fail to decode.
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },

    /// The header is missing one or both fixed leading columns of a
    /// response export.
    MissingLeadingColumns {
        /// The missing column names, in export order.
        missing: Vec<String>,
    },

    /// The row's cell count does not match the header's column count.
    ///
    /// The decoder repairs such rows (padding or truncating); validation
    /// reports them so the repair is not silent.
    RaggedRow {
        /// The header's column count.
        expected: usize,
        /// The row's actual cell count.
        actual: usize,
    },

    /// The `Submitted At` cell is not a parseable timestamp.
    InvalidTimestamp {
        /// The unparseable value.
        value: String,
    },

    /// A cell exceeds the configured field size limit.
    OversizedField {
        /// Column the cell belongs to (or its index when out of range).
        column: String,
        /// The configured limit in bytes.
        limit: usize,
        /// The cell's actual size in bytes.
        actual: usize,
    },

    /// The file could not be tokenized (e.g. an unterminated quoted field).
    Structural {
        /// Description of the structural failure.
        error: String,
    },
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Valid => write!(f, "Valid"),
            ValidationResult::DuplicateColumn { name } => {
                write!(f, "Duplicate column name \"{}\"", name)
            }
            ValidationResult::MissingLeadingColumns { missing } => {
                write!(f, "Missing leading columns: {}", missing.join(", "))
            }
            ValidationResult::RaggedRow { expected, actual } => {
                write!(
                    f,
                    "Ragged row: expected {} cells, found {}",
                    expected, actual
                )
            }
            ValidationResult::InvalidTimestamp { value } => {
                write!(f, "Invalid timestamp \"{}\"", value)
            }
            ValidationResult::OversizedField {
                column,
                limit,
                actual,
            } => {
                write!(
                    f,
                    "Field \"{}\" exceeds size limit of {} bytes (actual: {} bytes)",
                    column, limit, actual
                )
            }
            ValidationResult::Structural { error } => write!(f, "Structural error: {}", error),
        }
    }
}

/// A validation issue with the line number it occurred on.
///
/// Line numbers are 1-indexed physical lines; a row with embedded newlines
/// is reported at the line it started on.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The line number in the CSV file where the issue occurred.
    pub line_number: u64,

    /// The validation result describing the issue.
    pub result: ValidationResult,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line_number, self.result)
    }
}

/// Statistics collected during validation.
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    /// Total number of data rows processed (excluding header and blanks).
    pub total_rows: u64,

    /// Number of rows that passed all validation checks.
    pub valid_rows: u64,

    /// Number of rows that failed one or more validation checks.
    pub invalid_rows: u64,

    /// Whether the input was empty (no header, no rows). Empty input is the
    /// documented "no data" case and passes validation.
    pub empty_input: bool,

    /// List of all validation issues encountered, including header-level
    /// ones (reported against line 1).
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true if validation passed (no issues found).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    fn record_issue(&mut self, line_number: u64, result: ValidationResult) {
        self.issues.push(ValidationIssue {
            line_number,
            result,
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Response CSV Validation Report")?;
        writeln!(f, "==============================")?;
        writeln!(
            f,
            "Status: {}",
            if self.is_valid() { "PASSED" } else { "FAILED" }
        )?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Total rows:     {:>10}", self.total_rows)?;
        writeln!(f, "  Valid rows:     {:>10}", self.valid_rows)?;
        writeln!(f, "  Invalid rows:   {:>10}", self.invalid_rows)?;
        if self.empty_input {
            writeln!(f)?;
            writeln!(f, "Input was empty (no header, no rows).")?;
        }

        if !self.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Issues:")?;
            for issue in &self.issues {
                writeln!(f, "  {}", issue)?;
            }
        }

        Ok(())
    }
}

/// Validator for response CSV files.
///
/// Construction chooses the checks to apply; the validator itself holds no
/// per-file state and can be reused across files.
#[derive(Debug, Clone)]
pub struct CsvValidator {
    /// Whether to require the `Response ID`/`Submitted At` leading columns
    /// and to type-check the `Submitted At` cells.
    expect_response_layout: bool,
    /// Optional maximum field size in bytes.
    field_size_limit: Option<usize>,
}

impl CsvValidator {
    /// Creates a validator.
    #[must_use]
    pub fn new(expect_response_layout: bool, field_size_limit: Option<usize>) -> Self {
        Self {
            expect_response_layout,
            field_size_limit,
        }
    }

    /// Validates a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseExportError::Io`] when the file cannot be read.
    /// Structural CSV problems do not error here; they appear in the report.
    pub fn validate_file(&self, path: &Path) -> Result<ValidationReport, ResponseExportError> {
        let text = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "validating response CSV");
        Ok(self.validate_text(&text))
    }

    /// Validates CSV text.
    pub fn validate_text(&self, text: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        if text.trim().is_empty() {
            report.empty_input = true;
            return report;
        }

        let rows = match raw_rows(text) {
            Ok(rows) => rows,
            Err(ResponseExportError::MalformedCsv { line, reason }) => {
                report.record_issue(line, ValidationResult::Structural { error: reason });
                return report;
            }
            // raw_rows only fails structurally; anything else is a bug.
            Err(other) => {
                report.record_issue(
                    1,
                    ValidationResult::Structural {
                        error: other.to_string(),
                    },
                );
                return report;
            }
        };

        let mut data_rows = rows.iter().filter(|r| !r.is_blank());
        let header = match data_rows.next() {
            Some(header) => header,
            None => {
                report.empty_input = true;
                return report;
            }
        };

        self.check_header(&header.cells, header.start_line, &mut report);
        let expected = header.cells.len();
        let submitted_at_index = header
            .cells
            .iter()
            .position(|name| name == SUBMITTED_AT_COLUMN);

        for row in data_rows {
            report.total_rows += 1;
            let issues_before = report.issues.len();

            if row.cells.len() != expected {
                report.record_issue(
                    row.start_line,
                    ValidationResult::RaggedRow {
                        expected,
                        actual: row.cells.len(),
                    },
                );
            }

            if self.expect_response_layout {
                if let Some(i) = submitted_at_index {
                    if let Some(value) = row.cells.get(i) {
                        if parse_submitted_at(value).is_none() {
                            report.record_issue(
                                row.start_line,
                                ValidationResult::InvalidTimestamp {
                                    value: value.clone(),
                                },
                            );
                        }
                    }
                }
            }

            if let Some(limit) = self.field_size_limit {
                for (i, cell) in row.cells.iter().enumerate() {
                    if cell.len() > limit {
                        let column = header
                            .cells
                            .get(i)
                            .cloned()
                            .unwrap_or_else(|| format!("#{}", i));
                        report.record_issue(
                            row.start_line,
                            ValidationResult::OversizedField {
                                column,
                                limit,
                                actual: cell.len(),
                            },
                        );
                    }
                }
            }

            if report.issues.len() == issues_before {
                report.valid_rows += 1;
            } else {
                report.invalid_rows += 1;
            }
        }

        if !report.is_valid() {
            tracing::warn!(
                issues = report.issues.len(),
                invalid_rows = report.invalid_rows,
                "validation found issues"
            );
        }

        report
    }

    fn check_header(&self, header: &[String], line: u64, report: &mut ValidationReport) {
        for (i, name) in header.iter().enumerate() {
            if header[..i].contains(name) {
                report.record_issue(
                    line,
                    ValidationResult::DuplicateColumn { name: name.clone() },
                );
            }
        }

        if self.expect_response_layout {
            let missing: Vec<String> = [RESPONSE_ID_COLUMN, SUBMITTED_AT_COLUMN]
                .iter()
                .filter(|required| !header.iter().any(|name| name == *required))
                .map(|s| s.to_string())
                .collect();
            if !missing.is_empty() {
                report.record_issue(line, ValidationResult::MissingLeadingColumns { missing });
            }
        }
    }
}

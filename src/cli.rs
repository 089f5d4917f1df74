//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros.
//! This module defines the `Mode` enum for operation modes and the `Args`
//! struct containing all CLI arguments with validation logic.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::csv::QuoteStyle;

/// Operation mode for the response export tool.
///
/// - **Inspect**: decode a response CSV and render it as a table
/// - **Export**: build a response CSV from an answer-rows JSON file
/// - **Normalize**: repair and re-encode a response CSV file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Decode a response CSV file and display it
    Inspect,
    /// Build a response CSV export from flattened answer rows
    Export,
    /// Round-trip a response CSV file through the codec
    Normalize,
}

/// Command-line arguments for the response export tool.
///
/// This struct defines all CLI arguments using clap derive macros.
/// Use the `validate()` method after parsing to ensure argument
/// combinations are valid.
#[derive(Parser, Debug)]
#[command(name = "response-export")]
#[command(about = "Export, inspect, and repair feedback-form response CSVs")]
#[command(version)]
pub struct Args {
    /// Operation mode: inspect, export, or normalize (omit with --validate)
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Response CSV file path (required for inspect/normalize/--validate)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Answer-rows JSON file path (required for export mode)
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Form identifier, used for the default export filename
    #[arg(long)]
    pub form_id: Option<String>,

    /// Output file path (required for normalize; optional for export)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Quote every cell instead of only cells that need it
    #[arg(long, default_value = "false")]
    pub quote_all: bool,

    /// Validate a response CSV file without rewriting it
    #[arg(long, default_value = "false")]
    pub validate: bool,

    /// Skip the Response ID / Submitted At layout checks in --validate
    #[arg(long, default_value = "false")]
    pub any_layout: bool,

    /// Maximum field size in bytes for --validate
    #[arg(long)]
    pub max_field_size: Option<usize>,
}

impl Args {
    /// Validate argument combinations.
    ///
    /// - `--validate` requires `--file` and cannot be combined with `--mode`
    /// - `inspect` and `normalize` require `--file`
    /// - `normalize` requires `--output`
    /// - `export` requires `--answers`, plus `--output` or `--form-id` to
    ///   name the output file
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the argument combination is valid
    /// - `Err(String)` with a descriptive error message if validation fails
    pub fn validate(&self) -> Result<(), String> {
        if self.validate {
            if self.file.is_none() {
                return Err("--validate requires --file".to_string());
            }
            if self.mode.is_some() {
                return Err("--validate cannot be used with --mode".to_string());
            }
            return Ok(());
        }

        let mode = match &self.mode {
            Some(m) => m,
            None => return Err("--mode is required unless --validate is used".to_string()),
        };

        match mode {
            Mode::Inspect => {
                if self.file.is_none() {
                    return Err("--file is required for inspect mode".to_string());
                }
            }
            Mode::Export => {
                if self.answers.is_none() {
                    return Err("--answers is required for export mode".to_string());
                }
                if self.output.is_none() && self.form_id.is_none() {
                    return Err(
                        "export mode requires --output or --form-id to name the output file"
                            .to_string(),
                    );
                }
            }
            Mode::Normalize => {
                if self.file.is_none() {
                    return Err("--file is required for normalize mode".to_string());
                }
                if self.output.is_none() {
                    return Err("--output is required for normalize mode".to_string());
                }
            }
        }

        Ok(())
    }

    /// The quoting policy selected by `--quote-all`.
    #[must_use]
    pub fn quote_style(&self) -> QuoteStyle {
        if self.quote_all {
            QuoteStyle::Always
        } else {
            QuoteStyle::Necessary
        }
    }
}

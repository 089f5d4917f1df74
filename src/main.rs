//! Response Export - export, inspect, and repair feedback-form response CSVs
//!
//! This CLI tool provides three operational modes plus a validation flag:
//! - **Inspect**: decode a response CSV file and render it as a table
//! - **Export**: build a response CSV from a flattened answer-rows JSON file
//! - **Normalize**: repair and re-encode a response CSV file
//! - **--validate**: report structural issues in a response CSV file
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 3 | File I/O error or validation failure |
//! | 4 | Runtime error (malformed or invalid data) |

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use response_export::cli::{Args, Mode};
use response_export::csv::{decode_with_stats, CsvEncoder};
use response_export::error::ResponseExportError;
use response_export::export::{assemble_table, export_filename, load_answer_rows, CSV_MIME_TYPE};
use response_export::normalizer::CsvNormalizer;
use response_export::render::render_table;
use response_export::validator::CsvValidator;

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for file I/O errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for validation failure (same as I/O error)
const EXIT_VALIDATION_FAILURE: u8 = 3;
/// Exit code for runtime errors (malformed or invalid data)
const EXIT_RUNTIME_ERROR: u8 = 4;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: Configuration error: {}", e);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    match run(args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

/// Dispatches to the selected mode handler.
fn run(args: Args) -> Result<(), ResponseExportError> {
    if args.validate {
        return run_validate_mode(&args);
    }

    let mode = args.mode.ok_or_else(|| {
        ResponseExportError::InvalidArgument("--mode is required".to_string())
    })?;

    match mode {
        Mode::Inspect => run_inspect_mode(&args),
        Mode::Export => run_export_mode(&args),
        Mode::Normalize => run_normalize_mode(&args),
    }
}

/// Resolves a required path argument, post-`Args::validate` defense.
fn require_path<'a>(
    path: &'a Option<PathBuf>,
    flag: &str,
) -> Result<&'a Path, ResponseExportError> {
    path.as_deref()
        .ok_or_else(|| ResponseExportError::InvalidArgument(format!("{} is required", flag)))
}

/// Validates a response CSV file and prints the report.
fn run_validate_mode(args: &Args) -> Result<(), ResponseExportError> {
    let file = require_path(&args.file, "--file")?;
    let validator = CsvValidator::new(!args.any_layout, args.max_field_size);
    let report = validator.validate_file(file)?;

    println!("{}", report);

    if report.is_valid() {
        Ok(())
    } else {
        Err(ResponseExportError::ValidationFailed(format!(
            "{} issues found",
            report.issues.len()
        )))
    }
}

/// Decodes a response CSV file and renders it as a table.
fn run_inspect_mode(args: &Args) -> Result<(), ResponseExportError> {
    let file = require_path(&args.file, "--file")?;
    let text = std::fs::read_to_string(file)?;
    let (table, stats) = decode_with_stats(&text)?;

    print!("{}", render_table(&table));
    println!();
    println!(
        "{} records, {} columns",
        table.len(),
        table.column_count()
    );
    if stats.any_repairs() {
        println!(
            "Repaired while decoding: {} padded, {} truncated rows",
            stats.padded_rows, stats.truncated_rows
        );
    }

    Ok(())
}

/// Builds a response CSV export from an answer-rows JSON file.
fn run_export_mode(args: &Args) -> Result<(), ResponseExportError> {
    let answers = require_path(&args.answers, "--answers")?;
    let rows = load_answer_rows(answers)?;
    let table = assemble_table(&rows)?;
    let text = CsvEncoder::new(args.quote_style()).encode(&table)?;

    let output = match (&args.output, &args.form_id) {
        (Some(path), _) => path.clone(),
        (None, Some(form_id)) => PathBuf::from(export_filename(form_id)),
        (None, None) => {
            return Err(ResponseExportError::InvalidArgument(
                "export mode requires --output or --form-id".to_string(),
            ));
        }
    };

    std::fs::write(&output, text)?;
    println!(
        "Wrote {} records to {} ({})",
        table.len(),
        output.display(),
        CSV_MIME_TYPE
    );

    Ok(())
}

/// Repairs and re-encodes a response CSV file.
fn run_normalize_mode(args: &Args) -> Result<(), ResponseExportError> {
    let file = require_path(&args.file, "--file")?;
    let output = require_path(&args.output, "--output")?;
    let stats = CsvNormalizer::new(args.quote_style()).normalize(file, output)?;
    println!("{}", stats);
    Ok(())
}

/// Maps an error to its documented exit code.
fn error_to_exit_code(error: &ResponseExportError) -> u8 {
    match error {
        ResponseExportError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
        ResponseExportError::Io(_) => EXIT_IO_ERROR,
        ResponseExportError::ValidationFailed(_) => EXIT_VALIDATION_FAILURE,
        ResponseExportError::InvalidTable(_)
        | ResponseExportError::MalformedCsv { .. }
        | ResponseExportError::Json(_) => EXIT_RUNTIME_ERROR,
    }
}

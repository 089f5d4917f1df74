//! Integration tests for the CSV codec round trip, file helpers, the
//! normalizer, and the validator working together.

use std::path::Path;

use response_export::csv::{
    decode, encode, read_table, write_table, CsvEncoder, QuoteStyle, Table,
};
use response_export::normalizer::CsvNormalizer;
use response_export::validator::CsvValidator;
use tempfile::tempdir;

/// Helper: build a table from string slices.
fn make_table(header: &[&str], rows: &[&[&str]]) -> Table {
    let mut table = Table::new(header.iter().map(|s| s.to_string()).collect()).unwrap();
    for row in rows {
        table
            .push_row(row.iter().map(|s| s.to_string()).collect())
            .unwrap();
    }
    table
}

/// Helper: write CSV text to a temp file and return its path.
fn write_text(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_memory_round_trip_with_special_characters() {
    let table = make_table(
        &["Response ID", "Submitted At", "What did you think?"],
        &[
            &["r1", "2024-01-15T10:30:00Z", "He said \"hi\", once"],
            &["r2", "2024-01-16T09:00:00Z", "line1\nline2"],
            &["r3", "2024-01-17T12:00:00Z", "Great course 🎉"],
            &["r4", "2024-01-18T14:00:00Z", ""],
        ],
    );

    for style in [QuoteStyle::Necessary, QuoteStyle::Always] {
        let text = CsvEncoder::new(style).encode(&table).unwrap();
        let decoded = decode(&text).unwrap();
        assert_eq!(decoded, table, "round trip failed for {:?}", style);
    }
}

#[test]
fn test_file_round_trip_preserves_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("responses.csv");

    let table = make_table(
        &["Response ID", "Submitted At", "Q1"],
        &[&["r1", "2024-01-15T10:30:00Z", "5"]],
    );

    write_table(&path, &table, QuoteStyle::Necessary).unwrap();
    let read_back = read_table(&path).unwrap();
    assert_eq!(read_back, table);
}

#[test]
fn test_reencoding_a_decoded_file_is_stable() {
    // Quoting differences may be normalized on the first pass, but the
    // second pass must reproduce the first byte for byte.
    let source = "\"A\",B\r\n\"1\",\"x,y\"\r\n\"2\",plain\r\n";
    let first = encode(&decode(source).unwrap()).unwrap();
    let second = encode(&decode(&first).unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(decode(source).unwrap(), decode(&second).unwrap());
}

#[test]
fn test_normalize_then_validate_passes() {
    let dir = tempdir().unwrap();
    // Ragged and blank rows, CRLF line endings: decodes with repairs.
    let input = write_text(
        dir.path(),
        "in.csv",
        "Response ID,Submitted At,Q1\r\nr1,2024-01-15T10:30:00Z\r\n\r\nr2,2024-01-16T09:00:00Z,4,extra\r\n",
    );
    let output = dir.path().join("out.csv");

    let stats = CsvNormalizer::new(QuoteStyle::Necessary)
        .normalize(&input, &output)
        .unwrap();
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.padded_rows, 1);
    assert_eq!(stats.truncated_rows, 1);
    assert_eq!(stats.skipped_blank_rows, 1);

    let report = CsvValidator::new(true, None).validate_file(&output).unwrap();
    assert!(report.is_valid(), "normalized file should validate:\n{}", report);
    assert_eq!(report.total_rows, 2);
}

#[test]
fn test_validator_flags_what_the_codec_repairs() {
    let dir = tempdir().unwrap();
    let input = write_text(
        dir.path(),
        "ragged.csv",
        "Response ID,Submitted At\nr1,2024-01-15T10:30:00Z,extra\n",
    );

    // The codec decodes it fine.
    let table = read_table(&input).unwrap();
    assert_eq!(table.len(), 1);

    // The validator reports the repair.
    let report = CsvValidator::new(true, None).validate_file(&input).unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.invalid_rows, 1);
}

#[test]
fn test_empty_file_decodes_to_no_data() {
    let dir = tempdir().unwrap();
    let path = write_text(dir.path(), "empty.csv", "   \n  ");

    let table = read_table(&path).unwrap();
    assert!(!table.has_header());
    assert!(table.is_empty());

    // Encoding the no-data table is a contract violation, not a panic.
    assert!(encode(&table).is_err());
}

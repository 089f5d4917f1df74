//! Integration tests for the export path: answer rows in, downloadable CSV
//! out, and back again through the codec.

use response_export::csv::{decode, CsvEncoder, QuoteStyle};
use response_export::export::{
    assemble_table, export_filename, load_answer_rows, AnswerRow, CSV_MIME_TYPE,
    RESPONSE_ID_COLUMN, SUBMITTED_AT_COLUMN,
};
use tempfile::tempdir;

use chrono::{TimeZone, Utc};

/// Helper: an answer row with the given coordinates.
fn answer(
    response_id: &str,
    day: u32,
    question_order: i32,
    question: &str,
    text: Option<&str>,
) -> AnswerRow {
    AnswerRow {
        response_id: response_id.to_string(),
        submitted_at: Utc.with_ymd_and_hms(2024, 1, day, 10, 30, 0).unwrap(),
        question_order,
        question: question.to_string(),
        answer: text.map(|s| s.to_string()),
    }
}

#[test]
fn test_export_then_reimport_round_trip() {
    let rows = vec![
        answer("r1", 15, 1, "Rate the course", Some("5")),
        answer("r1", 15, 2, "Any comments?", Some("He said \"hi\", once")),
        answer("r2", 16, 1, "Rate the course", Some("4")),
        answer("r2", 16, 2, "Any comments?", Some("line1\nline2")),
    ];

    let table = assemble_table(&rows).unwrap();
    // The server endpoint quotes everything; reimport must not care.
    let text = CsvEncoder::new(QuoteStyle::Always).encode(&table).unwrap();
    let reimported = decode(&text).unwrap();

    assert_eq!(reimported, table);
    assert_eq!(
        reimported.header(),
        [
            RESPONSE_ID_COLUMN,
            SUBMITTED_AT_COLUMN,
            "Rate the course",
            "Any comments?"
        ]
    );
    assert_eq!(reimported.get(0, RESPONSE_ID_COLUMN), Some("r2"));
    assert_eq!(reimported.get(0, "Any comments?"), Some("line1\nline2"));
    assert_eq!(
        reimported.get(1, "Any comments?"),
        Some("He said \"hi\", once")
    );
}

#[test]
fn test_single_response_export_scenario() {
    let rows = vec![answer("r1", 15, 1, "Q1", Some("5"))];
    let table = assemble_table(&rows).unwrap();
    let text = CsvEncoder::new(QuoteStyle::Necessary)
        .encode(&table)
        .unwrap();
    let reimported = decode(&text).unwrap();

    assert_eq!(
        reimported.header(),
        [RESPONSE_ID_COLUMN, SUBMITTED_AT_COLUMN, "Q1"]
    );
    assert_eq!(reimported.len(), 1);
    let record = reimported.records().next().unwrap();
    assert_eq!(record.get(RESPONSE_ID_COLUMN), Some("r1"));
    assert_eq!(
        record.get(SUBMITTED_AT_COLUMN),
        Some("2024-01-15T10:30:00.000Z")
    );
    assert_eq!(record.get("Q1"), Some("5"));
}

#[test]
fn test_form_without_responses_exports_header_only() {
    let table = assemble_table(&[]).unwrap();
    let text = CsvEncoder::new(QuoteStyle::Necessary)
        .encode(&table)
        .unwrap();
    assert_eq!(text, "Response ID,Submitted At\n");

    // Reimporting the header-only export yields the same empty table.
    let reimported = decode(&text).unwrap();
    assert_eq!(reimported, table);
    assert!(reimported.is_empty());
}

#[test]
fn test_export_from_json_answer_file() {
    let dir = tempdir().unwrap();
    let answers_path = dir.path().join("answers.json");
    std::fs::write(
        &answers_path,
        r#"[
            {
                "response_id": "r1",
                "submitted_at": "2024-01-15T10:30:00Z",
                "question_order": 1,
                "question": "Rate the course",
                "answer": "5"
            },
            {
                "response_id": "r1",
                "submitted_at": "2024-01-15T10:30:00Z",
                "question_order": 2,
                "question": "Any comments?"
            }
        ]"#,
    )
    .unwrap();

    let rows = load_answer_rows(&answers_path).unwrap();
    let table = assemble_table(&rows).unwrap();

    let output = dir.path().join(export_filename("42"));
    let text = CsvEncoder::new(QuoteStyle::Necessary)
        .encode(&table)
        .unwrap();
    std::fs::write(&output, &text).unwrap();

    assert!(output.ends_with("form_42_responses.csv"));
    let reimported = decode(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(reimported, table);
    // Unanswered question exports as an empty cell.
    assert_eq!(reimported.get(0, "Any comments?"), Some(""));
}

#[test]
fn test_mime_type_contract() {
    assert_eq!(CSV_MIME_TYPE, "text/csv; charset=utf-8");
}

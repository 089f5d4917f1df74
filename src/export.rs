//! Response export assembly.
//!
//! Builds the export [`Table`] from flattened answer rows, the way the
//! response-listing endpoint produces them from the relational query: one
//! row per (response, question) pair, sorted newest-first, pivoted into a
//! table whose header is the two fixed leading columns followed by one
//! column per form question in question order.
//!
//! Also carries the export's collaborator contract: the download filename
//! pattern and the MIME type the CSV is served with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::csv::Table;
use crate::error::ResponseExportError;

/// First fixed leading column of every export.
pub const RESPONSE_ID_COLUMN: &str = "Response ID";

/// Second fixed leading column of every export.
pub const SUBMITTED_AT_COLUMN: &str = "Submitted At";

/// MIME type exported CSV files are declared with.
pub const CSV_MIME_TYPE: &str = "text/csv; charset=utf-8";

/// Timestamp format for the `Submitted At` column: ISO 8601 with
/// millisecond precision, e.g. `2024-01-15T10:30:00.000Z`.
pub const SUBMITTED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Download filename for a form's response export.
///
/// # Example
///
/// ```
/// use response_export::export::export_filename;
///
/// assert_eq!(export_filename("42"), "form_42_responses.csv");
/// ```
#[must_use]
pub fn export_filename(form_id: &str) -> String {
    format!("form_{}_responses.csv", form_id)
}

/// Parses a `Submitted At` cell back into a timestamp.
///
/// Accepts RFC 3339 with an offset, or the offset-less form this crate
/// writes (see [`SUBMITTED_AT_FORMAT`]). Returns `None` when the value is
/// not a recognizable timestamp; display and validation callers decide how
/// to handle that.
#[must_use]
pub fn parse_submitted_at(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(value, SUBMITTED_AT_FORMAT)
                .map(|ndt| ndt.and_utc())
        })
        .ok()
}

/// One flattened (response × question) row from the response query.
///
/// The query joins responses to their answers and questions and returns one
/// row per answered question, ordered by submission time descending and
/// question order ascending. `answer` is nullable in the store; a missing
/// answer exports as an empty cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRow {
    /// Identifier of the feedback response this answer belongs to.
    pub response_id: String,
    /// When the response was submitted.
    pub submitted_at: DateTime<Utc>,
    /// Position of the question within the form.
    pub question_order: i32,
    /// The question text, used verbatim as the column name.
    pub question: String,
    /// The answer text, if any.
    #[serde(default)]
    pub answer: Option<String>,
}

/// One response's collected answers, while grouping.
struct GroupedResponse<'a> {
    response_id: &'a str,
    submitted_at: DateTime<Utc>,
    answers: Vec<(&'a str, &'a str)>,
}

/// Pivots flattened answer rows into the export table.
///
/// Rows are sorted by submission time descending, then question order
/// ascending, and grouped by (response id, submitted at). The header is
/// [`RESPONSE_ID_COLUMN`], [`SUBMITTED_AT_COLUMN`], then one column per
/// distinct question in question order. A response without an answer for
/// some question gets an empty cell there.
///
/// Zero input rows produce a table with only the two leading columns and no
/// records — the header-only CSV the endpoint serves when a form has no
/// responses yet.
///
/// # Errors
///
/// Returns [`ResponseExportError::InvalidTable`] when a question's text
/// collides with one of the fixed leading column names, since column names
/// must stay unique.
pub fn assemble_table(rows: &[AnswerRow]) -> Result<Table, ResponseExportError> {
    let mut sorted: Vec<&AnswerRow> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then(a.question_order.cmp(&b.question_order))
    });

    // Distinct question columns in question order. Two rows can repeat a
    // question (one per response); the first occurrence wins.
    let mut questions: Vec<(i32, &str)> = Vec::new();
    for row in &sorted {
        if !questions.iter().any(|(_, q)| *q == row.question) {
            questions.push((row.question_order, row.question.as_str()));
        }
    }
    questions.sort_by_key(|(order, _)| *order);

    let mut grouped: Vec<GroupedResponse> = Vec::new();
    for row in &sorted {
        let answer = row.answer.as_deref().unwrap_or("");
        let existing = grouped
            .iter()
            .position(|g| g.response_id == row.response_id && g.submitted_at == row.submitted_at);
        match existing {
            Some(i) => grouped[i].answers.push((row.question.as_str(), answer)),
            None => grouped.push(GroupedResponse {
                response_id: row.response_id.as_str(),
                submitted_at: row.submitted_at,
                answers: vec![(row.question.as_str(), answer)],
            }),
        }
    }

    let mut header = vec![RESPONSE_ID_COLUMN.to_string(), SUBMITTED_AT_COLUMN.to_string()];
    header.extend(questions.iter().map(|(_, q)| q.to_string()));
    let mut table = Table::new(header)?;

    for group in grouped {
        let mut cells = Vec::with_capacity(2 + questions.len());
        cells.push(group.response_id.to_string());
        cells.push(
            group
                .submitted_at
                .format(SUBMITTED_AT_FORMAT)
                .to_string(),
        );
        for (_, question) in &questions {
            let answer = group
                .answers
                .iter()
                .find(|(q, _)| q == question)
                .map(|(_, a)| a.to_string())
                .unwrap_or_default();
            cells.push(answer);
        }
        table.push_row(cells)?;
    }

    Ok(table)
}

/// Reads answer rows from a JSON array file.
///
/// The CLI's stand-in for the relational query: the file holds a JSON array
/// of [`AnswerRow`] objects.
pub fn load_answer_rows(path: &Path) -> Result<Vec<AnswerRow>, ResponseExportError> {
    let text = std::fs::read_to_string(path)?;
    let rows: Vec<AnswerRow> = serde_json::from_str(&text)?;
    Ok(rows)
}

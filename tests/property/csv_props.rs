//! Property-based tests for the CSV codec.
//!
//! These properties pin the round-trip contract: any table with a valid
//! header survives encode → decode unchanged, re-encoding is stable, ragged
//! input is always repaired to the header's width, and everything the
//! encoder emits parses identically under the independent `csv` crate.

use proptest::prelude::*;

use response_export::csv::{decode, decode_with_stats, CsvEncoder, QuoteStyle, Table};

/// Strategy for a single column name: non-empty, no special characters, so
/// uniqueness is easy to enforce at the header level.
fn column_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ?]{0,14}".prop_map(|s| s)
}

/// Strategy for a header of 1..=5 unique column names.
fn header_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(column_name_strategy(), 1..=5).prop_map(|names| {
        let mut unique = Vec::new();
        for (i, name) in names.into_iter().enumerate() {
            // Suffix with the position to guarantee uniqueness.
            unique.push(format!("{} {}", name, i));
        }
        unique
    })
}

/// Strategy for a cell value, weighted toward the characters that exercise
/// quoting: commas, double quotes, line breaks, and non-ASCII text.
fn cell_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Plain cells
        "[a-zA-Z0-9 ]{0,20}".prop_map(|s| s),
        // Cells with commas
        "[a-zA-Z0-9]{0,8},[a-zA-Z0-9]{0,8}".prop_map(|s| s),
        // Cells with embedded quotes
        "[a-zA-Z0-9]{0,8}\"[a-zA-Z0-9]{0,8}".prop_map(|s| s),
        // Cells with line breaks
        "[a-zA-Z0-9]{0,8}\n[a-zA-Z0-9]{0,8}".prop_map(|s| s),
        "[a-zA-Z0-9]{0,8}\r\n[a-zA-Z0-9]{0,8}".prop_map(|s| s),
        // Empty cell
        Just(String::new()),
        // Leading/trailing whitespace must survive
        Just("  padded  ".to_string()),
        // Unicode and emoji
        Just("Großartig 🎉 日本語".to_string()),
        Just("He said \"hi\", once".to_string()),
    ]
}

/// Strategy for a full table: header plus 0..8 rows of matching width.
fn table_strategy() -> impl Strategy<Value = Table> {
    header_strategy().prop_flat_map(|header| {
        let width = header.len();
        prop::collection::vec(
            prop::collection::vec(cell_strategy(), width..=width),
            0..8,
        )
        .prop_map(move |rows| {
            let mut table = Table::new(header.clone()).expect("generated header is valid");
            for row in rows {
                table.push_row(row).expect("generated row matches header");
            }
            table
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any valid table, decoding its encoding reproduces the table
    // exactly: column order, record order, and cell values.
    #[test]
    fn prop_encode_decode_round_trip(table in table_strategy()) {
        let text = CsvEncoder::new(QuoteStyle::Necessary)
            .encode(&table)
            .expect("valid table encodes");
        let decoded = decode(&text).expect("encoded output decodes");
        prop_assert_eq!(decoded, table);
    }

    // The quote-everything style must round-trip identically.
    #[test]
    fn prop_always_quoting_round_trip(table in table_strategy()) {
        let text = CsvEncoder::new(QuoteStyle::Always)
            .encode(&table)
            .expect("valid table encodes");
        let decoded = decode(&text).expect("encoded output decodes");
        prop_assert_eq!(decoded, table);
    }

    // Re-encoding a decoded document is stable after the first pass: pass
    // one may normalize quoting, pass two must be byte-identical.
    #[test]
    fn prop_reencode_is_stable(table in table_strategy()) {
        let first = CsvEncoder::new(QuoteStyle::Always)
            .encode(&table)
            .expect("valid table encodes");
        let normalized = CsvEncoder::new(QuoteStyle::Necessary)
            .encode(&decode(&first).expect("decodes"))
            .expect("re-encodes");
        let again = CsvEncoder::new(QuoteStyle::Necessary)
            .encode(&decode(&normalized).expect("decodes"))
            .expect("re-encodes");
        prop_assert_eq!(normalized, again);
    }

    // Everything our encoder emits must parse identically under the
    // independent csv crate: same number of rows, same cells.
    #[test]
    fn prop_encoded_output_matches_csv_crate(table in table_strategy()) {
        let text = CsvEncoder::new(QuoteStyle::Necessary)
            .encode(&table)
            .expect("valid table encodes");

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut parsed: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result.expect("csv crate parses our output");
            parsed.push(record.iter().map(|s| s.to_string()).collect());
        }

        let mut expected: Vec<Vec<String>> = vec![table.header().to_vec()];
        expected.extend(table.rows().iter().cloned());
        prop_assert_eq!(parsed, expected);
    }

    // Ragged input always decodes to records exactly as wide as the header.
    #[test]
    fn prop_ragged_rows_repair_to_header_width(
        arities in prop::collection::vec(1usize..5, 1..10)
    ) {
        let mut text = String::from("A,B,C\n");
        for (i, arity) in arities.iter().enumerate() {
            let cells: Vec<String> = (0..*arity).map(|j| format!("c{}x{}", i, j)).collect();
            text.push_str(&cells.join(","));
            text.push('\n');
        }

        let (table, stats) = decode_with_stats(&text).expect("ragged input decodes");
        prop_assert_eq!(table.len(), arities.len());
        for row in table.rows() {
            prop_assert_eq!(row.len(), 3);
        }
        let repaired = arities.iter().filter(|a| **a != 3).count() as u64;
        prop_assert_eq!(stats.padded_rows + stats.truncated_rows, repaired);
    }

    // Whitespace-only input is always the "no data" table, never an error.
    #[test]
    fn prop_whitespace_input_is_no_data(text in "[ \t\r\n]{0,16}") {
        let table = decode(&text).expect("whitespace input decodes");
        prop_assert!(!table.has_header());
        prop_assert!(table.is_empty());
    }
}

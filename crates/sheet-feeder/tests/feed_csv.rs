//! Feeding rows from CSV and TSV files through the format-detecting reader.

mod common;

use common::{run_until_stop, text_file};
use pretty_assertions::assert_eq;
use sheet_feeder::{FeedConfig, RowCursorReader, TickError, TickOutcome};

const PROMPTS: &str = "\
portrait, soft light,studio,
landscape,,golden hour
,,
macro,dew,morning
city,night,neon
";

#[test]
fn test_feeds_whole_file_then_stops() {
    let file = text_file(PROMPTS, ".csv");
    let feeder = RowCursorReader::new();
    let config = FeedConfig::new(file.path())
        .with_columns("A,C")
        .with_tidy_tags(true)
        .with_read_count(2);

    let (outputs, last) = run_until_stop(&feeder, config, 10);
    assert_eq!(
        outputs,
        vec![
            "portrait,studio\nlandscape,golden hour".to_string(),
            "\nmacro,morning".to_string(),
            "city,neon".to_string(),
        ]
    );
    match last {
        Some(TickOutcome::Stop(signal)) => {
            assert_eq!(signal.effective_end, 5);
            assert_eq!(signal.start_row, 7);
            assert_eq!(
                signal.to_string(),
                "Reached end row 5 (requested start row 7); stopping workflow"
            );
        }
        other => panic!("expected Stop, got {:?}", other),
    }
}

#[test]
fn test_host_loop_reads_each_row_once() {
    let file = text_file("r1\nr2\nr3\nr4\nr5\n", ".csv");
    let feeder = RowCursorReader::new();

    for read_count in 1..=6 {
        let config = FeedConfig::new(file.path()).with_read_count(read_count);
        let (outputs, last) = run_until_stop(&feeder, config, 20);

        let rows: Vec<&str> = outputs.iter().flat_map(|text| text.lines()).collect();
        assert_eq!(rows, vec!["r1", "r2", "r3", "r4", "r5"], "read_count {}", read_count);
        assert!(
            matches!(last, Some(TickOutcome::Stop(_))),
            "read_count {} did not stop",
            read_count
        );
    }
}

#[test]
fn test_file_changes_seen_between_ticks() {
    let file = text_file("r1\nr2\nr3\nr4\nr5\n", ".csv");
    let feeder = RowCursorReader::new();
    let config = FeedConfig::new(file.path())
        .with_read_count(2)
        .with_start_row(4);

    match feeder.tick(&config) {
        TickOutcome::Continue(result) => {
            assert_eq!(result.output_text, "r4\nr5");
            assert_eq!(result.next_start_row, 4);
        }
        other => panic!("expected Continue, got {:?}", other),
    }

    // Shrunk below the cursor: the same start row now stops
    std::fs::write(file.path(), "r1\nr2\nr3\n").unwrap();
    match feeder.tick(&config) {
        TickOutcome::Stop(signal) => {
            assert_eq!(signal.effective_end, 3);
            assert_eq!(signal.start_row, 4);
        }
        other => panic!("expected Stop, got {:?}", other),
    }

    // Grown: the cursor moves again
    std::fs::write(file.path(), "r1\nr2\nr3\nx4\nx5\nx6\nx7\n").unwrap();
    match feeder.tick(&config) {
        TickOutcome::Continue(result) => {
            assert_eq!(result.output_text, "x4\nx5");
            assert_eq!(result.next_start_row, 6);
        }
        other => panic!("expected Continue, got {:?}", other),
    }
}

#[test]
fn test_quoted_fields_and_spaces() {
    let file = text_file("\"a, b\",  c  \n", ".csv");
    let feeder = RowCursorReader::new();
    let config = FeedConfig::new(file.path()).with_columns("A,B");

    match feeder.tick(&config) {
        TickOutcome::Continue(result) => assert_eq!(result.output_text, "a, b c"),
        other => panic!("expected Continue, got {:?}", other),
    }
}

#[test]
fn test_tsv_by_extension() {
    let file = text_file("red\tapple\ngreen\tpear\n", ".tsv");
    let feeder = RowCursorReader::new();
    let config = FeedConfig::new(file.path())
        .with_columns("B")
        .with_start_row(2);

    match feeder.tick(&config) {
        TickOutcome::Continue(result) => {
            assert_eq!(result.current_row_label, "2");
            assert_eq!(result.output_text, "pear");
            assert_eq!(result.next_start_row, 2);
        }
        other => panic!("expected Continue, got {:?}", other),
    }
}

#[test]
fn test_exclusions_end_to_end() {
    let file = text_file("a cat photo,hd\na dog photo,4k\n", ".csv");
    let feeder = RowCursorReader::new();
    let config = FeedConfig::new(file.path())
        .with_columns("A,B")
        .with_tidy_tags(true)
        .with_read_count(2)
        .with_exclusions("photo\n  ,4k  \n\n");

    match feeder.tick(&config) {
        TickOutcome::Continue(result) => {
            assert_eq!(result.output_text, "a cat ,hd\na dog ");
        }
        other => panic!("expected Continue, got {:?}", other),
    }
}

#[test]
fn test_empty_file_warns() {
    let file = text_file("", ".csv");
    let feeder = RowCursorReader::new();

    match feeder.tick(&FeedConfig::new(file.path()).with_start_row(4)) {
        TickOutcome::Continue(result) => {
            assert_eq!(result.current_row_label, "0");
            assert_eq!(result.output_text, "Warning: sheet contains no rows");
            assert_eq!(result.next_start_row, 1);
        }
        other => panic!("expected Continue, got {:?}", other),
    }
}

#[test]
fn test_errors_reported_inline() {
    let feeder = RowCursorReader::new();

    let file = text_file("a,b\n", ".csv");
    let outcome = feeder.tick(&FeedConfig::new(file.path()).with_columns("C"));
    let (label, message) = outcome.host_result().unwrap();
    assert_eq!(label, "Error");
    assert_eq!(
        message,
        "Failed to read sheet: Column C out of range (sheet width: 2)"
    );

    let outcome = feeder.tick(&FeedConfig::new(file.path()).with_sheet("3"));
    assert!(matches!(outcome, TickOutcome::Failed(TickError::SheetRead(_))));

    let other = text_file("a\n", ".txt");
    let outcome = feeder.tick(&FeedConfig::new(other.path()));
    assert!(matches!(outcome, TickOutcome::Failed(TickError::SheetRead(_))));

    let dir = tempfile::tempdir().unwrap();
    let outcome = feeder.tick(&FeedConfig::new(dir.path()));
    assert!(matches!(outcome, TickOutcome::Failed(TickError::NotAFile(_))));

    let outcome = feeder.tick(&FeedConfig::new(""));
    assert!(matches!(outcome, TickOutcome::Failed(TickError::InvalidPath)));
}

use dotdash::Direction;
use dotdash::core::{
    FileOptions, HistoryEntry, HistoryError, HistoryStore, TranscodeError, Transcoder,
    convert_file,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

/// Creates a transcoder writing history to `path`.
fn file_transcoder(path: &Path, strict: bool) -> Transcoder {
    Transcoder::new(Arc::new(HistoryStore::with_strict(path, strict)))
}

fn read_history(path: &Path) -> Vec<HistoryEntry> {
    let json = fs::read_to_string(path).unwrap();
    serde_json::from_str(&json).unwrap()
}

/// Runs the same three successful conversions plus two failures.
fn run_mixed_session(transcoder: &Transcoder) {
    transcoder.encode("sos").unwrap();
    assert!(transcoder.encode("É").is_err());
    transcoder.decode(".... .. / -.-- --- ..-").unwrap();
    assert!(transcoder.decode("..--..--").is_err());
    transcoder.encode("HELLO WORLD").unwrap();
}

fn assert_session_entries(entries: &[HistoryEntry]) {
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].input, "SOS");
    assert_eq!(entries[0].output, "... --- ...");
    assert_eq!(entries[1].input, ".... .. / -.-- --- ..-");
    assert_eq!(entries[1].output, "HI YOU");
    assert_eq!(entries[2].input, "HELLO WORLD");
    assert_eq!(entries[2].output, ".... . .-.. .-.. --- / .-- --- .-. .-.. -..");
}

// ============================================================================
// History File Tests
// ============================================================================

#[test]
fn test_history_starts_from_absent_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("morse_history.json");

    run_mixed_session(&file_transcoder(&path, false));

    assert_session_entries(&read_history(&path));
}

#[test]
fn test_history_starts_from_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("morse_history.json");
    fs::write(&path, "[{\"input\": \"trunc").unwrap();

    run_mixed_session(&file_transcoder(&path, false));

    assert_session_entries(&read_history(&path));
}

#[test]
fn test_history_appends_to_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("morse_history.json");
    let earlier = vec![HistoryEntry {
        input: "E".to_string(),
        output: ".".to_string(),
        timestamp: "2024-01-01T00:00:00".to_string(),
    }];
    fs::write(&path, serde_json::to_string(&earlier).unwrap()).unwrap();

    run_mixed_session(&file_transcoder(&path, false));

    let entries = read_history(&path);
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0], earlier[0]);
    assert_session_entries(&entries[1..]);
}

#[test]
fn test_history_survives_separate_stores() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("morse_history.json");

    file_transcoder(&path, false).encode("a").unwrap();
    file_transcoder(&path, false).encode("b").unwrap();

    let inputs: Vec<_> = read_history(&path).into_iter().map(|e| e.input).collect();
    assert_eq!(inputs, ["A", "B"]);
}

#[test]
fn test_strict_history_refuses_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("morse_history.json");
    fs::write(&path, "not json").unwrap();

    let result = file_transcoder(&path, true).encode("sos");

    assert!(matches!(
        result,
        Err(TranscodeError::History(HistoryError::Corrupt(_)))
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
}

#[test]
fn test_history_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("morse_history.json");

    file_transcoder(&path, false).decode("-.-. .- ..-. .").unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n    {\n        \"input\": \"-.-. .- ..-. .\","));
    let entries = read_history(&path);
    assert_eq!(entries[0].output, "CAFE");
}

// ============================================================================
// File Conversion Tests
// ============================================================================

#[test]
fn test_file_round_trip_through_history() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("morse_history.json");
    let transcoder = file_transcoder(&history, false);
    let input = dir.path().join("letter.txt");
    fs::write(&input, "Meet at 10, (north) gate?\n").unwrap();

    let encoded = convert_file(&transcoder, &input, Direction::Morse, &FileOptions::default())
        .unwrap();
    let decoded = convert_file(
        &transcoder,
        &encoded.output_path,
        Direction::Text,
        &FileOptions::default(),
    )
    .unwrap();

    assert_eq!(decoded.output_path, dir.path().join("letter_morse_text.txt"));
    assert_eq!(
        fs::read_to_string(&decoded.output_path).unwrap(),
        "MEET AT 10, (NORTH) GATE?"
    );
    assert_eq!(read_history(&history).len(), 2);
}

#[test]
fn test_rejected_file_leaves_history_alone() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("morse_history.json");
    let transcoder = file_transcoder(&history, false);
    let input = dir.path().join("data.csv");
    fs::write(&input, "a,b").unwrap();

    assert!(convert_file(&transcoder, &input, Direction::Morse, &FileOptions::default()).is_err());
    assert!(!history.exists());
}

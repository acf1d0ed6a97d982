//! Playing recorded transcripts from disk.

use std::io::Write;
use strictly_checkers::{Color, MatchManager, Transcript, TranscriptError};

#[test]
fn test_transcript_file_plays_to_completion() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"red": "rosa", "white": "walt", "turns": [
            [{{"start": {{"row": 5, "cell": 2}}, "end": {{"row": 4, "cell": 3}}}}],
            [{{"start": {{"row": 5, "cell": 2}}, "end": {{"row": 3, "cell": 4}}}}]
        ]}}"#
    )
    .unwrap();

    let transcript = Transcript::from_file(file.path()).unwrap();
    let manager = MatchManager::default();
    let (id, reports) = transcript.play(&manager).unwrap();

    assert_eq!(reports.len(), 2);
    // White's long step is refused, so white has not moved.
    assert!(!reports[1].moves[0].1.is_accepted());
    assert_eq!(
        reports[1].end.text(),
        "You must make a move before ending your turn!"
    );
    assert_eq!(manager.active_color(id).unwrap(), Color::White);
}

#[test]
fn test_missing_transcript_file() {
    let err = Transcript::from_file("/nonexistent/game.json").unwrap_err();
    assert!(matches!(err, TranscriptError::Read { .. }));
}

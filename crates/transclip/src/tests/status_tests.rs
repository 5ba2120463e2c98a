//! Tests for the control state mapping and transcript line types.

use crate::control::ControlState;
use crate::operation::TranscriptLine;

#[test]
fn state_labels_match_the_visible_control_text() {
    assert_eq!(ControlState::Idle.label(), "Copy Transcript");
    assert_eq!(ControlState::Running.label(), "Copying...");
    assert_eq!(ControlState::Succeeded.label(), "Copied!");
    assert_eq!(ControlState::NotFound.label(), "Transcript Not Found");
    assert_eq!(ControlState::Failed.label(), "Copy Failed");
}

#[test]
fn only_terminal_states_schedule_a_reset() {
    assert!(!ControlState::Idle.is_terminal());
    assert!(!ControlState::Running.is_terminal());
    assert!(ControlState::Succeeded.is_terminal());
    assert!(ControlState::NotFound.is_terminal());
    assert!(ControlState::Failed.is_terminal());
}

#[test]
fn terminal_colors_split_success_from_failure() {
    assert_eq!(ControlState::Idle.color(), ControlState::Running.color());
    assert_ne!(ControlState::Succeeded.color(), ControlState::Failed.color());
    assert_eq!(ControlState::NotFound.color(), ControlState::Failed.color());
}

#[test]
fn transcript_line_renders_stamp_then_text() {
    let line = TranscriptLine {
        timestamp: "12:34".to_string(),
        text: "and that is the whole trick".to_string(),
    };
    assert_eq!(line.render(), "12:34 and that is the whole trick");
}

#[test]
fn transcript_line_round_trips_through_json() {
    let line = TranscriptLine {
        timestamp: "0:42".to_string(),
        text: "hello".to_string(),
    };

    let json = serde_json::to_string(&line).expect("Should serialize");
    assert!(json.contains("\"timestamp\":\"0:42\""));

    let parsed: TranscriptLine = serde_json::from_str(&json).expect("Should deserialize");
    assert_eq!(parsed, line);
}

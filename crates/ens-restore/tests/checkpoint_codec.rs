mod common;

use std::fs;

use common::{RecordingSimulation, TrialRecord};
use ens_core::EnsError;
use ens_restore::checkpoint::{
    absorb_payload, peek_header, read_checkpoint, write_checkpoint,
};

#[test]
fn roundtrips_header_and_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run_state_recording.dat");
    let mut original = RecordingSimulation::new();
    original.trials.push(TrialRecord::new(0, 3, 1234));
    original.trials.push(TrialRecord::new(1, 3, 1234));

    write_checkpoint(&path, false, 1, &original).unwrap();

    let mut restored = RecordingSimulation::new();
    restored.trials.push(TrialRecord::new(9, 9, 9));
    let header = read_checkpoint(&path, &mut restored).unwrap();

    assert!(!header.finished);
    assert_eq!(header.next_index, 1);
    // read replaces pre-existing state instead of joining it.
    assert_eq!(restored.trials, original.trials);
}

#[test]
fn header_layout_is_flag_then_fixed_width_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run_state_recording.dat");
    let simulation = RecordingSimulation::new();

    write_checkpoint(&path, true, 0x0102_0304, &simulation).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes[0], 1);
    assert_eq!(
        &bytes[1..9],
        &[0x04, 0x03, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn peek_leaves_payload_for_later_absorption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run_state_recording.dat");
    let mut original = RecordingSimulation::new();
    original.trials.push(TrialRecord::new(2, 3, 1236));
    write_checkpoint(&path, true, 2, &original).unwrap();

    let header = peek_header(&path).unwrap();
    assert!(header.finished);
    assert_eq!(header.next_index, 2);

    let mut target = RecordingSimulation::new();
    target.trials.push(TrialRecord::new(0, 3, 1234));
    absorb_payload(&path, &mut target).unwrap();

    // absorb joins instead of replacing.
    assert_eq!(
        target.trials,
        vec![TrialRecord::new(0, 3, 1234), TrialRecord::new(2, 3, 1236)]
    );
}

#[test]
fn truncated_header_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run_state_recording.dat");
    fs::write(&path, [0u8, 1, 2]).unwrap();

    let mut simulation = RecordingSimulation::new();
    let err = read_checkpoint(&path, &mut simulation).unwrap_err();
    assert!(matches!(err, EnsError::Checkpoint(_)));
    assert_eq!(err.info().code, "checkpoint-header-read");
}

#[test]
fn truncated_payload_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run_state_recording.dat");
    let mut original = RecordingSimulation::new();
    original.trials.push(TrialRecord::new(0, 3, 1234));
    write_checkpoint(&path, false, 0, &original).unwrap();

    let full = fs::read(&path).unwrap();
    fs::write(&path, &full[..full.len() - 4]).unwrap();

    let mut simulation = RecordingSimulation::new();
    let err = read_checkpoint(&path, &mut simulation).unwrap_err();
    assert!(matches!(err, EnsError::Serde(_)));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent_state_recording.dat");
    let err = peek_header(&path).unwrap_err();
    assert!(matches!(err, EnsError::Checkpoint(_)));
    assert_eq!(err.info().code, "checkpoint-open");
}

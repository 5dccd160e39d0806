#[allow(dead_code)]
mod common;

use std::fs;

use serde_json::Value;
use tempfile::TempDir;
use v2s_core::actions::{ActionType, GuiAction, Tap};
use v2s_core::detection::DetectionSet;
use v2s_core::error::V2sError;
use v2s_core::io::{read_detections, write_artifact, write_lines, ToPortable};

fn finalized() -> DetectionSet {
    vec![
        common::detection(3, 10, 20).with_opacity(0.8),
        common::detection(4, 12, 21).with_opacity(0.25),
    ]
    .into()
}

#[test]
fn test_empty_set_writes_array_literal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("detection_full.json");
    write_artifact(&DetectionSet::new(), &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn test_detection_schema() {
    let value = finalized().to_portable().unwrap();
    let first = &value.as_array().unwrap()[0];
    let keys: Vec<&str> = first.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["confidence", "frame", "opacity", "region", "timestamp_ms", "x", "y"]
    );
    assert_eq!(first["frame"], 3);
    assert_eq!(first["opacity"], 0.8);
    assert_eq!(first["region"]["x"], 10);
    assert_eq!(first["region"]["width"], 10);
    // Centre of a 10x10 box at (10, 20).
    assert_eq!(first["x"], 15.0);
    assert_eq!(first["y"], 25.0);
}

#[test]
fn test_written_keys_are_sorted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("detection_full.json");
    write_artifact(&finalized(), &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    let order = ["\"confidence\"", "\"frame\"", "\"opacity\"", "\"region\"", "\"timestamp_ms\""];
    let positions: Vec<usize> = order.iter().map(|k| text.find(k).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    let region = ["\"height\"", "\"width\"", "\"x\"", "\"y\""];
    let positions: Vec<usize> = region.iter().map(|k| text.find(k).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
}

#[test]
fn test_round_trip_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("a.json");
    let second = dir.path().join("b.json");

    let original = finalized();
    write_artifact(&original, &first).unwrap();
    let restored = read_detections(&first).unwrap();
    assert_eq!(restored, original);

    write_artifact(&restored, &second).unwrap();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_rewrite_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("detection_full.json");
    write_artifact(&finalized(), &path).unwrap();
    let once = fs::read(&path).unwrap();
    write_artifact(&finalized(), &path).unwrap();
    assert_eq!(once, fs::read(&path).unwrap());
}

#[test]
fn test_overwrite_replaces_longer_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("detection_full.json");
    write_artifact(&finalized(), &path).unwrap();
    write_artifact(&DetectionSet::new(), &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    // No temporary files left behind.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_read_rejects_missing_opacity() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("detection_full.json");
    let incomplete: DetectionSet = vec![common::detection(0, 1, 1)].into();
    write_artifact(&incomplete, &path).unwrap();
    assert!(matches!(
        read_detections(&path),
        Err(V2sError::IncompleteDetection { index: 0 })
    ));
}

#[test]
fn test_non_finite_confidence_is_never_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("detection_full.json");
    let mut detection = common::detection(0, 1, 1).with_opacity(0.5);
    detection.confidence = f64::NAN;
    let set: DetectionSet = vec![detection].into();

    assert!(matches!(
        write_artifact(&set, &path),
        Err(V2sError::NonFiniteValue {
            index: 0,
            field: "confidence"
        })
    ));
    assert!(!path.exists());
}

#[test]
fn test_read_rejects_malformed_artifact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("detection_full.json");
    fs::write(&path, r#"[{"frame": "zero"}]"#).unwrap();
    assert!(matches!(read_detections(&path), Err(V2sError::Artifact { .. })));
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope").join("detection_full.json");
    assert!(matches!(
        write_artifact(&finalized(), &path),
        Err(V2sError::Io(_))
    ));
}

#[test]
fn test_action_uses_structural_encoding() {
    let action = GuiAction {
        taps: vec![Tap {
            x: 1.0,
            y: 2.0,
            confidence: 0.9,
            opacity: 0.6,
        }],
        frames: vec![7],
        act_type: ActionType::LongClick,
    };
    let value = vec![action].to_portable().unwrap();
    let first = &value[0];
    assert_eq!(first["act_type"], Value::from("LONG_CLICK"));
    assert_eq!(first["frames"], serde_json::json!([7]));
    assert_eq!(first["taps"][0]["confidenceOpacity"], 0.6);
}

#[test]
fn test_write_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("send_events.log");
    write_lines(&["a", "b"], &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
}

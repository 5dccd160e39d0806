#[allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use v2s_core::actions::{group_actions, ActionConfig, ActionType, GuiAction, Tap};
use v2s_core::detection::{BoundingBox, DetectionSet, TouchDetection};

fn touch(frame: u64, x: u32, y: u32, opacity: f64) -> TouchDetection {
    common::detection(frame, x, y).with_opacity(opacity)
}

fn stationary(frames: std::ops::Range<u64>) -> Vec<TouchDetection> {
    frames.map(|f| touch(f, 100, 200, 0.8)).collect()
}

#[test]
fn test_short_stationary_touch_is_click() {
    let set: DetectionSet = stationary(0..3).into();
    let actions = group_actions(&set, &ActionConfig::default());

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].act_type, ActionType::Click);
    assert_eq!(actions[0].frames, vec![0, 1, 2]);
    let (x, y) = actions[0].centroid().unwrap();
    assert_relative_eq!(x, 105.0);
    assert_relative_eq!(y, 205.0);
}

#[test]
fn test_long_stationary_touch_is_long_click() {
    let set: DetectionSet = stationary(10..30).into();
    let actions = group_actions(&set, &ActionConfig::default());

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].act_type, ActionType::LongClick);
    assert_eq!(actions[0].frames.len(), 20);
}

#[test]
fn test_moving_touch_is_swipe() {
    let set: DetectionSet = (0..5u64)
        .map(|f| touch(f, 100 + 30 * f as u32, 400, 0.9))
        .collect::<Vec<_>>()
        .into();
    let actions = group_actions(&set, &ActionConfig::default());

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].act_type, ActionType::Swipe);
    assert_relative_eq!(actions[0].travel(), 120.0);
}

#[test]
fn test_frame_gap_splits_actions() {
    let mut touches = stationary(0..3);
    touches.extend(stationary(4..6));
    touches.extend(stationary(20..22));
    let set: DetectionSet = touches.into();

    let actions = group_actions(&set, &ActionConfig::default());
    let frames: Vec<Vec<u64>> = actions.iter().map(|a| a.frames.clone()).collect();
    assert_eq!(frames, vec![vec![0, 1, 2, 4, 5], vec![20, 21]]);
}

#[test]
fn test_faint_touches_are_ignored() {
    let set: DetectionSet = vec![
        touch(0, 10, 10, 0.05),
        touch(1, 10, 10, 0.05),
        touch(9, 50, 50, 0.6),
    ]
    .into();

    let actions = group_actions(&set, &ActionConfig::default());
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].frames, vec![9]);
    assert_relative_eq!(actions[0].taps[0].opacity, 0.6);
}

#[test]
fn test_most_confident_touch_per_frame_wins() {
    let weak = TouchDetection::new(3, 100.0, BoundingBox::new(0, 0, 10, 10), 0.4).with_opacity(0.9);
    let strong =
        TouchDetection::new(3, 100.0, BoundingBox::new(300, 300, 10, 10), 0.95).with_opacity(0.9);
    let set: DetectionSet = vec![weak, strong].into();

    let actions = group_actions(&set, &ActionConfig::default());
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].taps.len(), 1);
    assert_relative_eq!(actions[0].taps[0].x, 305.0);
}

#[test]
fn test_empty_detections_give_no_actions() {
    assert!(group_actions(&DetectionSet::new(), &ActionConfig::default()).is_empty());
}

#[test]
fn test_action_json_keys() {
    let action = GuiAction {
        taps: vec![Tap {
            x: 1.0,
            y: 2.0,
            confidence: 0.5,
            opacity: 0.25,
        }],
        frames: vec![7],
        act_type: ActionType::LongClick,
    };
    let value = serde_json::to_value(&action).unwrap();

    assert_eq!(value["act_type"], "LONG_CLICK");
    assert_eq!(value["frames"][0], 7);
    assert_eq!(value["taps"][0]["confidenceOpacity"], 0.25);
    assert!(value["taps"][0].get("opacity").is_none());

    let back: GuiAction = serde_json::from_value(value).unwrap();
    assert_eq!(back, action);
}

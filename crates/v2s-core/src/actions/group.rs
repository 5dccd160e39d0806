use tracing::debug;

use crate::detection::{DetectionSet, TouchDetection};

use super::{ActionConfig, ActionType, GuiAction, Tap};

/// Split a finalized detection set into actions.
///
/// Touches below `min_opacity` are dropped and only the most confident touch
/// of each frame is kept. A frame gap wider than `max_frame_gap` ends the
/// current action.
pub fn group_actions(detections: &DetectionSet, config: &ActionConfig) -> Vec<GuiAction> {
    let mut per_frame: Vec<&TouchDetection> = Vec::new();
    for detection in detections
        .iter()
        .filter(|d| d.opacity.is_some_and(|o| o >= config.min_opacity))
    {
        match per_frame.last_mut() {
            Some(last) if last.frame == detection.frame => {
                if detection.confidence > last.confidence {
                    *last = detection;
                }
            }
            _ => per_frame.push(detection),
        }
    }

    let mut actions = Vec::new();
    let mut current: Vec<&TouchDetection> = Vec::new();
    for detection in per_frame {
        if let Some(prev) = current.last() {
            if detection.frame.saturating_sub(prev.frame) > config.max_frame_gap {
                actions.push(build_action(&current, config));
                current.clear();
            }
        }
        current.push(detection);
    }
    if !current.is_empty() {
        actions.push(build_action(&current, config));
    }

    debug!(
        detections = detections.len(),
        actions = actions.len(),
        "Grouped detections into actions"
    );
    actions
}

fn build_action(touches: &[&TouchDetection], config: &ActionConfig) -> GuiAction {
    let taps = touches
        .iter()
        .map(|d| {
            let (x, y) = d.center();
            Tap {
                x,
                y,
                confidence: d.confidence,
                opacity: d.opacity.unwrap_or_default(),
            }
        })
        .collect();
    let frames = touches.iter().map(|d| d.frame).collect();

    let mut action = GuiAction {
        taps,
        frames,
        act_type: ActionType::Click,
    };
    action.act_type = if action.travel() >= config.swipe_min_distance {
        ActionType::Swipe
    } else if action.frames.len() >= config.long_click_frames {
        ActionType::LongClick
    } else {
        ActionType::Click
    };
    action
}

//! Grouping of finalized detections into GUI actions.

mod group;

pub use group::group_actions;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_LONG_CLICK_FRAMES, DEFAULT_MAX_FRAME_GAP, DEFAULT_MIN_OPACITY,
    DEFAULT_SWIPE_MIN_DISTANCE,
};
use crate::io::artifact::ToPortable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Click,
    LongClick,
    Swipe,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Click => write!(f, "Click"),
            Self::LongClick => write!(f, "Long click"),
            Self::Swipe => write!(f, "Swipe"),
        }
    }
}

/// One touch point of an action, in display pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tap {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
    #[serde(rename = "confidenceOpacity")]
    pub opacity: f64,
}

/// A user gesture reconstructed from consecutive touches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuiAction {
    pub taps: Vec<Tap>,
    /// Frame index of each tap, ascending.
    pub frames: Vec<u64>,
    pub act_type: ActionType,
}

impl GuiAction {
    /// Mean tap position, or `None` for an action without taps.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.taps.is_empty() {
            return None;
        }
        let n = self.taps.len() as f64;
        let (sx, sy) = self
            .taps
            .iter()
            .fold((0.0, 0.0), |(sx, sy), t| (sx + t.x, sy + t.y));
        Some((sx / n, sy / n))
    }

    /// Straight-line distance from the first tap to the last.
    pub fn travel(&self) -> f64 {
        match (self.taps.first(), self.taps.last()) {
            (Some(a), Some(b)) => (b.x - a.x).hypot(b.y - a.y),
            _ => 0.0,
        }
    }
}

impl ToPortable for GuiAction {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Largest frame gap still joining two touches into one action.
    pub max_frame_gap: u64,
    /// Minimum frame count for a stationary action to be a long click.
    pub long_click_frames: usize,
    /// Minimum first-to-last travel (pixels) for a swipe.
    pub swipe_min_distance: f64,
    /// Touches below this opacity are ignored.
    pub min_opacity: f64,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            max_frame_gap: DEFAULT_MAX_FRAME_GAP,
            long_click_frames: DEFAULT_LONG_CLICK_FRAMES,
            swipe_min_distance: DEFAULT_SWIPE_MIN_DISTANCE,
            min_opacity: DEFAULT_MIN_OPACITY,
        }
    }
}

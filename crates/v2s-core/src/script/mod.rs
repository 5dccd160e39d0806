//! Conversion of GUI actions into `getevent` style touch commands.

mod convert;

pub use convert::{convert_actions, raw_commands, Event};

use serde::{Deserialize, Serialize};

/// Touchscreen geometry and the input event codes used to drive it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Input device node, e.g. `/dev/input/event1`.
    pub device: String,
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
    /// Largest raw touch X value.
    pub max_x: u32,
    /// Largest raw touch Y value.
    pub max_y: u32,
    pub ev_abs: String,
    pub ev_syn: String,
    pub ev_key: String,
    pub abs_x: String,
    pub abs_y: String,
    pub pressure: String,
    pub tracking_id: String,
    pub touch_major: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device: "/dev/input/event1".into(),
            width: 1080,
            height: 1920,
            max_x: 1079,
            max_y: 1919,
            ev_abs: "0003".into(),
            ev_syn: "0000".into(),
            ev_key: "0001".into(),
            abs_x: "0035".into(),
            abs_y: "0036".into(),
            pressure: "003a".into(),
            tracking_id: "0039".into(),
            touch_major: "0030".into(),
        }
    }
}

impl DeviceConfig {
    /// Map a display position to raw touch coordinates.
    pub fn to_touch(&self, x: f64, y: f64) -> (u32, u32) {
        let scale = |v: f64, max: u32, extent: u32| -> u32 {
            if extent == 0 {
                return 0;
            }
            let raw = v * (max as f64 + 1.0) / extent as f64;
            raw.clamp(0.0, max as f64) as u32
        };
        (
            scale(x, self.max_x, self.width),
            scale(y, self.max_y, self.height),
        )
    }
}

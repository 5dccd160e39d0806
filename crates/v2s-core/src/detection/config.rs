use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MAX_ASPECT_RATIO, DEFAULT_MAX_TOUCH_AREA, DEFAULT_MIN_FILL_RATIO,
    DEFAULT_MIN_TOUCH_AREA, DEFAULT_OPACITY_BORDER, DEFAULT_OPENING_RADIUS,
    DEFAULT_SIGMA_MULTIPLIER,
};

/// How a frame's foreground mask is cut.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ThresholdMethod {
    /// Bright outliers: `mean + sigma_multiplier * stddev` of the frame.
    #[default]
    MeanPlusSigma,
    /// Otsu split of the intensity histogram. Suits recordings with a
    /// uniformly dark or light background.
    Otsu,
    /// Constant cut-off on normalized intensity.
    Fixed(f32),
}

/// Thresholds and shape limits for blob-based touch localization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizerConfig {
    pub threshold_method: ThresholdMethod,
    /// `k` in `mean + k * stddev`.
    pub sigma_multiplier: f32,
    /// Kernel radius for the morphological opening of the mask.
    pub opening_radius: usize,
    /// Smallest blob area (pixels) accepted as a touch.
    pub min_area: usize,
    /// Largest blob area (pixels) accepted as a touch.
    pub max_area: usize,
    /// Minimum ratio of blob area to bounding box area.
    pub min_fill_ratio: f64,
    /// Maximum ratio of the bounding box's long side to its short side.
    pub max_aspect_ratio: f64,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            threshold_method: ThresholdMethod::default(),
            sigma_multiplier: DEFAULT_SIGMA_MULTIPLIER,
            opening_radius: DEFAULT_OPENING_RADIUS,
            min_area: DEFAULT_MIN_TOUCH_AREA,
            max_area: DEFAULT_MAX_TOUCH_AREA,
            min_fill_ratio: DEFAULT_MIN_FILL_RATIO,
            max_aspect_ratio: DEFAULT_MAX_ASPECT_RATIO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityConfig {
    /// Width of the crop border used as local background.
    pub border: usize,
}

impl Default for OpacityConfig {
    fn default() -> Self {
        Self {
            border: DEFAULT_OPACITY_BORDER,
        }
    }
}

/// File extension identifying a supported video container.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Location substituted when a config names no video path.
pub const DEFAULT_VIDEO_DIR: &str = "videos";

/// Phase 1 artifact: the finalized detection set.
pub const DETECTION_FILE_NAME: &str = "detection_full.json";

/// Phase 2 artifact: grouped GUI actions.
pub const ACTIONS_FILE_NAME: &str = "detected_actions.json";

/// Phase 3 artifact: `getevent` style command log.
pub const EVENTS_FILE_NAME: &str = "send_events.log";

/// Subdirectory (of the artifact dir) receiving debug overlay PNGs.
pub const OVERLAY_DIR_NAME: &str = "overlays";

/// Default frame sampling rate for extraction. Android screen recordings are
/// typically 30 fps.
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 30;

/// Default ffmpeg executable, resolved through `PATH`.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Default sigma multiplier for MeanPlusSigma thresholding.
pub const DEFAULT_SIGMA_MULTIPLIER: f32 = 3.0;

/// Number of histogram bins for Otsu's method.
pub const OTSU_HISTOGRAM_BINS: usize = 256;

/// Kernel radius of the opening that strips thin strokes from the mask.
pub const DEFAULT_OPENING_RADIUS: usize = 2;

/// Smallest blob (pixels) that can be a touch indicator.
pub const DEFAULT_MIN_TOUCH_AREA: usize = 200;

/// Largest blob (pixels) that can be a touch indicator.
pub const DEFAULT_MAX_TOUCH_AREA: usize = 20_000;

/// Area of a disc divided by the area of its bounding square (pi / 4).
pub const DISC_FILL_RATIO: f64 = std::f64::consts::FRAC_PI_4;

/// Minimum fill ratio (area / bbox area) for a blob to count as a disc.
pub const DEFAULT_MIN_FILL_RATIO: f64 = 0.6;

/// Maximum bounding box aspect ratio (long side / short side).
pub const DEFAULT_MAX_ASPECT_RATIO: f64 = 1.5;

/// Width in pixels of the crop border used to estimate local background.
pub const DEFAULT_OPACITY_BORDER: usize = 2;

/// Extra pixels added around a detection's region when cropping.
pub const CROP_PADDING: u32 = 4;

/// Detections further apart than this many frames start a new action.
pub const DEFAULT_MAX_FRAME_GAP: u64 = 2;

/// Actions lasting at least this many frames become long clicks.
pub const DEFAULT_LONG_CLICK_FRAMES: usize = 15;

/// Minimum first-to-last tap travel (display pixels) for a swipe.
pub const DEFAULT_SWIPE_MIN_DISTANCE: f64 = 40.0;

/// Detections below this opacity are ignored when grouping actions.
pub const DEFAULT_MIN_OPACITY: f64 = 0.2;

/// Pressure value written for clicks.
pub const DEFAULT_PRESSURE: &str = "00000032";

/// Touch major axis value written for clicks.
pub const DEFAULT_TOUCH_MAJOR: &str = "00000005";

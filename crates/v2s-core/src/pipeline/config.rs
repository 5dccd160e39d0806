use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::actions::ActionConfig;
use crate::consts::DEFAULT_VIDEO_DIR;
use crate::detection::{LocalizerConfig, OpacityConfig};
use crate::io::FrameSourceConfig;
use crate::script::DeviceConfig;

/// Where a video's artifacts are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactLayout {
    /// `Beside` for a single video, `PerVideo` for a directory of videos.
    #[default]
    Auto,
    /// Into the directory containing the video.
    Beside,
    /// Into `<video dir>/<video stem>/`, one directory per video.
    PerVideo,
}

impl std::fmt::Display for ArtifactLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Beside => write!(f, "Beside video"),
            Self::PerVideo => write!(f, "Per-video directory"),
        }
    }
}

impl ArtifactLayout {
    /// The concrete layout used for videos resolved from `location`.
    pub fn for_location(self, location: &Path) -> Self {
        match self {
            Self::Auto if location.is_dir() => Self::PerVideo,
            Self::Auto => Self::Beside,
            other => other,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Video file or directory of videos. Defaults to `videos`.
    pub video_path: Option<PathBuf>,
    pub layout: ArtifactLayout,
    /// Write frames with drawn detection boxes for debugging.
    pub debug_overlays: bool,
    pub frames: FrameSourceConfig,
    pub localizer: LocalizerConfig,
    pub opacity: OpacityConfig,
    pub actions: ActionConfig,
    pub device: DeviceConfig,
}

impl PipelineConfig {
    /// The configured video location, or the default when none is set.
    pub fn resolved_video_path(&self) -> PathBuf {
        self.video_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VIDEO_DIR))
    }
}

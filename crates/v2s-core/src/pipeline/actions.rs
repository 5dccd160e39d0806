use std::path::PathBuf;

use tracing::info;

use crate::actions::{group_actions, ActionConfig};
use crate::consts::{ACTIONS_FILE_NAME, DETECTION_FILE_NAME};
use crate::error::Result;
use crate::io::{read_detections, write_artifact};

use super::config::ArtifactLayout;
use super::resolve::{artifact_dirs, resolve_videos};
use super::types::Phase;

/// Phase 2: turn each `detection_full.json` into `detected_actions.json`.
pub struct ActionPhase {
    video_path: PathBuf,
    layout: ArtifactLayout,
    config: ActionConfig,
}

impl ActionPhase {
    pub fn new(video_path: impl Into<PathBuf>, layout: ArtifactLayout, config: ActionConfig) -> Self {
        Self {
            video_path: video_path.into(),
            layout,
            config,
        }
    }
}

impl Phase for ActionPhase {
    fn execute(&mut self) -> Result<()> {
        let videos = resolve_videos(&self.video_path)?;
        let layout = self.layout.for_location(&self.video_path);
        for dir in artifact_dirs(&videos, layout) {
            let detections = read_detections(&dir.join(DETECTION_FILE_NAME))?;
            let actions = group_actions(&detections, &self.config);
            write_artifact(&actions, &dir.join(ACTIONS_FILE_NAME))?;
            info!(dir = %dir.display(), actions = actions.len(), "Actions written");
        }
        Ok(())
    }
}

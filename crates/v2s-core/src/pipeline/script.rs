use std::path::PathBuf;

use tracing::info;

use crate::actions::GuiAction;
use crate::consts::{ACTIONS_FILE_NAME, EVENTS_FILE_NAME};
use crate::error::Result;
use crate::io::{read_json, write_lines};
use crate::script::{convert_actions, raw_commands, DeviceConfig};

use super::config::ArtifactLayout;
use super::resolve::{artifact_dirs, resolve_videos};
use super::types::Phase;

/// Phase 3: turn each `detected_actions.json` into a `send_events.log` of
/// touch commands for the configured device.
pub struct ScriptPhase {
    video_path: PathBuf,
    layout: ArtifactLayout,
    device: DeviceConfig,
    fps: u32,
}

impl ScriptPhase {
    pub fn new(
        video_path: impl Into<PathBuf>,
        layout: ArtifactLayout,
        device: DeviceConfig,
        fps: u32,
    ) -> Self {
        Self {
            video_path: video_path.into(),
            layout,
            device,
            fps,
        }
    }
}

impl Phase for ScriptPhase {
    fn execute(&mut self) -> Result<()> {
        let videos = resolve_videos(&self.video_path)?;
        let layout = self.layout.for_location(&self.video_path);
        for dir in artifact_dirs(&videos, layout) {
            let actions: Vec<GuiAction> = read_json(&dir.join(ACTIONS_FILE_NAME))?;
            let events = convert_actions(&actions, &self.device, self.fps);
            let commands = raw_commands(&events);
            write_lines(&commands, &dir.join(EVENTS_FILE_NAME))?;
            info!(dir = %dir.display(), commands = commands.len(), "Event script written");
        }
        Ok(())
    }
}

//! Frame extraction through an external `ffmpeg` process.

use std::fs;
use std::iter::Enumerate;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::vec::IntoIter;

use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::consts::{DEFAULT_FFMPEG_PATH, DEFAULT_FRAMES_PER_SECOND};
use crate::error::{Result, V2sError};
use crate::frame::{Frame, FrameIter, FrameSource};

use super::image_io::load_frame;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSourceConfig {
    /// ffmpeg executable.
    pub ffmpeg_path: PathBuf,
    /// Sampling rate for extraction.
    pub fps: u32,
}

impl Default for FrameSourceConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            fps: DEFAULT_FRAMES_PER_SECOND,
        }
    }
}

/// Extracts PNG frames into a scratch directory, then decodes them one at a
/// time as the iterator advances.
pub struct FfmpegFrameSource {
    config: FrameSourceConfig,
    video: Option<PathBuf>,
}

impl FfmpegFrameSource {
    pub fn new(config: FrameSourceConfig) -> Self {
        Self {
            config,
            video: None,
        }
    }

    pub fn video_path(&self) -> Option<&Path> {
        self.video.as_deref()
    }

    fn extract(&self, video: &Path, scratch: &Path) -> Result<Vec<PathBuf>> {
        let pattern = scratch.join("frame_%06d.png");
        let output = Command::new(&self.config.ffmpeg_path)
            .args(["-hide_banner", "-loglevel", "error", "-nostdin", "-i"])
            .arg(video)
            .arg("-vf")
            .arg(format!("fps={}", self.config.fps))
            .args(["-f", "image2"])
            .arg(&pattern)
            .output()
            .map_err(|e| {
                V2sError::FrameSource(format!(
                    "failed to launch {}: {e}",
                    self.config.ffmpeg_path.display()
                ))
            })?;

        if !output.status.success() {
            return Err(V2sError::FrameSource(format!(
                "ffmpeg exited with {} for {}: {}",
                output.status,
                video.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mut files: Vec<PathBuf> = fs::read_dir(scratch)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        files.sort();
        Ok(files)
    }
}

impl FrameSource for FfmpegFrameSource {
    fn set_video_path(&mut self, path: &Path) {
        self.video = Some(path.to_path_buf());
    }

    fn frames(&mut self) -> Result<FrameIter<'_>> {
        let video = self
            .video
            .as_deref()
            .ok_or_else(|| V2sError::FrameSource("no video path configured".into()))?;
        if !video.is_file() {
            return Err(V2sError::InputNotFound(video.to_path_buf()));
        }
        if self.config.fps == 0 {
            return Err(V2sError::FrameSource("fps must be positive".into()));
        }

        let scratch = tempfile::tempdir()?;
        let files = self.extract(video, scratch.path())?;
        info!(video = %video.display(), frames = files.len(), "Extracted frames");

        Ok(Box::new(ExtractedFrames {
            _scratch: scratch,
            files: files.into_iter().enumerate(),
            frame_ms: 1000.0 / self.config.fps as f64,
        }))
    }
}

/// Lazily decoded frames. Owns the scratch directory so the PNGs live as
/// long as the iterator.
struct ExtractedFrames {
    _scratch: TempDir,
    files: Enumerate<IntoIter<PathBuf>>,
    frame_ms: f64,
}

impl Iterator for ExtractedFrames {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        let (i, path) = self.files.next()?;
        debug!(path = %path.display(), "Decoding frame");
        Some(load_frame(&path, i as u64, i as f64 * self.frame_ms))
    }
}

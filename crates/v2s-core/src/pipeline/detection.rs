use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::consts::{DETECTION_FILE_NAME, OVERLAY_DIR_NAME};
use crate::detection::{correlate, DetectionSet, OpacityClassifier, TouchLocalizer};
use crate::error::Result;
use crate::frame::FrameSource;
use crate::io::write_artifact;

use super::config::ArtifactLayout;
use super::resolve::{artifact_dir, resolve_videos};
use super::types::{NoOpReporter, Phase, ProgressReporter};

/// Phase 1: locate touches, score their opacity, and write
/// `detection_full.json` for every resolved video.
///
/// Videos are processed one at a time. The first failure aborts the phase;
/// artifacts of videos finished before it are left in place.
pub struct DetectionPhase {
    video_path: PathBuf,
    layout: ArtifactLayout,
    debug_overlays: bool,
    source: Box<dyn FrameSource>,
    localizer: Box<dyn TouchLocalizer>,
    classifier: Box<dyn OpacityClassifier>,
    detections: DetectionSet,
    reporter: Arc<dyn ProgressReporter>,
}

impl DetectionPhase {
    pub fn new(
        video_path: impl Into<PathBuf>,
        source: Box<dyn FrameSource>,
        localizer: Box<dyn TouchLocalizer>,
        classifier: Box<dyn OpacityClassifier>,
    ) -> Self {
        Self {
            video_path: video_path.into(),
            layout: ArtifactLayout::default(),
            debug_overlays: false,
            source,
            localizer,
            classifier,
            detections: DetectionSet::new(),
            reporter: Arc::new(NoOpReporter),
        }
    }

    pub fn with_layout(mut self, layout: ArtifactLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_debug_overlays(mut self, enabled: bool) -> Self {
        self.debug_overlays = enabled;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    /// Detections of the most recently processed video.
    ///
    /// Borrowed, not copied: the set is replaced by the next video or by
    /// [`set_detections`](Self::set_detections).
    pub fn detections(&self) -> &DetectionSet {
        &self.detections
    }

    /// Replace the current detections wholesale.
    pub fn set_detections(&mut self, detections: DetectionSet) {
        self.detections = detections;
    }

    /// Serialize the current detections to `path`.
    ///
    /// Fails without writing if any detection lacks an opacity score.
    pub fn write_detections(&self, path: &Path) -> Result<()> {
        self.detections.ensure_complete()?;
        write_artifact(&self.detections, path)
    }

    /// Run the full single-video procedure and return the artifact path.
    pub fn process_video(&mut self, video: &Path) -> Result<PathBuf> {
        let out_dir = artifact_dir(video, self.layout.for_location(&self.video_path));
        info!(video = %video.display(), "Detecting touches");

        self.source.set_video_path(video);
        self.localizer.execute_detection(self.source.as_mut())?;

        let overlay_dir = self.debug_overlays.then(|| out_dir.join(OVERLAY_DIR_NAME));
        let regions = self
            .localizer
            .annotate(self.source.as_mut(), overlay_dir.as_deref())?;
        let predictions = self.classifier.classify(&regions)?;

        let incomplete = self.localizer.detections().clone();
        self.detections = correlate(incomplete, predictions)?;

        fs::create_dir_all(&out_dir)?;
        let artifact = out_dir.join(DETECTION_FILE_NAME);
        self.write_detections(&artifact)?;
        info!(
            video = %video.display(),
            detections = self.detections.len(),
            artifact = %artifact.display(),
            "Detection artifact written"
        );
        Ok(artifact)
    }
}

impl Phase for DetectionPhase {
    fn execute(&mut self) -> Result<()> {
        let videos = resolve_videos(&self.video_path)?;
        if videos.is_empty() {
            info!(path = %self.video_path.display(), "No videos to process");
            return Ok(());
        }
        let layout = self.layout.for_location(&self.video_path);
        if videos.len() > 1 && layout == ArtifactLayout::Beside {
            warn!(
                videos = videos.len(),
                "Videos share one artifact directory; each run overwrites the previous artifact"
            );
        }

        let total = videos.len();
        for (index, video) in videos.iter().enumerate() {
            self.reporter.begin_video(video, index, total);
            let artifact = self.process_video(video)?;
            self.reporter.finish_video(&artifact, self.detections.len());
        }
        Ok(())
    }
}

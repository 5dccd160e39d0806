use std::sync::Arc;

use tracing::info;

use crate::detection::{
    BlobTouchLocalizer, ContrastOpacityClassifier, OpacityClassifier, TouchLocalizer,
};
use crate::error::Result;
use crate::frame::FrameSource;
use crate::io::FfmpegFrameSource;

use super::actions::ActionPhase;
use super::config::PipelineConfig;
use super::detection::DetectionPhase;
use super::script::ScriptPhase;
use super::types::{NoOpReporter, Phase, ProgressReporter};

/// The external services the detection phase drives.
pub struct Collaborators {
    pub source: Box<dyn FrameSource>,
    pub localizer: Box<dyn TouchLocalizer>,
    pub classifier: Box<dyn OpacityClassifier>,
}

impl Collaborators {
    /// ffmpeg extraction, blob localization and contrast opacity.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            source: Box::new(FfmpegFrameSource::new(config.frames.clone())),
            localizer: Box::new(BlobTouchLocalizer::new(config.localizer.clone())),
            classifier: Box::new(ContrastOpacityClassifier::new(config.opacity.clone())),
        }
    }
}

/// Ordered sequence of phases, run one after another.
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    reporter: Arc<dyn ProgressReporter>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            reporter: Arc::new(NoOpReporter),
        }
    }

    pub fn with_reporter(reporter: Arc<dyn ProgressReporter>) -> Self {
        Self {
            phases: Vec::new(),
            reporter,
        }
    }

    /// The standard three-phase run (detection, actions, event script) with
    /// the bundled collaborators.
    pub fn v2s(config: &PipelineConfig, reporter: Arc<dyn ProgressReporter>) -> Self {
        Self::v2s_with(config, Collaborators::from_config(config), reporter)
    }

    /// The standard three-phase run with caller-supplied collaborators.
    ///
    /// The video location is resolved here, once, and shared by all phases.
    pub fn v2s_with(
        config: &PipelineConfig,
        collaborators: Collaborators,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        let video_path = config.resolved_video_path();
        let Collaborators {
            source,
            localizer,
            classifier,
        } = collaborators;

        let detection = DetectionPhase::new(video_path.clone(), source, localizer, classifier)
            .with_layout(config.layout)
            .with_debug_overlays(config.debug_overlays)
            .with_reporter(Arc::clone(&reporter));
        let actions = ActionPhase::new(video_path.clone(), config.layout, config.actions.clone());
        let script = ScriptPhase::new(
            video_path,
            config.layout,
            config.device.clone(),
            config.frames.fps,
        );

        let mut pipeline = Self::with_reporter(reporter);
        pipeline.add_phase(Box::new(detection));
        pipeline.add_phase(Box::new(actions));
        pipeline.add_phase(Box::new(script));
        pipeline
    }

    /// Append a phase. Nothing is deduplicated.
    pub fn add_phase(&mut self, phase: Box<dyn Phase>) {
        self.phases.push(phase);
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Run every phase in insertion order. The first error stops the run and
    /// is returned unchanged.
    pub fn execute(&mut self) -> Result<()> {
        let total = self.phases.len();
        for (index, phase) in self.phases.iter_mut().enumerate() {
            info!(phase = index + 1, total, "Starting phase");
            self.reporter.begin_phase(index, total);
            phase.execute()?;
        }
        info!(phases = total, "Pipeline complete");
        Ok(())
    }
}

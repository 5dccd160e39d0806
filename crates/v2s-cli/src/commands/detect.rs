use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, ValueEnum};
use v2s_core::pipeline::{ArtifactLayout, Collaborators, DetectionPhase, Phase, PipelineConfig};

use crate::progress::SpinnerReporter;

#[derive(Clone, ValueEnum)]
pub enum LayoutArg {
    Auto,
    Beside,
    PerVideo,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Video file or directory of videos
    pub path: PathBuf,

    /// Pipeline config file (TOML) for collaborator settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where artifacts are written
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Write frames with drawn detection boxes
    #[arg(long)]
    pub overlays: bool,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => super::load_config(path)?,
        None => PipelineConfig::default(),
    };
    config.video_path = Some(args.path.clone());
    if let Some(ref layout) = args.layout {
        config.layout = match layout {
            LayoutArg::Auto => ArtifactLayout::Auto,
            LayoutArg::Beside => ArtifactLayout::Beside,
            LayoutArg::PerVideo => ArtifactLayout::PerVideo,
        };
    }
    config.debug_overlays |= args.overlays;

    let Collaborators {
        source,
        localizer,
        classifier,
    } = Collaborators::from_config(&config);

    let reporter = Arc::new(SpinnerReporter::new()?);
    let mut phase = DetectionPhase::new(config.resolved_video_path(), source, localizer, classifier)
        .with_layout(config.layout)
        .with_debug_overlays(config.debug_overlays)
        .with_reporter(reporter.clone());
    phase.execute()?;
    reporter.finish("Detection complete");

    Ok(())
}

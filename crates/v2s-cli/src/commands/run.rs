use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use v2s_core::pipeline::Pipeline;

use crate::progress::SpinnerReporter;
use crate::summary::print_pipeline_summary;

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline config file (TOML)
    pub config: PathBuf,

    /// Video file or directory, overriding the config
    #[arg(long)]
    pub video: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = super::load_config(&args.config)?;
    if let Some(ref video) = args.video {
        config.video_path = Some(video.clone());
    }

    print_pipeline_summary(&config);

    let reporter = Arc::new(SpinnerReporter::new()?);
    let mut pipeline = Pipeline::v2s(&config, reporter.clone());
    pipeline.execute()?;
    reporter.finish("Done");

    println!(
        "\nArtifacts written for {}",
        config.resolved_video_path().display()
    );
    Ok(())
}

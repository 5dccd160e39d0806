use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use v2s_core::io::read_detections;

#[derive(Args)]
pub struct InfoArgs {
    /// Detection artifact (detection_full.json)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let detections = read_detections(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    println!("File:         {}", args.file.display());
    println!("Detections:   {}", detections.len());

    let all = detections.as_slice();
    let (Some(first), Some(last)) = (all.first(), all.last()) else {
        return Ok(());
    };

    let mut frames: Vec<u64> = all.iter().map(|d| d.frame).collect();
    frames.dedup();
    let n = all.len() as f64;
    let confidence = all.iter().map(|d| d.confidence).sum::<f64>() / n;
    let opacity = all.iter().filter_map(|d| d.opacity).sum::<f64>() / n;

    println!("Frames:       {} ({}..={})", frames.len(), first.frame, last.frame);
    println!(
        "Time span:    {:.3}s .. {:.3}s",
        first.timestamp_ms / 1000.0,
        last.timestamp_ms / 1000.0
    );
    println!("Confidence:   {:.3} mean", confidence);
    println!("Opacity:      {:.3} mean", opacity);

    Ok(())
}

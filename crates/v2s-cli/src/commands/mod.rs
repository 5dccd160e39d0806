pub mod config;
pub mod detect;
pub mod info;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use v2s_core::pipeline::PipelineConfig;

/// Load a TOML pipeline config.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).context("Invalid pipeline config")
}

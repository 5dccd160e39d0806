use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use v2s_core::pipeline::ProgressReporter;

const PHASE_NAMES: [&str; 3] = ["Detecting touches", "Grouping actions", "Writing event script"];

/// Spinner driven by pipeline progress notifications.
pub struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner} {prefix:24} {msg}")?);
        bar.enable_steady_tick(Duration::from_millis(120));
        Ok(Self { bar })
    }

    pub fn finish(&self, message: &'static str) {
        self.bar.finish_with_message(message);
    }
}

impl ProgressReporter for SpinnerReporter {
    fn begin_phase(&self, index: usize, total: usize) {
        let name = PHASE_NAMES.get(index).copied().unwrap_or("Running phase");
        self.bar.set_prefix(format!("[{}/{}] {}", index + 1, total, name));
        self.bar.set_message("");
    }

    fn begin_video(&self, video: &Path, index: usize, total: usize) {
        let name = video
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bar.set_message(format!("{name} ({}/{})", index + 1, total));
    }

    fn finish_video(&self, artifact: &Path, detections: usize) {
        self.bar
            .println(format!("  {detections} detections -> {}", artifact.display()));
    }
}

use std::path::Path;

use crate::error::Result;

/// One stage of the pipeline.
///
/// A phase carries everything it needs from construction; running it either
/// updates its own state or writes an artifact the next phase reads.
pub trait Phase {
    fn execute(&mut self) -> Result<()>;
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// Phase `index` (zero-based) of `total` is starting.
    fn begin_phase(&self, _index: usize, _total: usize) {}

    /// The detection phase is starting on `video`, the `index`-th of `total`.
    fn begin_video(&self, _video: &Path, _index: usize, _total: usize) {}

    /// The current video's artifact has been written.
    fn finish_video(&self, _artifact: &Path, _detections: usize) {}
}

/// Reporter that ignores every notification.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

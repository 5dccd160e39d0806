pub mod config;
mod actions;
mod detection;
mod orchestrator;
mod resolve;
mod script;
mod types;

pub use actions::ActionPhase;
pub use config::{ArtifactLayout, PipelineConfig};
pub use detection::DetectionPhase;
pub use orchestrator::{Collaborators, Pipeline};
pub use resolve::{artifact_dir, artifact_dirs, is_supported_video, resolve_videos};
pub use script::ScriptPhase;
pub use types::{NoOpReporter, Phase, ProgressReporter};

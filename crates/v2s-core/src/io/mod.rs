pub mod artifact;
pub mod ffmpeg;
pub mod image_io;

pub use artifact::{read_detections, read_json, write_artifact, write_lines, ToPortable};
pub use ffmpeg::{FfmpegFrameSource, FrameSourceConfig};

use std::path::Path;

use ndarray::Array2;

use crate::error::Result;

/// A single decoded grayscale video frame.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Zero-based position of the frame in the sampled sequence.
    pub index: u64,
    /// Presentation time relative to the start of the video.
    pub timestamp_ms: f64,
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl Frame {
    pub fn new(index: u64, timestamp_ms: f64, data: Array2<f32>) -> Self {
        Self {
            index,
            timestamp_ms,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Lazy, finite sequence of frames. Items are fallible so decoding errors
/// surface at the frame that failed.
pub type FrameIter<'a> = Box<dyn Iterator<Item = Result<Frame>> + 'a>;

/// Yields decoded frames for one configured video.
pub trait FrameSource {
    /// Point the source at a video. Subsequent `frames()` calls read it.
    fn set_video_path(&mut self, path: &Path);

    /// Start a fresh pass over the configured video's frames, in order.
    ///
    /// Every call restarts from the first frame.
    fn frames(&mut self) -> Result<FrameIter<'_>>;
}

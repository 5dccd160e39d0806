use std::path::Path;

use ndarray::Array2;

use crate::error::Result;
use crate::frame::Frame;

/// Decode an image file into a grayscale [`Frame`].
pub fn load_frame(path: &Path, index: u64, timestamp_ms: f64) -> Result<Frame> {
    let gray = image::open(path)?.to_luma16();
    let (w, h) = gray.dimensions();
    let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        gray.get_pixel(col as u32, row as u32).0[0] as f32 / 65535.0
    });
    Ok(Frame::new(index, timestamp_ms, data))
}

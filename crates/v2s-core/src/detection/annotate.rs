use std::fs;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use ndarray::{s, Array2};
use tracing::debug;

use crate::consts::CROP_PADDING;
use crate::error::{Result, V2sError};
use crate::frame::{Frame, FrameSource};

use super::types::{BoundingBox, DetectionSet, TouchDetection, TouchRegion};

const OVERLAY_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Walk the frames once and cut out the padded region of every detection.
///
/// Detections must be in temporal order. A detection whose frame the source
/// never yields fails with [`V2sError::MissingFrame`].
pub fn crop_regions(
    detections: &DetectionSet,
    source: &mut dyn FrameSource,
    overlay_dir: Option<&Path>,
) -> Result<Vec<TouchRegion>> {
    let mut regions = Vec::with_capacity(detections.len());
    if detections.is_empty() {
        return Ok(regions);
    }
    if let Some(dir) = overlay_dir {
        fs::create_dir_all(dir)?;
    }

    let all = detections.as_slice();
    let mut next = 0usize;

    for frame in source.frames()? {
        let frame = frame?;
        let start = next;
        while next < all.len() && all[next].frame == frame.index {
            let bounds = all[next].region.padded(
                CROP_PADDING,
                frame.width() as u32,
                frame.height() as u32,
            );
            regions.push(TouchRegion {
                detection: next,
                frame: frame.index,
                bounds,
                pixels: crop(&frame.data, &bounds),
            });
            next += 1;
        }

        if next > start {
            if let Some(dir) = overlay_dir {
                let path = dir.join(format!("frame_{:06}.png", frame.index));
                save_overlay(&frame, &all[start..next], &path)?;
            }
        }
        if next == all.len() {
            break;
        }
    }

    if let Some(missing) = all.get(next) {
        return Err(V2sError::MissingFrame {
            frame: missing.frame,
        });
    }
    debug!(regions = regions.len(), "Cropped touch regions");
    Ok(regions)
}

fn crop(data: &Array2<f32>, bounds: &BoundingBox) -> Array2<f32> {
    let (x0, y0) = (bounds.x as usize, bounds.y as usize);
    let (x1, y1) = (bounds.right() as usize, bounds.bottom() as usize);
    data.slice(s![y0..y1, x0..x1]).to_owned()
}

/// Save the frame as 8-bit RGB PNG with a box outline per detection.
pub fn save_overlay(frame: &Frame, detections: &[TouchDetection], path: &Path) -> Result<()> {
    let (h, w) = (frame.height() as u32, frame.width() as u32);
    let mut img = RgbImage::new(w, h);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let v = (frame.data[[y as usize, x as usize]].clamp(0.0, 1.0) * 255.0) as u8;
        *pixel = Rgb([v, v, v]);
    }

    for detection in detections {
        let b = detection.region;
        if b.width == 0 || b.height == 0 {
            continue;
        }
        let right = b.right().min(w).saturating_sub(1);
        let bottom = b.bottom().min(h).saturating_sub(1);
        for x in b.x..=right {
            put(&mut img, x, b.y);
            put(&mut img, x, bottom);
        }
        for y in b.y..=bottom {
            put(&mut img, b.x, y);
            put(&mut img, right, y);
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

fn put(img: &mut RgbImage, x: u32, y: u32) {
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, OVERLAY_COLOR);
    }
}

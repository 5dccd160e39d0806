use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ndarray::Array2;
use v2s_core::detection::{
    BoundingBox, DetectionSet, OpacityClassifier, OpacityPrediction, TouchDetection,
    TouchLocalizer, TouchRegion,
};
use v2s_core::error::{Result, V2sError};
use v2s_core::frame::{Frame, FrameIter, FrameSource};
use v2s_core::pipeline::Collaborators;

pub const FRAME_SIZE: usize = 48;

/// Dark frame with a bright disc of `radius` centred at (`cx`, `cy`).
pub fn disc_frame(index: u64, cx: f64, cy: f64, radius: f64, level: f32) -> Frame {
    let data = Array2::from_shape_fn((FRAME_SIZE * 2, FRAME_SIZE * 2), |(r, c)| {
        let d = ((r as f64 - cy).powi(2) + (c as f64 - cx).powi(2)).sqrt();
        if d <= radius {
            level
        } else {
            0.1
        }
    });
    Frame::new(index, index as f64 * 100.0 / 3.0, data)
}

pub fn blank_frames(count: u64) -> Vec<Frame> {
    (0..count)
        .map(|i| {
            Frame::new(
                i,
                i as f64 * 100.0 / 3.0,
                Array2::from_elem((FRAME_SIZE, FRAME_SIZE), 0.2),
            )
        })
        .collect()
}

pub fn detection(frame: u64, x: u32, y: u32) -> TouchDetection {
    TouchDetection::new(frame, frame as f64 * 100.0 / 3.0, BoundingBox::new(x, y, 10, 10), 0.9)
}

/// Create empty placeholder files under `dir`.
pub fn touch_files(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, b"").unwrap();
            path
        })
        .collect()
}

/// Frame source serving the same frames for every video and recording
/// which videos it was pointed at.
pub struct FakeFrameSource {
    pub frames: Vec<Frame>,
    pub configured: Rc<RefCell<Vec<PathBuf>>>,
    /// File name whose frames fail to decode.
    pub fail_on: Option<String>,
    current: Option<PathBuf>,
}

impl FakeFrameSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            configured: Rc::new(RefCell::new(Vec::new())),
            fail_on: None,
            current: None,
        }
    }
}

impl FrameSource for FakeFrameSource {
    fn set_video_path(&mut self, path: &Path) {
        self.configured.borrow_mut().push(path.to_path_buf());
        self.current = Some(path.to_path_buf());
    }

    fn frames(&mut self) -> Result<FrameIter<'_>> {
        let current = self
            .current
            .as_ref()
            .ok_or_else(|| V2sError::FrameSource("no video".into()))?;
        let name = current.file_name().unwrap().to_string_lossy().into_owned();
        if self.fail_on.as_deref() == Some(name.as_str()) {
            return Err(V2sError::FrameSource(format!("cannot decode {name}")));
        }
        Ok(Box::new(self.frames.iter().cloned().map(Ok::<Frame, V2sError>)))
    }
}

/// Emits `per_frame` detections for every frame it sees.
pub struct FakeLocalizer {
    pub per_frame: usize,
    detections: DetectionSet,
}

impl FakeLocalizer {
    pub fn new(per_frame: usize) -> Self {
        Self {
            per_frame,
            detections: DetectionSet::new(),
        }
    }
}

impl TouchLocalizer for FakeLocalizer {
    fn execute_detection(&mut self, source: &mut dyn FrameSource) -> Result<()> {
        let mut detections = DetectionSet::new();
        for frame in source.frames()? {
            let frame = frame?;
            for k in 0..self.per_frame {
                let mut d = detection(frame.index, 4 + 12 * k as u32, 8);
                d.timestamp_ms = frame.timestamp_ms;
                detections.push(d);
            }
        }
        self.detections = detections;
        Ok(())
    }

    fn detections(&self) -> &DetectionSet {
        &self.detections
    }
}

/// Scores every region 0.75, optionally dropping the last `short_by`.
pub struct FakeClassifier {
    pub short_by: usize,
}

impl OpacityClassifier for FakeClassifier {
    fn classify(&mut self, regions: &[TouchRegion]) -> Result<Vec<OpacityPrediction>> {
        let keep = regions.len().saturating_sub(self.short_by);
        Ok(regions[..keep]
            .iter()
            .map(|r| OpacityPrediction {
                detection: r.detection,
                opacity: 0.75,
            })
            .collect())
    }
}

pub fn fake_collaborators(
    frames: Vec<Frame>,
    per_frame: usize,
    short_by: usize,
) -> (Collaborators, Rc<RefCell<Vec<PathBuf>>>) {
    let source = FakeFrameSource::new(frames);
    let configured = Rc::clone(&source.configured);
    (
        Collaborators {
            source: Box::new(source),
            localizer: Box::new(FakeLocalizer::new(per_frame)),
            classifier: Box::new(FakeClassifier { short_by }),
        },
        configured,
    )
}

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, V2sError};
use crate::io::artifact::ToPortable;

/// Axis-aligned rectangle in frame pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Geometric centre as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Grow by `pad` on every side, clamped to a `max_width` x `max_height` frame.
    pub fn padded(&self, pad: u32, max_width: u32, max_height: u32) -> Self {
        let x = self.x.saturating_sub(pad).min(max_width);
        let y = self.y.saturating_sub(pad).min(max_height);
        let right = (self.right() + pad).min(max_width);
        let bottom = (self.bottom() + pad).min(max_height);
        Self {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }
}

/// One observed touch candidate.
///
/// Created by a [`TouchLocalizer`](super::TouchLocalizer) without an opacity
/// score; [`correlate`](super::correlate) attaches the score exactly once.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TouchDetection {
    /// Index of the owning frame.
    pub frame: u64,
    pub timestamp_ms: f64,
    pub region: BoundingBox,
    /// Localizer confidence in [0.0, 1.0].
    pub confidence: f64,
    /// Opacity score in [0.0, 1.0]; `None` until correlation.
    pub opacity: Option<f64>,
}

impl TouchDetection {
    pub fn new(frame: u64, timestamp_ms: f64, region: BoundingBox, confidence: f64) -> Self {
        Self {
            frame,
            timestamp_ms,
            region,
            confidence,
            opacity: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Touch position: centre of the region.
    pub fn center(&self) -> (f64, f64) {
        self.region.center()
    }

    pub fn is_complete(&self) -> bool {
        self.opacity.is_some()
    }

    /// Name of the first NaN or infinite number, if any.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("confidence", Some(self.confidence)),
            ("timestamp_ms", Some(self.timestamp_ms)),
            ("opacity", self.opacity),
        ]
        .into_iter()
        .find(|(_, v)| v.is_some_and(|v| !v.is_finite()))
        .map(|(field, _)| field)
    }
}

/// On-disk shape of a finalized detection. Keys are emitted sorted because
/// `serde_json::Value` objects are ordered maps.
#[derive(Serialize, Deserialize)]
pub(crate) struct PortableDetection {
    pub confidence: f64,
    pub frame: u64,
    pub opacity: Option<f64>,
    pub region: BoundingBox,
    pub timestamp_ms: f64,
    pub x: f64,
    pub y: f64,
}

impl ToPortable for TouchDetection {
    fn to_portable(&self) -> Result<Value> {
        let (x, y) = self.center();
        let portable = PortableDetection {
            confidence: self.confidence,
            frame: self.frame,
            opacity: self.opacity,
            region: self.region,
            timestamp_ms: self.timestamp_ms,
            x,
            y,
        };
        Ok(serde_json::to_value(portable)?)
    }
}

impl PortableDetection {
    /// Rebuild the detection; `x`/`y` are derived from `region` and ignored.
    pub(crate) fn into_detection(self, index: usize) -> Result<TouchDetection> {
        let opacity = self
            .opacity
            .ok_or(V2sError::IncompleteDetection { index })?;
        Ok(TouchDetection {
            frame: self.frame,
            timestamp_ms: self.timestamp_ms,
            region: self.region,
            confidence: self.confidence,
            opacity: Some(opacity),
        })
    }
}

/// Ordered detections for one video. Insertion order is temporal order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DetectionSet(Vec<TouchDetection>);

impl DetectionSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, detection: TouchDetection) {
        self.0.push(detection);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TouchDetection> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TouchDetection] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&TouchDetection> {
        self.0.get(index)
    }

    pub fn into_inner(self) -> Vec<TouchDetection> {
        self.0
    }

    /// Fails on the first detection that lacks an opacity score or carries
    /// a NaN or infinite number, which JSON cannot hold.
    pub fn ensure_complete(&self) -> Result<()> {
        for (index, d) in self.0.iter().enumerate() {
            if !d.is_complete() {
                return Err(V2sError::IncompleteDetection { index });
            }
            if let Some(field) = d.non_finite_field() {
                return Err(V2sError::NonFiniteValue { index, field });
            }
        }
        Ok(())
    }
}

impl From<Vec<TouchDetection>> for DetectionSet {
    fn from(detections: Vec<TouchDetection>) -> Self {
        Self(detections)
    }
}

impl FromIterator<TouchDetection> for DetectionSet {
    fn from_iter<I: IntoIterator<Item = TouchDetection>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DetectionSet {
    type Item = &'a TouchDetection;
    type IntoIter = std::slice::Iter<'a, TouchDetection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// NaN and infinity would be written as `null` and could not be read back.
impl ToPortable for DetectionSet {
    fn to_portable(&self) -> Result<Value> {
        let items = self
            .0
            .iter()
            .enumerate()
            .map(|(index, d)| match d.non_finite_field() {
                Some(field) => Err(V2sError::NonFiniteValue { index, field }),
                None => d.to_portable(),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Array(items))
    }
}

/// Score for one detection, produced by an opacity classifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityPrediction {
    /// Position of the scored detection within its set.
    pub detection: usize,
    pub opacity: f64,
}

/// Cropped pixels around one detection, handed to the opacity classifier.
#[derive(Clone, Debug)]
pub struct TouchRegion {
    /// Position of the detection within its set.
    pub detection: usize,
    pub frame: u64,
    /// Crop bounds within the frame (the detection region plus padding).
    pub bounds: BoundingBox,
    pub pixels: Array2<f32>,
}

use tracing::debug;

use crate::error::{Result, V2sError};

use super::types::{DetectionSet, OpacityPrediction};

/// Attach one opacity prediction to each incomplete detection.
///
/// Predictions must be aligned one-to-one, in order, with the detections.
/// A count mismatch or a prediction aimed at the wrong position is an error;
/// nothing is truncated or padded.
pub fn correlate(
    incomplete: DetectionSet,
    predictions: Vec<OpacityPrediction>,
) -> Result<DetectionSet> {
    if incomplete.len() != predictions.len() {
        return Err(V2sError::CorrelationMismatch {
            detections: incomplete.len(),
            predictions: predictions.len(),
        });
    }

    let mut detections = incomplete.into_inner();
    for (position, (detection, prediction)) in
        detections.iter_mut().zip(predictions).enumerate()
    {
        if prediction.detection != position {
            return Err(V2sError::MisalignedPrediction {
                position,
                detection: prediction.detection,
            });
        }
        if !prediction.opacity.is_finite() {
            return Err(V2sError::Classifier(format!(
                "non-finite opacity for detection {position}"
            )));
        }
        detection.opacity = Some(prediction.opacity);
    }

    debug!(detections = detections.len(), "Correlated opacity predictions");
    Ok(DetectionSet::from(detections))
}

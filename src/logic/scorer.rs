//! Scorer - Reading to verdict
//!
//! Builds the feature vector, runs the classifier and derives the verdict.
//! Pure: recording the verdict is left to the caller.

use thiserror::Error;

use crate::models::{SensorReading, Verdict};
use super::model::{Label, ModelHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("anomaly model is not loaded")]
    ModelUnavailable,
}

/// Score one reading against the loaded model
pub fn score(handle: &ModelHandle, reading: &SensorReading) -> Result<Verdict, ScoringError> {
    let model = handle.model().ok_or(ScoringError::ModelUnavailable)?;

    let classification = model.classify(&reading.features());
    let is_anomaly = classification.label == Label::Outlier;

    tracing::trace!(
        label = classification.label.sentinel(),
        raw_score = classification.raw_score,
        "Reading classified"
    );

    Ok(Verdict::new(is_anomaly, classification.raw_score))
}

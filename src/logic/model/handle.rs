//! Model Handle - Loaded-or-not wrapper around the classifier artifact
//!
//! The handle is built once at startup and never replaced. A missing
//! artifact is an expected state (fresh deployment before training) and
//! yields `ModelHandle::Unloaded` instead of an error.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::FEATURE_COUNT;
use super::forest::IsolationForest;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported model artifact format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

/// Binary label produced by the outlier detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Inlier,
    Outlier,
}

impl Label {
    /// Artifact convention: -1 is an outlier, 1 an inlier
    pub fn sentinel(&self) -> i8 {
        match self {
            Label::Inlier => 1,
            Label::Outlier => -1,
        }
    }
}

/// Classifier output for one feature vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: Label,
    /// More negative means more anomalous
    pub raw_score: f64,
}

/// Pure, thread-safe scoring function over a fixed-width feature vector
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &[f64; FEATURE_COUNT]) -> Classification;
}

/// Metadata recorded when the artifact was loaded
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_path: String,
    pub format: String,
    pub n_estimators: usize,
    pub max_samples: u64,
    pub offset: f64,
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

/// A classifier together with its load metadata
pub struct LoadedModel {
    classifier: Arc<dyn Classifier>,
    info: ModelInfo,
}

impl LoadedModel {
    pub fn new(classifier: Arc<dyn Classifier>, info: ModelInfo) -> Self {
        Self { classifier, info }
    }

    pub fn classify(&self, features: &[f64; FEATURE_COUNT]) -> Classification {
        self.classifier.classify(features)
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum ModelHandle {
    Loaded(Arc<LoadedModel>),
    Unloaded,
}

impl ModelHandle {
    /// Load an isolation forest artifact from `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        tracing::info!("Loading model artifact from: {}", path.display());

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(
                    "Model artifact not found at {}, scoring disabled until a trained model is deployed",
                    path.display()
                );
                return Ok(ModelHandle::Unloaded);
            }
            Err(source) => {
                return Err(ModelError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let forest = IsolationForest::from_slice(&bytes)?;

        let info = ModelInfo {
            model_path: path.display().to_string(),
            format: forest.format.clone(),
            n_estimators: forest.trees.len(),
            max_samples: forest.max_samples,
            offset: forest.offset,
            fingerprint: hex::encode(Sha256::digest(&bytes)),
            loaded_at: Utc::now(),
        };

        tracing::info!(
            trees = info.n_estimators,
            max_samples = info.max_samples,
            fingerprint = %info.fingerprint,
            "Model loaded successfully"
        );

        Ok(Self::from_classifier(Arc::new(forest), info))
    }

    pub fn from_classifier(classifier: Arc<dyn Classifier>, info: ModelInfo) -> Self {
        ModelHandle::Loaded(Arc::new(LoadedModel::new(classifier, info)))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelHandle::Loaded(_))
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        match self {
            ModelHandle::Loaded(model) => Some(model.as_ref()),
            ModelHandle::Unloaded => None,
        }
    }
}

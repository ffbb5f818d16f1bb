//! Model Module - Classifier artifact loading and inference
//!
//! The handle owns the loaded-or-not state; the forest implements scoring.

pub mod forest;
pub mod handle;

// Re-export common types
pub use forest::{IsolationForest, IsolationTree, ARTIFACT_FORMAT};
pub use handle::{Classification, Classifier, Label, LoadedModel, ModelError, ModelHandle, ModelInfo};

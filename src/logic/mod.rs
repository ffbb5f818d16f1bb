//! Scoring logic
//!
//! Model handle, scorer, history buffer and the service facade that
//! composes them.

pub mod model;
pub mod scorer;
pub mod buffer;
pub mod service;

pub use buffer::HistoryBuffer;
pub use model::{ModelError, ModelHandle};
pub use scorer::ScoringError;
pub use service::{ScoringService, ServiceStatus};

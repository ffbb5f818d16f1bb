//! Verdict model

use serde::{Deserialize, Serialize};

/// Status label of a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Anomaly,
    Normal,
}

impl From<bool> for VerdictStatus {
    fn from(is_anomaly: bool) -> Self {
        if is_anomaly {
            VerdictStatus::Anomaly
        } else {
            VerdictStatus::Normal
        }
    }
}

/// Classification of one reading.
///
/// `anomaly_score` is the classifier's decision score, lower means more
/// anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_anomaly: bool,
    pub anomaly_score: f64,
    pub status: VerdictStatus,
}

impl Verdict {
    pub fn new(is_anomaly: bool, anomaly_score: f64) -> Self {
        Self {
            is_anomaly,
            anomaly_score,
            status: VerdictStatus::from(is_anomaly),
        }
    }
}

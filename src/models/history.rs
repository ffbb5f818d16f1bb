//! History entry model

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{SensorReading, Verdict};

/// A scored reading as kept in the history buffer
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub reading: SensorReading,
    pub verdict: Verdict,
    pub timestamp: DateTime<Utc>,
}

/// Wire row of `/recent_scores`
#[derive(Debug, Clone, Serialize)]
pub struct RecentScore {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub sound_db: f64,
    pub is_anomaly: bool,
    pub anomaly_score: f64,
}

impl From<&HistoryEntry> for RecentScore {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            temperature_c: entry.reading.temperature_c,
            humidity_pct: entry.reading.humidity_pct,
            sound_db: entry.reading.sound_db,
            is_anomaly: entry.verdict.is_anomaly,
            anomaly_score: entry.verdict.anomaly_score,
        }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct RecentScoresFilter {
    pub limit: Option<i64>,
}

/// Buffer occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub size: usize,
    pub capacity: usize,
}

//! Scoring Service - Facade over model, scorer and history

use std::num::NonZeroUsize;

use chrono::Utc;
use serde::Serialize;

use crate::models::{HistoryEntry, HistoryStats, SensorReading, Verdict};
use super::buffer::HistoryBuffer;
use super::model::{ModelHandle, ModelInfo};
use super::scorer::{self, ScoringError};

/// Body of `/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub service: String,
    pub model_loaded: bool,
}

/// Owns the model handle and the history buffer for the life of the process
#[derive(Debug)]
pub struct ScoringService {
    name: String,
    model: ModelHandle,
    history: HistoryBuffer,
}

impl ScoringService {
    pub fn new(name: impl Into<String>, model: ModelHandle, history_capacity: NonZeroUsize) -> Self {
        Self {
            name: name.into(),
            model,
            history: HistoryBuffer::new(history_capacity),
        }
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            service: self.name.clone(),
            model_loaded: self.model.is_loaded(),
        }
    }

    /// Score a reading and record it. Nothing is recorded on failure.
    pub fn submit(&self, reading: SensorReading) -> Result<Verdict, ScoringError> {
        let verdict = scorer::score(&self.model, &reading)?;

        self.history.append(HistoryEntry {
            reading,
            verdict,
            timestamp: Utc::now(),
        });

        if verdict.is_anomaly {
            tracing::info!(
                temperature_c = reading.temperature_c,
                humidity_pct = reading.humidity_pct,
                sound_db = reading.sound_db,
                score = verdict.anomaly_score,
                "Anomalous reading"
            );
        } else {
            tracing::debug!(score = verdict.anomaly_score, "Normal reading");
        }

        Ok(verdict)
    }

    pub fn recent_history(&self, limit: i64) -> Vec<HistoryEntry> {
        self.history.recent(limit)
    }

    pub fn model_info(&self) -> Option<&ModelInfo> {
        self.model.model().map(|m| m.info())
    }

    pub fn history_stats(&self) -> HistoryStats {
        self.history.stats()
    }
}

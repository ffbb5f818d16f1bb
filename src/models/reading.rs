//! Sensor reading model

use serde::{Deserialize, Serialize};

/// Number of features fed to the classifier
pub const FEATURE_COUNT: usize = 3;

/// One reading from the environment sensors.
///
/// Values are not range checked; the classifier was fitted on the same
/// unconstrained domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub sound_db: f64,
}

impl SensorReading {
    pub fn new(temperature_c: f64, humidity_pct: f64, sound_db: f64) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            sound_db,
        }
    }

    /// Feature vector in training column order: temperature, humidity, sound
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.temperature_c, self.humidity_pct, self.sound_db]
    }
}

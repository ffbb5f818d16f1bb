//! Configuration module

use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Default capacity of the recent-scores history
pub const DEFAULT_HISTORY_CAPACITY: usize = 150;

/// Default number of entries returned by `/recent_scores`
pub const DEFAULT_RECENT_LIMIT: i64 = 20;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Path of the serialized classifier artifact
    pub model_path: PathBuf,

    /// Capacity of the rolling history buffer
    pub history_capacity: NonZeroUsize,

    /// Rows returned by `/recent_scores` when no limit is given
    pub recent_limit: i64,

    /// Name reported by the status endpoint
    pub service_name: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string());

        let log_format = match env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            _ if environment == "production" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./model/model.json")),

            history_capacity: parse_capacity(env::var("HISTORY_CAPACITY").ok().as_deref()),

            recent_limit: env::var("RECENT_SCORES_LIMIT")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(DEFAULT_RECENT_LIMIT),

            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "sensor-anomaly-service".to_string()),

            log_format,
            environment,
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: PathBuf::from("./model/model.json"),
            history_capacity: default_capacity(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            service_name: "sensor-anomaly-service".to_string(),
            log_format: LogFormat::Pretty,
            environment: "development".to_string(),
        }
    }
}

fn default_capacity() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_HISTORY_CAPACITY).unwrap_or(NonZeroUsize::MIN)
}

/// Zero or unparsable values fall back to the default capacity
fn parse_capacity(raw: Option<&str>) -> NonZeroUsize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .and_then(NonZeroUsize::new)
        .unwrap_or_else(default_capacity)
}

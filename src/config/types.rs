use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: String,
    #[serde(default = "default_device")]
    pub device: String,
}

/// Decision cutoffs, fixed at startup and read-only afterwards.
///
/// `uncertain_threshold` is carried in configuration but is not consulted by
/// the decision formula: the width of the "uncertain" band is controlled by
/// `decision_threshold` alone. See `policy::decide`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_decision_threshold")]
    pub decision_threshold: f64,
    #[serde(default = "default_uncertain_threshold")]
    pub uncertain_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            decision_threshold: default_decision_threshold(),
            uncertain_threshold: default_uncertain_threshold(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_decision_threshold() -> f64 {
    0.5
}

fn default_uncertain_threshold() -> f64 {
    0.3
}

fn default_database_path() -> String {
    "predictions.db".to_string()
}

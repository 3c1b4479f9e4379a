use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One durable log entry capturing a past classification outcome.
/// Immutable once written; the core never updates or deletes records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: i64,
    pub filename: String,
    pub label: String,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

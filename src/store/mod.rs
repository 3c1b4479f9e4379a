mod types;

pub use types::*;

use crate::{Error, Result};
use chrono::Utc;
use libsql::{Builder, Database};
use tracing::{debug, info};

/// Default number of entries returned by `recent`.
pub const DEFAULT_RECENT_LIMIT: u64 = 10;

/// Append-only log of classification decisions over a local libSQL database.
///
/// Initialization is idempotent: opening the store against an existing
/// database keeps all prior records, and AUTOINCREMENT keeps ids strictly
/// increasing across process restarts.
pub struct PredictionStore {
    db: Database,
}

impl PredictionStore {
    pub async fn new(db_path: &str) -> Result<Self> {
        let db = Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| Error::persistence(format!("failed to open '{}': {}", db_path, e)))?;

        let conn = db.connect()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS predictions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT NOT NULL,
                label TEXT NOT NULL,
                confidence REAL NOT NULL,
                timestamp DATETIME NOT NULL
            )
            "#,
            (),
        )
        .await?;

        info!("Prediction store initialized: {}", db_path);

        Ok(Self { db })
    }

    /// Appends one record, stamping the current time and assigning the next
    /// id. The row is durably persisted before this returns.
    pub async fn record(
        &self,
        filename: &str,
        label: &str,
        confidence: f64,
    ) -> Result<PredictionRecord> {
        let timestamp = Utc::now();
        let conn = self.db.connect()?;

        conn.execute(
            "INSERT INTO predictions (filename, label, confidence, timestamp) VALUES (?, ?, ?, ?)",
            (filename, label, confidence, timestamp.to_rfc3339()),
        )
        .await?;

        let id = conn.last_insert_rowid();
        debug!("Recorded prediction #{}: {} -> {}", id, filename, label);

        Ok(PredictionRecord {
            id,
            filename: filename.to_string(),
            label: label.to_string(),
            confidence,
            timestamp,
        })
    }

    /// Returns up to `limit` records, most recent first.
    pub async fn recent(&self, limit: u64) -> Result<Vec<PredictionRecord>> {
        let conn = self.db.connect()?;
        let mut rows = conn
            .query(
                "SELECT id, filename, label, confidence, timestamp FROM predictions \
                 ORDER BY timestamp DESC, id DESC LIMIT ?",
                [limit as i64],
            )
            .await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            let timestamp_str: String = row.get(4)?;
            let timestamp = chrono::DateTime::parse_from_rfc3339(&timestamp_str)
                .map_err(|e| Error::persistence(format!("failed to parse timestamp: {}", e)))?
                .with_timezone(&chrono::Utc);

            records.push(PredictionRecord {
                id: row.get(0)?,
                filename: row.get(1)?,
                label: row.get(2)?,
                confidence: row.get(3)?,
                timestamp,
            });
        }

        debug!("Retrieved {} recent predictions", records.len());
        Ok(records)
    }
}

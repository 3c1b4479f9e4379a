use crate::classifier::ImageScorer;
use crate::config::Thresholds;
use crate::policy::{decide, round4, Decision};
use crate::preprocess::ImagePreprocessor;
use crate::store::{PredictionRecord, PredictionStore};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one pipeline run: the thresholded decision plus the raw
/// sigmoid output (rounded to 4 decimals) for observability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub decision: Decision,
    pub raw_score: f64,
}

/// Composes preprocessing, inference, the decision policy and the prediction
/// log for a single request. All collaborators are constructed at startup
/// and shared read-only; there is no ambient global state.
pub struct Pipeline {
    preprocessor: ImagePreprocessor,
    scorer: Arc<dyn ImageScorer>,
    thresholds: Thresholds,
    store: Arc<PredictionStore>,
}

impl Pipeline {
    pub fn new(
        preprocessor: ImagePreprocessor,
        scorer: Arc<dyn ImageScorer>,
        thresholds: Thresholds,
        store: Arc<PredictionStore>,
    ) -> Self {
        Self {
            preprocessor,
            scorer,
            thresholds,
            store,
        }
    }

    /// Decodes, scores and labels one image, then appends the outcome to the
    /// prediction log.
    ///
    /// Persistence is best-effort: a storage failure is logged and the
    /// computed decision is still returned. Undecodable input fails with
    /// `Error::InvalidImage` before anything is persisted.
    pub async fn classify(&self, image_bytes: &[u8], filename: &str) -> Result<Classification> {
        let image = self.preprocessor.decode(image_bytes, filename)?;
        let tensor = self.preprocessor.prepare(&image);

        let raw = self.scorer.score(&tensor)? as f64;
        let decision = decide(raw, self.thresholds.decision_threshold);

        debug!(
            "Classified '{}': raw={:.4} label={} confidence={}",
            filename, raw, decision.label, decision.confidence
        );

        if let Err(e) = self
            .store
            .record(filename, decision.label.as_str(), decision.confidence)
            .await
        {
            warn!("Failed to record prediction for '{}': {}", filename, e);
        }

        Ok(Classification {
            decision,
            raw_score: round4(raw),
        })
    }

    /// Most-recent-first view of the prediction log, for transport layers
    /// that serve history alongside classification.
    pub async fn recent_predictions(&self, limit: u64) -> Result<Vec<PredictionRecord>> {
        self.store.recent(limit).await
    }
}

use crate::config::ModelConfig;
use crate::{Error, Result};
use ndarray::{Array3, Axis};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

/// Scoring seam between the pipeline and the loaded model.
///
/// Implementations must be stateless per call: concurrent `score` calls on
/// the same instance never influence each other's results.
pub trait ImageScorer: Send + Sync {
    /// Returns the sigmoid output in [0, 1], interpreted as P(dog).
    fn score(&self, tensor: &Array3<f32>) -> Result<f32>;
}

/// Binary cat/dog classifier backed by an ONNX session.
///
/// The exported model is a frozen feature extractor with a single linear
/// head and a sigmoid, so the graph's output is already a probability.
/// Loaded once at startup and read-only afterwards; the session sits behind
/// a mutex because ONNX Runtime runs with exclusive access, which serializes
/// concurrent inference without affecting results.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_name: String,
    device: String,
}

impl OnnxClassifier {
    pub fn load(config: &ModelConfig) -> Result<Self> {
        info!("Loading ONNX model from: {}", config.path);

        if !Path::new(&config.path).exists() {
            return Err(Error::model_load(format!(
                "model file not found: {}",
                config.path
            )));
        }

        let session = Session::builder()
            .map_err(|e| Error::model_load(format!("failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::model_load(format!("failed to set optimization level: {}", e)))?
            .commit_from_file(&config.path)
            .map_err(|e| Error::model_load(format!("failed to load '{}': {}", config.path, e)))?;

        if session.inputs().is_empty() {
            return Err(Error::model_load(format!(
                "model '{}' declares no inputs",
                config.path
            )));
        }

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| {
                Error::model_load(format!("model '{}' declares no outputs", config.path))
            })?;

        if config.device != "cpu" {
            // Device selection never changes the numeric output; only CPU
            // execution is wired up in this crate.
            warn!(
                "Requested device '{}' is not available, running on CPU",
                config.device
            );
        }

        info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            device: config.device.clone(),
        })
    }

    pub fn device(&self) -> &str {
        &self.device
    }
}

impl ImageScorer for OnnxClassifier {
    fn score(&self, tensor: &Array3<f32>) -> Result<f32> {
        // NCHW with a batch of one.
        let input_array = tensor.clone().insert_axis(Axis(0));

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| Error::inference(format!("tensor conversion failed: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::inference("classifier session mutex poisoned"))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| Error::inference(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| Error::inference(format!("missing output '{}'", self.output_name)))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::inference(format!("output extraction failed: {}", e)))?;

        let raw = output_tensor
            .1
            .first()
            .copied()
            .ok_or_else(|| Error::inference("model produced an empty output"))?;

        // The graph ends in a sigmoid; clamp only guards against float drift.
        Ok(raw.clamp(0.0, 1.0))
    }
}

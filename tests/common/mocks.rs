use catdog_core::classifier::ImageScorer;
use catdog_core::{Error, Result};
use ndarray::Array3;
use std::sync::Mutex;

/// Scorer that always returns the same raw score.
pub struct FixedScorer {
    score: f32,
}

impl FixedScorer {
    pub fn new(score: f32) -> Self {
        Self { score }
    }
}

impl ImageScorer for FixedScorer {
    fn score(&self, _tensor: &Array3<f32>) -> Result<f32> {
        Ok(self.score)
    }
}

/// Scorer that returns a queued list of scores in order, recording the
/// tensors it was called with.
pub struct SequenceScorer {
    scores: Mutex<Vec<f32>>,
    pub calls: Mutex<Vec<(usize, usize, usize)>>,
}

impl SequenceScorer {
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            scores: Mutex::new(scores),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ImageScorer for SequenceScorer {
    fn score(&self, tensor: &Array3<f32>) -> Result<f32> {
        self.calls.lock().unwrap().push(tensor.dim());

        let mut scores = self.scores.lock().unwrap();
        if scores.is_empty() {
            return Err(Error::inference("no more mock scores available"));
        }
        Ok(scores.remove(0))
    }
}

/// Scorer that always fails, for exercising inference error propagation.
pub struct FailingScorer;

impl ImageScorer for FailingScorer {
    fn score(&self, _tensor: &Array3<f32>) -> Result<f32> {
        Err(Error::inference("mock inference failure"))
    }
}

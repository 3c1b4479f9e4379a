use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Cat,
    Dog,
    Uncertain,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Cat => "cat",
            Label::Dog => "dog",
            Label::Uncertain => "uncertain",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub label: Label,
    pub confidence: f64,
}

/// Maps the classifier's sigmoid output (P(dog)) to a labeled decision.
///
/// The "uncertain" band is whatever falls between `1 - decision_threshold`
/// and `decision_threshold`; with the default threshold of 0.5 it collapses
/// to the single point 0.5. The configured `uncertain_threshold` is
/// deliberately not part of this formula (see `config::Thresholds`).
pub fn decide(raw_score: f64, decision_threshold: f64) -> Decision {
    let (label, confidence) = if raw_score > decision_threshold {
        (Label::Dog, raw_score)
    } else if raw_score < (1.0 - decision_threshold) {
        (Label::Cat, 1.0 - raw_score)
    } else {
        (Label::Uncertain, (raw_score - 0.5).abs() * 2.0)
    };

    Decision {
        label,
        confidence: round4(confidence),
    }
}

/// Rounds to 4 decimal places, part of the observable contract for both
/// `Decision::confidence` and the reported raw score.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

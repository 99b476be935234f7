//! The private witness behind a proof and its score.

use serde::{Deserialize, Serialize};
use zkhuman_behavior::{capped_contribution, population_variance, BehavioralSummary};
use zkhuman_crypto::{hash_to_field, WitnessHashes};
use zkhuman_types::ChallengeOutcome;

/// Up to 40 points for the fraction of challenges answered correctly.
pub const ACCURACY_WEIGHT: f64 = 40.0;
/// Up to 30 points for timing variance (ms²), saturating at 1000.
pub const TIMING_WEIGHT: f64 = 30.0;
pub const TIMING_SATURATION: f64 = 1000.0;
/// Up to 30 points for pointer path length, saturating at 10000.
pub const MOUSE_WEIGHT: f64 = 30.0;
pub const MOUSE_SATURATION: f64 = 10_000.0;

/// Everything the proof commits to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehavioralWitness {
    pub outcomes: Vec<ChallengeOutcome>,
    /// Interaction times in milliseconds since session start.
    pub timings: Vec<u64>,
    pub mouse_entropy: f64,
}

impl BehavioralWitness {
    pub fn new(outcomes: &[ChallengeOutcome], summary: &BehavioralSummary) -> Self {
        Self {
            outcomes: outcomes.to_vec(),
            timings: summary.timings.clone(),
            mouse_entropy: summary.movement_entropy,
        }
    }

    /// Outcome labels concatenated, e.g. `correctincorrect`.
    pub fn pattern_input(&self) -> String {
        self.outcomes.iter().map(|o| o.label()).collect()
    }

    /// Decimal timings concatenated without separator.
    pub fn timing_input(&self) -> String {
        self.timings.iter().map(u64::to_string).collect()
    }

    /// Shortest round-trip form of the entropy, laid out as in JavaScript
    /// (`5`, `1200.5`, `1e+21`, `1e-7`).
    pub fn mouse_input(&self) -> String {
        js_number_string(self.mouse_entropy)
    }

    /// Field hashes of the three witness components.
    pub fn hashes(&self) -> WitnessHashes {
        WitnessHashes {
            pattern: hash_to_field(self.pattern_input().as_bytes()),
            timing: hash_to_field(self.timing_input().as_bytes()),
            mouse: hash_to_field(self.mouse_input().as_bytes()),
        }
    }

    /// Fraction of outcomes marked correct; 0 when there are none.
    pub fn accuracy(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let correct = self.outcomes.iter().filter(|o| o.success).count();
        correct as f64 / self.outcomes.len() as f64
    }
}

/// `Number#toString` layout: plain decimals for exponents in `-7 < e < 21`,
/// otherwise `d.ddde+NN` / `d.ddde-NN`.
fn js_number_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-6..21).contains(&exponent) {
        value.to_string()
    } else if exponent >= 0 {
        format!("{mantissa}e+{exponent}")
    } else {
        format!("{mantissa}e{exponent}")
    }
}

/// Witness score in `[0, 100]`.
///
/// Note the timing term uses the variance itself, not the standard deviation
/// the collector scores on, so the two scores saturate at different points.
pub fn score_from_witness(witness: &BehavioralWitness) -> f64 {
    let score = witness.accuracy() * ACCURACY_WEIGHT
        + capped_contribution(
            population_variance(&witness.timings),
            TIMING_SATURATION,
            TIMING_WEIGHT,
        )
        + capped_contribution(witness.mouse_entropy, MOUSE_SATURATION, MOUSE_WEIGHT);
    score.min(100.0)
}

//! Pure reductions over collected telemetry.

use serde::{Deserialize, Serialize};
use zkhuman_types::Timestamp;

/// One recorded pointer position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub timestamp: Timestamp,
}

/// Sum of Euclidean distances between consecutive samples; 0 for fewer than two.
pub fn path_length<'a>(samples: impl IntoIterator<Item = &'a PointerSample>) -> f64 {
    let mut total = 0.0;
    let mut prev: Option<&PointerSample> = None;
    for sample in samples {
        if let Some(p) = prev {
            let dx = sample.x - p.x;
            let dy = sample.y - p.y;
            total += (dx * dx + dy * dy).sqrt();
        }
        prev = Some(sample);
    }
    total
}

/// Population variance (divides by `n`); 0 for fewer than two values.
pub fn population_variance(values: &[u64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

/// Square root of [`population_variance`].
pub fn population_std_dev(values: &[u64]) -> f64 {
    population_variance(values).sqrt()
}

/// `min(value / saturation, 1) * weight`, never negative.
pub fn capped_contribution(value: f64, saturation: f64, weight: f64) -> f64 {
    if value.is_nan() || value <= 0.0 || saturation <= 0.0 {
        return 0.0;
    }
    (value / saturation).min(1.0) * weight
}

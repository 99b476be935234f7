//! Behavioral human score.
//!
//! Three capped contributions summed and clamped to 100:
//!
//! | Signal | Weight | Saturates at |
//! |--------|--------|--------------|
//! | movement entropy | 30 | 1000 |
//! | timing standard deviation | 30 | 100 |
//! | interaction count | 40 | 8 |

use crate::metrics::capped_contribution;

pub const ENTROPY_WEIGHT: f64 = 30.0;
pub const ENTROPY_SATURATION: f64 = 1000.0;
pub const TIMING_WEIGHT: f64 = 30.0;
pub const TIMING_SATURATION: f64 = 100.0;
pub const INTERACTION_WEIGHT: f64 = 40.0;
pub const INTERACTION_SATURATION: f64 = 8.0;

/// Score raw behavioral signals.
///
/// `entropy_counts` is false while too few pointer samples are held for the
/// path length to mean anything; the entropy term is then skipped.
pub fn behavioral_score(
    movement_entropy: f64,
    entropy_counts: bool,
    timing_std_dev: f64,
    interactions: u32,
) -> f64 {
    let mut score = 0.0;
    if entropy_counts {
        score += capped_contribution(movement_entropy, ENTROPY_SATURATION, ENTROPY_WEIGHT);
    }
    score += capped_contribution(timing_std_dev, TIMING_SATURATION, TIMING_WEIGHT);
    score += capped_contribution(interactions as f64, INTERACTION_SATURATION, INTERACTION_WEIGHT);
    score.min(100.0)
}

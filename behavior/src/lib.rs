//! Behavioral telemetry for a verification session.
//!
//! The [`BehavioralCollector`] records pointer positions and interaction
//! timings while the challenges run and reduces them to two scalars:
//! - **movement entropy**: total pointer path length (a proxy for irregular
//!   motion, not information-theoretic entropy)
//! - **timing variance**: population standard deviation of interaction times
//!
//! plus a capped heuristic score in `[0, 100]`. The score is not calibrated
//! against any classifier.

pub mod collector;
pub mod metrics;
pub mod score;

pub use collector::{BehavioralCollector, BehavioralSummary};
pub use metrics::{capped_contribution, path_length, population_std_dev, population_variance, PointerSample};
pub use score::behavioral_score;

//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for zkHuman.
#[derive(Debug, Error)]
pub enum ZkHumanError {
    #[error("human threshold {0} is outside [0, 100]")]
    InvalidThreshold(f64),

    #[error("pointer sample cap must be at least 1")]
    ZeroSampleCap,

    #[error("invalid pattern length range: {min}..={max}")]
    InvalidPatternRange { min: usize, max: usize },

    #[error("pattern length {max} exceeds the limit of {limit}")]
    PatternTooLong { max: usize, limit: usize },
}

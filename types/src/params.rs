//! Verification parameters.
//!
//! The acceptance threshold is a parameter rather than a constant: earlier
//! releases shipped 60 and 70 side by side, so callers pick one explicitly.

use crate::ZkHumanError;
use serde::{Deserialize, Serialize};

/// Tunable knobs for collection, scoring and acceptance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationParams {
    /// Minimum human score (0-100) for a proof to count as verified.
    pub human_threshold: f64,

    /// Most recent pointer samples retained by the collector.
    pub max_pointer_samples: usize,

    /// Movement entropy only contributes to the behavioral score once
    /// strictly more samples than this are held.
    pub min_movement_samples: usize,

    /// Seconds the cognitive question stays open before it counts as wrong.
    pub cognitive_time_limit_secs: u64,

    /// Shortest pattern sequence a challenge may ask for.
    pub pattern_min_len: usize,

    /// Longest pattern sequence a challenge may ask for.
    pub pattern_max_len: usize,
}

impl VerificationParams {
    /// Canonical acceptance threshold.
    pub const DEFAULT_HUMAN_THRESHOLD: f64 = 70.0;

    /// Longest pattern a challenge may ask for: four passes over the 3x3 grid.
    pub const MAX_PATTERN_LEN: usize = 36;

    pub fn validate(&self) -> Result<(), ZkHumanError> {
        if !(0.0..=100.0).contains(&self.human_threshold) {
            return Err(ZkHumanError::InvalidThreshold(self.human_threshold));
        }
        if self.max_pointer_samples == 0 {
            return Err(ZkHumanError::ZeroSampleCap);
        }
        if self.pattern_min_len == 0 || self.pattern_min_len > self.pattern_max_len {
            return Err(ZkHumanError::InvalidPatternRange {
                min: self.pattern_min_len,
                max: self.pattern_max_len,
            });
        }
        if self.pattern_max_len > Self::MAX_PATTERN_LEN {
            return Err(ZkHumanError::PatternTooLong {
                max: self.pattern_max_len,
                limit: Self::MAX_PATTERN_LEN,
            });
        }
        Ok(())
    }
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self {
            human_threshold: Self::DEFAULT_HUMAN_THRESHOLD,
            max_pointer_samples: 100,
            min_movement_samples: 10,
            cognitive_time_limit_secs: 15,
            pattern_min_len: 4,
            pattern_max_len: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        VerificationParams::default().validate().unwrap();
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let params = VerificationParams {
            human_threshold: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ZkHumanError::InvalidThreshold(t)) if t == 120.0
        ));

        let params = VerificationParams {
            human_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_zero_cap_and_inverted_range() {
        let params = VerificationParams {
            max_pointer_samples: 0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ZkHumanError::ZeroSampleCap)));

        let params = VerificationParams {
            pattern_min_len: 7,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ZkHumanError::InvalidPatternRange { min: 7, max: 6 })
        ));
    }

    #[test]
    fn rejects_oversized_pattern() {
        let params = VerificationParams {
            pattern_max_len: 1 << 40,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ZkHumanError::PatternTooLong { limit: 36, .. })
        ));

        let params = VerificationParams {
            pattern_max_len: VerificationParams::MAX_PATTERN_LEN,
            ..Default::default()
        };
        params.validate().unwrap();
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let params: VerificationParams = toml::from_str("human_threshold = 60.0").unwrap();
        assert_eq!(params.human_threshold, 60.0);
        assert_eq!(params.max_pointer_samples, 100);
        assert_eq!(params.pattern_max_len, 6);
    }
}

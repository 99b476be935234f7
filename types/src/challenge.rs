//! Challenge outcomes recorded by a verification session.

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two mini-challenges a session runs, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    /// Memorise and reproduce a highlighted cell sequence.
    Pattern,
    /// Answer a short multiple-choice question before the timer runs out.
    Cognitive,
}

impl ChallengeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeKind::Pattern => "pattern",
            ChallengeKind::Cognitive => "cognitive",
        }
    }
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed mini-challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOutcome {
    pub kind: ChallengeKind,
    pub success: bool,
    pub timestamp: Timestamp,
}

impl ChallengeOutcome {
    pub fn new(kind: ChallengeKind, success: bool, timestamp: Timestamp) -> Self {
        Self {
            kind,
            success,
            timestamp,
        }
    }

    /// Label fed into the pattern hash: `"correct"` or `"incorrect"`.
    pub fn label(&self) -> &'static str {
        if self.success {
            "correct"
        } else {
            "incorrect"
        }
    }

    /// Fragment of the challenge context, e.g. `pattern:true`.
    pub fn context_fragment(&self) -> String {
        format!("{}:{}", self.kind, self.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        let ok = ChallengeOutcome::new(ChallengeKind::Pattern, true, Timestamp::EPOCH);
        let bad = ChallengeOutcome::new(ChallengeKind::Cognitive, false, Timestamp::EPOCH);
        assert_eq!(ok.label(), "correct");
        assert_eq!(bad.label(), "incorrect");
        assert_eq!(ok.context_fragment(), "pattern:true");
        assert_eq!(bad.context_fragment(), "cognitive:false");
    }
}

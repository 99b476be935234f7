//! The proof artifact and its presentation shape.

use crate::VerificationError;
use serde::{Deserialize, Serialize};
use zkhuman_crypto::{Commitment, FieldElement};
use zkhuman_types::Timestamp;

/// Commitments to the three witness components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentSet {
    pub pattern: Commitment,
    pub timing: Commitment,
    pub mouse: Commitment,
}

/// The terminal output of the proof engine.
///
/// Built once per finished session and never mutated; the session's final
/// decision lives in [`ProofView`] instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofArtifact {
    id: String,
    commitments: CommitmentSet,
    response: FieldElement,
    challenge: FieldElement,
    timestamp: Timestamp,
    verified: bool,
    human_score: f64,
}

impl ProofArtifact {
    pub(crate) fn new(
        id: String,
        commitments: CommitmentSet,
        response: FieldElement,
        challenge: FieldElement,
        timestamp: Timestamp,
        verified: bool,
        human_score: f64,
    ) -> Self {
        Self {
            id,
            commitments,
            response,
            challenge,
            timestamp,
            verified,
            human_score,
        }
    }

    /// 32 hex characters from 16 random bytes.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn commitments(&self) -> &CommitmentSet {
        &self.commitments
    }

    pub fn response(&self) -> &FieldElement {
        &self.response
    }

    /// Hash of the challenge context.
    pub fn challenge(&self) -> &FieldElement {
        &self.challenge
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Whether the witness score alone met the engine's threshold.
    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn human_score(&self) -> f64 {
        self.human_score
    }

    /// Presentation view with the engine's own decision.
    pub fn view(&self) -> ProofView {
        self.view_with_decision(self.human_score, self.verified)
    }

    /// Presentation view carrying a decision taken elsewhere.
    pub fn view_with_decision(&self, human_score: f64, verified: bool) -> ProofView {
        ProofView {
            id: self.id.clone(),
            hash: self.response.to_hex(),
            timestamp: self.timestamp.as_millis(),
            verified,
            human_score,
            zk_commitments: ViewCommitments {
                pattern: self.commitments.pattern.to_hex(),
                timing: self.commitments.timing.to_hex(),
                mouse: self.commitments.mouse.to_hex(),
            },
            challenge: self.challenge.to_hex(),
        }
    }
}

/// Hex-encoded commitments as shown to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCommitments {
    pub pattern: String,
    pub timing: String,
    pub mouse: String,
}

/// The plain structured value handed to the presentation layer.
///
/// `hash` is the response, hex-encoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofView {
    pub id: String,
    pub hash: String,
    pub timestamp: u64,
    pub verified: bool,
    pub human_score: f64,
    pub zk_commitments: ViewCommitments,
    pub challenge: String,
}

impl TryFrom<&ProofView> for ProofArtifact {
    type Error = VerificationError;

    /// Rejects malformed hex and any value at or above the field modulus.
    fn try_from(view: &ProofView) -> Result<Self, Self::Error> {
        let commitment = |s: &str| FieldElement::from_hex(s).map(Commitment::from);
        Ok(Self {
            id: view.id.clone(),
            commitments: CommitmentSet {
                pattern: commitment(&view.zk_commitments.pattern)?,
                timing: commitment(&view.zk_commitments.timing)?,
                mouse: commitment(&view.zk_commitments.mouse)?,
            },
            response: FieldElement::from_hex(&view.hash)?,
            challenge: FieldElement::from_hex(&view.challenge)?,
            timestamp: Timestamp::new(view.timestamp),
            verified: view.verified,
            human_score: view.human_score,
        })
    }
}

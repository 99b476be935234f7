//! Hash-chain digest proof.
//!
//! A lighter artifact than the field proof: a SHA-256 over the challenge,
//! response and serialised behavioral data, salted with a random nonce, plus
//! a commitment over that digest.
//!
//! `proof = SHA256("{challenge}:{response}:{behavioral_json}:{nonce}")`
//! `commitment = SHA256(proof_hex ++ nonce)`

use crate::VerificationError;
use serde::{Deserialize, Serialize};
use zkhuman_crypto::{random_bytes, sha256_hex, EntropySource};
use zkhuman_types::ChallengeOutcome;

/// Fixed response string bound into session digest proofs.
pub const HUMAN_VERIFICATION_RESPONSE: &str = "human_verification";

/// Behavioral data the session digest commits to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestWitness {
    pub interactions: usize,
    /// Outcome timestamps (ms since epoch).
    pub timings: Vec<u64>,
    /// Number of challenges answered correctly.
    pub patterns: usize,
}

impl DigestWitness {
    pub fn from_outcomes(outcomes: &[ChallengeOutcome]) -> Self {
        Self {
            interactions: outcomes.len(),
            timings: outcomes.iter().map(|o| o.timestamp.as_millis()).collect(),
            patterns: outcomes.iter().filter(|o| o.success).count(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestProof {
    pub proof: String,
    pub commitment: String,
    pub nonce: String,
}

impl DigestProof {
    pub fn create<B: Serialize>(
        challenge: &str,
        response: &str,
        behavioral: &B,
        entropy: &impl EntropySource,
    ) -> Result<Self, VerificationError> {
        let behavioral_json = serde_json::to_string(behavioral)
            .map_err(|e| VerificationError::Serialization(e.to_string()))?;
        let nonce = hex::encode(random_bytes::<16>(entropy)?);
        let (proof, commitment) = digest(challenge, response, &behavioral_json, &nonce);
        Ok(Self {
            proof,
            commitment,
            nonce,
        })
    }

    /// Recompute both digests from the claimed inputs.
    pub fn verify<B: Serialize>(&self, challenge: &str, response: &str, behavioral: &B) -> bool {
        let Ok(behavioral_json) = serde_json::to_string(behavioral) else {
            return false;
        };
        let (proof, commitment) = digest(challenge, response, &behavioral_json, &self.nonce);
        proof == self.proof && commitment == self.commitment
    }
}

fn digest(challenge: &str, response: &str, behavioral_json: &str, nonce: &str) -> (String, String) {
    let proof = sha256_hex(format!("{challenge}:{response}:{behavioral_json}:{nonce}").as_bytes());
    let commitment = sha256_hex(format!("{proof}{nonce}").as_bytes());
    (proof, commitment)
}

//! The proof engine.

use crate::artifact::{CommitmentSet, ProofArtifact, ProofView};
use crate::witness::{score_from_witness, BehavioralWitness};
use crate::VerificationError;
use zkhuman_behavior::BehavioralSummary;
use zkhuman_crypto::{
    build_response, commit, hash_to_field, random_bytes, Blindings, EntropySource, OsEntropy,
};
use zkhuman_types::{ChallengeOutcome, Timestamp, VerificationParams};

/// Builds proof artifacts from challenge outcomes and behavioral telemetry.
///
/// Apart from the entropy draws every step is a pure function of its inputs.
pub struct ProofEngine<E: EntropySource = OsEntropy> {
    entropy: E,
    params: VerificationParams,
}

impl ProofEngine<OsEntropy> {
    pub fn new(params: VerificationParams) -> Self {
        Self::with_entropy(OsEntropy, params)
    }
}

impl<E: EntropySource> ProofEngine<E> {
    pub fn with_entropy(entropy: E, params: VerificationParams) -> Self {
        Self { entropy, params }
    }

    pub fn params(&self) -> &VerificationParams {
        &self.params
    }

    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    /// Prove a finished session.
    ///
    /// Either returns a complete artifact or fails before building one; there
    /// is no partial state to clean up.
    pub fn generate_proof(
        &self,
        outcomes: &[ChallengeOutcome],
        summary: &BehavioralSummary,
        challenge_context: &str,
        now: Timestamp,
    ) -> Result<ProofArtifact, VerificationError> {
        self.prove_witness(&BehavioralWitness::new(outcomes, summary), challenge_context, now)
    }

    /// Prove an explicit witness.
    pub fn prove_witness(
        &self,
        witness: &BehavioralWitness,
        challenge_context: &str,
        now: Timestamp,
    ) -> Result<ProofArtifact, VerificationError> {
        let secrets = witness.hashes();
        let blindings = Blindings::draw(&self.entropy)?;

        let commitments = CommitmentSet {
            pattern: commit(&secrets.pattern, &blindings.r1),
            timing: commit(&secrets.timing, &blindings.r2),
            mouse: commit(&secrets.mouse, &blindings.r3),
        };

        let challenge = hash_to_field(challenge_context.as_bytes());
        let response = build_response(&secrets, &blindings, &challenge);

        let human_score = score_from_witness(witness);
        let verified = human_score >= self.params.human_threshold;
        let id = hex::encode(random_bytes::<16>(&self.entropy)?);

        tracing::debug!(
            proof_id = %id,
            human_score,
            verified,
            outcomes = witness.outcomes.len(),
            "generated human proof"
        );

        Ok(ProofArtifact::new(
            id,
            commitments,
            response,
            challenge,
            now,
            verified,
            human_score,
        ))
    }

    /// Structural self-check of an artifact against the context it was built for.
    ///
    /// Checks the challenge hash, that the response is a non-zero field
    /// element, and that the score meets the threshold. The commitments are
    /// not examined.
    pub fn verify(&self, artifact: &ProofArtifact, challenge_context: &str) -> bool {
        if hash_to_field(challenge_context.as_bytes()) != *artifact.challenge() {
            tracing::debug!(proof_id = artifact.id(), "challenge hash mismatch");
            return false;
        }
        if artifact.response().is_zero() {
            tracing::debug!(proof_id = artifact.id(), "zero response");
            return false;
        }
        let meets_threshold = artifact.human_score() >= self.params.human_threshold;
        if !meets_threshold {
            tracing::debug!(
                proof_id = artifact.id(),
                human_score = artifact.human_score(),
                threshold = self.params.human_threshold,
                "human score below threshold"
            );
            return false;
        }
        true
    }

    /// [`ProofEngine::verify`] for an untrusted presentation view.
    ///
    /// Malformed or out-of-range hex fails verification instead of erroring.
    pub fn verify_view(&self, view: &ProofView, challenge_context: &str) -> bool {
        match ProofArtifact::try_from(view) {
            Ok(artifact) => self.verify(&artifact, challenge_context),
            Err(e) => {
                tracing::debug!(proof_id = %view.id, error = %e, "rejecting malformed proof view");
                false
            }
        }
    }
}

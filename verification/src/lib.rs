//! Human verification for zkHuman.
//!
//! A session runs two mini-challenges (pattern, then cognitive) while the
//! behavioral collector records telemetry. Once both are answered the
//! [`ProofEngine`] turns the outcomes and telemetry into a [`ProofArtifact`]:
//! - three Pedersen commitments (pattern, timing, mouse)
//! - a Schnorr-shaped response bound to the challenge context hash
//! - a witness score in `[0, 100]`
//!
//! The session then takes the larger of the witness score and the collector's
//! own behavioral score and applies the acceptance threshold to it.
//!
//! `verify` is a structural self-check (challenge hash, response range, score).
//! It never checks an algebraic relation between commitments and response, so
//! nothing here is a sound proof of knowledge.

pub mod artifact;
pub mod challenge;
pub mod digest_proof;
pub mod engine;
pub mod error;
pub mod session;
pub mod witness;

pub use artifact::{CommitmentSet, ProofArtifact, ProofView, ViewCommitments};
pub use challenge::{pick_challenge, ChallengeSpec, CognitiveQuestion, PatternChallenge, QuestionKind};
pub use digest_proof::{DigestProof, DigestWitness};
pub use engine::ProofEngine;
pub use error::VerificationError;
pub use session::{SessionEvent, SessionPhase, SessionVerdict, VerificationSession};
pub use witness::{score_from_witness, BehavioralWitness};

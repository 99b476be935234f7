//! Verification session controller.
//!
//! Owns everything one verification attempt touches: the behavioral
//! collector, the recorded outcomes, the proof engine and the final verdict.
//! Phases advance `Pattern -> Cognitive -> Processing -> Complete`; `reset`
//! returns to `Pattern` from anywhere.

use crate::artifact::{ProofArtifact, ProofView};
use crate::digest_proof::{DigestProof, DigestWitness, HUMAN_VERIFICATION_RESPONSE};
use crate::engine::ProofEngine;
use crate::VerificationError;
use serde::{Deserialize, Serialize};
use zkhuman_behavior::BehavioralCollector;
use zkhuman_crypto::{EntropySource, OsEntropy};
use zkhuman_types::{
    ChallengeKind, ChallengeOutcome, Clock, SystemClock, Timestamp, VerificationParams,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the pattern challenge.
    Pattern,
    /// Waiting for the cognitive challenge.
    Cognitive,
    /// Both challenges answered; proof not yet generated.
    Processing,
    /// Verdict available.
    Complete,
}

/// Events emitted by the session for the caller to process.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Started {
        at: Timestamp,
    },
    OutcomeRecorded {
        kind: ChallengeKind,
        success: bool,
    },
    ProofGenerated {
        proof_id: String,
        proof_score: f64,
        behavioral_score: f64,
        combined_score: f64,
        verified: bool,
    },
    Reset,
}

/// The final decision of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionVerdict {
    /// Engine output, including the engine's own score and flag.
    pub proof: ProofArtifact,
    pub digest: DigestProof,
    pub behavioral_score: f64,
    /// `max(proof score, behavioral score)`.
    pub combined_score: f64,
    /// `combined_score >= threshold`; this, not the engine flag, is the result.
    pub verified: bool,
    pub challenge_context: String,
}

impl SessionVerdict {
    /// What the presentation layer shows: the proof with the combined decision.
    pub fn view(&self) -> ProofView {
        self.proof.view_with_decision(self.combined_score, self.verified)
    }
}

pub struct VerificationSession<C: Clock = SystemClock, E: EntropySource = OsEntropy> {
    collector: BehavioralCollector<C>,
    engine: ProofEngine<E>,
    phase: SessionPhase,
    outcomes: Vec<ChallengeOutcome>,
    verdict: Option<SessionVerdict>,
    pending_events: Vec<SessionEvent>,
}

impl VerificationSession<SystemClock, OsEntropy> {
    pub fn new(params: VerificationParams) -> Result<Self, VerificationError> {
        Self::with_parts(SystemClock, OsEntropy, params)
    }
}

impl<C: Clock, E: EntropySource> VerificationSession<C, E> {
    pub fn with_parts(
        clock: C,
        entropy: E,
        params: VerificationParams,
    ) -> Result<Self, VerificationError> {
        params.validate()?;
        Ok(Self {
            collector: BehavioralCollector::with_clock(clock, &params),
            engine: ProofEngine::with_entropy(entropy, params),
            phase: SessionPhase::Pattern,
            outcomes: Vec::new(),
            verdict: None,
            pending_events: Vec::new(),
        })
    }

    /// Begin a fresh attempt; the start itself counts as an interaction.
    pub fn start(&mut self) {
        self.clear();
        self.collector.track_interaction();
        let at = self.collector.clock().now();
        tracing::debug!(%at, "verification session started");
        self.pending_events.push(SessionEvent::Started { at });
    }

    pub fn track_move(&mut self, x: f64, y: f64) {
        self.collector.track_move(x, y);
    }

    pub fn track_interaction(&mut self) {
        self.collector.track_interaction();
    }

    /// Record the result of the challenge the session is waiting for.
    pub fn record_outcome(
        &mut self,
        kind: ChallengeKind,
        success: bool,
    ) -> Result<(), VerificationError> {
        let expected = match self.phase {
            SessionPhase::Pattern => ChallengeKind::Pattern,
            SessionPhase::Cognitive => ChallengeKind::Cognitive,
            SessionPhase::Processing | SessionPhase::Complete => {
                return Err(VerificationError::SessionFinished)
            }
        };
        if kind != expected {
            return Err(VerificationError::UnexpectedChallenge {
                expected,
                got: kind,
            });
        }

        let now = self.collector.clock().now();
        self.outcomes.push(ChallengeOutcome::new(kind, success, now));
        self.collector.track_interaction();
        self.phase = match kind {
            ChallengeKind::Pattern => SessionPhase::Cognitive,
            ChallengeKind::Cognitive => SessionPhase::Processing,
        };
        tracing::debug!(%kind, success, phase = ?self.phase, "challenge outcome recorded");
        self.pending_events
            .push(SessionEvent::OutcomeRecorded { kind, success });
        Ok(())
    }

    /// Challenge context the proof is bound to, e.g. `pattern:true|cognitive:false`.
    pub fn challenge_context(&self) -> String {
        self.outcomes
            .iter()
            .map(ChallengeOutcome::context_fragment)
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Generate the proof and take the final decision.
    ///
    /// On error nothing changes and the call may be retried. On success the
    /// collector's telemetry is discarded.
    pub fn finish(&mut self) -> Result<&SessionVerdict, VerificationError> {
        match self.phase {
            SessionPhase::Processing => {}
            SessionPhase::Complete => return Err(VerificationError::SessionFinished),
            SessionPhase::Pattern | SessionPhase::Cognitive => {
                return Err(VerificationError::ChallengesIncomplete {
                    recorded: self.outcomes.len(),
                })
            }
        }

        let context = self.challenge_context();
        let summary = self.collector.summary();
        let behavioral_score = self.collector.human_score();
        let now = self.collector.clock().now();

        let proof = self
            .engine
            .generate_proof(&self.outcomes, &summary, &context, now)?;
        let digest = DigestProof::create(
            &context,
            HUMAN_VERIFICATION_RESPONSE,
            &DigestWitness::from_outcomes(&self.outcomes),
            self.engine.entropy(),
        )?;

        let combined_score = proof.human_score().max(behavioral_score);
        let verified = combined_score >= self.engine.params().human_threshold;

        tracing::info!(
            proof_id = proof.id(),
            proof_score = proof.human_score(),
            behavioral_score,
            combined_score,
            verified,
            "verification session finished"
        );
        self.pending_events.push(SessionEvent::ProofGenerated {
            proof_id: proof.id().to_string(),
            proof_score: proof.human_score(),
            behavioral_score,
            combined_score,
            verified,
        });

        self.collector.reset();
        self.phase = SessionPhase::Complete;
        Ok(&*self.verdict.insert(SessionVerdict {
            proof,
            digest,
            behavioral_score,
            combined_score,
            verified,
            challenge_context: context,
        }))
    }

    /// Re-run the self-check on the stored verdict's view.
    ///
    /// The view carries the combined score, so this agrees with
    /// [`SessionVerdict::verified`] rather than the engine's own flag.
    pub fn verify(&self) -> bool {
        self.verdict
            .as_ref()
            .is_some_and(|v| self.engine.verify_view(&v.view(), &v.challenge_context))
    }

    /// Abandon the current attempt; safe in any phase.
    pub fn reset(&mut self) {
        self.clear();
        self.pending_events.push(SessionEvent::Reset);
    }

    fn clear(&mut self) {
        self.collector.reset();
        self.outcomes.clear();
        self.verdict = None;
        self.phase = SessionPhase::Pattern;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcomes(&self) -> &[ChallengeOutcome] {
        &self.outcomes
    }

    pub fn verdict(&self) -> Option<&SessionVerdict> {
        self.verdict.as_ref()
    }

    pub fn collector(&self) -> &BehavioralCollector<C> {
        &self.collector
    }

    pub fn engine(&self) -> &ProofEngine<E> {
        &self.engine
    }

    /// Drain pending events for the caller to process.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkhuman_nullables::{NullClock, NullEntropy};

    fn session(clock: &NullClock) -> VerificationSession<&NullClock, NullEntropy> {
        VerificationSession::with_parts(
            clock,
            NullEntropy::counting(8),
            VerificationParams::default(),
        )
        .unwrap()
    }

    /// Helper: a human-looking run with wandering pointer and uneven timing.
    fn play(session: &mut VerificationSession<&NullClock, NullEntropy>, clock: &NullClock) {
        session.start();
        for i in 0..40u64 {
            clock.advance(37);
            session.track_move((i * 31 % 400) as f64, (i * 17 % 300) as f64);
        }
        for gap in [180, 420, 260, 900, 150] {
            clock.advance(gap);
            session.track_interaction();
        }
        session.record_outcome(ChallengeKind::Pattern, true).unwrap();
        for gap in [700, 330, 1200] {
            clock.advance(gap);
            session.track_interaction();
        }
        clock.advance(2_000);
        session.record_outcome(ChallengeKind::Cognitive, true).unwrap();
    }

    #[test]
    fn rejects_invalid_params() {
        let clock = NullClock::new(0);
        let params = VerificationParams {
            human_threshold: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            VerificationSession::with_parts(&clock, NullEntropy::counting(1), params),
            Err(VerificationError::Params(_))
        ));
    }

    #[test]
    fn phases_advance_in_order() {
        let clock = NullClock::new(0);
        let mut s = session(&clock);
        s.start();
        assert_eq!(s.phase(), SessionPhase::Pattern);

        let err = s.record_outcome(ChallengeKind::Cognitive, true).unwrap_err();
        assert!(matches!(
            err,
            VerificationError::UnexpectedChallenge {
                expected: ChallengeKind::Pattern,
                got: ChallengeKind::Cognitive
            }
        ));

        s.record_outcome(ChallengeKind::Pattern, false).unwrap();
        assert_eq!(s.phase(), SessionPhase::Cognitive);
        s.record_outcome(ChallengeKind::Cognitive, true).unwrap();
        assert_eq!(s.phase(), SessionPhase::Processing);
        assert!(matches!(
            s.record_outcome(ChallengeKind::Cognitive, true),
            Err(VerificationError::SessionFinished)
        ));
        assert_eq!(s.challenge_context(), "pattern:false|cognitive:true");
    }

    #[test]
    fn finish_requires_both_challenges() {
        let clock = NullClock::new(0);
        let mut s = session(&clock);
        s.start();
        s.record_outcome(ChallengeKind::Pattern, true).unwrap();
        assert!(matches!(
            s.finish(),
            Err(VerificationError::ChallengesIncomplete { recorded: 1 })
        ));
    }

    #[test]
    fn outcomes_count_as_interactions() {
        let clock = NullClock::new(0);
        let mut s = session(&clock);
        s.start();
        s.record_outcome(ChallengeKind::Pattern, true).unwrap();
        s.record_outcome(ChallengeKind::Cognitive, true).unwrap();
        // start + two outcomes
        assert_eq!(s.collector().interaction_count(), 3);
    }

    #[test]
    fn human_run_is_verified() {
        let clock = NullClock::new(1_000_000);
        let mut s = session(&clock);
        play(&mut s, &clock);

        let verdict = s.finish().unwrap().clone();
        assert_eq!(verdict.challenge_context, "pattern:true|cognitive:true");
        assert!(verdict.verified);
        assert!(verdict.combined_score >= verdict.proof.human_score());
        assert!(verdict.combined_score >= verdict.behavioral_score);
        assert_eq!(verdict.view().human_score, verdict.combined_score);
        assert!(verdict.view().verified);
        assert!(verdict.digest.verify(
            &verdict.challenge_context,
            HUMAN_VERIFICATION_RESPONSE,
            &DigestWitness::from_outcomes(s.outcomes()),
        ));
        assert!(s.verify());
        assert_eq!(s.phase(), SessionPhase::Complete);
        // telemetry is discarded once the proof exists
        assert_eq!(s.collector().interaction_count(), 0);
        assert_eq!(s.collector().sample_count(), 0);
    }

    #[test]
    fn combined_score_can_override_engine_flag() {
        let clock = NullClock::new(0);
        let mut s = session(&clock);
        s.start();
        // no pointer movement, tiny timing spread: the witness score stays low
        for _ in 0..10 {
            clock.advance(150);
            s.track_interaction();
        }
        clock.advance(10);
        s.record_outcome(ChallengeKind::Pattern, false).unwrap();
        clock.advance(10);
        s.record_outcome(ChallengeKind::Cognitive, false).unwrap();

        let verdict = s.finish().unwrap().clone();
        assert!(!verdict.proof.verified());
        // interactions cap at 40, timing std-dev well above 100 caps at 30
        assert_eq!(verdict.behavioral_score, 70.0);
        assert_eq!(verdict.combined_score, 70.0);
        assert!(verdict.verified);

        // every self-check agrees with the combined decision
        assert!(s.verify());
        assert!(s.engine().verify_view(&verdict.view(), &verdict.challenge_context));
        assert!(!s.engine().verify(&verdict.proof, &verdict.challenge_context));
    }

    /// Fails every draw after the first `budget`.
    struct ExhaustibleEntropy {
        inner: NullEntropy,
        budget: usize,
    }

    impl EntropySource for ExhaustibleEntropy {
        fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), zkhuman_crypto::CryptoError> {
            if self.inner.draws() >= self.budget {
                return Err(zkhuman_crypto::CryptoError::Entropy("exhausted".into()));
            }
            self.inner.fill_bytes(dest)
        }
    }

    #[test]
    fn failed_digest_discards_the_proof() {
        let clock = NullClock::new(0);
        // three blindings and the proof id succeed, the digest nonce does not
        let entropy = ExhaustibleEntropy {
            inner: NullEntropy::counting(8),
            budget: 4,
        };
        let mut s =
            VerificationSession::with_parts(&clock, entropy, VerificationParams::default())
                .unwrap();
        s.start();
        s.record_outcome(ChallengeKind::Pattern, true).unwrap();
        s.record_outcome(ChallengeKind::Cognitive, true).unwrap();

        assert!(matches!(s.finish(), Err(VerificationError::Crypto(_))));
        assert_eq!(s.engine().entropy().inner.draws(), 4);
        assert!(s.verdict().is_none());
        assert!(!s.verify());
        assert_eq!(s.phase(), SessionPhase::Processing);
        assert!(!s
            .drain_events()
            .iter()
            .any(|e| matches!(e, SessionEvent::ProofGenerated { .. })));
        // telemetry survives for a retry
        assert_eq!(s.collector().interaction_count(), 3);
    }

    #[test]
    fn finish_twice_is_rejected() {
        let clock = NullClock::new(0);
        let mut s = session(&clock);
        play(&mut s, &clock);
        s.finish().unwrap();
        assert!(matches!(s.finish(), Err(VerificationError::SessionFinished)));
    }

    #[test]
    fn reset_from_any_phase() {
        let clock = NullClock::new(0);
        let mut s = session(&clock);
        s.reset();
        assert_eq!(s.phase(), SessionPhase::Pattern);

        s.start();
        s.record_outcome(ChallengeKind::Pattern, true).unwrap();
        s.reset();
        assert_eq!(s.phase(), SessionPhase::Pattern);
        assert!(s.outcomes().is_empty());
        assert_eq!(s.collector().interaction_count(), 0);

        play(&mut s, &clock);
        s.finish().unwrap();
        s.reset();
        assert!(s.verdict().is_none());
        assert!(!s.verify());
    }

    #[test]
    fn events_are_drained() {
        let clock = NullClock::new(0);
        let mut s = session(&clock);
        play(&mut s, &clock);
        s.finish().unwrap();

        let events = s.drain_events();
        assert!(matches!(events[0], SessionEvent::Started { .. }));
        assert_eq!(
            events[1],
            SessionEvent::OutcomeRecorded {
                kind: ChallengeKind::Pattern,
                success: true
            }
        );
        assert!(matches!(
            events.last(),
            Some(SessionEvent::ProofGenerated { verified: true, .. })
        ));
        assert!(s.drain_events().is_empty());
    }
}

//! Replay a scripted session through [`VerificationSession`].
//!
//! A script is a TOML list of steps, each at a millisecond offset from the
//! session start:
//!
//! ```toml
//! [[step]]
//! at = 40
//! action = "move"
//! x = 120.0
//! y = 80.0
//!
//! [[step]]
//! at = 900
//! action = "outcome"
//! kind = "pattern"
//! success = true
//! ```

use anyhow::{bail, Context};
use serde::Deserialize;
use std::cell::Cell;
use std::path::Path;
use zkhuman_crypto::EntropySource;
use zkhuman_types::{ChallengeKind, Clock, Timestamp, VerificationParams};
use zkhuman_verification::{SessionVerdict, VerificationSession};

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    Move { at: u64, x: f64, y: f64 },
    Interaction { at: u64 },
    Outcome { at: u64, kind: ChallengeKind, success: bool },
}

impl Step {
    pub fn at(&self) -> u64 {
        match self {
            Step::Move { at, .. } | Step::Interaction { at } | Step::Outcome { at, .. } => *at,
        }
    }
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid script {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let script: Script = toml::from_str(contents)?;
        if let Some(pair) = script.steps.windows(2).find(|w| w[1].at() < w[0].at()) {
            bail!(
                "steps out of order: {}ms after {}ms",
                pair[1].at(),
                pair[0].at()
            );
        }
        Ok(script)
    }

    /// Offset of the last step.
    pub fn duration(&self) -> u64 {
        self.steps.last().map_or(0, Step::at)
    }
}

/// Clock that only moves when the replay moves it.
pub struct ReplayClock {
    start: Timestamp,
    offset: Cell<u64>,
}

impl ReplayClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            start,
            offset: Cell::new(0),
        }
    }

    pub fn seek(&self, offset_millis: u64) {
        self.offset.set(offset_millis);
    }
}

impl Clock for ReplayClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.start.as_millis().saturating_add(self.offset.get()))
    }
}

/// Run every step and finish the session.
pub fn run<E: EntropySource>(
    script: &Script,
    start: Timestamp,
    entropy: E,
    params: VerificationParams,
) -> anyhow::Result<SessionVerdict> {
    let clock = ReplayClock::new(start);
    let mut session = VerificationSession::with_parts(&clock, entropy, params)?;
    session.start();

    for step in &script.steps {
        clock.seek(step.at());
        match *step {
            Step::Move { x, y, .. } => session.track_move(x, y),
            Step::Interaction { .. } => session.track_interaction(),
            Step::Outcome { kind, success, .. } => session
                .record_outcome(kind, success)
                .with_context(|| format!("step at {}ms", step.at()))?,
        }
    }

    let verdict = session.finish()?.clone();
    for event in session.drain_events() {
        tracing::debug!(?event, "session event");
    }
    Ok(verdict)
}

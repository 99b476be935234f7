//! Per-session telemetry buffer.

use crate::metrics::{path_length, population_std_dev, PointerSample};
use crate::score::behavioral_score;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use zkhuman_types::{Clock, SystemClock, Timestamp, VerificationParams};

/// Snapshot of a session's telemetry and its derived metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehavioralSummary {
    pub samples: Vec<PointerSample>,
    /// Interaction times in milliseconds since session start.
    pub timings: Vec<u64>,
    pub interactions: u32,
    pub movement_entropy: f64,
    pub timing_std_dev: f64,
}

/// Accumulates pointer and interaction telemetry for the active session.
///
/// Owned by a single session and mutated synchronously from input callbacks;
/// there is no interior locking.
pub struct BehavioralCollector<C: Clock = SystemClock> {
    clock: C,
    max_samples: usize,
    min_movement_samples: usize,
    samples: VecDeque<PointerSample>,
    timings: Vec<u64>,
    interactions: u32,
    session_start: Timestamp,
}

impl BehavioralCollector<SystemClock> {
    pub fn new(params: &VerificationParams) -> Self {
        Self::with_clock(SystemClock, params)
    }
}

impl<C: Clock> BehavioralCollector<C> {
    pub fn with_clock(clock: C, params: &VerificationParams) -> Self {
        let session_start = clock.now();
        let max_samples = params.max_pointer_samples.max(1);
        Self {
            clock,
            max_samples,
            min_movement_samples: params.min_movement_samples,
            samples: VecDeque::with_capacity(max_samples),
            timings: Vec::new(),
            interactions: 0,
            session_start,
        }
    }

    /// Record a pointer position, keeping only the most recent samples.
    pub fn track_move(&mut self, x: f64, y: f64) {
        self.samples.push_back(PointerSample {
            x,
            y,
            timestamp: self.clock.now(),
        });
        while self.samples.len() > self.max_samples {
            self.samples.pop_front();
        }
    }

    /// Record an interaction at the current offset from session start.
    pub fn track_interaction(&mut self) {
        self.interactions = self.interactions.saturating_add(1);
        self.timings
            .push(self.session_start.elapsed_since(self.clock.now()));
    }

    /// Total pointer path length over the retained samples.
    pub fn movement_entropy(&self) -> f64 {
        path_length(&self.samples)
    }

    /// Population standard deviation of interaction timings.
    pub fn timing_variance(&self) -> f64 {
        population_std_dev(&self.timings)
    }

    /// Heuristic score in `[0, 100]`; see [`crate::score`].
    pub fn human_score(&self) -> f64 {
        behavioral_score(
            self.movement_entropy(),
            self.samples.len() > self.min_movement_samples,
            self.timing_variance(),
            self.interactions,
        )
    }

    /// Clear all telemetry and restart the session clock.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.timings.clear();
        self.interactions = 0;
        self.session_start = self.clock.now();
        tracing::trace!(session_start = %self.session_start, "behavioral collector reset");
    }

    pub fn summary(&self) -> BehavioralSummary {
        BehavioralSummary {
            samples: self.samples.iter().copied().collect(),
            timings: self.timings.clone(),
            interactions: self.interactions,
            movement_entropy: self.movement_entropy(),
            timing_std_dev: self.timing_variance(),
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = &PointerSample> {
        self.samples.iter()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn timings(&self) -> &[u64] {
        &self.timings
    }

    pub fn interaction_count(&self) -> u32 {
        self.interactions
    }

    pub fn session_start(&self) -> Timestamp {
        self.session_start
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkhuman_nullables::NullClock;

    fn collector(clock: &NullClock) -> BehavioralCollector<&NullClock> {
        BehavioralCollector::with_clock(clock, &VerificationParams::default())
    }

    #[test]
    fn empty_metrics_are_zero() {
        let clock = NullClock::new(0);
        let c = collector(&clock);
        assert_eq!(c.movement_entropy(), 0.0);
        assert_eq!(c.timing_variance(), 0.0);
        assert_eq!(c.human_score(), 0.0);
    }

    #[test]
    fn single_move_has_no_entropy() {
        let clock = NullClock::new(0);
        let mut c = collector(&clock);
        c.track_move(10.0, 10.0);
        assert_eq!(c.movement_entropy(), 0.0);
    }

    #[test]
    fn two_moves_give_distance() {
        let clock = NullClock::new(0);
        let mut c = collector(&clock);
        c.track_move(0.0, 0.0);
        clock.advance(16);
        c.track_move(3.0, 4.0);
        assert_eq!(c.movement_entropy(), 5.0);
    }

    #[test]
    fn keeps_most_recent_hundred() {
        let clock = NullClock::new(0);
        let mut c = collector(&clock);
        for i in 1..=150u64 {
            clock.set(i);
            c.track_move(i as f64, 0.0);
        }
        assert_eq!(c.sample_count(), 100);
        let oldest = c.samples().next().unwrap();
        assert_eq!(oldest.timestamp, Timestamp::new(51));
        assert_eq!(oldest.x, 51.0);
        // 99 unit steps between x = 51 and x = 150
        assert_eq!(c.movement_entropy(), 99.0);
    }

    #[test]
    fn cap_follows_params() {
        let clock = NullClock::new(0);
        let params = VerificationParams {
            max_pointer_samples: 3,
            ..Default::default()
        };
        let mut c = BehavioralCollector::with_clock(&clock, &params);
        for i in 0..10 {
            c.track_move(i as f64, 0.0);
        }
        assert_eq!(c.sample_count(), 3);
    }

    #[test]
    fn interactions_record_offsets_from_start() {
        let clock = NullClock::new(5_000);
        let mut c = collector(&clock);
        clock.advance(100);
        c.track_interaction();
        clock.advance(100);
        c.track_interaction();
        clock.advance(100);
        c.track_interaction();
        assert_eq!(c.timings(), &[100, 200, 300]);
        assert_eq!(c.interaction_count(), 3);
        assert!((c.timing_variance() - 81.6497).abs() < 1e-3);
    }

    #[test]
    fn equal_timings_have_zero_variance() {
        let clock = NullClock::new(0);
        let mut c = collector(&clock);
        clock.advance(100);
        c.track_interaction();
        c.track_interaction();
        assert_eq!(c.timing_variance(), 0.0);
    }

    #[test]
    fn entropy_needs_enough_samples_to_score() {
        let clock = NullClock::new(0);
        let mut c = collector(&clock);
        // 10 samples: path length 900 but not enough to count
        for i in 0..10 {
            c.track_move(i as f64 * 100.0, 0.0);
        }
        assert_eq!(c.movement_entropy(), 900.0);
        assert_eq!(c.human_score(), 0.0);
        c.track_move(1000.0, 0.0);
        assert_eq!(c.human_score(), 30.0);
    }

    #[test]
    fn reset_is_idempotent_and_restarts_clock() {
        let clock = NullClock::new(0);
        let mut c = collector(&clock);
        c.track_move(0.0, 0.0);
        c.track_move(30.0, 40.0);
        c.track_interaction();
        clock.set(10_000);
        c.reset();
        c.reset();
        assert_eq!(c.sample_count(), 0);
        assert_eq!(c.interaction_count(), 0);
        assert!(c.timings().is_empty());
        assert_eq!(c.human_score(), 0.0);
        assert_eq!(c.session_start(), Timestamp::new(10_000));

        clock.advance(40);
        c.track_interaction();
        assert_eq!(c.timings(), &[40]);
    }

    #[test]
    fn summary_matches_accessors() {
        let clock = NullClock::new(0);
        let mut c = collector(&clock);
        c.track_move(0.0, 0.0);
        c.track_move(6.0, 8.0);
        clock.advance(50);
        c.track_interaction();
        let s = c.summary();
        assert_eq!(s.samples.len(), 2);
        assert_eq!(s.movement_entropy, 10.0);
        assert_eq!(s.timings, vec![50]);
        assert_eq!(s.interactions, 1);
        assert_eq!(s.timing_std_dev, 0.0);
    }
}

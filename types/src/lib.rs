//! Fundamental types for zkHuman.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! millisecond timestamps and the injectable clock, challenge outcomes, and the
//! tunable verification parameters.

pub mod challenge;
pub mod error;
pub mod params;
pub mod time;

pub use challenge::{ChallengeKind, ChallengeOutcome};
pub use error::ZkHumanError;
pub use params::VerificationParams;
pub use time::{Clock, SystemClock, Timestamp};

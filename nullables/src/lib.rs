//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano.
//! The external dependencies of a verification session (clock, entropy) are
//! abstracted behind traits. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the operating system
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod random;

pub use clock::NullClock;
pub use random::NullEntropy;

//! Cryptographic primitives for zkHuman.
//!
//! - **SHA-256** for hashing witnesses and challenge strings
//! - **BN254 scalar field** arithmetic (`P` = the 254-bit group order) for
//!   every commitment, response and challenge hash
//! - **Pedersen** commitments `g^m * h^r mod P` with `g = 3`, `h = 5`
//! - A Schnorr-shaped linear response `s = R + c * S mod P`
//!
//! None of this is a sound proof system: the generators are fixed small
//! integers with no setup, and nothing checks the response against the
//! commitments.

pub mod error;
pub mod field;
pub mod hash;
pub mod pedersen;
pub mod random;
pub mod schnorr;

pub use error::CryptoError;
pub use field::{hash_to_field, random_field, FieldElement};
pub use hash::{sha256, sha256_hex, sha256_multi};
pub use pedersen::{commit, Commitment, G, H};
pub use random::{random_bytes, EntropySource, OsEntropy};
pub use schnorr::{build_response, Blindings, WitnessHashes};

//! Pedersen-style commitments over the scalar field.
//!
//! `C = g^m * h^r mod P`. Deterministic for fixed `(m, r)`; two commitments to
//! the same message under different blindings do not match. The generators are
//! fixed small integers with no trusted setup, so the binding property is not
//! guaranteed.

use crate::FieldElement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message generator.
pub const G: u64 = 3;
/// Blinding generator.
pub const H: u64 = 5;

/// A commitment value, itself an element of the field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(FieldElement);

impl Commitment {
    pub fn as_field(&self) -> &FieldElement {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<FieldElement> for Commitment {
    fn from(value: FieldElement) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({:?})", self.0)
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Commit to `message` under `blinding`.
pub fn commit(message: &FieldElement, blinding: &FieldElement) -> Commitment {
    let gm = FieldElement::from_u64(G).pow(message);
    let hr = FieldElement::from_u64(H).pow(blinding);
    Commitment(gm * hr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash_to_field, random_field, OsEntropy};

    #[test]
    fn small_values_match_integer_arithmetic() {
        // 3^2 * 5^3 = 9 * 125
        let c = commit(&FieldElement::from_u64(2), &FieldElement::from_u64(3));
        assert_eq!(*c.as_field(), FieldElement::from_u64(1125));
    }

    #[test]
    fn zero_message_and_blinding_commit_to_one() {
        let c = commit(&FieldElement::zero(), &FieldElement::zero());
        assert_eq!(c.to_hex(), "1");
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let m = hash_to_field(b"correctcorrect");
        let r = hash_to_field(b"blinding");
        assert_eq!(commit(&m, &r), commit(&m, &r));
    }

    #[test]
    fn different_blindings_hide_the_message() {
        let m = hash_to_field(b"1200");
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            let r = random_field(&OsEntropy).unwrap();
            assert!(seen.insert(commit(&m, &r)));
        }
    }
}

//! Schnorr-shaped linear response.
//!
//! The three witness hashes and their blindings are each summed into a single
//! secret `S` and randomness `R`, and the response is `s = R + c * S mod P`.
//! No verifier equation of the form `g^s = A * Y^c` is ever checked against
//! it; the value only has the shape of a sigma-protocol response.

use crate::{random_field, CryptoError, EntropySource, FieldElement};

/// Hashes of the three witness components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WitnessHashes {
    pub pattern: FieldElement,
    pub timing: FieldElement,
    pub mouse: FieldElement,
}

impl WitnessHashes {
    pub fn combined(&self) -> FieldElement {
        self.pattern + self.timing + self.mouse
    }
}

/// Independent blinding factors, one per witness component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blindings {
    pub r1: FieldElement,
    pub r2: FieldElement,
    pub r3: FieldElement,
}

impl Blindings {
    /// Draw three fresh blindings from `entropy`.
    pub fn draw(entropy: &impl EntropySource) -> Result<Self, CryptoError> {
        Ok(Self {
            r1: random_field(entropy)?,
            r2: random_field(entropy)?,
            r3: random_field(entropy)?,
        })
    }

    pub fn combined(&self) -> FieldElement {
        self.r1 + self.r2 + self.r3
    }
}

/// `(r1 + r2 + r3) + challenge * (pattern + timing + mouse) mod P`.
pub fn build_response(
    secrets: &WitnessHashes,
    blindings: &Blindings,
    challenge: &FieldElement,
) -> FieldElement {
    blindings.combined() + *challenge * secrets.combined()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(v: u64) -> FieldElement {
        FieldElement::from_u64(v)
    }

    #[test]
    fn response_is_linear_combination() {
        let secrets = WitnessHashes {
            pattern: small(1),
            timing: small(2),
            mouse: small(3),
        };
        let blindings = Blindings {
            r1: small(10),
            r2: small(20),
            r3: small(30),
        };
        // 60 + 7 * 6
        assert_eq!(build_response(&secrets, &blindings, &small(7)), small(102));
    }

    #[test]
    fn zero_challenge_leaks_only_randomness() {
        let secrets = WitnessHashes {
            pattern: small(5),
            timing: small(5),
            mouse: small(5),
        };
        let blindings = Blindings {
            r1: small(1),
            r2: small(1),
            r3: small(1),
        };
        assert_eq!(
            build_response(&secrets, &blindings, &FieldElement::zero()),
            small(3)
        );
    }

    #[test]
    fn sums_wrap_modulo_p() {
        let max = FieldElement::from_hex(
            "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000000",
        )
        .unwrap();
        let secrets = WitnessHashes {
            pattern: max,
            timing: small(1),
            mouse: FieldElement::zero(),
        };
        assert!(secrets.combined().is_zero());
    }
}

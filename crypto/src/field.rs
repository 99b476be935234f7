//! Elements of the BN254 scalar field.
//!
//! Every value stored as a commitment, response or challenge hash is a
//! [`FieldElement`], so `0 <= v < P` holds by construction. Values coming
//! back from text go through [`FieldElement::from_hex`], which rejects
//! anything at or above the modulus instead of reducing it.

use crate::{random_bytes, sha256, CryptoError, EntropySource};
use ark_bn254::Fr;
use ark_ff::{BigInt, BigInteger, Field, PrimeField, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul};

/// An integer in `[0, P)` with `P` the 254-bit BN254 group order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElement(Fr);

impl FieldElement {
    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Fr::from(value))
    }

    /// Interpret `bytes` as a big-endian integer and reduce it mod `P`.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    /// Interpret `bytes` as a big-endian integer, failing if it is `>= P`.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let significant = match bytes.iter().position(|&b| b != 0) {
            Some(first) => &bytes[first..],
            None => return Ok(Self::zero()),
        };
        if significant.len() > 32 {
            return Err(CryptoError::OutOfRange);
        }
        let mut padded = [0u8; 32];
        padded[32 - significant.len()..].copy_from_slice(significant);

        let mut limbs = [0u64; 4];
        for (i, chunk) in padded.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            limbs[3 - i] = u64::from_be_bytes(word);
        }
        Fr::from_bigint(BigInt::new(limbs))
            .map(Self)
            .ok_or(CryptoError::OutOfRange)
    }

    /// 32-byte big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let bytes = self.0.into_bigint().to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    /// Lowercase hex without leading zeros; zero encodes as `"0"`.
    pub fn to_hex(&self) -> String {
        let full = hex::encode(self.to_be_bytes());
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Parse hex (optionally `0x`-prefixed, any number of leading zeros).
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.is_empty() {
            return Err(CryptoError::InvalidHex("empty string".into()));
        }
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero());
        }
        if digits.len() > 64 {
            return Err(CryptoError::OutOfRange);
        }
        let even = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(&even).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        Self::from_be_bytes(&bytes)
    }

    /// `self ^ exponent mod P`, with the exponent taken as the plain integer.
    pub fn pow(&self, exponent: &FieldElement) -> Self {
        Self(self.0.pow(exponent.0.into_bigint()))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The modulus `P` in the same hex form as [`FieldElement::to_hex`].
    pub fn modulus_hex() -> String {
        hex::encode(Fr::MODULUS.to_bytes_be())
            .trim_start_matches('0')
            .to_string()
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "FieldElement(0x{})", &hex[..hex.len().min(8)])
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// SHA-256 the input and reduce the big-endian digest mod `P`.
pub fn hash_to_field(input: &[u8]) -> FieldElement {
    FieldElement::from_be_bytes_mod_order(&sha256(input))
}

/// 256 secure random bits reduced mod `P`.
pub fn random_field(entropy: &impl EntropySource) -> Result<FieldElement, CryptoError> {
    let bytes: [u8; 32] = random_bytes(entropy)?;
    Ok(FieldElement::from_be_bytes_mod_order(&bytes))
}

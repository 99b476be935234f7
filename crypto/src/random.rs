//! Secure randomness for blinding factors, nonces and proof ids.
//!
//! Blinding factors drawn from a predictable generator void the hiding
//! property of the commitments, so the only production source is the
//! operating system CSPRNG. Tests swap in a nullable source.

use crate::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// Operating-system CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::Entropy(e.to_string()))
    }
}

impl<E: EntropySource + ?Sized> EntropySource for &E {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill_bytes(dest)
    }
}

/// Draw `N` random bytes.
pub fn random_bytes<const N: usize>(entropy: &impl EntropySource) -> Result<[u8; N], CryptoError> {
    let mut out = [0u8; N];
    entropy.fill_bytes(&mut out)?;
    Ok(out)
}

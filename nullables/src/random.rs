//! Nullable entropy: deterministic bytes for testing.

use std::sync::Mutex;
use zkhuman_crypto::{CryptoError, EntropySource};

/// A deterministic entropy source for testing.
///
/// Each `fill_bytes` call takes the next pre-configured 32-byte block
/// (cycling), repeating it to fill longer buffers.
pub struct NullEntropy {
    outputs: Vec<[u8; 32]>,
    index: Mutex<usize>,
}

impl NullEntropy {
    /// Create with a sequence of deterministic blocks.
    pub fn new(outputs: Vec<[u8; 32]>) -> Self {
        Self {
            outputs,
            index: Mutex::new(0),
        }
    }

    /// Create with a single block returned for every call.
    pub fn constant(value: [u8; 32]) -> Self {
        Self::new(vec![value])
    }

    /// Blocks `[1; 32]`, `[2; 32]`, ... `[n; 32]`.
    pub fn counting(n: u8) -> Self {
        Self::new((1..=n).map(|i| [i; 32]).collect())
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        *self.index.lock().unwrap()
    }
}

impl EntropySource for NullEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        if self.outputs.is_empty() {
            return Err(CryptoError::Entropy("null entropy has no outputs".into()));
        }
        let mut idx = self.index.lock().unwrap();
        let block = &self.outputs[*idx % self.outputs.len()];
        *idx += 1;
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = block[i % 32];
        }
        Ok(())
    }
}

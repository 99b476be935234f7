use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("value is not a field element (must be below the modulus)")]
    OutOfRange,

    #[error("entropy source failed: {0}")]
    Entropy(String),
}

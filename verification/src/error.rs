use thiserror::Error;
use zkhuman_crypto::CryptoError;
use zkhuman_types::{ChallengeKind, ZkHumanError};

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("expected the {expected} challenge, got {got}")]
    UnexpectedChallenge {
        expected: ChallengeKind,
        got: ChallengeKind,
    },

    #[error("challenges incomplete: {recorded} of 2 recorded")]
    ChallengesIncomplete { recorded: usize },

    #[error("session already finished; reset before recording again")]
    SessionFinished,

    #[error("invalid parameters: {0}")]
    Params(#[from] ZkHumanError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

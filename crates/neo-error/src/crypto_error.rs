use thiserror::Error;

/// Errors raised by key generation, signing, hashing, and encoding primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("public key must be SEC1-compressed (33 bytes); got {0} bytes")]
    UncompressedPublicKeyRejected(usize),

    #[error("EC point is not on curve")]
    PointNotOnCurve,

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("signature verification failed")]
    VerificationFailed,

    #[error("multi-sig signatures below threshold: have {have}, need {need}")]
    InsufficientSignatures { have: usize, need: usize },

    #[error("invalid Base58Check payload: {0}")]
    InvalidBase58Check(String),

    #[error("invalid WIF: {0}")]
    InvalidWif(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("hex decoding error: {0}")]
    HexError(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

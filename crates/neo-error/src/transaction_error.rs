use crate::{BuilderError, ClientError, CodecError, CryptoError};
use thiserror::Error;

/// Errors raised while configuring, building, signing, or broadcasting a transaction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransactionError {
    #[error("invalid nonce")]
    InvalidNonce,

    #[error("valid_until_block out of range")]
    InvalidValidUntilBlock,

    #[error("conflicting fee-insufficient handlers: a consumer and a supplier cannot both be set")]
    ConflictingFeePolicy,

    #[error("duplicate signer concerning the same account: {0:#x}")]
    DuplicateSigner(primitive_types::H160),

    #[error("too many signers: max 16")]
    TooManySigners,

    #[error("too many attributes: {count} exceeds the budget of {budget} remaining after {signers} signer(s)")]
    TooManyAttributes { count: usize, budget: usize, signers: usize },

    #[error("no signers")]
    NoSigners,

    #[error("missing script")]
    NoScript,

    #[error("first signer not present among the configured signers")]
    FirstSignerNotFound,

    #[error("first signer cannot have the fee-only (None) scope")]
    FirstSignerFeeOnly,

    #[error("HighPriority attribute requires the sender to be a committee member")]
    HighPriorityRequiresCommittee,

    #[error("duplicate HighPriority attribute")]
    DuplicateHighPriority,

    #[error("VM faulted during fee estimation: {0}")]
    VmFault(String),

    #[error("sender cannot cover system_fee ({system_fee}) + network_fee ({network_fee}); balance is {balance}")]
    InsufficientFunds { system_fee: i64, network_fee: i64, balance: i64 },

    #[error("signer {0:#x} has no known private key and is not a contract signer")]
    NoSigningKey(primitive_types::H160),

    #[error("multi-sig account {0:#x} cannot be auto-signed; assemble its witness explicitly")]
    MultiSigAutoSignRejected(primitive_types::H160),

    #[error("transaction is frozen and cannot be mutated further")]
    AlreadyBuilt,

    #[error("codec error: {0}")]
    CodecError(#[from] CodecError),

    #[error("crypto error: {0}")]
    CryptoError(#[from] CryptoError),

    #[error("builder error: {0}")]
    BuilderError(#[from] BuilderError),

    #[error("node client error: {0}")]
    ClientError(#[from] ClientError),
}

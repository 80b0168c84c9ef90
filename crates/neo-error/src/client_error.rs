use thiserror::Error;

/// Errors surfaced by a `neo_client::NodeClient` implementation.
///
/// The transaction builder treats every variant here as non-retryable:
/// it propagates the error and leaves its own state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("node rejected the request: {0}")]
    RequestFailed(String),

    #[error("VM faulted during invocation: {0}")]
    VmFault(String),

    #[error("unexpected result shape: {0}")]
    UnexpectedResult(String),

    #[error("transaction rejected by node (code {code}): {message}")]
    TransactionRejected { code: i64, message: String },

    #[error("connection error: {0}")]
    Connection(String),
}

use crate::CodecError;
use thiserror::Error;

/// Errors raised while assembling scripts, signers, witnesses, or NEF files.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuilderError {
    #[error("invalid script: {0}")]
    InvalidScript(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid argument: {0}")]
    IllegalArgument(String),

    #[error("not a valid multi-sig verification script")]
    NotMultiSigScript,

    #[error("signer subitem list exceeds the maximum of {max}: got {got}")]
    TooManySubItems { max: usize, got: usize },

    #[error("`Global` scope cannot be combined with any other scope")]
    GlobalScopeExclusive,

    #[error("codec error: {0}")]
    CodecError(#[from] CodecError),
}

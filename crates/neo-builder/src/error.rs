//! Re-exports the error enums this crate's public API returns. The
//! enums themselves live in `neo-error` so every crate in the workspace
//! shares one definition instead of each wrapping its own.

pub use neo_error::{BuilderError, TransactionError};

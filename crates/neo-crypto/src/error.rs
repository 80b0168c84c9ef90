//! Re-export of the shared crypto error type, kept as its own module so
//! call sites can `use neo_crypto::error::CryptoError` alongside `hash`,
//! `keys`, `base58` etc.

pub use neo_error::CryptoError;

//! # Neo Error
//!
//! Structured error types shared across the Neo N3 SDK crates.
//!
//! Each concern gets its own `thiserror`-derived enum; higher-level crates
//! compose these via `#[from]` so callers can `?`-propagate across crate
//! boundaries without manual mapping. There is no single catch-all
//! `NeoError` — each crate's public API returns the most specific enum
//! that covers its own failures, plus whatever it pulls in from its
//! dependencies.

#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod builder_error;
mod client_error;
mod codec_error;
mod compiler_error;
mod crypto_error;
mod transaction_error;

pub use builder_error::BuilderError;
pub use client_error::ClientError;
pub use codec_error::CodecError;
pub use compiler_error::CompilerError;
pub use crypto_error::CryptoError;
pub use transaction_error::TransactionError;

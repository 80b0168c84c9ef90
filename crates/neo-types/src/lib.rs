//! # Neo Types
//!
//! Core on-chain data types for the Neo N3 blockchain: NEF files, method
//! tokens, and the typed contract-call parameters a [`ScriptBuilder`] in
//! `neo-builder` serializes onto the stack.
//!
//! Script hashes and their hash-function machinery (`Hash160`/`Hash256`)
//! live in `neo-crypto` and are re-exported here for convenience, since
//! most callers reach for them alongside the types this crate defines.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use neo_types::{ContractParameter, NefFile};
//!
//! let param = ContractParameter::integer(42);
//! let string_param = ContractParameter::string("Hello, Neo!");
//! ```
//!
//! [`ScriptBuilder`]: ../neo_builder/script/struct.ScriptBuilder.html

#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(missing_docs)]

mod bytes;
mod contract;

pub use bytes::{from_hex, to_hex, Bytes};
pub use contract::{ContractParameter, ContractParameterMap, ContractParameterType, MethodToken, NefFile, ParameterValue};

pub use neo_crypto::{Hash160, Hash256};

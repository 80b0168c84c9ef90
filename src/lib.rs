//! # Neo3
//!
//! A Rust SDK for the Neo N3 blockchain's client-side plumbing: the
//! binary wire codec, script building, the transaction builder/signer
//! pipeline, and a NeoVM smart-contract compiler.
//!
//! This crate is a thin facade over the workspace's member crates
//! (`neo-error`, `neo-codec`, `neo-crypto`, `neo-types`, `neo-common`,
//! `neo-client`, `neo-builder`, `neo-compiler`); most of the substance
//! lives there; what follows re-exports the pieces most callers reach
//! for first.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use neo3::prelude::*;
//!
//! let key_pair = KeyPair::new_random();
//! let mut tx_builder = TransactionBuilder::new(node_client, NetworkMagic::TESTNET);
//! tx_builder
//!     .script(script_bytes)
//!     .signers(vec![Signer::called_by_entry(key_pair.script_hash())])?;
//! let unsigned = tx_builder.build().await?;
//! ```

#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(missing_docs)]

pub mod prelude;

pub use neo_client as client;
pub use neo_codec as codec;
pub use neo_common as common;
pub use neo_compiler as compiler;
pub use neo_crypto as crypto;
pub use neo_error as error;
pub use neo_types as types;
pub use neo_builder as builder;

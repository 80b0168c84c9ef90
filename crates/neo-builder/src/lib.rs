//! # Neo Builder
//!
//! Transaction and script building utilities for the Neo N3 blockchain:
//! a [`ScriptBuilder`] for assembling NeoVM call scripts, signer and
//! witness types, and a [`TransactionBuilder`] that turns a script and a
//! signer set into a fee-estimated, signed transaction via a
//! [`neo_client::NodeClient`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use neo_builder::{ScriptBuilder, Signer, TransactionBuilder};
//! use neo_client::NetworkMagic;
//! use neo_types::ContractParameter;
//!
//! let script = ScriptBuilder::new()
//!     .contract_call(&contract_hash, "transfer", &[
//!         ContractParameter::hash160(&sender),
//!         ContractParameter::hash160(&recipient),
//!         ContractParameter::integer(1_0000_0000),
//!         ContractParameter::any(None),
//!     ], None)?
//!     .to_bytes();
//!
//! let mut tx_builder = TransactionBuilder::new(node_client, NetworkMagic::MAINNET);
//! tx_builder.script(script).signers(vec![Signer::called_by_entry(sender)])?;
//! let unsigned = tx_builder.build().await?;
//! ```

#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(missing_docs)]

mod error;
mod script;
mod transaction;
mod utils;

pub use error::{BuilderError, TransactionError};
pub use script::{InteropService, ScriptBuilder, ScriptReader};
pub use transaction::{
    CallFlags, FeePolicy, Signer, Transaction, TransactionBuilder, WitnessShape, WitnessSource,
    MAX_VALID_UNTIL_BLOCK_INCREMENT,
};

// Signer scopes, witnesses, and transaction attributes live in `neo-common`
// so `neo-client` can use them without depending on this crate; re-exported
// here for callers who only ever reach for `neo-builder`.
pub use neo_common::{OracleResponseCode, TransactionAttribute, Witness, WitnessAction, WitnessCondition, WitnessRule, WitnessScope};

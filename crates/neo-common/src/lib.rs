//! # Neo Common
//!
//! Witness, signer-scope, and transaction-attribute types shared between
//! `neo-builder` and `neo-client` without pulling either in as a dependency
//! of the other.

#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(missing_docs)]

mod oracle_response_code;
mod transaction_attribute;
mod witness;
mod witness_condition;
mod witness_rule;
mod witness_scope;

pub use oracle_response_code::OracleResponseCode;
pub use transaction_attribute::TransactionAttribute;
pub use witness::Witness;
pub use witness_condition::WitnessCondition;
pub use witness_rule::{WitnessAction, WitnessRule};
pub use witness_scope::WitnessScope;

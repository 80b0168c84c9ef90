//! Transactions: signers, the transaction envelope itself, and the
//! builder that assembles and fee-estimates one against a Node Client.

pub mod call_flags;
pub mod signer;
pub mod transaction;
pub mod transaction_builder;

pub use call_flags::CallFlags;
pub use signer::Signer;
pub use transaction::Transaction;
pub use transaction_builder::{
    FeePolicy, TransactionBuilder, WitnessShape, WitnessSource, MAX_VALID_UNTIL_BLOCK_INCREMENT,
};

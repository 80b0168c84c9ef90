//! Block headers and bodies as returned by `get_block`/`subscribe_blocks`.

use neo_common::Witness;
use neo_types::{Hash160, Hash256};

/// A Neo N3 block.
///
/// Transactions are carried only as their hashes: a full transaction body
/// is available, when needed, via its own lookup rather than inflating
/// every block fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub hash: Hash256,
    pub size: u32,
    pub version: u32,
    pub previous_block_hash: Hash256,
    pub merkle_root: Hash256,
    pub time: u64,
    pub nonce: u64,
    pub index: u32,
    pub primary: Option<u8>,
    pub next_consensus: Hash160,
    pub witnesses: Vec<Witness>,
    pub transaction_hashes: Vec<Hash256>,
    pub confirmations: u32,
    pub next_block_hash: Option<Hash256>,
}

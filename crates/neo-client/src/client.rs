//! The Node Client: the JSON-RPC-shaped surface the transaction builder
//! consults. This crate defines the interface only — connecting it to an
//! actual node (HTTP, WebSocket, whatever) is left to the caller's own
//! implementation.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use neo_common::{WitnessRule, WitnessScope};
use neo_crypto::{Hash160, Hash256, Secp256r1PublicKey};
use neo_error::ClientError;
use neo_types::ContractParameter;

use crate::block::Block;
use crate::invocation::{ApplicationLog, InvocationResult};

/// A signer's account and scope, as attached to an `invoke_script`/
/// `invoke_function` call so the node can evaluate witness checks without
/// a real witness being present.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeSigner {
    pub account: Hash160,
    pub scopes: WitnessScope,
    pub allowed_contracts: Vec<Hash160>,
    pub allowed_groups: Vec<Secp256r1PublicKey>,
    pub rules: Vec<WitnessRule>,
}

impl InvokeSigner {
    /// A signer with no scope restrictions beyond `CalledByEntry`.
    pub fn called_by_entry(account: Hash160) -> Self {
        Self {
            account,
            scopes: WitnessScope::CalledByEntry,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        }
    }
}

/// The result of broadcasting a signed transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SendRawTransactionResult {
    pub hash: Hash256,
    pub error: Option<String>,
}

/// A stream of blocks, as produced by [`NodeClient::subscribe_blocks`].
/// Cold: each call starts its own replay from the requested height: and
/// completing it (dropping it) stops the underlying subscription.
pub type BlockStream = Pin<Box<dyn Stream<Item = Result<Block, ClientError>> + Send>>;

/// The external surface the transaction builder consults. Every method is
/// an independent suspension point: a caller that drops the future
/// cancels the call with no observable side effect on the builder.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Runs `script` against current chain state without persisting
    /// anything, as if `signers` had authorized it.
    async fn invoke_script(
        &self,
        script: &[u8],
        signers: &[InvokeSigner],
    ) -> Result<InvocationResult, ClientError>;

    /// Runs `method` on the contract at `hash` with `params`, as if
    /// `signers` had authorized it. Used by token-standard call sites
    /// built on top of the transaction builder.
    async fn invoke_function(
        &self,
        hash: Hash160,
        method: &str,
        params: &[ContractParameter],
        signers: &[InvokeSigner],
    ) -> Result<InvocationResult, ClientError>;

    /// Estimates the network fee a fully-witnessed transaction of this
    /// exact byte shape would require. The caller passes a transaction
    /// serialized with placeholder witnesses sized to match the real ones.
    async fn calculate_network_fee(&self, raw_tx_bytes: &[u8]) -> Result<u64, ClientError>;

    /// The current block height.
    async fn get_block_count(&self) -> Result<u32, ClientError>;

    /// The current committee's public keys.
    async fn get_committee(&self) -> Result<Vec<Secp256r1PublicKey>, ClientError>;

    /// The GAS balance of `account`, in fractions (10^-8 GAS). Used by the
    /// transaction builder's sender-balance check.
    async fn get_gas_balance(&self, account: Hash160) -> Result<u64, ClientError>;

    /// Broadcasts a fully-signed transaction.
    async fn send_raw_transaction(
        &self,
        raw_tx_bytes: &[u8],
    ) -> Result<SendRawTransactionResult, ClientError>;

    /// The persisted execution log for a transaction hash, or `None` if
    /// the node holds no log for it.
    async fn get_application_log(&self, tx_hash: Hash256) -> Result<Option<ApplicationLog>, ClientError>;

    /// Fetches a block by hash.
    async fn get_block_by_hash(&self, hash: Hash256) -> Result<Block, ClientError>;

    /// Fetches a block by index.
    async fn get_block_by_index(&self, index: u32) -> Result<Block, ClientError>;

    /// Opens a cold, restartable stream of blocks starting at
    /// `from_index`. Every call replays from `from_index` independently;
    /// multiple subscribers observe identical sequences.
    fn subscribe_blocks(&self, from_index: u32) -> BlockStream;
}

/// Watches blocks from `from_index` and resolves with the first one whose
/// transaction hashes contain `tx_hash`, or with the stream's own error if
/// it ends first. Mirrors the "lazy, cold, restartable, completes on
/// first match" block-tracking contract: each call opens its own
/// subscription and the returned future can be dropped to cancel it
/// without leaving anything running.
pub async fn track(
    client: &dyn NodeClient,
    from_index: u32,
    tx_hash: Hash256,
) -> Result<Block, ClientError> {
    use futures::StreamExt;

    let mut blocks = client.subscribe_blocks(from_index);
    while let Some(block) = blocks.next().await {
        let block = block?;
        if block.transaction_hashes.contains(&tx_hash) {
            return Ok(block);
        }
    }
    Err(ClientError::Connection("block stream ended before the transaction was found".into()))
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;

    fn block(index: u32, tx_hashes: Vec<Hash256>) -> Block {
        Block {
            hash: Hash256::from_le_bytes([index as u8; 32]),
            size: 0,
            version: 0,
            previous_block_hash: Hash256::ZERO,
            merkle_root: Hash256::ZERO,
            time: 0,
            nonce: 0,
            index,
            primary: None,
            next_consensus: Hash160::ZERO,
            witnesses: Vec::new(),
            transaction_hashes: tx_hashes,
            confirmations: 0,
            next_block_hash: None,
        }
    }

    struct StubClient {
        blocks: Vec<Block>,
    }

    #[async_trait]
    impl NodeClient for StubClient {
        async fn invoke_script(
            &self,
            _script: &[u8],
            _signers: &[InvokeSigner],
        ) -> Result<InvocationResult, ClientError> {
            unimplemented!()
        }

        async fn invoke_function(
            &self,
            _hash: Hash160,
            _method: &str,
            _params: &[ContractParameter],
            _signers: &[InvokeSigner],
        ) -> Result<InvocationResult, ClientError> {
            unimplemented!()
        }

        async fn calculate_network_fee(&self, _raw_tx_bytes: &[u8]) -> Result<u64, ClientError> {
            unimplemented!()
        }

        async fn get_block_count(&self) -> Result<u32, ClientError> {
            unimplemented!()
        }

        async fn get_committee(&self) -> Result<Vec<Secp256r1PublicKey>, ClientError> {
            unimplemented!()
        }

        async fn get_gas_balance(&self, _account: Hash160) -> Result<u64, ClientError> {
            unimplemented!()
        }

        async fn send_raw_transaction(
            &self,
            _raw_tx_bytes: &[u8],
        ) -> Result<SendRawTransactionResult, ClientError> {
            unimplemented!()
        }

        async fn get_application_log(&self, _tx_hash: Hash256) -> Result<Option<ApplicationLog>, ClientError> {
            unimplemented!()
        }

        async fn get_block_by_hash(&self, _hash: Hash256) -> Result<Block, ClientError> {
            unimplemented!()
        }

        async fn get_block_by_index(&self, _index: u32) -> Result<Block, ClientError> {
            unimplemented!()
        }

        fn subscribe_blocks(&self, from_index: u32) -> BlockStream {
            let items: Vec<Result<Block, ClientError>> = self
                .blocks
                .iter()
                .filter(|b| b.index >= from_index)
                .cloned()
                .map(Ok)
                .collect();
            Box::pin(stream::iter(items))
        }
    }

    #[tokio::test]
    async fn track_resolves_on_first_matching_block() {
        let tx_hash = Hash256::from_le_bytes([0xAB; 32]);
        let client = StubClient {
            blocks: vec![block(10, vec![]), block(11, vec![tx_hash]), block(12, vec![])],
        };

        let found = track(&client, 10, tx_hash).await.unwrap();
        assert_eq!(found.index, 11);
    }

    #[tokio::test]
    async fn track_errors_when_stream_ends_without_a_match() {
        let tx_hash = Hash256::from_le_bytes([0xAB; 32]);
        let client = StubClient { blocks: vec![block(10, vec![])] };

        assert!(track(&client, 10, tx_hash).await.is_err());
    }
}

//! The transaction builder: the stateful assembly line that turns a
//! script and a set of signers into a fee-estimated, ready-to-sign
//! [`Transaction`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use neo_client::{Block, InvokeSigner, NetworkMagic, NodeClient};
use neo_common::{TransactionAttribute, WitnessScope};
use neo_crypto::{build_multisig_verification_script, build_verification_script, Hash160, Hash256, KeyPair, Secp256r1PublicKey};
use neo_error::{ClientError, TransactionError};
use primitive_types::H160;
use tracing::{debug, trace};

use crate::transaction::signer::Signer;
use crate::transaction::transaction::Transaction;
use crate::utils::MAX_SUBITEMS;

/// A day's worth of blocks at Neo N3's block time, added to the current
/// height when `valid_until_block` is left unset.
pub const MAX_VALID_UNTIL_BLOCK_INCREMENT: u32 = 5760;

fn to_h160(hash: Hash160) -> H160 {
    H160::from(hash.to_le_bytes())
}

/// What to do when a built transaction's fees exceed the sender's GAS
/// balance. At most one of `Consumer`/`Supplier` may be configured; the
/// builder enforces that mutual exclusion at setter time.
pub enum FeePolicy {
    /// No balance check is performed.
    Default,
    /// Invoke this callback with `(total_fee, balance)` and still return
    /// the transaction.
    Consumer(Box<dyn Fn(i64, i64) + Send + Sync>),
    /// Fail `build` with this error instead of returning the transaction.
    Supplier(Box<dyn Fn() -> TransactionError + Send + Sync>),
}

impl std::fmt::Debug for FeePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "FeePolicy::Default"),
            Self::Consumer(_) => write!(f, "FeePolicy::Consumer(..)"),
            Self::Supplier(_) => write!(f, "FeePolicy::Supplier(..)"),
        }
    }
}

/// How to size and fill a signer's dummy (pre-signing) witness, and later
/// its real one. Neo N3's signer model doesn't carry this information on
/// the signer itself, so the builder is told separately.
#[derive(Debug, Clone)]
pub enum WitnessShape {
    /// A single-sig account behind one public key.
    SingleSig(Secp256r1PublicKey),
    /// An `m`-of-`n` multi-sig account.
    MultiSig { public_keys: Vec<Secp256r1PublicKey>, m: usize },
    /// A contract account verified by invocation rather than a signature;
    /// carries the contract's verification script (usually empty).
    Contract { verification_script: Vec<u8> },
}

/// How to produce a signer's real witness during [`TransactionBuilder::sign`].
pub enum WitnessSource<'a> {
    /// Sign with this local key pair.
    Key(&'a KeyPair),
    /// Use this invocation script verbatim (the caller-assembled parameter
    /// push sequence for a contract signer).
    Contract(Vec<u8>),
    /// A multi-sig account; present only to be rejected, forcing the
    /// caller to assemble the witness explicitly.
    MultiSig,
}

fn dummy_invocation(signature_count: usize) -> Vec<u8> {
    let mut script = Vec::with_capacity(signature_count * 66);
    for _ in 0..signature_count {
        script.push(0x0c); // PUSHDATA1
        script.push(64);
        script.extend_from_slice(&[0u8; 64]);
    }
    script
}

fn to_invoke_signer(signer: &Signer) -> InvokeSigner {
    InvokeSigner {
        account: signer.account,
        scopes: signer.scopes.first().copied().unwrap_or(WitnessScope::CalledByEntry),
        allowed_contracts: signer.allowed_contracts.clone(),
        allowed_groups: signer.allowed_groups.clone(),
        rules: signer.rules.clone(),
    }
}

/// The number of signatures a committee of `n` members needs to reach
/// consensus, Neo N3's `M = N - (N - 1) / 3` formula.
fn committee_threshold(n: usize) -> usize {
    n - (n.saturating_sub(1)) / 3
}

/// Builds, fee-estimates, and signs a [`Transaction`] against a
/// [`NodeClient`].
pub struct TransactionBuilder {
    client: Arc<dyn NodeClient>,
    network_magic: NetworkMagic,
    version: u8,
    nonce: Option<u32>,
    valid_until_block: Option<u32>,
    signers: Vec<Signer>,
    attributes: Vec<TransactionAttribute>,
    additional_network_fee: u64,
    additional_system_fee: u64,
    script: Option<Vec<u8>>,
    fee_policy: FeePolicy,
    witness_shapes: HashMap<Hash160, WitnessShape>,
}

impl std::fmt::Debug for TransactionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionBuilder")
            .field("network_magic", &self.network_magic)
            .field("version", &self.version)
            .field("nonce", &self.nonce)
            .field("valid_until_block", &self.valid_until_block)
            .field("signers", &self.signers)
            .field("attributes", &self.attributes)
            .field("additional_network_fee", &self.additional_network_fee)
            .field("additional_system_fee", &self.additional_system_fee)
            .field("script", &self.script)
            .field("fee_policy", &self.fee_policy)
            .field("witness_shapes", &self.witness_shapes)
            .finish()
    }
}

impl TransactionBuilder {
    /// Starts a new builder talking to `client` on the network identified
    /// by `network_magic`.
    pub fn new(client: Arc<dyn NodeClient>, network_magic: NetworkMagic) -> Self {
        Self {
            client,
            network_magic,
            version: 0,
            nonce: None,
            valid_until_block: None,
            signers: Vec::new(),
            attributes: Vec::new(),
            additional_network_fee: 0,
            additional_system_fee: 0,
            script: None,
            fee_policy: FeePolicy::Default,
            witness_shapes: HashMap::new(),
        }
    }

    pub fn version(&mut self, version: u8) -> &mut Self {
        self.version = version;
        self
    }

    pub fn nonce(&mut self, nonce: u32) -> &mut Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn valid_until_block(&mut self, block: u32) -> &mut Self {
        self.valid_until_block = Some(block);
        self
    }

    pub fn script(&mut self, script: Vec<u8>) -> &mut Self {
        self.script = Some(script);
        self
    }

    pub fn extend_script(&mut self, script: &[u8]) -> &mut Self {
        self.script.get_or_insert_with(Vec::new).extend_from_slice(script);
        self
    }

    pub fn additional_network_fee(&mut self, fee: u64) -> &mut Self {
        self.additional_network_fee = fee;
        self
    }

    pub fn additional_system_fee(&mut self, fee: u64) -> &mut Self {
        self.additional_system_fee = fee;
        self
    }

    /// Registers how to size and fill `account`'s witness. Required for
    /// every signer before `build` will construct its dummy witness.
    pub fn with_witness_shape(&mut self, account: Hash160, shape: WitnessShape) -> &mut Self {
        self.witness_shapes.insert(account, shape);
        self
    }

    pub fn signers(&mut self, signers: Vec<Signer>) -> Result<&mut Self, TransactionError> {
        if signers.len() > MAX_SUBITEMS {
            return Err(TransactionError::TooManySigners);
        }
        let mut seen = HashSet::new();
        for signer in &signers {
            signer.validate()?;
            if !seen.insert(signer.account) {
                return Err(TransactionError::DuplicateSigner(to_h160(signer.account)));
            }
        }
        self.signers = signers;
        Ok(self)
    }

    pub fn attributes(&mut self, attributes: Vec<TransactionAttribute>) -> Result<&mut Self, TransactionError> {
        let budget = MAX_SUBITEMS.saturating_sub(self.signers.len());
        if attributes.len() > budget {
            return Err(TransactionError::TooManyAttributes {
                count: attributes.len(),
                budget,
                signers: self.signers.len(),
            });
        }
        let high_priority_count =
            attributes.iter().filter(|a| matches!(a, TransactionAttribute::HighPriority)).count();
        if high_priority_count > 1 {
            return Err(TransactionError::DuplicateHighPriority);
        }
        self.attributes = attributes;
        Ok(self)
    }

    /// Moves the signer for `account` to index 0. Rejects a fee-only
    /// (`None`-scope) signer, since its position doesn't affect who pays.
    pub fn first_signer(&mut self, account: Hash160) -> Result<&mut Self, TransactionError> {
        let fee_only = self
            .signers
            .iter()
            .any(|s| s.account == account && s.scopes.contains(&WitnessScope::None));
        if fee_only {
            return Err(TransactionError::FirstSignerFeeOnly);
        }
        let pos = self
            .signers
            .iter()
            .position(|s| s.account == account)
            .ok_or(TransactionError::FirstSignerNotFound)?;
        let signer = self.signers.remove(pos);
        self.signers.insert(0, signer);
        Ok(self)
    }

    /// If the sender can't cover the built transaction's fees, invoke
    /// `consumer` instead of failing. Mutually exclusive with
    /// [`Self::throw_if_sender_cannot_cover_fees`].
    pub fn do_if_sender_cannot_cover_fees<F>(&mut self, consumer: F) -> Result<&mut Self, TransactionError>
    where
        F: Fn(i64, i64) + Send + Sync + 'static,
    {
        if matches!(self.fee_policy, FeePolicy::Supplier(_)) {
            return Err(TransactionError::ConflictingFeePolicy);
        }
        self.fee_policy = FeePolicy::Consumer(Box::new(consumer));
        Ok(self)
    }

    /// If the sender can't cover the built transaction's fees, fail
    /// `build` with `supplier`'s error. Mutually exclusive with
    /// [`Self::do_if_sender_cannot_cover_fees`].
    pub fn throw_if_sender_cannot_cover_fees<F>(&mut self, supplier: F) -> Result<&mut Self, TransactionError>
    where
        F: Fn() -> TransactionError + Send + Sync + 'static,
    {
        if matches!(self.fee_policy, FeePolicy::Consumer(_)) {
            return Err(TransactionError::ConflictingFeePolicy);
        }
        self.fee_policy = FeePolicy::Supplier(Box::new(supplier));
        Ok(self)
    }

    fn validate(&self) -> Result<(), TransactionError> {
        if self.signers.is_empty() {
            return Err(TransactionError::NoSigners);
        }
        if self.signers.len() > MAX_SUBITEMS {
            return Err(TransactionError::TooManySigners);
        }
        let mut seen = HashSet::new();
        for signer in &self.signers {
            signer.validate()?;
            if !seen.insert(signer.account) {
                return Err(TransactionError::DuplicateSigner(to_h160(signer.account)));
            }
        }
        let budget = MAX_SUBITEMS.saturating_sub(self.signers.len());
        if self.attributes.len() > budget {
            return Err(TransactionError::TooManyAttributes {
                count: self.attributes.len(),
                budget,
                signers: self.signers.len(),
            });
        }
        let high_priority_count =
            self.attributes.iter().filter(|a| matches!(a, TransactionAttribute::HighPriority)).count();
        if high_priority_count > 1 {
            return Err(TransactionError::DuplicateHighPriority);
        }
        match &self.script {
            Some(script) if !script.is_empty() => {}
            _ => return Err(TransactionError::NoScript),
        }
        Ok(())
    }

    fn dummy_witness_for(&self, signer: &Signer) -> Result<neo_common::Witness, TransactionError> {
        let shape = self
            .witness_shapes
            .get(&signer.account)
            .ok_or(TransactionError::NoSigningKey(to_h160(signer.account)))?;
        let witness = match shape {
            WitnessShape::SingleSig(public_key) => {
                neo_common::Witness::new(dummy_invocation(1), build_verification_script(public_key))
            }
            WitnessShape::MultiSig { public_keys, m } => neo_common::Witness::new(
                dummy_invocation(*m),
                build_multisig_verification_script(public_keys, *m)?,
            ),
            WitnessShape::Contract { verification_script } => {
                neo_common::Witness::new(Vec::new(), verification_script.clone())
            }
        };
        Ok(witness)
    }

    async fn check_high_priority(&self, high_priority_present: bool) -> Result<(), TransactionError> {
        if !high_priority_present {
            return Ok(());
        }
        let committee = self.client.get_committee().await?;
        let member_hashes: HashSet<Hash160> =
            committee.iter().map(|pk| Hash160::from_script(&build_verification_script(pk))).collect();
        let committee_hash = if committee.is_empty() {
            None
        } else {
            let m = committee_threshold(committee.len());
            Some(Hash160::from_script(&build_multisig_verification_script(&committee, m)?))
        };
        let sender = self.signers[0].account;
        let accepted = member_hashes.contains(&sender) || committee_hash == Some(sender);
        if !accepted {
            return Err(TransactionError::HighPriorityRequiresCommittee);
        }
        Ok(())
    }

    /// Runs the build pipeline: fills in `nonce`/`valid_until_block` if
    /// unset, invokes the script for `system_fee`, estimates `network_fee`
    /// from dummy witnesses, and optionally checks the sender's balance.
    /// Returns an unsigned transaction (empty `witnesses`).
    pub async fn build(&mut self) -> Result<Transaction, TransactionError> {
        self.validate()?;

        let high_priority_present =
            self.attributes.iter().any(|a| matches!(a, TransactionAttribute::HighPriority));
        self.check_high_priority(high_priority_present).await?;

        let nonce = match self.nonce {
            Some(nonce) => nonce,
            None => rand::random::<u32>(),
        };

        let valid_until_block = match self.valid_until_block {
            Some(block) => block,
            None => {
                let height = self.client.get_block_count().await?;
                debug!(height, "drew valid_until_block from current block count");
                height + MAX_VALID_UNTIL_BLOCK_INCREMENT - 1
            }
        };

        let script = self.script.clone().ok_or(TransactionError::NoScript)?;

        let invoke_signers: Vec<InvokeSigner> = self.signers.iter().map(to_invoke_signer).collect();
        let invocation = self.client.invoke_script(&script, &invoke_signers).await?;
        if invocation.state.is_fault() {
            return Err(TransactionError::VmFault(invocation.exception.unwrap_or_default()));
        }
        let system_fee = invocation.gas_consumed as i64 + self.additional_system_fee as i64;
        trace!(system_fee, "system fee estimated from invoke_script");

        let dummy_witnesses: Vec<neo_common::Witness> =
            self.signers.iter().map(|s| self.dummy_witness_for(s)).collect::<Result<_, _>>()?;

        let mut tx = Transaction {
            version: self.version,
            nonce,
            system_fee,
            network_fee: 0,
            valid_until_block,
            signers: self.signers.clone(),
            attributes: self.attributes.clone(),
            script,
            witnesses: dummy_witnesses,
        };

        let network_fee =
            self.client.calculate_network_fee(&tx.to_bytes()).await? as i64 + self.additional_network_fee as i64;
        trace!(network_fee, "network fee estimated from dummy witnesses");
        tx.network_fee = network_fee;
        tx.witnesses.clear();

        let sender = self.signers[0].account;
        match &self.fee_policy {
            FeePolicy::Default => {}
            FeePolicy::Consumer(consumer) => {
                let balance = self.client.get_gas_balance(sender).await? as i64;
                if tx.system_fee + tx.network_fee > balance {
                    consumer(tx.system_fee + tx.network_fee, balance);
                }
            }
            FeePolicy::Supplier(supplier) => {
                let balance = self.client.get_gas_balance(sender).await? as i64;
                if tx.system_fee + tx.network_fee > balance {
                    return Err(supplier());
                }
            }
        }

        Ok(tx)
    }

    /// Signs `tx`, producing a witness per signer in signer order.
    /// `sources` maps each local/contract signer's account to how its
    /// witness is produced; a signer absent from `sources` fails with
    /// [`TransactionError::NoSigningKey`].
    pub fn sign(
        &self,
        tx: &Transaction,
        sources: &HashMap<Hash160, WitnessSource<'_>>,
    ) -> Result<Transaction, TransactionError> {
        let sign_data = tx.sign_data(self.network_magic.value());
        let mut witnesses = Vec::with_capacity(tx.signers.len());
        for signer in &tx.signers {
            let source = sources
                .get(&signer.account)
                .ok_or(TransactionError::NoSigningKey(to_h160(signer.account)))?;
            let witness = match source {
                WitnessSource::Key(key_pair) => {
                    let signature = key_pair.sign(&sign_data)?;
                    neo_common::Witness::from_signature(&signature, key_pair.public_key())
                }
                WitnessSource::Contract(invocation_script) => {
                    neo_common::Witness::new(invocation_script.clone(), Vec::new())
                }
                WitnessSource::MultiSig => {
                    return Err(TransactionError::MultiSigAutoSignRejected(to_h160(signer.account)));
                }
            };
            witnesses.push(witness);
        }
        let mut signed = tx.clone();
        signed.witnesses = witnesses;
        Ok(signed)
    }

    /// Broadcasts a fully-witnessed transaction.
    pub async fn send(&self, tx: &Transaction) -> Result<Hash256, TransactionError> {
        let result = self.client.send_raw_transaction(&tx.to_bytes()).await?;
        if let Some(message) = result.error {
            return Err(TransactionError::ClientError(ClientError::TransactionRejected { code: 0, message }));
        }
        Ok(result.hash)
    }

    /// Watches blocks from `from_index` for the one containing `tx_hash`,
    /// the lazy post-broadcast tracking observer from the concurrency
    /// model. Cold and restartable: each call opens its own subscription.
    pub async fn track(&self, from_index: u32, tx_hash: Hash256) -> Result<Block, TransactionError> {
        neo_client::track(self.client.as_ref(), from_index, tx_hash).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;

    use async_trait::async_trait;
    use futures::Stream;
    use neo_client::{ApplicationLog, BlockStream, InvocationResult, SendRawTransactionResult, VmState};
    use neo_crypto::{Secp256r1PrivateKey, Secp256r1Signature};
    use neo_types::ContractParameter;

    use super::*;

    struct MockNodeClient {
        gas_consumed: u64,
        network_fee: u64,
        block_count: u32,
        gas_balance: u64,
        committee: Vec<Secp256r1PublicKey>,
    }

    #[async_trait]
    impl NodeClient for MockNodeClient {
        async fn invoke_script(
            &self,
            _script: &[u8],
            _signers: &[InvokeSigner],
        ) -> Result<InvocationResult, ClientError> {
            Ok(InvocationResult {
                state: VmState::Halt,
                gas_consumed: self.gas_consumed,
                stack: Vec::new(),
                exception: None,
            })
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
            Ok(self.network_fee)
        }

        async fn get_block_count(&self) -> Result<u32, ClientError> {
            Ok(self.block_count)
        }

        async fn get_committee(&self) -> Result<Vec<Secp256r1PublicKey>, ClientError> {
            Ok(self.committee.clone())
        }

        async fn get_gas_balance(&self, _account: Hash160) -> Result<u64, ClientError> {
            Ok(self.gas_balance)
        }

        async fn send_raw_transaction(
            &self,
            _raw_tx_bytes: &[u8],
        ) -> Result<SendRawTransactionResult, ClientError> {
            Ok(SendRawTransactionResult { hash: Hash256::ZERO, error: None })
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

        fn subscribe_blocks(&self, _from_index: u32) -> BlockStream {
            Box::pin(futures::stream::empty()) as Pin<Box<dyn Stream<Item = Result<Block, ClientError>> + Send>>
        }
    }

    fn builder_with(client: MockNodeClient) -> TransactionBuilder {
        TransactionBuilder::new(Arc::new(client), NetworkMagic::TESTNET)
    }

    fn default_client() -> MockNodeClient {
        MockNodeClient {
            gas_consumed: 984_060,
            network_fee: 1_230_610,
            block_count: 1_000,
            gas_balance: u64::MAX,
            committee: Vec::new(),
        }
    }

    fn sender_setup() -> (KeyPair, Hash160) {
        let key_pair = KeyPair::from_secret_key(&Secp256r1PrivateKey::random());
        let hash = key_pair.script_hash();
        (key_pair, hash)
    }

    #[tokio::test]
    async fn fee_autofill_matches_the_mocked_node_responses() {
        let (key_pair, sender) = sender_setup();
        let mut builder = builder_with(default_client());
        builder
            .script(vec![0x51])
            .signers(vec![Signer::called_by_entry(sender)])
            .unwrap()
            .with_witness_shape(sender, WitnessShape::SingleSig(key_pair.public_key().clone()));

        let tx = builder.build().await.unwrap();
        assert_eq!(tx.system_fee, 984_060);
        assert_eq!(tx.network_fee, 1_230_610);
        assert_eq!(tx.valid_until_block, 1_000 + MAX_VALID_UNTIL_BLOCK_INCREMENT - 1);
        assert!(tx.witnesses.is_empty());
    }

    #[tokio::test]
    async fn duplicate_signer_accounts_are_rejected() {
        let (_key_pair, sender) = sender_setup();
        let mut builder = builder_with(default_client());
        let result = builder.signers(vec![
            Signer::called_by_entry(sender),
            Signer::called_by_entry(sender),
        ]);
        assert!(matches!(result, Err(TransactionError::DuplicateSigner(_))));
    }

    #[tokio::test]
    async fn vm_fault_during_fee_estimation_surfaces_as_a_build_error() {
        let (key_pair, sender) = sender_setup();
        let mut client = default_client();
        client.gas_consumed = 0;
        let mut builder = builder_with(client);
        builder.script(vec![0x51]).signers(vec![Signer::called_by_entry(sender)]).unwrap();
        builder.with_witness_shape(sender, WitnessShape::SingleSig(key_pair.public_key().clone()));

        // Force a FAULT by wrapping a client whose invoke_script reports FAULT.
        struct FaultingClient(MockNodeClient);

        #[async_trait]
        impl NodeClient for FaultingClient {
            async fn invoke_script(
                &self,
                s: &[u8],
                signers: &[InvokeSigner],
            ) -> Result<InvocationResult, ClientError> {
                let _ = self.0.invoke_script(s, signers).await?;
                Ok(InvocationResult {
                    state: VmState::Fault,
                    gas_consumed: 0,
                    stack: Vec::new(),
                    exception: Some("division by zero".into()),
                })
            }
            async fn invoke_function(
                &self,
                h: Hash160,
                m: &str,
                p: &[ContractParameter],
                s: &[InvokeSigner],
            ) -> Result<InvocationResult, ClientError> {
                self.0.invoke_function(h, m, p, s).await
            }
            async fn calculate_network_fee(&self, b: &[u8]) -> Result<u64, ClientError> {
                self.0.calculate_network_fee(b).await
            }
            async fn get_block_count(&self) -> Result<u32, ClientError> {
                self.0.get_block_count().await
            }
            async fn get_committee(&self) -> Result<Vec<Secp256r1PublicKey>, ClientError> {
                self.0.get_committee().await
            }
            async fn get_gas_balance(&self, a: Hash160) -> Result<u64, ClientError> {
                self.0.get_gas_balance(a).await
            }
            async fn send_raw_transaction(&self, b: &[u8]) -> Result<SendRawTransactionResult, ClientError> {
                self.0.send_raw_transaction(b).await
            }
            async fn get_application_log(&self, h: Hash256) -> Result<Option<ApplicationLog>, ClientError> {
                self.0.get_application_log(h).await
            }
            async fn get_block_by_hash(&self, h: Hash256) -> Result<Block, ClientError> {
                self.0.get_block_by_hash(h).await
            }
            async fn get_block_by_index(&self, i: u32) -> Result<Block, ClientError> {
                self.0.get_block_by_index(i).await
            }
            fn subscribe_blocks(&self, i: u32) -> BlockStream {
                self.0.subscribe_blocks(i)
            }
        }

        let mut builder = TransactionBuilder::new(Arc::new(FaultingClient(default_client())), NetworkMagic::TESTNET);
        builder.script(vec![0x51]).signers(vec![Signer::called_by_entry(sender)]).unwrap();
        builder.with_witness_shape(sender, WitnessShape::SingleSig(key_pair.public_key().clone()));

        let result = builder.build().await;
        assert!(matches!(result, Err(TransactionError::VmFault(ref msg)) if msg == "division by zero"));
    }

    #[tokio::test]
    async fn sign_produces_a_witness_verifiable_against_the_signer_key() {
        let (key_pair, sender) = sender_setup();
        let mut builder = builder_with(default_client());
        builder
            .script(vec![0x51])
            .signers(vec![Signer::called_by_entry(sender)])
            .unwrap()
            .with_witness_shape(sender, WitnessShape::SingleSig(key_pair.public_key().clone()));

        let tx = builder.build().await.unwrap();
        let mut sources: HashMap<Hash160, WitnessSource> = HashMap::new();
        sources.insert(sender, WitnessSource::Key(&key_pair));
        let signed = builder.sign(&tx, &sources).unwrap();

        assert_eq!(signed.witnesses.len(), 1);
        let sign_data = tx.sign_data(NetworkMagic::TESTNET.value());
        let invocation = &signed.witnesses[0].invocation_script;
        let sig_bytes = &invocation[2..];
        let signature = Secp256r1Signature::from_bytes(sig_bytes).unwrap();
        assert!(key_pair.public_key().verify(&sign_data, &signature).is_ok());
    }

    #[tokio::test]
    async fn multisig_signer_is_rejected_from_auto_signing() {
        let (_key_pair, sender) = sender_setup();
        let mut builder = builder_with(default_client());
        builder.script(vec![0x51]).signers(vec![Signer::called_by_entry(sender)]).unwrap();
        let tx = Transaction {
            version: 0,
            nonce: 1,
            system_fee: 0,
            network_fee: 0,
            valid_until_block: 100,
            signers: vec![Signer::called_by_entry(sender)],
            attributes: Vec::new(),
            script: vec![0x51],
            witnesses: Vec::new(),
        };
        let mut sources: HashMap<Hash160, WitnessSource> = HashMap::new();
        sources.insert(sender, WitnessSource::MultiSig);
        assert!(matches!(builder.sign(&tx, &sources), Err(TransactionError::MultiSigAutoSignRejected(_))));
    }
}

//! The transaction itself: the wire-format container that carries a
//! script, its signers and attributes, and the witnesses that authorize
//! it.

use neo_codec::{Decoder, Encoder, NeoSerializable};
use neo_common::{TransactionAttribute, Witness};
use neo_crypto::{hash256, sha256, Hash256};
use neo_error::CodecError;

use super::signer::Signer;

/// An unsigned or signed Neo N3 transaction.
///
/// Wire order is `version | nonce | system_fee | network_fee |
/// valid_until_block | signers[] | attributes[] | script | witnesses[]`.
/// `witnesses` is empty on a freshly built transaction and filled in by
/// [`crate::TransactionBuilder::sign`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub version: u8,
    pub nonce: u32,
    pub system_fee: i64,
    pub network_fee: i64,
    pub valid_until_block: u32,
    pub signers: Vec<Signer>,
    pub attributes: Vec<TransactionAttribute>,
    pub script: Vec<u8>,
    pub witnesses: Vec<Witness>,
}

impl Transaction {
    fn encode_without_witnesses(&self, encoder: &mut Encoder) {
        encoder.write_u8(self.version);
        encoder.write_u32(self.nonce);
        encoder.write_i64(self.system_fee);
        encoder.write_i64(self.network_fee);
        encoder.write_u32(self.valid_until_block);
        encoder.write_serializable_list(&self.signers);
        encoder.write_serializable_list(&self.attributes);
        encoder.write_var_bytes(&self.script);
    }

    /// The transaction's bytes excluding the witnesses list, the preimage
    /// both its hash and its signers' sign data are built from.
    pub fn to_bytes_without_witnesses(&self) -> Vec<u8> {
        let mut encoder = Encoder::new();
        self.encode_without_witnesses(&mut encoder);
        encoder.to_bytes()
    }

    /// This transaction's hash (`hash256` of the unsigned body). Stable
    /// across signing, since witnesses aren't part of the preimage.
    pub fn hash(&self) -> Hash256 {
        Hash256::from_le_bytes(hash256(&self.to_bytes_without_witnesses()))
    }

    /// The data a signer's private key signs over:
    /// `sha256(network_magic_le || sha256(tx_without_witnesses))`, computed
    /// here up to (but not including) the outer `sha256`, which
    /// `Secp256r1PrivateKey::sign` applies itself.
    pub fn sign_data(&self, network_magic: u32) -> Vec<u8> {
        let inner = sha256(&self.to_bytes_without_witnesses());
        let mut preimage = Vec::with_capacity(36);
        preimage.extend_from_slice(&network_magic.to_le_bytes());
        preimage.extend_from_slice(&inner);
        preimage
    }
}

impl NeoSerializable for Transaction {
    fn size(&self) -> usize {
        let mut encoder = Encoder::new();
        self.encode(&mut encoder);
        encoder.len()
    }

    fn encode(&self, encoder: &mut Encoder) {
        self.encode_without_witnesses(encoder);
        encoder.write_serializable_list(&self.witnesses);
    }

    fn decode(decoder: &mut Decoder) -> Result<Self, CodecError> {
        let version = decoder.read_u8()?;
        let nonce = decoder.read_u32()?;
        let system_fee = decoder.read_i64()?;
        let network_fee = decoder.read_i64()?;
        let valid_until_block = decoder.read_u32()?;
        let signers = decoder.read_serializable_list()?;
        let attributes = decoder.read_serializable_list()?;
        let script = decoder.read_var_bytes()?;
        let witnesses = decoder.read_serializable_list()?;
        Ok(Self {
            version,
            nonce,
            system_fee,
            network_fee,
            valid_until_block,
            signers,
            attributes,
            script,
            witnesses,
        })
    }
}

#[cfg(test)]
mod tests {
    use neo_crypto::Hash160;

    use super::*;

    fn sample() -> Transaction {
        Transaction {
            version: 0,
            nonce: 42,
            system_fee: 984_060,
            network_fee: 1_230_610,
            valid_until_block: 5_759,
            signers: vec![Signer::called_by_entry(Hash160::from_le_bytes([7u8; 20]))],
            attributes: Vec::new(),
            script: vec![0x51, 0x41],
            witnesses: Vec::new(),
        }
    }

    #[test]
    fn round_trips_through_the_wire_format() {
        let tx = sample();
        let bytes = tx.to_bytes();
        assert_eq!(bytes.len(), tx.size());

        let mut decoder = Decoder::new(&bytes);
        let decoded = Transaction::decode(&mut decoder).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn hash_is_stable_across_witness_changes() {
        let mut tx = sample();
        let hash_before = tx.hash();
        tx.witnesses.push(Witness::new(vec![1, 2, 3], vec![4, 5, 6]));
        assert_eq!(tx.hash(), hash_before);
    }

    #[test]
    fn sign_data_mixes_in_the_network_magic() {
        let tx = sample();
        let mainnet = tx.sign_data(860_833_102);
        let testnet = tx.sign_data(894_710_606);
        assert_ne!(mainnet, testnet);
        assert_eq!(mainnet.len(), 36);
    }

    #[test]
    fn decode_on_empty_input_fails_instead_of_panicking() {
        let mut decoder = Decoder::new(&[]);
        assert!(Transaction::decode(&mut decoder).is_err());
    }
}

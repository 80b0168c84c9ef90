//! Witnesses: the invocation/verification script pair that authorizes a
//! transaction signer.

use std::collections::HashMap;

use neo_codec::{Decoder, Encoder, NeoSerializable};
use neo_crypto::{
	build_multisig_verification_script, build_verification_script, CryptoError, Secp256r1PublicKey,
	Secp256r1Signature,
};
use neo_error::CodecError;
use serde::{Deserialize, Serialize};

/// A witness: the invocation script that runs first (typically pushing
/// signatures) followed by the verification script it must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
	pub invocation_script: Vec<u8>,
	pub verification_script: Vec<u8>,
}

impl Witness {
	pub fn new(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
		Self { invocation_script, verification_script }
	}

	/// Builds a single-sig witness: invocation script `PUSHDATA1 64 <sig>`,
	/// verification script for `public_key`.
	pub fn from_signature(signature: &Secp256r1Signature, public_key: &Secp256r1PublicKey) -> Self {
		let mut invocation_script = Vec::with_capacity(66);
		invocation_script.push(0x0c); // PUSHDATA1
		invocation_script.push(64);
		invocation_script.extend_from_slice(&signature.to_bytes());
		Self::new(invocation_script, build_verification_script(public_key))
	}

	/// Assembles a multi-sig witness from `m` of `n` public keys and a
	/// collection of signatures keyed by signer public key. Public keys are
	/// sorted ascending (the canonical multi-sig key order) and the first
	/// `m` available signatures, in that order, are concatenated.
	pub fn from_multisig(
		public_keys: &[Secp256r1PublicKey],
		m: usize,
		signatures: &HashMap<Secp256r1PublicKey, Secp256r1Signature>,
	) -> Result<Self, CryptoError> {
		let mut sorted: Vec<&Secp256r1PublicKey> = public_keys.iter().collect();
		sorted.sort();

		let mut invocation_script = Vec::new();
		let mut collected = 0;
		for key in sorted.iter() {
			let Some(signature) = signatures.get(*key) else { continue };
			invocation_script.push(0x0c); // PUSHDATA1
			invocation_script.push(64);
			invocation_script.extend_from_slice(&signature.to_bytes());
			collected += 1;
			if collected == m {
				break;
			}
		}

		if collected < m {
			return Err(CryptoError::InsufficientSignatures { have: collected, need: m });
		}

		let verification_script = build_multisig_verification_script(public_keys, m)?;
		Ok(Self::new(invocation_script, verification_script))
	}
}

impl NeoSerializable for Witness {
	fn size(&self) -> usize {
		let mut encoder = Encoder::new();
		encoder.write_var_bytes(&self.invocation_script);
		encoder.write_var_bytes(&self.verification_script);
		encoder.len()
	}

	fn encode(&self, encoder: &mut Encoder) {
		encoder.write_var_bytes(&self.invocation_script);
		encoder.write_var_bytes(&self.verification_script);
	}

	fn decode(decoder: &mut Decoder) -> Result<Self, CodecError> {
		let invocation_script = decoder.read_var_bytes()?;
		let verification_script = decoder.read_var_bytes()?;
		Ok(Self { invocation_script, verification_script })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use neo_crypto::Secp256r1PrivateKey;

	#[test]
	fn single_sig_witness_round_trips() {
		let private = Secp256r1PrivateKey::random();
		let public = private.to_public_key();
		let signature = private.sign(b"tx").unwrap();
		let witness = Witness::from_signature(&signature, &public);

		let mut encoder = Encoder::new();
		witness.encode(&mut encoder);
		let bytes = encoder.to_bytes();
		let mut decoder = Decoder::new(&bytes);
		assert_eq!(Witness::decode(&mut decoder).unwrap(), witness);
	}

	#[test]
	fn multisig_witness_fails_with_too_few_signatures() {
		let keys: Vec<Secp256r1PublicKey> =
			(0..3).map(|_| Secp256r1PrivateKey::random().to_public_key()).collect();
		let signatures = HashMap::new();
		assert!(matches!(
			Witness::from_multisig(&keys, 2, &signatures),
			Err(CryptoError::InsufficientSignatures { have: 0, need: 2 })
		));
	}
}

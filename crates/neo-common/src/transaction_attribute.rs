//! Transaction attributes: out-of-band metadata a transaction carries
//! alongside its script, each counted against the signer/attribute budget.

use neo_codec::{Decoder, Encoder, NeoSerializable};
use neo_crypto::Hash256;
use neo_error::CodecError;
use serde::{Deserialize, Serialize};

use crate::oracle_response_code::OracleResponseCode;

const HIGH_PRIORITY: u8 = 0x01;
const ORACLE_RESPONSE: u8 = 0x11;
const NOT_VALID_BEFORE: u8 = 0x20;
const CONFLICTS: u8 = 0x21;

/// A transaction attribute. Each signer/attribute pair is bounded at 16
/// total per transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionAttribute {
	/// Requests priority inclusion; at most one per transaction and subject
	/// to a committee-membership check on the sender.
	HighPriority,
	/// An oracle node's response to a prior `OracleRequest`.
	OracleResponse { id: u64, code: OracleResponseCode, result: Vec<u8> },
	/// Rejects the transaction if included before `height`.
	NotValidBefore { height: u32 },
	/// Declares this transaction as conflicting with (invalidating) another.
	Conflicts { hash: Hash256 },
}

impl NeoSerializable for TransactionAttribute {
	fn size(&self) -> usize {
		let mut encoder = Encoder::new();
		self.encode(&mut encoder);
		encoder.len()
	}

	fn encode(&self, encoder: &mut Encoder) {
		match self {
			Self::HighPriority => encoder.write_u8(HIGH_PRIORITY),
			Self::OracleResponse { id, code, result } => {
				encoder.write_u8(ORACLE_RESPONSE);
				encoder.write_u64(*id);
				encoder.write_u8(code.as_u8());
				encoder.write_var_bytes(result);
			}
			Self::NotValidBefore { height } => {
				encoder.write_u8(NOT_VALID_BEFORE);
				encoder.write_u32(*height);
			}
			Self::Conflicts { hash } => {
				encoder.write_u8(CONFLICTS);
				encoder.write_bytes(&hash.to_le_bytes());
			}
		}
	}

	fn decode(decoder: &mut Decoder) -> Result<Self, CodecError> {
		let tag = decoder.read_u8()?;
		match tag {
			HIGH_PRIORITY => Ok(Self::HighPriority),
			ORACLE_RESPONSE => {
				let id = decoder.read_u64()?;
				let code_byte = decoder.read_u8()?;
				let code = OracleResponseCode::from_u8(code_byte).ok_or_else(|| {
					CodecError::UnknownDiscriminant {
						field: "OracleResponseCode".into(),
						value: code_byte as u64,
					}
				})?;
				let result = decoder.read_var_bytes()?;
				Ok(Self::OracleResponse { id, code, result })
			}
			NOT_VALID_BEFORE => Ok(Self::NotValidBefore { height: decoder.read_u32()? }),
			CONFLICTS => {
				let bytes = decoder.read_bytes(32)?;
				let mut hash = [0u8; 32];
				hash.copy_from_slice(&bytes);
				Ok(Self::Conflicts { hash: Hash256::from_le_bytes(hash) })
			}
			other => Err(CodecError::UnknownDiscriminant { field: "TransactionAttribute".into(), value: other as u64 }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn high_priority_round_trips() {
		let attr = TransactionAttribute::HighPriority;
		let mut encoder = Encoder::new();
		attr.encode(&mut encoder);
		let bytes = encoder.to_bytes();
		assert_eq!(bytes, vec![HIGH_PRIORITY]);
		let mut decoder = Decoder::new(&bytes);
		assert_eq!(TransactionAttribute::decode(&mut decoder).unwrap(), attr);
	}

	#[test]
	fn not_valid_before_round_trips() {
		let attr = TransactionAttribute::NotValidBefore { height: 1234 };
		let mut encoder = Encoder::new();
		attr.encode(&mut encoder);
		let bytes = encoder.to_bytes();
		let mut decoder = Decoder::new(&bytes);
		assert_eq!(TransactionAttribute::decode(&mut decoder).unwrap(), attr);
	}
}

//! Witness conditions: the recursive boolean expressions a [`crate::WitnessRule`]
//! evaluates against the calling contract to decide whether a witness applies.

use neo_codec::{Decoder, Encoder, NeoSerializable};
use neo_crypto::{Hash160, Secp256r1PublicKey};
use neo_error::CodecError;
use serde::{Deserialize, Serialize};

const MAX_DEPTH: usize = 2;
const MAX_SUBITEMS: usize = 16;

const BOOLEAN: u8 = 0;
const NOT: u8 = 1;
const AND: u8 = 2;
const OR: u8 = 3;
const SCRIPT_HASH: u8 = 4;
const GROUP: u8 = 5;
const CALLED_BY_ENTRY: u8 = 6;
const CALLED_BY_CONTRACT: u8 = 7;
const CALLED_BY_GROUP: u8 = 8;

/// A condition node in a witness rule's expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WitnessCondition {
	Boolean(bool),
	Not(Box<WitnessCondition>),
	And(Vec<WitnessCondition>),
	Or(Vec<WitnessCondition>),
	ScriptHash(Hash160),
	Group(Secp256r1PublicKey),
	CalledByEntry,
	CalledByContract(Hash160),
	CalledByGroup(Secp256r1PublicKey),
}

impl WitnessCondition {
	fn discriminant(&self) -> u8 {
		match self {
			Self::Boolean(_) => BOOLEAN,
			Self::Not(_) => NOT,
			Self::And(_) => AND,
			Self::Or(_) => OR,
			Self::ScriptHash(_) => SCRIPT_HASH,
			Self::Group(_) => GROUP,
			Self::CalledByEntry => CALLED_BY_ENTRY,
			Self::CalledByContract(_) => CALLED_BY_CONTRACT,
			Self::CalledByGroup(_) => CALLED_BY_GROUP,
		}
	}

	fn encode_at(&self, encoder: &mut Encoder) {
		encoder.write_u8(self.discriminant());
		match self {
			Self::Boolean(b) => encoder.write_bool(*b),
			Self::Not(inner) => inner.encode_at(encoder),
			Self::And(children) | Self::Or(children) => {
				encoder.write_var_int(children.len() as u64);
				for child in children {
					child.encode_at(encoder);
				}
			}
			Self::ScriptHash(hash) | Self::CalledByContract(hash) => {
				encoder.write_bytes(&hash.to_le_bytes())
			}
			Self::Group(key) | Self::CalledByGroup(key) => {
				encoder.write_bytes(&key.get_encoded(true))
			}
			Self::CalledByEntry => {}
		}
	}

	fn decode_at(decoder: &mut Decoder, depth: usize) -> Result<Self, CodecError> {
		if depth > MAX_DEPTH {
			return Err(CodecError::DepthExceeded { field: "WitnessCondition".into(), max: MAX_DEPTH });
		}
		let tag = decoder.read_u8()?;
		match tag {
			BOOLEAN => Ok(Self::Boolean(decoder.read_bool()?)),
			NOT => Ok(Self::Not(Box::new(Self::decode_at(decoder, depth + 1)?))),
			AND | OR => {
				let count = decoder.read_var_int()?;
				if count == 0 || count as usize > MAX_SUBITEMS {
					return Err(CodecError::TooManyItems {
						field: "WitnessCondition children".into(),
						count: count as usize,
						max: MAX_SUBITEMS,
					});
				}
				let mut children = Vec::with_capacity(count as usize);
				for _ in 0..count {
					children.push(Self::decode_at(decoder, depth + 1)?);
				}
				Ok(if tag == AND { Self::And(children) } else { Self::Or(children) })
			}
			SCRIPT_HASH | CALLED_BY_CONTRACT => {
				let bytes = decoder.read_bytes(20)?;
				let mut hash = [0u8; 20];
				hash.copy_from_slice(&bytes);
				let hash = Hash160::from_le_bytes(hash);
				Ok(if tag == SCRIPT_HASH { Self::ScriptHash(hash) } else { Self::CalledByContract(hash) })
			}
			GROUP | CALLED_BY_GROUP => {
				let bytes = decoder.read_bytes(33)?;
				let key = Secp256r1PublicKey::from_compressed(&bytes)
					.map_err(|e| CodecError::InvalidFormat(e.to_string()))?;
				Ok(if tag == GROUP { Self::Group(key) } else { Self::CalledByGroup(key) })
			}
			CALLED_BY_ENTRY => Ok(Self::CalledByEntry),
			other =>
				Err(CodecError::UnknownDiscriminant { field: "WitnessCondition".into(), value: other as u64 }),
		}
	}
}

impl NeoSerializable for WitnessCondition {
	fn size(&self) -> usize {
		let mut encoder = Encoder::new();
		self.encode_at(&mut encoder);
		encoder.len()
	}

	fn encode(&self, encoder: &mut Encoder) {
		self.encode_at(encoder);
	}

	fn decode(decoder: &mut Decoder) -> Result<Self, CodecError> {
		Self::decode_at(decoder, 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn round_trip(condition: &WitnessCondition) -> WitnessCondition {
		let mut encoder = Encoder::new();
		condition.encode(&mut encoder);
		let bytes = encoder.to_bytes();
		let mut decoder = Decoder::new(&bytes);
		WitnessCondition::decode(&mut decoder).unwrap()
	}

	#[test]
	fn boolean_leaf_round_trips() {
		let condition = WitnessCondition::Boolean(true);
		assert_eq!(round_trip(&condition), condition);
	}

	#[test]
	fn not_and_or_nesting_within_depth_round_trips() {
		let condition = WitnessCondition::And(vec![
			WitnessCondition::Not(Box::new(WitnessCondition::CalledByEntry)),
			WitnessCondition::Boolean(false),
		]);
		assert_eq!(round_trip(&condition), condition);
	}

	#[test]
	fn depth_exceeding_two_fails() {
		let condition = WitnessCondition::Not(Box::new(WitnessCondition::Not(Box::new(
			WitnessCondition::Not(Box::new(WitnessCondition::Boolean(true))),
		))));
		let mut encoder = Encoder::new();
		condition.encode(&mut encoder);
		let bytes = encoder.to_bytes();
		let mut decoder = Decoder::new(&bytes);
		assert!(matches!(
			WitnessCondition::decode(&mut decoder),
			Err(CodecError::DepthExceeded { .. })
		));
	}

	#[test]
	fn empty_and_is_rejected() {
		let mut encoder = Encoder::new();
		encoder.write_u8(AND);
		encoder.write_var_int(0);
		let bytes = encoder.to_bytes();
		let mut decoder = Decoder::new(&bytes);
		assert!(WitnessCondition::decode(&mut decoder).is_err());
	}
}

use neo_error::CodecError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// The type tag of a [`super::ContractParameter`], matching the Neo N3
/// `ContractParameterType` enum byte-for-byte — it appears both in contract
/// manifests and in the wire encoding of invocation results.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	PartialOrd,
	Ord,
	IntoPrimitive,
	TryFromPrimitive,
	Serialize,
	Deserialize,
)]
#[repr(u8)]
pub enum ContractParameterType {
	Any = 0x00,
	Boolean = 0x10,
	Integer = 0x11,
	ByteArray = 0x12,
	String = 0x13,
	Hash160 = 0x14,
	Hash256 = 0x15,
	PublicKey = 0x16,
	Signature = 0x17,
	Array = 0x20,
	Map = 0x22,
	InteropInterface = 0x30,
	Void = 0xff,
}

impl ContractParameterType {
	/// Returns the wire discriminant.
	pub fn byte(self) -> u8 {
		self.into()
	}

	/// Parses a wire discriminant, failing on unassigned values.
	pub fn from_byte(value: u8) -> Result<Self, CodecError> {
		Self::try_from(value).map_err(|_| CodecError::UnknownDiscriminant {
			field: "ContractParameterType".to_string(),
			value: value as u64,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn discriminants_match_protocol() {
		assert_eq!(ContractParameterType::Any.byte(), 0x00);
		assert_eq!(ContractParameterType::Boolean.byte(), 0x10);
		assert_eq!(ContractParameterType::Array.byte(), 0x20);
		assert_eq!(ContractParameterType::Void.byte(), 0xff);
	}

	#[test]
	fn rejects_unassigned_discriminant() {
		assert!(ContractParameterType::from_byte(0x99).is_err());
	}
}

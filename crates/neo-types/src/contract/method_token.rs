use neo_codec::{Decoder, Encoder, NeoSerializable};
use neo_crypto::Hash160;
use neo_error::CodecError;
use serde::{Deserialize, Serialize};

/// A static reference from a NEF file's script to another contract's
/// method, resolved by the VM at load time rather than by syscall hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodToken {
	pub hash: Hash160,
	pub method: String,
	pub param_count: u16,
	pub has_return: bool,
	pub call_flags: u8,
}

impl NeoSerializable for MethodToken {
	fn size(&self) -> usize {
		20 + (1 + self.method.len()) + 2 + 1 + 1
	}

	fn encode(&self, encoder: &mut Encoder) {
		encoder.write_bytes(&self.hash.to_le_bytes());
		encoder.write_var_string(&self.method);
		encoder.write_u16(self.param_count);
		encoder.write_bool(self.has_return);
		encoder.write_u8(self.call_flags);
	}

	fn decode(decoder: &mut Decoder) -> Result<Self, CodecError> {
		let hash_bytes = decoder.read_bytes(20)?;
		let mut hash = [0u8; 20];
		hash.copy_from_slice(&hash_bytes);

		let method = decoder.read_var_string()?;
		let param_count = decoder.read_u16()?;
		let has_return = decoder.read_bool()?;
		let call_flags = decoder.read_u8()?;

		Ok(Self { hash: Hash160::from_le_bytes(hash), method, param_count, has_return, call_flags })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_through_codec() {
		let token = MethodToken {
			hash: Hash160::from_le_bytes([9u8; 20]),
			method: "transfer".to_string(),
			param_count: 4,
			has_return: true,
			call_flags: 0x0f,
		};

		let mut encoder = Encoder::new();
		token.encode(&mut encoder);
		let bytes = encoder.to_bytes();
		assert_eq!(bytes.len(), token.size());

		let mut decoder = Decoder::new(&bytes);
		let decoded = MethodToken::decode(&mut decoder).unwrap();
		assert_eq!(decoded, token);
	}
}

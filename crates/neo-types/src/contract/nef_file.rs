//! NEF (Neo Executable Format) files: the on-disk container a compiler
//! emits and a node validates before deploying a contract.

use neo_codec::{Decoder, Encoder, NeoSerializable};
use neo_crypto::hash256;
use neo_error::CodecError;
use serde::{Deserialize, Serialize};

use crate::contract::method_token::MethodToken;

const MAGIC: u32 = 0x3346454E;
const COMPILER_FIELD_SIZE: usize = 64;
const MAX_SCRIPT_LENGTH: usize = 512 * 1024;

/// A parsed NEF file: compiler identity, the method tokens its script
/// references, the script itself, and its checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NefFile {
	pub compiler: String,
	pub tokens: Vec<MethodToken>,
	pub script: Vec<u8>,
}

impl NefFile {
	/// Builds a NEF file body; the checksum is computed at encode time, not
	/// stored on this struct, so a freshly-built value never carries a stale
	/// one.
	pub fn new(compiler: impl Into<String>, tokens: Vec<MethodToken>, script: Vec<u8>) -> Self {
		Self { compiler: compiler.into(), tokens, script }
	}

	fn encode_body(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
		encoder.write_u32(MAGIC);
		encoder.write_fixed_string(&self.compiler, COMPILER_FIELD_SIZE)?;
		encoder.write_u16(0); // reserved
		encoder.write_serializable_list(&self.tokens);
		encoder.write_u16(0); // reserved
		encoder.write_var_bytes(&self.script);
		Ok(())
	}

	/// Computes `first4(SHA256(SHA256(bytes_excluding_checksum)))` over this
	/// file's header, tokens, and script.
	pub fn checksum(&self) -> Result<[u8; 4], CodecError> {
		let mut encoder = Encoder::new();
		self.encode_body(&mut encoder)?;
		let digest = hash256(&encoder.to_bytes());
		Ok([digest[0], digest[1], digest[2], digest[3]])
	}
}

impl NeoSerializable for NefFile {
	fn size(&self) -> usize {
		let mut encoder = Encoder::new();
		let _ = self.encode_body(&mut encoder);
		encoder.len() + 4
	}

	fn encode(&self, encoder: &mut Encoder) {
		// Infallible by construction: `compiler` is validated not to exceed
		// the fixed field width in `new`/`decode`, and every other field is
		// of fixed or self-describing variable width.
		self.encode_body(encoder).expect("NEF body encodes infallibly");
		let checksum = self.checksum().expect("NEF body encodes infallibly");
		encoder.write_bytes(&checksum);
	}

	fn decode(decoder: &mut Decoder) -> Result<Self, CodecError> {
		let start = *decoder.pointer();

		let magic = decoder.read_u32()?;
		if magic != MAGIC {
			return Err(CodecError::InvalidFormat(format!(
				"unexpected NEF magic 0x{magic:08x}"
			)));
		}

		let compiler = decoder.read_fixed_string(COMPILER_FIELD_SIZE)?;

		let reserved1 = decoder.read_u16()?;
		if reserved1 != 0 {
			return Err(CodecError::InvalidFormat("non-zero reserved field after compiler".into()));
		}

		let token_count = decoder.read_var_int()?;
		let mut tokens = Vec::with_capacity(token_count as usize);
		for _ in 0..token_count {
			tokens.push(MethodToken::decode(decoder)?);
		}

		let reserved2 = decoder.read_u16()?;
		if reserved2 != 0 {
			return Err(CodecError::InvalidFormat("non-zero reserved field after tokens".into()));
		}

		let script = decoder.read_var_bytes()?;
		if script.is_empty() {
			return Err(CodecError::InvalidFormat("NEF script is empty".into()));
		}
		if script.len() > MAX_SCRIPT_LENGTH {
			return Err(CodecError::OutOfRange { field: "script".into(), value: script.len() as i64 });
		}

		let end = *decoder.pointer();
		let body = decoder.data_slice(start, end);
		let expected = hash256(body);

		let checksum = decoder.read_bytes(4)?;
		if checksum != expected[..4] {
			return Err(CodecError::ChecksumMismatch {
				expected: u32::from_le_bytes(expected[..4].try_into().unwrap()),
				actual: u32::from_le_bytes(checksum[..4].try_into().unwrap()),
			});
		}

		Ok(Self { compiler, tokens, script })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_empty_tokens() {
		let nef = NefFile::new("neow3j", vec![], vec![0x40]); // RET

		let mut encoder = Encoder::new();
		nef.encode(&mut encoder);
		let bytes = encoder.to_bytes();

		let mut decoder = Decoder::new(&bytes);
		let decoded = NefFile::decode(&mut decoder).unwrap();
		assert_eq!(decoded, nef);
	}

	#[test]
	fn rejects_corrupted_checksum() {
		let nef = NefFile::new("neow3j", vec![], vec![0x40]);
		let mut encoder = Encoder::new();
		nef.encode(&mut encoder);
		let mut bytes = encoder.to_bytes();
		*bytes.last_mut().unwrap() ^= 0xff;

		let mut decoder = Decoder::new(&bytes);
		assert!(matches!(NefFile::decode(&mut decoder), Err(CodecError::ChecksumMismatch { .. })));
	}

	#[test]
	fn rejects_empty_script() {
		let mut encoder = Encoder::new();
		encoder.write_u32(MAGIC);
		encoder.write_fixed_string("neow3j", COMPILER_FIELD_SIZE).unwrap();
		encoder.write_u16(0);
		encoder.write_serializable_list::<MethodToken>(&[]);
		encoder.write_u16(0);
		encoder.write_var_bytes(&[]); // empty script: invalid
		let body = encoder.to_bytes();
		let checksum = hash256(&body);

		let mut bytes = body;
		bytes.extend_from_slice(&checksum[..4]);

		let mut decoder = Decoder::new(&bytes);
		assert!(NefFile::decode(&mut decoder).is_err());
	}
}

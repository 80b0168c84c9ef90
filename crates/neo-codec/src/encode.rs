use crate::{Decoder, Encoder};
use neo_error::CodecError;

/// A type that can be written to and read from Neo's binary wire format.
///
/// `decode(&mut Decoder::new(&x.to_bytes())) == Ok(x)` for every valid `x`,
/// and the decoder must consume exactly `x.size()` bytes doing so.
pub trait NeoSerializable: Sized {
	/// Encoded size in bytes. Must match exactly what `encode` writes.
	fn size(&self) -> usize;

	/// Writes `self` into `encoder`. Infallible given a well-formed value.
	fn encode(&self, encoder: &mut Encoder);

	/// Reads a value of this type from `decoder`.
	fn decode(decoder: &mut Decoder) -> Result<Self, CodecError>;

	/// Convenience: encode into a fresh buffer.
	fn to_bytes(&self) -> Vec<u8> {
		let mut encoder = Encoder::new();
		self.encode(&mut encoder);
		encoder.to_bytes()
	}
}

//! Byte-string conveniences shared across the on-chain data types.

/// A plain byte string — script bytes, verification scripts, raw parameter
/// payloads. An alias rather than a newtype so call sites can use `Vec<u8>`
/// methods directly.
pub type Bytes = Vec<u8>;

/// Hex-encodes `data` without a `0x` prefix, the form the compiler and
/// script builder use for debug output and fixtures.
pub fn to_hex(data: &[u8]) -> String {
	hex::encode(data)
}

/// Decodes a hex string, stripping a leading `0x` if present.
pub fn from_hex(s: &str) -> Result<Bytes, hex::FromHexError> {
	hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

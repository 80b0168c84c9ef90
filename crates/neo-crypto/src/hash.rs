//! Fixed-size hash types and the hash functions Neo N3 builds its identity
//! scheme from: `RIPEMD160(SHA256(x))` for 20-byte script hashes and
//! `SHA256(SHA256(x))` for 32-byte transaction/block hashes and checksums.

use std::fmt;
use std::str::FromStr;

use neo_error::CryptoError;
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Computes `SHA256(data)`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
	let mut out = [0u8; 32];
	out.copy_from_slice(&Sha256::digest(data));
	out
}

/// Computes `SHA256(SHA256(data))`.
pub fn hash256(data: &[u8]) -> [u8; 32] {
	sha256(&sha256(data))
}

/// Computes `RIPEMD160(SHA256(data))`, the script-hash digest.
pub fn hash160(data: &[u8]) -> [u8; 20] {
	let mut hasher = Ripemd160::new();
	hasher.update(sha256(data));
	let mut out = [0u8; 20];
	out.copy_from_slice(&hasher.finalize());
	out
}

/// First four bytes of `hash256(data)`, used for NEF/Base58Check checksums.
pub fn checksum4(data: &[u8]) -> [u8; 4] {
	let mut out = [0u8; 4];
	out.copy_from_slice(&hash256(data)[..4]);
	out
}

macro_rules! fixed_hash {
	($name:ident, $len:literal, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		pub struct $name(pub [u8; $len]);

		impl $name {
			/// The all-zero hash.
			pub const ZERO: Self = Self([0u8; $len]);

			/// Wraps raw little-endian bytes (the on-wire representation) as-is.
			pub const fn from_le_bytes(bytes: [u8; $len]) -> Self {
				Self(bytes)
			}

			/// Returns the raw little-endian bytes (the on-wire representation).
			pub fn to_le_bytes(self) -> [u8; $len] {
				self.0
			}

			/// Parses big-endian hex, with or without a leading `0x`, as used in
			/// textual/JSON representations.
			pub fn from_hex_be(s: &str) -> Result<Self, CryptoError> {
				let s = s.strip_prefix("0x").unwrap_or(s);
				let bytes = hex::decode(s).map_err(|e| CryptoError::HexError(e.to_string()))?;
				if bytes.len() != $len {
					return Err(CryptoError::InvalidFormat(format!(
						"expected {} bytes, got {}",
						$len,
						bytes.len()
					)));
				}
				let mut le = [0u8; $len];
				le.copy_from_slice(&bytes);
				le.reverse();
				Ok(Self(le))
			}

			/// Renders as big-endian hex with a leading `0x`.
			pub fn to_hex_be(self) -> String {
				let mut be = self.0;
				be.reverse();
				format!("0x{}", hex::encode(be))
			}
		}

		impl fmt::Debug for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}({})", stringify!($name), self.to_hex_be())
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.to_hex_be())
			}
		}

		impl FromStr for $name {
			type Err = CryptoError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::from_hex_be(s)
			}
		}

		impl AsRef<[u8]> for $name {
			fn as_ref(&self) -> &[u8] {
				&self.0
			}
		}

		impl Default for $name {
			fn default() -> Self {
				Self::ZERO
			}
		}
	};
}

fixed_hash!(Hash160, 20, "A 20-byte script hash (`RIPEMD160(SHA256(script))`).");
fixed_hash!(Hash256, 32, "A 32-byte double-SHA256 hash (transaction/block identity).");

impl Hash160 {
	/// Derives the script hash of a verification or invocation script.
	pub fn from_script(script: &[u8]) -> Self {
		Self(hash160(script))
	}
}

impl Hash256 {
	/// Computes the double-SHA256 hash of arbitrary data.
	pub fn hash(data: &[u8]) -> Self {
		Self(hash256(data))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash160_hex_round_trips_with_byte_reversal() {
		let hex = "23ba2703c53263e8d6e522dc32203339dcd8eee9".to_string();
		let h = Hash160::from_hex_be(&hex).unwrap();
		assert_eq!(h.to_hex_be()[2..], hex);
	}

	#[test]
	fn ripemd160_known_vector() {
		let digest = {
			let mut hasher = Ripemd160::new();
			hasher.update(b"abc");
			hasher.finalize()
		};
		assert_eq!(hex::encode(digest), "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc");
	}

	#[test]
	fn hash256_is_double_sha256() {
		let once = sha256(b"abc");
		let twice = sha256(&once);
		assert_eq!(hash256(b"abc"), twice);
	}
}

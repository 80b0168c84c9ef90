//! Secp256r1 key pairs, signing, and verification.
//!
//! Public keys are always carried in SEC1-compressed form (33 bytes): the
//! on-chain codec rejects the uncompressed encoding outright, so
//! [`Secp256r1PublicKey::from_bytes`] only accepts compressed input.

use core::fmt;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use neo_error::CryptoError;
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{signature::hazmat::PrehashSigner, signature::Signer, signature::Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::{EncodedPoint, PublicKey, SecretKey};
use rand_core::OsRng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// SEC1-compressed public key length in bytes.
pub const PUBLIC_KEY_SIZE_COMPRESSED: usize = 33;

/// A public key on the secp256r1 (NIST P-256) curve.
#[derive(Clone)]
pub struct Secp256r1PublicKey {
	inner: PublicKey,
}

/// A private key on the secp256r1 curve: a 32-byte big-endian scalar.
#[derive(Clone)]
pub struct Secp256r1PrivateKey {
	inner: SecretKey,
}

/// An ECDSA signature: the concatenation of the `r` and `s` scalars, 32
/// bytes each, 64 bytes total.
#[derive(Clone)]
pub struct Secp256r1Signature {
	inner: Signature,
}

impl Secp256r1PublicKey {
	/// Parses a SEC1-encoded EC point. Accepts compressed (33-byte) or
	/// uncompressed (65-byte) input; callers enforcing the on-chain
	/// compressed-only rule should check `bytes.len() == 33` themselves
	/// (see [`Self::from_compressed`]).
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
		let encoded = EncodedPoint::from_bytes(bytes)
			.map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
		let maybe = PublicKey::from_encoded_point(&encoded);
		if bool::from(maybe.is_some()) {
			Ok(Self { inner: maybe.unwrap() })
		} else {
			Err(CryptoError::PointNotOnCurve)
		}
	}

	/// Parses a public key and enforces the on-chain compressed-only rule.
	pub fn from_compressed(bytes: &[u8]) -> Result<Self, CryptoError> {
		if bytes.len() != PUBLIC_KEY_SIZE_COMPRESSED {
			return Err(CryptoError::UncompressedPublicKeyRejected(bytes.len()));
		}
		Self::from_bytes(bytes)
	}

	/// Wraps an existing `p256::PublicKey`.
	pub fn from_public_key(inner: PublicKey) -> Self {
		Self { inner }
	}

	/// Verifies a pre-hashed 32-byte digest against this public key.
	pub fn verify_prehash(&self, digest: &[u8], signature: &Secp256r1Signature) -> Result<(), CryptoError> {
		let verifying_key = VerifyingKey::from(&self.inner);
		verifying_key
			.verify_prehash(digest, &signature.inner)
			.map_err(|_| CryptoError::VerificationFailed)
	}

	/// Verifies a signature over `message`, SHA-256 hashed internally.
	pub fn verify(&self, message: &[u8], signature: &Secp256r1Signature) -> Result<(), CryptoError> {
		let verifying_key = VerifyingKey::from(&self.inner);
		verifying_key.verify(message, &signature.inner).map_err(|_| CryptoError::VerificationFailed)
	}

	/// Returns the SEC1 encoding of this key's curve point.
	pub fn get_encoded(&self, compressed: bool) -> Vec<u8> {
		self.inner.to_encoded_point(compressed).as_bytes().to_vec()
	}

	/// Convenience: compressed encoding as lowercase hex, no `0x` prefix.
	pub fn get_encoded_compressed_hex(&self) -> String {
		hex::encode(self.get_encoded(true))
	}
}

impl Secp256r1PrivateKey {
	/// Generates a new key using the OS random number generator.
	pub fn random() -> Self {
		Self { inner: SecretKey::random(&mut OsRng) }
	}

	/// Constructs a private key from its 32-byte big-endian scalar.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
		let secret_key = SecretKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
		Ok(Self { inner: secret_key })
	}

	/// Returns the 32-byte big-endian scalar.
	pub fn to_raw_bytes(&self) -> [u8; 32] {
		let mut bytes = [0u8; 32];
		bytes.copy_from_slice(self.inner.to_bytes().as_slice());
		bytes
	}

	/// Derives the corresponding public key.
	pub fn to_public_key(&self) -> Secp256r1PublicKey {
		Secp256r1PublicKey { inner: self.inner.public_key() }
	}

	/// Deterministic ECDSA (RFC 6979) over `SHA256(message)`.
	pub fn sign(&self, message: &[u8]) -> Result<Secp256r1Signature, CryptoError> {
		let signing_key = SigningKey::from(&self.inner);
		let signature: Signature = signing_key.sign(message);
		Ok(Secp256r1Signature { inner: signature })
	}

	/// Deterministic ECDSA (RFC 6979) over an already-hashed 32-byte digest.
	///
	/// Used by the transaction signer, which hashes `network_magic || tx`
	/// itself before signing (see [`crate::base58`]'s sibling module for
	/// the address side of the same hash-then-encode shape).
	pub fn sign_prehash(&self, digest: &[u8]) -> Result<Secp256r1Signature, CryptoError> {
		let signing_key = SigningKey::from(&self.inner);
		let signature: Signature = signing_key
			.sign_prehash(digest)
			.map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
		Ok(Secp256r1Signature { inner: signature })
	}
}

impl Secp256r1Signature {
	/// Parses the 64-byte `r || s` concatenated form.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
		if bytes.len() != 64 {
			return Err(CryptoError::InvalidFormat(format!(
				"expected 64-byte signature, got {}",
				bytes.len()
			)));
		}
		let signature =
			Signature::from_slice(bytes).map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
		Ok(Self { inner: signature })
	}

	/// Returns the 64-byte `r || s` concatenated form.
	pub fn to_bytes(&self) -> [u8; 64] {
		let mut bytes = [0u8; 64];
		bytes.copy_from_slice(self.inner.to_bytes().as_slice());
		bytes
	}
}

impl fmt::Debug for Secp256r1PublicKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Secp256r1PublicKey({})", self.get_encoded_compressed_hex())
	}
}

impl fmt::Debug for Secp256r1PrivateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Secp256r1PrivateKey(..)")
	}
}

impl fmt::Debug for Secp256r1Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Secp256r1Signature({})", hex::encode(self.to_bytes()))
	}
}

impl PartialEq for Secp256r1PublicKey {
	fn eq(&self, other: &Self) -> bool {
		self.get_encoded(true) == other.get_encoded(true)
	}
}
impl Eq for Secp256r1PublicKey {}

impl PartialOrd for Secp256r1PublicKey {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Secp256r1PublicKey {
	/// Orders by SEC1-compressed bytes ascending — the ordering multi-sig
	/// verification scripts and signature assembly both rely on.
	fn cmp(&self, other: &Self) -> Ordering {
		self.get_encoded(true).cmp(&other.get_encoded(true))
	}
}

impl Hash for Secp256r1PublicKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.get_encoded(true).hash(state);
	}
}

impl PartialEq for Secp256r1PrivateKey {
	fn eq(&self, other: &Self) -> bool {
		self.to_raw_bytes() == other.to_raw_bytes()
	}
}
impl Eq for Secp256r1PrivateKey {}

impl PartialEq for Secp256r1Signature {
	fn eq(&self, other: &Self) -> bool {
		self.to_bytes() == other.to_bytes()
	}
}

impl Serialize for Secp256r1PublicKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_bytes(&self.get_encoded(true))
	}
}

impl<'de> Deserialize<'de> for Secp256r1PublicKey {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let bytes = <Vec<u8>>::deserialize(deserializer)?;
		Self::from_compressed(&bytes).map_err(D::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sign_and_verify_round_trip() {
		let private = Secp256r1PrivateKey::random();
		let public = private.to_public_key();
		let message = b"Hello, Neo!";
		let signature = private.sign(message).unwrap();
		assert!(public.verify(message, &signature).is_ok());
	}

	#[test]
	fn signing_is_deterministic() {
		let private = Secp256r1PrivateKey::random();
		let message = b"deterministic";
		let sig1 = private.sign(message).unwrap();
		let sig2 = private.sign(message).unwrap();
		assert_eq!(sig1, sig2);
	}

	#[test]
	fn public_key_ordering_matches_compressed_bytes() {
		let a = Secp256r1PrivateKey::random().to_public_key();
		let b = Secp256r1PrivateKey::random().to_public_key();
		let ordering = a.cmp(&b);
		assert_eq!(ordering, a.get_encoded(true).cmp(&b.get_encoded(true)));
	}

	#[test]
	fn compressed_only_rejects_uncompressed() {
		let private = Secp256r1PrivateKey::random();
		let public = private.to_public_key();
		let uncompressed = public.get_encoded(false);
		assert_eq!(uncompressed.len(), 65);
		assert!(Secp256r1PublicKey::from_compressed(&uncompressed).is_err());
	}
}

//! Base58 / Base58Check encoding, Neo N3 address derivation, and WIF.

use neo_error::CryptoError;

use crate::hash::{hash256, Hash160};
use crate::keys::Secp256r1PrivateKey;

/// N3 mainnet/testnet address version byte.
pub const ADDRESS_VERSION: u8 = 0x35;

/// Plain Base58 encoding (no checksum).
pub fn encode(data: &[u8]) -> String {
	bs58::encode(data).into_string()
}

/// Plain Base58 decoding (no checksum).
pub fn decode(s: &str) -> Result<Vec<u8>, CryptoError> {
	bs58::decode(s).into_vec().map_err(|e| CryptoError::InvalidBase58Check(e.to_string()))
}

/// `Base58Check(payload) = Base58(payload || hash256(payload)[..4])`.
pub fn encode_check(payload: &[u8]) -> String {
	let mut buf = payload.to_vec();
	buf.extend_from_slice(&hash256(payload)[..4]);
	encode(&buf)
}

/// Decodes and validates a Base58Check string, returning the payload
/// (without its 4-byte checksum).
pub fn decode_check(s: &str) -> Result<Vec<u8>, CryptoError> {
	let raw = decode(s)?;
	if raw.len() < 4 {
		return Err(CryptoError::InvalidBase58Check("payload shorter than checksum".into()));
	}
	let (payload, checksum) = raw.split_at(raw.len() - 4);
	let expected = &hash256(payload)[..4];
	if checksum != expected {
		return Err(CryptoError::InvalidBase58Check("checksum mismatch".into()));
	}
	Ok(payload.to_vec())
}

/// Derives the Base58Check N3 address of a script hash:
/// `Base58Check(version_byte || hash160_be)`.
pub fn script_hash_to_address(hash: &Hash160) -> String {
	let mut payload = vec![ADDRESS_VERSION];
	let mut be = hash.to_le_bytes();
	be.reverse();
	payload.extend_from_slice(&be);
	encode_check(&payload)
}

/// Recovers a script hash from an N3 address, validating the version byte
/// and checksum.
pub fn address_to_script_hash(address: &str) -> Result<Hash160, CryptoError> {
	let payload = decode_check(address)?;
	if payload.len() != 21 {
		return Err(CryptoError::InvalidAddress(format!(
			"expected 21-byte payload, got {}",
			payload.len()
		)));
	}
	if payload[0] != ADDRESS_VERSION {
		return Err(CryptoError::InvalidAddress(format!(
			"unexpected address version 0x{:02x}",
			payload[0]
		)));
	}
	let mut le = [0u8; 20];
	le.copy_from_slice(&payload[1..]);
	le.reverse();
	Ok(Hash160(le))
}

/// Encodes a private key as WIF: `Base58Check(0x80 || priv || 0x01)`.
pub fn private_key_to_wif(key: &Secp256r1PrivateKey) -> String {
	let mut payload = Vec::with_capacity(34);
	payload.push(0x80);
	payload.extend_from_slice(&key.to_raw_bytes());
	payload.push(0x01);
	encode_check(&payload)
}

/// Decodes a WIF string back into a private key.
pub fn private_key_from_wif(wif: &str) -> Result<Secp256r1PrivateKey, CryptoError> {
	let payload = decode_check(wif)?;
	if payload.len() != 34 || payload[0] != 0x80 || payload[33] != 0x01 {
		return Err(CryptoError::InvalidWif("malformed WIF payload".into()));
	}
	Secp256r1PrivateKey::from_bytes(&payload[1..33])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn address_round_trips() {
		let hash = Hash160::from_le_bytes([7u8; 20]);
		let address = script_hash_to_address(&hash);
		assert_eq!(address_to_script_hash(&address).unwrap(), hash);
	}

	#[test]
	fn address_rejects_bad_checksum() {
		let mut address = script_hash_to_address(&Hash160::ZERO).into_bytes();
		*address.last_mut().unwrap() ^= 1;
		let address = String::from_utf8(address).unwrap();
		assert!(address_to_script_hash(&address).is_err());
	}

	#[test]
	fn wif_round_trips() {
		let raw = hex::decode("c7134d6fd8e73d819e82755c64c93788d8db0961929e025a53363c4cc02a696")
			.unwrap();
		let key = Secp256r1PrivateKey::from_bytes(&raw).unwrap();
		let wif = private_key_to_wif(&key);
		assert_eq!(wif, "L3tgppXLgdaeqSGSFw1Go3skBiy8vQAM7YMXvTHsKQtE16PBncSU");
		let back = private_key_from_wif(&wif).unwrap();
		assert_eq!(back.to_raw_bytes(), key.to_raw_bytes());
	}
}

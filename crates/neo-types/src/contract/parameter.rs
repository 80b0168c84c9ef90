//! Contract invocation parameters: the typed values a [`crate::ScriptBuilder`]
//! (in `neo-builder`) pushes onto the NeoVM evaluation stack ahead of a
//! `System.Contract.Call`.

use std::collections::HashMap;

use neo_crypto::{Hash160, Hash256};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::bytes::Bytes;
use crate::contract::parameter_type::ContractParameterType;

/// The payload carried by a [`ContractParameter`], one variant per
/// [`ContractParameterType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterValue {
	Boolean(bool),
	Integer(BigInt),
	ByteArray(Bytes),
	String(String),
	H160(Hash160),
	H256(Hash256),
	PublicKey(Bytes),
	Signature(Bytes),
	Array(Vec<ContractParameter>),
	Map(ContractParameterMap),
}

/// A named, typed contract-call argument.
///
/// `name` is carried for manifest round-tripping (ABI parameter
/// declarations have names); it plays no role in script encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractParameter {
	pub name: Option<String>,
	pub value: Option<ParameterValue>,
}

impl ContractParameter {
	fn with_value(value: ParameterValue) -> Self {
		Self { name: None, value: Some(value) }
	}

	/// The `Any`/`null` parameter — pushes `PUSHNULL`.
	pub fn any() -> Self {
		Self { name: None, value: None }
	}

	pub fn boolean(b: bool) -> Self {
		Self::with_value(ParameterValue::Boolean(b))
	}

	pub fn integer(i: impl Into<BigInt>) -> Self {
		Self::with_value(ParameterValue::Integer(i.into()))
	}

	pub fn byte_array(bytes: impl Into<Bytes>) -> Self {
		Self::with_value(ParameterValue::ByteArray(bytes.into()))
	}

	pub fn string(s: impl Into<String>) -> Self {
		Self::with_value(ParameterValue::String(s.into()))
	}

	pub fn hash160(hash: Hash160) -> Self {
		Self::with_value(ParameterValue::H160(hash))
	}

	pub fn hash256(hash: Hash256) -> Self {
		Self::with_value(ParameterValue::H256(hash))
	}

	pub fn public_key(bytes: impl Into<Bytes>) -> Self {
		Self::with_value(ParameterValue::PublicKey(bytes.into()))
	}

	pub fn signature(bytes: impl Into<Bytes>) -> Self {
		Self::with_value(ParameterValue::Signature(bytes.into()))
	}

	pub fn array(items: impl Into<Vec<ContractParameter>>) -> Self {
		Self::with_value(ParameterValue::Array(items.into()))
	}

	pub fn map(map: ContractParameterMap) -> Self {
		Self::with_value(ParameterValue::Map(map))
	}

	/// Names this parameter (used when declaring a manifest ABI entry).
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// The parameter's type tag.
	pub fn get_type(&self) -> ContractParameterType {
		match &self.value {
			None => ContractParameterType::Any,
			Some(ParameterValue::Boolean(_)) => ContractParameterType::Boolean,
			Some(ParameterValue::Integer(_)) => ContractParameterType::Integer,
			Some(ParameterValue::ByteArray(_)) => ContractParameterType::ByteArray,
			Some(ParameterValue::String(_)) => ContractParameterType::String,
			Some(ParameterValue::H160(_)) => ContractParameterType::Hash160,
			Some(ParameterValue::H256(_)) => ContractParameterType::Hash256,
			Some(ParameterValue::PublicKey(_)) => ContractParameterType::PublicKey,
			Some(ParameterValue::Signature(_)) => ContractParameterType::Signature,
			Some(ParameterValue::Array(_)) => ContractParameterType::Array,
			Some(ParameterValue::Map(_)) => ContractParameterType::Map,
		}
	}
}

impl From<bool> for ContractParameter {
	fn from(b: bool) -> Self {
		Self::boolean(b)
	}
}
impl From<i64> for ContractParameter {
	fn from(i: i64) -> Self {
		Self::integer(i)
	}
}
impl From<i32> for ContractParameter {
	fn from(i: i32) -> Self {
		Self::integer(i as i64)
	}
}
impl From<u64> for ContractParameter {
	fn from(i: u64) -> Self {
		Self::integer(BigInt::from(i))
	}
}
impl From<&str> for ContractParameter {
	fn from(s: &str) -> Self {
		Self::string(s)
	}
}
impl From<String> for ContractParameter {
	fn from(s: String) -> Self {
		Self::string(s)
	}
}
impl From<Hash160> for ContractParameter {
	fn from(h: Hash160) -> Self {
		Self::hash160(h)
	}
}
impl From<Hash256> for ContractParameter {
	fn from(h: Hash256) -> Self {
		Self::hash256(h)
	}
}
impl From<Vec<u8>> for ContractParameter {
	fn from(bytes: Vec<u8>) -> Self {
		Self::byte_array(bytes)
	}
}
impl From<Vec<ContractParameter>> for ContractParameter {
	fn from(items: Vec<ContractParameter>) -> Self {
		Self::array(items)
	}
}

/// A `Map<ContractParameter, ContractParameter>` value, wrapped so it can
/// implement `Hash`/`Eq` via its insertion-order-independent contents and
/// nest inside [`ParameterValue::Map`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractParameterMap(pub HashMap<ContractParameter, ContractParameter>);

impl ContractParameterMap {
	pub fn new() -> Self {
		Self(HashMap::new())
	}

	pub fn to_map(&self) -> HashMap<ContractParameter, ContractParameter> {
		self.0.clone()
	}
}

impl PartialEq for ContractParameterMap {
	fn eq(&self, other: &Self) -> bool {
		self.0.len() == other.0.len() && self.0.iter().all(|(k, v)| other.0.get(k) == Some(v))
	}
}
impl Eq for ContractParameterMap {}

impl std::hash::Hash for ContractParameterMap {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		// Order-independent: XOR per-entry hashes so equal maps with
		// different iteration orders hash identically.
		let mut acc: u64 = 0;
		for (k, v) in &self.0 {
			let mut hasher = std::collections::hash_map::DefaultHasher::new();
			(k, v).hash(&mut hasher);
			acc ^= std::hash::Hasher::finish(&hasher);
		}
		state.write_u64(acc);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn any_parameter_has_no_value() {
		let p = ContractParameter::any();
		assert_eq!(p.get_type(), ContractParameterType::Any);
		assert!(p.value.is_none());
	}

	#[test]
	fn conversions_set_expected_types() {
		assert_eq!(ContractParameter::from(true).get_type(), ContractParameterType::Boolean);
		assert_eq!(ContractParameter::from(42i64).get_type(), ContractParameterType::Integer);
		assert_eq!(ContractParameter::from("hi").get_type(), ContractParameterType::String);
		assert_eq!(
			ContractParameter::from(Hash160::ZERO).get_type(),
			ContractParameterType::Hash160
		);
	}
}

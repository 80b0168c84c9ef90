//! The contract manifest: ABI, events, permissions, groups, trusts, and
//! supported standards (§4.6 "Manifest"). Field names/casing follow the
//! real Neo N3 manifest JSON shape so a node can consume this verbatim.

use neo_crypto::Secp256r1PublicKey;
use neo_types::{ContractParameterType, Hash160};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Serialize)]
pub struct AbiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ContractParameterType,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbiMethod {
    pub name: String,
    pub parameters: Vec<AbiParameter>,
    #[serde(rename = "returntype")]
    pub return_type: ContractParameterType,
    pub offset: usize,
    pub safe: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbiEvent {
    pub name: String,
    pub parameters: Vec<AbiParameter>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Abi {
    pub methods: Vec<AbiMethod>,
    pub events: Vec<AbiEvent>,
}

/// The contract (or group of contracts) a permission/trust entry names.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ContractRef {
    Wildcard(WildcardMarker),
    Hash(Hash160),
}

/// Serializes as the literal string `"*"`, matching the manifest's own
/// wildcard convention for "any contract"/"any method".
#[derive(Debug, Clone, Copy)]
pub struct WildcardMarker;

impl Serialize for WildcardMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("*")
    }
}

/// Which methods on [`Permission::contract`] this permission covers.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PermissionMethods {
    Wildcard(WildcardMarker),
    Names(Vec<String>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Permission {
    pub contract: ContractRef,
    pub methods: PermissionMethods,
}

/// A group signature proving the contract's author controls
/// `public_key`, over the contract's own hash.
#[derive(Debug, Clone)]
pub struct Group {
    pub public_key: Secp256r1PublicKey,
    pub signature: Vec<u8>,
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Group", 2)?;
        s.serialize_field("pubkey", &hex_upper(&self.public_key.get_encoded(true)))?;
        s.serialize_field("signature", &base64_of(&self.signature))?;
        s.end()
    }
}

fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

/// Base64, the manifest's own encoding for binary fields such as a
/// group's signature. Hand-rolled rather than pulling in a dedicated
/// crate for one field: the contract manifest's JSON is a diagnostic
/// artifact here, not a wire format this crate round-trips.
fn base64_of(bytes: &[u8]) -> String {
    const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut out = String::with_capacity((bytes.len() + 2) / 3 * 4);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);
        let n = (u32::from(b0) << 16) | (u32::from(b1) << 8) | u32::from(b2);
        out.push(ALPHABET[(n >> 18 & 0x3f) as usize] as char);
        out.push(ALPHABET[(n >> 12 & 0x3f) as usize] as char);
        out.push(if chunk.len() > 1 { ALPHABET[(n >> 6 & 0x3f) as usize] as char } else { '=' });
        out.push(if chunk.len() > 2 { ALPHABET[(n & 0x3f) as usize] as char } else { '=' });
    }
    out
}

/// Caller-supplied contract-level configuration: the parts of the
/// manifest that come from class-level annotations' "explicit
/// configuration objects" (§4.6), not from instruction lowering.
#[derive(Debug, Clone, Default)]
pub struct ManifestConfig {
    pub name: String,
    pub supported_standards: Vec<String>,
    pub permissions: Vec<Permission>,
    pub trusts: Vec<ContractRef>,
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub name: String,
    pub groups: Vec<Group>,
    #[serde(rename = "supportedstandards")]
    pub supported_standards: Vec<String>,
    pub abi: Abi,
    pub permissions: Vec<Permission>,
    pub trusts: Vec<ContractRef>,
    pub extra: serde_json::Value,
}

impl Manifest {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_contract_ref_serializes_as_a_star() {
        let perm = Permission { contract: ContractRef::Wildcard(WildcardMarker), methods: PermissionMethods::Wildcard(WildcardMarker) };
        let json = serde_json::to_string(&perm).unwrap();
        assert_eq!(json, r#"{"contract":"*","methods":"*"}"#);
    }

    #[test]
    fn base64_matches_known_vectors() {
        assert_eq!(base64_of(b"Man"), "TWFu");
        assert_eq!(base64_of(b"Ma"), "TWE=");
        assert_eq!(base64_of(b"M"), "TQ==");
    }

    #[test]
    fn manifest_round_trips_through_serde_json() {
        let manifest = Manifest {
            name: "TestContract".into(),
            groups: vec![],
            supported_standards: vec!["NEP-17".into()],
            abi: Abi {
                methods: vec![AbiMethod {
                    name: "transfer".into(),
                    parameters: vec![AbiParameter { name: "to".into(), ty: ContractParameterType::Hash160 }],
                    return_type: ContractParameterType::Boolean,
                    offset: 0,
                    safe: false,
                }],
                events: vec![],
            },
            permissions: vec![Permission { contract: ContractRef::Wildcard(WildcardMarker), methods: PermissionMethods::Wildcard(WildcardMarker) }],
            trusts: vec![],
            extra: serde_json::json!({}),
        };
        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"supportedstandards\":[\"NEP-17\"]"));
        assert!(json.contains("\"returntype\":\"Boolean\""));
        assert!(json.contains("\"type\":\"Hash160\""));
    }
}

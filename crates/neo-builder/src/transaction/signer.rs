//! Transaction signers: the accounts that authorize a transaction and the
//! scope each one grants its witness.

use neo_codec::{Decoder, Encoder, NeoSerializable};
use neo_common::{WitnessRule, WitnessScope};
use neo_crypto::{Hash160, Secp256r1PublicKey};
use neo_error::{BuilderError, CodecError};

use crate::utils::{ensure_max_items, MAX_SUBITEMS};

/// One signer attached to a transaction: an account plus the scope its
/// witness is valid for.
#[derive(Debug, Clone, PartialEq)]
pub struct Signer {
    pub account: Hash160,
    pub scopes: Vec<WitnessScope>,
    pub allowed_contracts: Vec<Hash160>,
    pub allowed_groups: Vec<Secp256r1PublicKey>,
    pub rules: Vec<WitnessRule>,
}

impl Signer {
    /// A signer whose witness is only valid when its account is the entry
    /// script of the transaction, the common case for a fee payer.
    pub fn called_by_entry(account: Hash160) -> Self {
        Self {
            account,
            scopes: vec![WitnessScope::CalledByEntry],
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// A signer whose witness is valid for every invocation in the
    /// transaction.
    pub fn global(account: Hash160) -> Self {
        Self {
            account,
            scopes: vec![WitnessScope::Global],
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        }
    }

    fn has_scope(&self, scope: WitnessScope) -> bool {
        self.scopes.contains(&scope)
    }

    /// Checks the per-signer invariants from the data model: `Global` may
    /// not combine with any other scope, and `allowed_contracts`/
    /// `allowed_groups`/`rules` are each bounded to 16 entries.
    pub fn validate(&self) -> Result<(), BuilderError> {
        if self.has_scope(WitnessScope::Global) && self.scopes.len() > 1 {
            return Err(BuilderError::GlobalScopeExclusive);
        }
        ensure_max_items(self.allowed_contracts.len(), MAX_SUBITEMS)?;
        ensure_max_items(self.allowed_groups.len(), MAX_SUBITEMS)?;
        ensure_max_items(self.rules.len(), MAX_SUBITEMS)?;
        Ok(())
    }
}

fn public_key_size(key: &Secp256r1PublicKey) -> usize {
    key.get_encoded(true).len()
}

fn var_size(count: usize, item_size: usize) -> usize {
    let prefix = match count {
        0..=0xFC => 1,
        0xFD..=0xFFFF => 3,
        _ => 5,
    };
    prefix + count * item_size
}

impl NeoSerializable for Signer {
    fn size(&self) -> usize {
        let mut size = 20 + 1;
        if self.has_scope(WitnessScope::CustomContracts) {
            size += var_size(self.allowed_contracts.len(), 20);
        }
        if self.has_scope(WitnessScope::CustomGroups) {
            let key_size = self.allowed_groups.first().map(public_key_size).unwrap_or(33);
            size += var_size(self.allowed_groups.len(), key_size);
        }
        if self.has_scope(WitnessScope::WitnessRules) {
            size += 1;
            size += self.rules.iter().map(NeoSerializable::size).sum::<usize>();
        }
        size
    }

    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_bytes(&self.account.to_le_bytes());
        encoder.write_u8(WitnessScope::combine(&self.scopes));
        if self.has_scope(WitnessScope::CustomContracts) {
            encoder.write_var_int(self.allowed_contracts.len() as u64);
            for contract in &self.allowed_contracts {
                encoder.write_bytes(&contract.to_le_bytes());
            }
        }
        if self.has_scope(WitnessScope::CustomGroups) {
            encoder.write_var_int(self.allowed_groups.len() as u64);
            for group in &self.allowed_groups {
                encoder.write_bytes(&group.get_encoded(true));
            }
        }
        if self.has_scope(WitnessScope::WitnessRules) {
            encoder.write_var_int(self.rules.len() as u64);
            for rule in &self.rules {
                rule.encode(encoder);
            }
        }
    }

    fn decode(decoder: &mut Decoder) -> Result<Self, CodecError> {
        let account = Hash160::from_le_bytes(decoder.read_bytes(20)?.try_into().unwrap());
        let scopes = WitnessScope::extract(decoder.read_u8()?);

        let mut allowed_contracts = Vec::new();
        if scopes.contains(&WitnessScope::CustomContracts) {
            let count = decoder.read_var_int()?;
            for _ in 0..count {
                allowed_contracts.push(Hash160::from_le_bytes(decoder.read_bytes(20)?.try_into().unwrap()));
            }
        }

        let mut allowed_groups = Vec::new();
        if scopes.contains(&WitnessScope::CustomGroups) {
            let count = decoder.read_var_int()?;
            for _ in 0..count {
                let bytes = decoder.read_bytes(33)?;
                let key = Secp256r1PublicKey::from_compressed(&bytes)
                    .map_err(|e| CodecError::InvalidFormat(e.to_string()))?;
                allowed_groups.push(key);
            }
        }

        let mut rules = Vec::new();
        if scopes.contains(&WitnessScope::WitnessRules) {
            let count = decoder.read_var_int()?;
            for _ in 0..count {
                rules.push(WitnessRule::decode(decoder)?);
            }
        }

        Ok(Self { account, scopes, allowed_contracts, allowed_groups, rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn called_by_entry_round_trips() {
        let signer = Signer::called_by_entry(Hash160::from_le_bytes([7u8; 20]));
        let bytes = signer.to_bytes();
        assert_eq!(bytes.len(), signer.size());

        let mut decoder = Decoder::new(&bytes);
        let decoded = Signer::decode(&mut decoder).unwrap();
        assert_eq!(decoded, signer);
    }

    #[test]
    fn custom_contracts_scope_carries_the_contract_list() {
        let mut signer = Signer::called_by_entry(Hash160::from_le_bytes([1u8; 20]));
        signer.scopes = vec![WitnessScope::CustomContracts];
        signer.allowed_contracts = vec![Hash160::from_le_bytes([2u8; 20]), Hash160::from_le_bytes([3u8; 20])];

        let bytes = signer.to_bytes();
        let mut decoder = Decoder::new(&bytes);
        let decoded = Signer::decode(&mut decoder).unwrap();
        assert_eq!(decoded.allowed_contracts, signer.allowed_contracts);
    }

    #[test]
    fn global_scope_has_no_extra_fields() {
        let signer = Signer::global(Hash160::ZERO);
        assert_eq!(signer.size(), 21);
    }

    #[test]
    fn global_combined_with_another_scope_is_rejected() {
        let mut signer = Signer::global(Hash160::ZERO);
        signer.scopes.push(WitnessScope::CalledByEntry);
        assert!(matches!(signer.validate(), Err(BuilderError::GlobalScopeExclusive)));
    }

    #[test]
    fn too_many_allowed_contracts_is_rejected() {
        let mut signer = Signer::called_by_entry(Hash160::ZERO);
        signer.scopes = vec![WitnessScope::CustomContracts];
        signer.allowed_contracts = (0..17u8).map(|i| Hash160::from_le_bytes([i; 20])).collect();
        assert!(matches!(signer.validate(), Err(BuilderError::TooManySubItems { max: 16, got: 17 })));
    }
}

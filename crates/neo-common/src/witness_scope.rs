//! Witness scopes: the bitmask a [`crate::Witness`]'s signer attaches to
//! declare which contracts may rely on it during execution.

use neo_error::CodecError;
use serde::{Deserialize, Serialize};

/// A single witness scope flag. The wire form is a bitmask byte, so
/// variants are bit flags rather than sequential discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WitnessScope {
	/// No contract may use this witness (fee-only signer).
	None = 0x00,
	/// Valid only when the signature's contract is the entry script.
	CalledByEntry = 0x01,
	/// Valid for the explicit list of contracts in `Signer::allowed_contracts`.
	CustomContracts = 0x10,
	/// Valid for contracts whose group key is in `Signer::allowed_groups`.
	CustomGroups = 0x20,
	/// Valid when `Signer::rules` evaluates to `Allow` for the calling contract.
	WitnessRules = 0x40,
	/// Valid for every contract invocation in the transaction.
	Global = 0x80,
}

impl WitnessScope {
	/// This flag's bit value.
	pub fn byte(self) -> u8 {
		self as u8
	}

	/// Parses a single-flag byte (not a combined mask).
	pub fn from_byte(value: u8) -> Result<Self, CodecError> {
		match value {
			0x00 => Ok(Self::None),
			0x01 => Ok(Self::CalledByEntry),
			0x10 => Ok(Self::CustomContracts),
			0x20 => Ok(Self::CustomGroups),
			0x40 => Ok(Self::WitnessRules),
			0x80 => Ok(Self::Global),
			other => Err(CodecError::UnknownDiscriminant {
				field: "WitnessScope".to_string(),
				value: other as u64,
			}),
		}
	}

	/// ORs a set of scopes into a single wire-form bitmask.
	pub fn combine(scopes: &[WitnessScope]) -> u8 {
		scopes.iter().fold(0u8, |acc, scope| acc | scope.byte())
	}

	/// Splits a wire-form bitmask back into its constituent flags.
	pub fn extract(mask: u8) -> Vec<WitnessScope> {
		[
			Self::None,
			Self::CalledByEntry,
			Self::CustomContracts,
			Self::CustomGroups,
			Self::WitnessRules,
			Self::Global,
		]
		.into_iter()
		.filter(|scope| {
			if *scope == Self::None {
				mask == 0
			} else {
				mask & scope.byte() != 0
			}
		})
		.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn combine_and_extract_round_trip() {
		let scopes = vec![WitnessScope::CalledByEntry, WitnessScope::CustomGroups];
		let mask = WitnessScope::combine(&scopes);
		assert_eq!(mask, 0x21);
		let extracted = WitnessScope::extract(mask);
		assert_eq!(extracted, scopes);
	}

	#[test]
	fn none_extracts_alone() {
		assert_eq!(WitnessScope::extract(0x00), vec![WitnessScope::None]);
	}

	#[test]
	fn witness_rules_flag_is_present() {
		assert_eq!(WitnessScope::WitnessRules.byte(), 0x40);
	}
}

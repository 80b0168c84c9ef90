//! Witness rules: an action paired with the condition that triggers it,
//! evaluated when a signer's scope includes [`crate::WitnessScope::WitnessRules`].

use neo_codec::{Decoder, Encoder, NeoSerializable};
use neo_error::CodecError;
use serde::{Deserialize, Serialize};

use crate::witness_condition::WitnessCondition;

/// Whether a matching [`WitnessCondition`] permits or forbids the witness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WitnessAction {
	Deny = 0,
	Allow = 1,
}

impl WitnessAction {
	pub fn byte(self) -> u8 {
		self as u8
	}

	pub fn from_byte(value: u8) -> Result<Self, CodecError> {
		match value {
			0 => Ok(Self::Deny),
			1 => Ok(Self::Allow),
			other => Err(CodecError::UnknownDiscriminant { field: "WitnessAction".into(), value: other as u64 }),
		}
	}
}

/// A single rule in a signer's `rules` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WitnessRule {
	pub action: WitnessAction,
	pub condition: WitnessCondition,
}

impl WitnessRule {
	pub fn new(action: WitnessAction, condition: WitnessCondition) -> Self {
		Self { action, condition }
	}
}

impl NeoSerializable for WitnessRule {
	fn size(&self) -> usize {
		1 + self.condition.size()
	}

	fn encode(&self, encoder: &mut Encoder) {
		encoder.write_u8(self.action.byte());
		self.condition.encode(encoder);
	}

	fn decode(decoder: &mut Decoder) -> Result<Self, CodecError> {
		let action = WitnessAction::from_byte(decoder.read_u8()?)?;
		let condition = WitnessCondition::decode(decoder)?;
		Ok(Self { action, condition })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_through_codec() {
		let rule = WitnessRule::new(WitnessAction::Allow, WitnessCondition::CalledByEntry);
		let mut encoder = Encoder::new();
		rule.encode(&mut encoder);
		let bytes = encoder.to_bytes();
		let mut decoder = Decoder::new(&bytes);
		assert_eq!(WitnessRule::decode(&mut decoder).unwrap(), rule);
	}
}

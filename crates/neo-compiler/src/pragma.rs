//! The pragma map: compiler-owned knowledge of what each annotated
//! symbol means, keyed by the fully qualified symbol the annotation sat
//! on (§9 design notes — "Annotations" become pragma-map entries with an
//! enumerated effect schema).

use std::collections::HashMap;

use neo_codec::OpCode;
use neo_types::Hash160;

/// A raw instruction `@Instruction` inlines: an opcode plus its literal
/// operand bytes, emitted verbatim in place of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOpcode {
    pub op_code: OpCode,
    pub operand: Vec<u8>,
}

/// The effect of one pragma-mapped symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PragmaEffect {
    /// `@Syscall("System.Runtime.CheckWitness")`: emit `SYSCALL` with
    /// this service's hash in place of a call.
    Syscall(String),
    /// `@Instruction(...)`: emit these opcodes verbatim.
    Opcodes(Vec<RawOpcode>),
    /// `@ContractHash`: calls to this class's methods compile to a
    /// dynamic `System.Contract.Call` against the given script hash.
    ContractCall(Hash160),
    /// `@OnVerification`/explicit ABI name override: export this symbol
    /// under `name` regardless of its declared visibility.
    Export { name: String },
    /// A storage-backed static field with an explicit slot override
    /// (rather than the compiler's own sequential assignment).
    StorageSlot(u8),
}

/// Maps fully qualified symbols (`"Contract.transfer"`,
/// `"Contract.totalSupply"`, a static field's qualified name, ...) to
/// their pragma effect.
#[derive(Debug, Clone, Default)]
pub struct PragmaMap {
    entries: HashMap<String, PragmaEffect>,
}

impl PragmaMap {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    pub fn insert(&mut self, symbol: impl Into<String>, effect: PragmaEffect) -> &mut Self {
        self.entries.insert(symbol.into(), effect);
        self
    }

    pub fn get(&self, symbol: &str) -> Option<&PragmaEffect> {
        self.entries.get(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_by_symbol() {
        let mut pragmas = PragmaMap::new();
        pragmas.insert("Contract.checkWitness", PragmaEffect::Syscall("System.Runtime.CheckWitness".into()));

        assert_eq!(
            pragmas.get("Contract.checkWitness"),
            Some(&PragmaEffect::Syscall("System.Runtime.CheckWitness".into()))
        );
        assert_eq!(pragmas.get("Contract.other"), None);
    }
}

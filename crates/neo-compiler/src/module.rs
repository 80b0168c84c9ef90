//! The NeoVM-side output of lowering: an arena of methods addressed by
//! stable IDs, symbolic instructions that still carry unresolved
//! call/jump targets, and the two-pass layout that turns them into a
//! single concatenated script (§4.6 "Two-pass layout and fixups", §9
//! "cyclic references in the compiler IR").

use std::collections::HashMap;

use neo_codec::OpCode;
use neo_error::CompilerError;

/// A stable handle into a [`NeoModule`]'s method arena. Stays valid
/// across the whole lowering + layout pipeline, unlike a byte address,
/// which only exists once layout has run.
pub type MethodId = usize;

/// The jump family a fused comparison/branch lowers to. NeoVM has named
/// families (`JMPEQ`, `JMPGT`, ...) but this compiler only ever needs
/// "always", "if the top of stack is truthy", and "if it's falsy" —
/// comparisons push their own boolean first (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpCond {
    Always,
    IfTrue,
    IfNot,
}

impl JumpCond {
    fn forms(self) -> (OpCode, OpCode) {
        match self {
            JumpCond::Always => (OpCode::Jmp, OpCode::JmpL),
            JumpCond::IfTrue => (OpCode::JmpIf, OpCode::JmpIfL),
            JumpCond::IfNot => (OpCode::JmpIfNot, OpCode::JmpIfNotL),
        }
    }
}

/// One symbolic instruction: fully lowered except for a call or jump
/// target, which still names a [`MethodId`] or an intra-method label.
#[derive(Debug, Clone)]
enum SymInstr {
    Fixed { op: OpCode, operand: Vec<u8> },
    /// Always lowers to `CALL_L` (§4.6's lowering table never calls for
    /// the short `CALL` form for user-code calls).
    Call { target: MethodId },
    Jump { cond: JumpCond, target: usize, is_short: bool },
    /// `TRY catchDelta, finallyDelta` at the first instruction of a
    /// guarded region (§4.6 "Try / catch lowering"). This compiler never
    /// models `finally` regions, so the finally branch is always the
    /// `0` sentinel NeoVM reserves for "no finally handler".
    Try { catch_target: usize, is_short: bool },
    /// `ENDTRY exitDelta` at the end of a guarded region or its handler.
    EndTry { target: usize, is_short: bool },
}

impl SymInstr {
    fn size(&self) -> usize {
        match self {
            SymInstr::Fixed { operand, .. } => 1 + operand.len(),
            SymInstr::Call { .. } => 1 + 4,
            SymInstr::Jump { is_short, .. } => if *is_short { 2 } else { 1 + 4 },
            SymInstr::Try { is_short, .. } => if *is_short { 1 + 2 } else { 1 + 8 },
            SymInstr::EndTry { is_short, .. } => if *is_short { 1 + 1 } else { 1 + 4 },
        }
    }

    /// Does control flow never fall through past this instruction?
    fn is_terminal(&self) -> bool {
        matches!(
            self,
            SymInstr::Fixed { op: OpCode::Ret | OpCode::Throw | OpCode::Abort, .. }
                | SymInstr::Jump { cond: JumpCond::Always, .. }
                | SymInstr::EndTry { .. }
        )
    }
}

/// One method under construction: its slot counts, its symbolic
/// instruction stream, and the label table lowering records targets
/// against.
#[derive(Debug)]
pub struct NeoMethod {
    pub id: MethodId,
    pub name: String,
    pub is_static_initializer: bool,
    instructions: Vec<SymInstr>,
    /// Source body index → symbolic instruction index, plus one
    /// sentinel entry at `body.len()` for "falls off the end" targets.
    labels: HashMap<usize, usize>,
    address: usize,
    size: usize,
}

impl NeoMethod {
    fn new(id: MethodId, name: impl Into<String>, is_static_initializer: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_static_initializer,
            instructions: Vec::new(),
            labels: HashMap::new(),
            address: 0,
            size: 0,
        }
    }

    /// Records that source position `body_index` resolves to "whatever
    /// instruction is emitted next". Call before lowering each source
    /// instruction, plus once more with `body.len()` after the last one.
    pub fn mark_label(&mut self, body_index: usize) {
        self.labels.entry(body_index).or_insert(self.instructions.len());
    }

    pub fn emit(&mut self, op: OpCode, operand: Vec<u8>) {
        self.instructions.push(SymInstr::Fixed { op, operand });
    }

    pub fn emit_call(&mut self, target: MethodId) {
        self.instructions.push(SymInstr::Call { target });
    }

    /// Splits an already-encoded `[opcode, operand...]` buffer (as
    /// produced by [`neo_codec::Encoder::push_int`]/`push_data`) back
    /// into a [`SymInstr::Fixed`], so lowering can reuse the script
    /// builder's own constant-folding instead of duplicating it.
    pub fn emit_encoded(&mut self, bytes: Vec<u8>) {
        let op = OpCode::try_from(bytes[0]).expect("encoder only ever emits defined opcodes");
        self.instructions.push(SymInstr::Fixed { op, operand: bytes[1..].to_vec() });
    }

    /// Emits a jump to source position `target`, reserving the long
    /// (4-byte) form; layout peepholes it down to the short form once
    /// addresses are known to permit it.
    pub fn emit_jump(&mut self, cond: JumpCond, target: usize) {
        self.instructions.push(SymInstr::Jump { cond, target, is_short: false });
    }

    /// Emits `TRY` at the start of a guarded region, reserving the long
    /// (8-byte) form; layout peepholes it down once addresses are known.
    pub fn emit_try(&mut self, catch_target: usize) {
        self.instructions.push(SymInstr::Try { catch_target, is_short: false });
    }

    /// Emits `ENDTRY` at the end of a guarded region or its handler.
    pub fn emit_end_try(&mut self, target: usize) {
        self.instructions.push(SymInstr::EndTry { target, is_short: false });
    }

    /// True while the instruction most recently emitted doesn't
    /// unconditionally leave the method (so a trailing `RET` is owed).
    pub fn falls_through(&self) -> bool {
        match self.instructions.last() {
            None => true,
            Some(instr) => !instr.is_terminal(),
        }
    }

    pub fn byte_address(&self) -> usize {
        self.address
    }
}

/// The arena of methods being lowered, plus the symbol table lowering
/// consults to turn `INVOKESTATIC`/`NEW` targets into [`MethodId`]s.
#[derive(Debug, Default)]
pub struct NeoModule {
    methods: Vec<NeoMethod>,
    symbols: HashMap<String, MethodId>,
}

impl NeoModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a method slot under `symbol` (its fully qualified
    /// name), returning the ID lowering can immediately use for
    /// forward-referencing calls even before the method body is built.
    pub fn declare_method(&mut self, symbol: impl Into<String>, is_static_initializer: bool) -> MethodId {
        let symbol = symbol.into();
        let id = self.methods.len();
        self.methods.push(NeoMethod::new(id, symbol.clone(), is_static_initializer));
        self.symbols.insert(symbol, id);
        id
    }

    pub fn resolve_symbol(&self, symbol: &str) -> Option<MethodId> {
        self.symbols.get(symbol).copied()
    }

    pub fn method_mut(&mut self, id: MethodId) -> &mut NeoMethod {
        &mut self.methods[id]
    }

    pub fn method(&self, id: MethodId) -> &NeoMethod {
        &self.methods[id]
    }

    pub fn method_address(&self, id: MethodId) -> usize {
        self.methods[id].byte_address()
    }

    /// Removes method `id` from the arena, leaving an empty placeholder
    /// in its slot, so a caller can lower into it without holding two
    /// conflicting borrows of `self` (one through [`Self::resolve_symbol`]
    /// for callee lookups, one mutable for the method under construction).
    /// Must be paired with [`Self::replace_method`] before [`Self::finalize`].
    pub fn take_method(&mut self, id: MethodId) -> NeoMethod {
        std::mem::replace(&mut self.methods[id], NeoMethod::new(id, String::new(), false))
    }

    /// Restores a method taken out with [`Self::take_method`].
    pub fn replace_method(&mut self, id: MethodId, method: NeoMethod) {
        self.methods[id] = method;
    }

    /// Appends a closing `RET` to every method control flow can still
    /// fall off the end of (§4.6 step 3), then runs the fixed-point
    /// address assignment and jump-form peephole (step 1-2), and
    /// concatenates every method's bytes in declaration order (step 4).
    ///
    /// Takes `&mut self` rather than consuming the module so callers can
    /// still read back [`Self::method_address`] afterward, e.g. to stamp
    /// ABI offsets into a manifest.
    pub fn finalize(&mut self) -> Result<Vec<u8>, CompilerError> {
        for method in &mut self.methods {
            if method.falls_through() {
                method.instructions.push(SymInstr::Fixed { op: OpCode::Ret, operand: Vec::new() });
            }
        }

        // Pass 2: addresses start pessimistic (every jump long) and only
        // ever shrink, so this loop is guaranteed to terminate — each
        // round either leaves every jump form unchanged (done) or
        // shrinks at least one (bounded by the total jump count).
        loop {
            self.assign_addresses();
            let mut changed = false;
            for m in 0..self.methods.len() {
                for i in 0..self.methods[m].instructions.len() {
                    let (instr_addr, target_addr, is_short) = match &self.methods[m].instructions[i] {
                        SymInstr::Jump { target, is_short, .. } => {
                            let instr_addr = self.instruction_address(m, i);
                            let target_addr = self.label_address(m, *target)?;
                            (instr_addr, target_addr, *is_short)
                        }
                        SymInstr::Try { catch_target, is_short, .. } => {
                            let instr_addr = self.instruction_address(m, i);
                            let target_addr = self.label_address(m, *catch_target)?;
                            (instr_addr, target_addr, *is_short)
                        }
                        SymInstr::EndTry { target, is_short, .. } => {
                            let instr_addr = self.instruction_address(m, i);
                            let target_addr = self.label_address(m, *target)?;
                            (instr_addr, target_addr, *is_short)
                        }
                        _ => continue,
                    };
                    if is_short {
                        continue;
                    }
                    let displacement = target_addr as i64 - instr_addr as i64;
                    if (i8::MIN as i64..=i8::MAX as i64).contains(&displacement) {
                        match &mut self.methods[m].instructions[i] {
                            SymInstr::Jump { is_short, .. }
                            | SymInstr::Try { is_short, .. }
                            | SymInstr::EndTry { is_short, .. } => {
                                *is_short = true;
                                changed = true;
                            }
                            _ => {}
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
        self.assign_addresses();

        let mut script = Vec::new();
        for m in 0..self.methods.len() {
            for i in 0..self.methods[m].instructions.len() {
                self.write_instruction(m, i, &mut script)?;
            }
        }
        Ok(script)
    }

    fn instruction_address(&self, method: usize, index: usize) -> usize {
        let base = self.methods[method].address;
        base + self.methods[method].instructions[..index].iter().map(SymInstr::size).sum::<usize>()
    }

    fn label_address(&self, method: usize, body_index: usize) -> Result<usize, CompilerError> {
        let sym_index = *self.methods[method].labels.get(&body_index).ok_or_else(|| {
            CompilerError::UnresolvedLabel(body_index.to_string(), self.methods[method].name.clone())
        })?;
        if sym_index == self.methods[method].instructions.len() {
            Ok(self.methods[method].address + self.methods[method].size)
        } else {
            Ok(self.instruction_address(method, sym_index))
        }
    }

    fn assign_addresses(&mut self) {
        let mut address = 0;
        for method in &mut self.methods {
            method.address = address;
            let size: usize = method.instructions.iter().map(SymInstr::size).sum();
            method.size = size;
            address += size;
        }
    }

    fn write_instruction(&self, method: usize, index: usize, out: &mut Vec<u8>) -> Result<(), CompilerError> {
        match &self.methods[method].instructions[index] {
            SymInstr::Fixed { op, operand } => {
                out.push(op.opcode());
                out.extend_from_slice(operand);
            }
            SymInstr::Call { target } => {
                let call_addr = self.instruction_address(method, index);
                let target_addr = self.methods[*target].address;
                let offset = target_addr as i64 - call_addr as i64;
                out.push(OpCode::CallL.opcode());
                out.extend_from_slice(&(offset as i32).to_le_bytes());
            }
            SymInstr::Jump { cond, target, is_short } => {
                let (short_op, long_op) = cond.forms();
                let instr_addr = self.instruction_address(method, index);
                let target_addr = self.label_address(method, *target)?;
                let offset = target_addr as i64 - instr_addr as i64;
                if *is_short {
                    out.push(short_op.opcode());
                    out.push(offset as i8 as u8);
                } else {
                    out.push(long_op.opcode());
                    out.extend_from_slice(&(offset as i32).to_le_bytes());
                }
            }
            SymInstr::Try { catch_target, is_short } => {
                let instr_addr = self.instruction_address(method, index);
                let catch_addr = self.label_address(method, *catch_target)?;
                let catch_offset = catch_addr as i64 - instr_addr as i64;
                if *is_short {
                    out.push(OpCode::Try.opcode());
                    out.push(catch_offset as i8 as u8);
                    out.push(0); // no finally region
                } else {
                    out.push(OpCode::TryL.opcode());
                    out.extend_from_slice(&(catch_offset as i32).to_le_bytes());
                    out.extend_from_slice(&0i32.to_le_bytes());
                }
            }
            SymInstr::EndTry { target, is_short } => {
                let instr_addr = self.instruction_address(method, index);
                let target_addr = self.label_address(method, *target)?;
                let offset = target_addr as i64 - instr_addr as i64;
                if *is_short {
                    out.push(OpCode::EndTry.opcode());
                    out.push(offset as i8 as u8);
                } else {
                    out.push(OpCode::EndTryL.opcode());
                    out.extend_from_slice(&(offset as i32).to_le_bytes());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_method_that_falls_off_the_end_gets_a_ret() {
        let mut module = NeoModule::new();
        let id = module.declare_method("Contract.noop", false);
        module.method_mut(id).mark_label(0);
        let script = module.finalize().unwrap();
        assert_eq!(script, vec![OpCode::Ret.opcode()]);
    }

    #[test]
    fn an_explicit_ret_is_not_doubled() {
        let mut module = NeoModule::new();
        let id = module.declare_method("Contract.noop", false);
        let m = module.method_mut(id);
        m.mark_label(0);
        m.emit(OpCode::Ret, vec![]);
        m.mark_label(1);
        let script = module.finalize().unwrap();
        assert_eq!(script, vec![OpCode::Ret.opcode()]);
    }

    #[test]
    fn a_short_backward_jump_uses_the_two_byte_form() {
        let mut module = NeoModule::new();
        let id = module.declare_method("Contract.loop", false);
        let m = module.method_mut(id);
        m.mark_label(0);
        m.emit(OpCode::Nop, vec![]);
        m.mark_label(1);
        m.emit_jump(JumpCond::Always, 0);
        m.mark_label(2);
        let script = module.finalize().unwrap();
        // NOP, then JMP back to address 0 with displacement -1.
        assert_eq!(script, vec![OpCode::Nop.opcode(), OpCode::Jmp.opcode(), 0xffu8]);
    }

    #[test]
    fn a_short_try_endtry_pair_brackets_the_guarded_region() {
        let mut module = NeoModule::new();
        let id = module.declare_method("Contract.guarded", false);
        let m = module.method_mut(id);
        m.mark_label(0); // region start
        m.emit_try(2); // catch target: handler at label 2
        m.emit(OpCode::Nop, vec![]); // guarded body
        m.mark_label(1); // region end / endtry
        m.emit_end_try(3);
        m.mark_label(2); // handler
        m.emit(OpCode::Drop, vec![]); // discard caught value
        m.mark_label(3); // resume
        let script = module.finalize().unwrap();
        // Layout: TRY(3) NOP(1) ENDTRY(2) DROP(1) RET(1), addresses 0,3,4,6,7.
        assert_eq!(script[0], OpCode::Try.opcode());
        assert_eq!(script[1] as i8, 6); // handler (DROP) sits at address 6
        assert_eq!(script[2], 0); // no finally region
        assert_eq!(script[3], OpCode::Nop.opcode());
        assert_eq!(script[4], OpCode::EndTry.opcode());
        assert_eq!(script[5] as i8, 3); // resume (RET) sits at address 7, endtry at 4
        assert_eq!(script[6], OpCode::Drop.opcode());
        assert_eq!(script[7], OpCode::Ret.opcode());
    }

    #[test]
    fn a_call_resolves_to_the_callees_address() {
        let mut module = NeoModule::new();
        let caller = module.declare_method("Contract.a", false);
        let callee = module.declare_method("Contract.b", false);
        module.method_mut(caller).mark_label(0);
        module.method_mut(caller).emit_call(callee);
        module.method_mut(caller).mark_label(1);
        module.method_mut(callee).mark_label(0);
        let script = module.finalize().unwrap();
        // caller: CALL_L <offset> RET (5 + 1 = 6 bytes), callee starts at 6, call at 0.
        assert_eq!(script[0], OpCode::CallL.opcode());
        let offset = i32::from_le_bytes(script[1..5].try_into().unwrap());
        assert_eq!(offset, 6);
        assert_eq!(script[5], OpCode::Ret.opcode());
        assert_eq!(script[6], OpCode::Ret.opcode());
    }
}

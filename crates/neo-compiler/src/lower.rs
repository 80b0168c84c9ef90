//! The opcode-category dispatch table (§4.6 "Instruction lowering"):
//! turns one [`Instr`] at a time into the [`NeoMethod`] it's being
//! assembled into, consulting the pragma map for `INVOKESTATIC` targets
//! and the class table for field counts and instanceof targets.

use std::collections::HashMap;

use neo_codec::{Encoder, OpCode};
use neo_error::CompilerError;
use neo_types::Hash160;
use num_bigint::BigInt;

use crate::ir::{ArithOp, BitwiseOp, ClassIr, CompareOp, Instr, JvmType, MethodIr, ShiftOp, TryRegion};
use crate::module::{JumpCond, NeoMethod, NeoModule};
use crate::pragma::{PragmaEffect, PragmaMap};

/// `System.Contract.Call`'s interop hash, computed the same way
/// [`crate::lower::syscall_hash`] computes any other service's.
const SYSTEM_CONTRACT_CALL: &str = "System.Contract.Call";

/// First 4 bytes of `SHA256(name)`: how NeoVM resolves a `SYSCALL`'s
/// named service to the hash actually encoded on the wire.
fn syscall_hash(name: &str) -> [u8; 4] {
    let digest = neo_crypto_sha256(name.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

// Thin indirection so this module only names the one function it needs
// from neo-crypto, keeping the import list honest about what's used.
fn neo_crypto_sha256(bytes: &[u8]) -> [u8; 32] {
    neo_crypto::sha256(bytes)
}

/// Maps a devpack type name (as it appears on an `instanceof`/array
/// element type) to the NeoVM `StackItemType` byte `ISTYPE`/`NEWARRAY_T`
/// take as their operand.
fn stack_item_type_byte(ty: &JvmType) -> Option<u8> {
    match ty {
        JvmType::Boolean => Some(0x20),
        JvmType::Integer => Some(0x21),
        JvmType::ByteArray | JvmType::Str | JvmType::Hash160 | JvmType::Hash256 | JvmType::PublicKey | JvmType::Signature => Some(0x28),
        JvmType::Array(_) => Some(0x40),
        JvmType::Map => Some(0x48),
        JvmType::Any | JvmType::Void => None,
    }
}

fn named_stack_item_type_byte(name: &str) -> Option<u8> {
    match name {
        "Boolean" => Some(0x20),
        "Integer" => Some(0x21),
        "ByteString" | "String" | "Hash160" | "Hash256" | "PublicKey" | "Signature" | "ByteArray" => Some(0x28),
        "Buffer" => Some(0x30),
        "Array" | "List" => Some(0x40),
        "Map" => Some(0x48),
        _ => None,
    }
}

fn push_int(method: &mut NeoMethod, value: impl Into<BigInt>) {
    let mut encoder = Encoder::new();
    encoder.push_int(&value.into());
    method.emit_encoded(encoder.to_bytes());
}

fn push_data(method: &mut NeoMethod, data: &[u8]) {
    let mut encoder = Encoder::new();
    encoder.push_data(data);
    method.emit_encoded(encoder.to_bytes());
}

fn push_bool(method: &mut NeoMethod, value: bool) {
    let mut encoder = Encoder::new();
    encoder.push_bool(value);
    method.emit_encoded(encoder.to_bytes());
}

fn compact_slot(slot: u16, compacts: [OpCode; 7], wide: OpCode) -> (OpCode, Vec<u8>) {
    match usize::from(slot) {
        i @ 0..=6 => (compacts[i], Vec::new()),
        _ => (wide, vec![slot as u8]),
    }
}

fn ld_arg(slot: u16) -> (OpCode, Vec<u8>) {
    use OpCode::*;
    compact_slot(slot, [LdArg0, LdArg1, LdArg2, LdArg3, LdArg4, LdArg5, LdArg6], LdArg)
}

fn st_arg(slot: u16) -> (OpCode, Vec<u8>) {
    use OpCode::*;
    compact_slot(slot, [StArg0, StArg1, StArg2, StArg3, StArg4, StArg5, StArg6], StArg)
}

fn ld_loc(slot: u16) -> (OpCode, Vec<u8>) {
    use OpCode::*;
    compact_slot(slot, [LdLoc0, LdLoc1, LdLoc2, LdLoc3, LdLoc4, LdLoc5, LdLoc6], LdLoc)
}

fn st_loc(slot: u16) -> (OpCode, Vec<u8>) {
    use OpCode::*;
    compact_slot(slot, [StLoc0, StLoc1, StLoc2, StLoc3, StLoc4, StLoc5, StLoc6], StLoc)
}

fn ld_sfld(slot: u16) -> (OpCode, Vec<u8>) {
    use OpCode::*;
    compact_slot(slot, [LdSFld0, LdSFld1, LdSFld2, LdSFld3, LdSFld4, LdSFld5, LdSFld6], LdSFld)
}

fn st_sfld(slot: u16) -> (OpCode, Vec<u8>) {
    use OpCode::*;
    compact_slot(slot, [StSFld0, StSFld1, StSFld2, StSFld3, StSFld4, StSFld5, StSFld6], StSFld)
}

fn compare_op_code(op: CompareOp) -> OpCode {
    match op {
        CompareOp::Eq => OpCode::NumEqual,
        CompareOp::Ne => OpCode::NumNotEqual,
        CompareOp::Lt => OpCode::Lt,
        CompareOp::Le => OpCode::Le,
        CompareOp::Gt => OpCode::Gt,
        CompareOp::Ge => OpCode::Ge,
    }
}

fn arith_op_code(op: ArithOp) -> OpCode {
    match op {
        ArithOp::Add => OpCode::Add,
        ArithOp::Sub => OpCode::Sub,
        ArithOp::Mul => OpCode::Mul,
        ArithOp::Div => OpCode::Div,
        ArithOp::Rem => OpCode::Mod,
    }
}

fn shift_op_code(op: ShiftOp) -> OpCode {
    match op {
        ShiftOp::Shl => OpCode::Shl,
        ShiftOp::Shr => OpCode::Shr,
    }
}

fn bitwise_op_code(op: BitwiseOp) -> OpCode {
    match op {
        BitwiseOp::And => OpCode::And,
        BitwiseOp::Or => OpCode::Or,
        BitwiseOp::Xor => OpCode::Xor,
    }
}

/// Everything lowering needs to know about the compilation unit besides
/// the method it's currently walking.
///
/// `module` is a shared reference, not `&mut`: lowering only ever reads
/// it (to resolve a call target's [`crate::module::MethodId`]). The
/// method under construction is mutated through the separate `method`
/// parameter [`lower_method`] takes, which the driver obtains via
/// [`NeoModule::take_method`] precisely so the two borrows don't alias.
pub struct LowerCtx<'a> {
    pub module: &'a NeoModule,
    pub pragmas: &'a PragmaMap,
    pub classes: &'a HashMap<String, &'a ClassIr>,
    /// `"Class.field"` → assigned static slot, built once before any
    /// method lowers (§4.6 "Module and slots").
    pub static_slots: &'a HashMap<String, u8>,
}

/// Total instance-field count across `class` and its `@Struct` ancestor
/// chain (§4.6 "`@Struct` `NEW`": "inherited fields counted from all
/// `@Struct` ancestors").
fn total_field_count(classes: &HashMap<String, &ClassIr>, class: &str) -> usize {
    let mut count = 0;
    let mut current = classes.get(class).copied();
    while let Some(c) = current {
        count += c.fields.iter().filter(|f| !f.is_static).count();
        current = c.super_class.as_deref().and_then(|s| classes.get(s).copied()).filter(|s| s.is_struct);
    }
    count
}

/// Lowers every instruction of `method_ir` into `method`, which must
/// already have had its `INITSLOT`/`INITSSLOT` prologue emitted.
///
/// Interleaves `TRY`/`ENDTRY` brackets around each of `method_ir`'s
/// [`TryRegion`]s at the body positions they name (§4.6 "Try / catch
/// lowering"): `TRY` immediately before the region's first guarded
/// instruction, `ENDTRY` immediately before the first instruction past
/// it, and the handler's caught-value store immediately before the
/// handler's first instruction.
pub fn lower_method(ctx: &mut LowerCtx<'_>, owner_class: &str, method_ir: &MethodIr, method: &mut NeoMethod) -> Result<(), CompilerError> {
    let starts: HashMap<usize, &TryRegion> = method_ir.try_regions.iter().map(|r| (r.start, r)).collect();
    let ends: HashMap<usize, &TryRegion> = method_ir.try_regions.iter().map(|r| (r.end, r)).collect();
    let handlers: HashMap<usize, &TryRegion> = method_ir.try_regions.iter().map(|r| (r.handler, r)).collect();

    for (index, instruction) in method_ir.body.iter().enumerate() {
        method.mark_label(index);
        if let Some(region) = ends.get(&index) {
            method.emit_end_try(region.resume);
        }
        if let Some(region) = handlers.get(&index) {
            if let Some(local) = region.caught_local {
                let (op, operand) = st_loc(local);
                method.emit(op, operand);
            }
        }
        if let Some(region) = starts.get(&index) {
            method.emit_try(region.handler);
        }
        lower_instr(ctx, owner_class, &instruction.instr, method)?;
    }
    method.mark_label(method_ir.body.len());
    if let Some(region) = ends.get(&method_ir.body.len()) {
        method.emit_end_try(region.resume);
    }
    Ok(())
}

fn lower_instr(ctx: &mut LowerCtx<'_>, owner_class: &str, instr: &Instr, method: &mut NeoMethod) -> Result<(), CompilerError> {
    match instr {
        Instr::PushInt(value) => push_int(method, value.clone()),
        Instr::PushString(s) => push_data(method, s.as_bytes()),
        Instr::PushBool(b) => push_bool(method, *b),
        Instr::PushNull => method.emit(OpCode::PushNull, Vec::new()),

        Instr::Load { index, is_arg } => {
            let (op, operand) = if *is_arg { ld_arg(*index) } else { ld_loc(*index) };
            method.emit(op, operand);
        }
        Instr::Store { index, is_arg } => {
            let (op, operand) = if *is_arg { st_arg(*index) } else { st_loc(*index) };
            method.emit(op, operand);
        }

        Instr::Arith(op) => method.emit(arith_op_code(*op), Vec::new()),
        Instr::Negate => method.emit(OpCode::Negate, Vec::new()),
        Instr::Shift(op) => method.emit(shift_op_code(*op), Vec::new()),
        Instr::Bitwise(op) => method.emit(bitwise_op_code(*op), Vec::new()),

        Instr::CondJump { op, target, negate } => {
            method.emit(compare_op_code(*op), Vec::new());
            method.emit_jump(if *negate { JumpCond::IfNot } else { JumpCond::IfTrue }, *target);
        }
        Instr::RefCondJump { equal, target } => {
            method.emit(OpCode::Equal, Vec::new());
            method.emit_jump(if *equal { JumpCond::IfTrue } else { JumpCond::IfNot }, *target);
        }
        Instr::NullCondJump { target, branch_if_null } => {
            method.emit(OpCode::IsNull, Vec::new());
            method.emit_jump(if *branch_if_null { JumpCond::IfTrue } else { JumpCond::IfNot }, *target);
        }
        Instr::Goto(target) => method.emit_jump(JumpCond::Always, *target),

        Instr::Switch { cases, default } => {
            for (value, target) in cases {
                method.emit(OpCode::Dup, Vec::new());
                push_int(method, value.clone());
                method.emit(OpCode::NumEqual, Vec::new());
                method.emit_jump(JumpCond::IfTrue, *target);
            }
            method.emit(OpCode::Drop, Vec::new());
            method.emit_jump(JumpCond::Always, *default);
        }

        Instr::NewArray(elem_ty) => {
            let ty_byte = stack_item_type_byte(elem_ty)
                .ok_or_else(|| CompilerError::UnsupportedInstanceofTarget(format!("{elem_ty:?}")))?;
            method.emit(OpCode::NewArrayT, vec![ty_byte]);
        }
        Instr::ArrayLoad => method.emit(OpCode::PickItem, Vec::new()),
        Instr::ArrayStore => method.emit(OpCode::SetItem, Vec::new()),
        Instr::ArrayLength => method.emit(OpCode::Size, Vec::new()),

        Instr::InvokeStatic { symbol, arg_count, has_return } => {
            lower_invoke_static(ctx, symbol, *arg_count, *has_return, method)?;
        }

        Instr::GetStatic(symbol) => {
            let slot = *ctx.static_slots.get(symbol).ok_or_else(|| CompilerError::UnresolvedCallTarget(symbol.clone()))?;
            let (op, operand) = ld_sfld(u16::from(slot));
            method.emit(op, operand);
        }
        Instr::PutStatic(symbol) => {
            let slot = *ctx.static_slots.get(symbol).ok_or_else(|| CompilerError::UnresolvedCallTarget(symbol.clone()))?;
            let (op, operand) = st_sfld(u16::from(slot));
            method.emit(op, operand);
        }
        Instr::EventSend { field: _, arg_count } => {
            push_int(method, *arg_count as i64);
            method.emit(OpCode::Pack, Vec::new());
            method.emit(OpCode::Syscall, syscall_hash("System.Runtime.Notify").to_vec());
        }

        Instr::StringConcat { part_count } => {
            for _ in 0..part_count.saturating_sub(1) {
                method.emit(OpCode::Cat, Vec::new());
            }
            method.emit(OpCode::Convert, vec![0x28]);
        }

        Instr::ThrowNew { message } => {
            push_data(method, message.as_deref().unwrap_or("").as_bytes());
            method.emit(OpCode::Throw, Vec::new());
        }
        Instr::Athrow => method.emit(OpCode::Throw, Vec::new()),

        Instr::InstanceOf(class) => {
            let byte = named_stack_item_type_byte(class)
                .ok_or_else(|| CompilerError::UnsupportedInstanceofTarget(class.clone()))?;
            method.emit(OpCode::IsType, vec![byte]);
        }
        Instr::CheckCast(_) => {}

        Instr::New { class, ctor_arg_count } => {
            lower_new(ctx, class, *ctor_arg_count, method)?;
        }

        Instr::Return => method.emit(OpCode::Ret, Vec::new()),
        Instr::Pop => method.emit(OpCode::Drop, Vec::new()),
    }

    let _ = owner_class;
    Ok(())
}

fn lower_invoke_static(
    ctx: &mut LowerCtx<'_>,
    symbol: &str,
    arg_count: usize,
    has_return: bool,
    method: &mut NeoMethod,
) -> Result<(), CompilerError> {
    match ctx.pragmas.get(symbol) {
        Some(PragmaEffect::Syscall(name)) => {
            method.emit(OpCode::Syscall, syscall_hash(name).to_vec());
        }
        Some(PragmaEffect::Opcodes(raw_ops)) => {
            for raw in raw_ops {
                method.emit(raw.op_code, raw.operand.clone());
            }
        }
        Some(PragmaEffect::ContractCall(hash)) => {
            lower_contract_call(method, *hash, symbol, arg_count, has_return);
        }
        Some(PragmaEffect::Export { .. }) | Some(PragmaEffect::StorageSlot(_)) | None => {
            let target = ctx
                .module
                .resolve_symbol(symbol)
                .ok_or_else(|| CompilerError::UnresolvedCallTarget(symbol.to_string()))?;
            method.emit_call(target);
        }
    }
    Ok(())
}

fn lower_contract_call(method: &mut NeoMethod, hash: Hash160, symbol: &str, arg_count: usize, has_return: bool) {
    let method_name = symbol.rsplit('.').next().unwrap_or(symbol);
    push_int(method, arg_count as i64);
    method.emit(OpCode::Pack, Vec::new());
    push_data(method, method_name.as_bytes());
    let mut reversed = hash.to_le_bytes();
    reversed.reverse();
    push_data(method, &reversed);
    method.emit(OpCode::Syscall, syscall_hash(SYSTEM_CONTRACT_CALL).to_vec());
    if !has_return {
        method.emit(OpCode::Drop, Vec::new());
    }
}

/// Lowers a regular or `@Struct` `NEW`: allocates a field-count array,
/// `DUP`s it, reorders the already-pushed constructor arguments plus
/// both array copies with `REVERSE_N`, then calls into the lowered
/// constructor.
///
/// This compiler's own calling convention for a constructor: its last
/// parameter slot is the freshly allocated `this` array, preceded by
/// the constructor's declared parameters in reverse source order — the
/// shape `REVERSE_N` naturally produces here. [`lower_constructor`]
/// emits the matching `INITSLOT`/`LDARG` layout.
fn lower_new(ctx: &mut LowerCtx<'_>, class: &str, ctor_arg_count: usize, method: &mut NeoMethod) -> Result<(), CompilerError> {
    let field_count = total_field_count(ctx.classes, class);
    push_int(method, field_count as i64);
    method.emit(OpCode::NewArrayT, vec![0x40]);
    method.emit(OpCode::Dup, Vec::new());
    push_int(method, (ctor_arg_count + 2) as i64);
    method.emit(OpCode::ReverseN, Vec::new());

    let symbol = format!("{class}.<init>");
    let target = ctx
        .module
        .resolve_symbol(&symbol)
        .ok_or_else(|| CompilerError::UnresolvedCallTarget(symbol))?;
    method.emit_call(target);
    Ok(())
}

/// Emits the `INITSLOT`/`INITSSLOT` prologue for `method`, per §4.6
/// "Module and slots": omitted entirely when both counts are zero,
/// required whenever either is non-zero.
pub fn emit_slot_prologue(method: &mut NeoMethod, locals: usize, params: usize) -> Result<(), CompilerError> {
    if locals > 255 {
        return Err(CompilerError::TooManyLocals(method.name.clone(), locals));
    }
    if params > 255 {
        return Err(CompilerError::TooManyParameters(method.name.clone(), params));
    }
    if locals != 0 || params != 0 {
        method.emit(OpCode::InitSlot, vec![locals as u8, params as u8]);
    }
    Ok(())
}

/// Emits the synthetic `_initialize` method's `INITSSLOT` prologue.
pub fn emit_static_slot_prologue(method: &mut NeoMethod, static_count: usize) -> Result<(), CompilerError> {
    if static_count > 255 {
        return Err(CompilerError::TooManyStaticFields(method.name.clone(), static_count));
    }
    method.emit(OpCode::InitSSlot, vec![static_count as u8]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushes_the_smallest_integer_form() {
        let mut module = NeoModule::new();
        let pragmas = PragmaMap::new();
        let classes = HashMap::new();
        let static_slots = HashMap::new();
        let id = module.declare_method("Contract.test", false);
        {
            let method = module.method_mut(id);
            method.mark_label(0);
            lower_instr(
                &mut LowerCtx { module: &NeoModule::new(), pragmas: &pragmas, classes: &classes, static_slots: &static_slots },
                "Contract",
                &Instr::PushInt(BigInt::from(5)),
                method,
            )
            .unwrap();
            method.mark_label(1);
        }
        // PUSH5 is a single opcode byte, no operand, then the implicit RET.
        let script = module.finalize().unwrap();
        assert_eq!(script, vec![OpCode::Push5.opcode(), OpCode::Ret.opcode()]);
    }

    #[test]
    fn numeric_cond_jump_pairs_the_comparison_with_jmpif() {
        let mut module = NeoModule::new();
        let pragmas = PragmaMap::new();
        let classes = HashMap::new();
        let static_slots = HashMap::new();
        let id = module.declare_method("Contract.test", false);
        {
            let method = module.method_mut(id);
            method.mark_label(0);
            lower_instr(
                &mut LowerCtx { module: &NeoModule::new(), pragmas: &pragmas, classes: &classes, static_slots: &static_slots },
                "Contract",
                &Instr::CondJump { op: CompareOp::Lt, target: 0, negate: false },
                method,
            )
            .unwrap();
            method.mark_label(1);
        }
        let script = module.finalize().unwrap();
        assert_eq!(script[0], OpCode::Lt.opcode());
        assert_eq!(script[1], OpCode::JmpIf.opcode());
    }

    #[test]
    fn string_concat_of_three_parts_emits_two_cats() {
        let mut module = NeoModule::new();
        let pragmas = PragmaMap::new();
        let classes = HashMap::new();
        let static_slots = HashMap::new();
        let id = module.declare_method("Contract.test", false);
        {
            let method = module.method_mut(id);
            method.mark_label(0);
            lower_instr(
                &mut LowerCtx { module: &NeoModule::new(), pragmas: &pragmas, classes: &classes, static_slots: &static_slots },
                "Contract",
                &Instr::StringConcat { part_count: 3 },
                method,
            )
            .unwrap();
            method.mark_label(1);
        }
        let script = module.finalize().unwrap();
        assert_eq!(script, vec![OpCode::Cat.opcode(), OpCode::Cat.opcode(), OpCode::Convert.opcode(), 0x28, OpCode::Ret.opcode()]);
    }

    #[test]
    fn a_try_region_brackets_its_guarded_body_and_stores_the_caught_value() {
        use crate::ir::{Instruction, TryRegion};

        let mut module = NeoModule::new();
        let pragmas = PragmaMap::new();
        let classes = HashMap::new();
        let static_slots = HashMap::new();

        let method_ir = MethodIr {
            name: "test".into(),
            is_static: true,
            is_public: true,
            params: vec![],
            return_type: JvmType::Void,
            locals: vec![],
            body: vec![
                Instruction { instr: Instr::Pop, line: None },
                Instruction { instr: Instr::PushBool(true), line: None },
                Instruction { instr: Instr::Pop, line: None },
            ],
            try_regions: vec![TryRegion { start: 0, end: 1, handler: 1, resume: 2, caught_local: Some(3) }],
            is_constructor: false,
        };

        let id = module.declare_method("Contract.test", false);
        {
            let method = module.method_mut(id);
            let mut ctx = LowerCtx { module: &NeoModule::new(), pragmas: &pragmas, classes: &classes, static_slots: &static_slots };
            lower_method(&mut ctx, "Contract", &method_ir, method).unwrap();
        }
        let script = module.finalize().unwrap();
        // TRY, POP (guarded body), ENDTRY, STLOC3 (handler prologue), PUSHT, DROP, RET.
        assert_eq!(script[0], OpCode::Try.opcode());
        assert_eq!(script[3], OpCode::Drop.opcode()); // the guarded POP
        assert_eq!(script[4], OpCode::EndTry.opcode());
        assert_eq!(script[6], OpCode::StLoc3.opcode());
        assert_eq!(*script.last().unwrap(), OpCode::Ret.opcode());
    }
}

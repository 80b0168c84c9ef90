//! Assembles NeoVM bytecode: opcode emission, typed parameter pushing, and
//! the handful of fixed script shapes (verification, multi-sig,
//! contract-call, iterator-unwrapping) every higher-level caller needs.

use neo_codec::{Encoder, OpCode};
use neo_error::BuilderError;
use neo_types::{ContractParameter, Hash160, ParameterValue};
use num_bigint::BigInt;

use crate::script::interop_service::InteropService;
use crate::transaction::call_flags::CallFlags;

/// A builder for NeoVM scripts: opcodes and their operands, appended in
/// order into an underlying [`Encoder`].
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    encoder: Encoder,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self { encoder: Encoder::new() }
    }

    /// Appends a single opcode with no operand.
    pub fn op_code(&mut self, op_code: OpCode) -> &mut Self {
        self.encoder.write_u8(op_code.opcode());
        self
    }

    /// Appends an opcode followed by raw operand bytes, verbatim.
    pub fn op_code_with_arg(&mut self, op_code: OpCode, argument: &[u8]) -> &mut Self {
        self.encoder.write_u8(op_code.opcode());
        self.encoder.write_bytes(argument);
        self
    }

    /// Emits the smallest `PUSHM1..PUSH16`/`PUSHINT8..256` form for `value`.
    pub fn push_integer(&mut self, value: &BigInt) -> &mut Self {
        self.encoder.push_int(value);
        self
    }

    /// Emits `PUSHDATA1/2/4` sized to `data`'s length, followed by `data`.
    pub fn push_data(&mut self, data: &[u8]) -> &mut Self {
        self.encoder.push_data(data);
        self
    }

    /// Emits `PUSHT`/`PUSHF`.
    pub fn push_bool(&mut self, value: bool) -> &mut Self {
        self.encoder.push_bool(value);
        self
    }

    /// Pushes a single contract parameter's value onto the stack.
    pub fn push_param(&mut self, param: &ContractParameter) -> Result<&mut Self, BuilderError> {
        let Some(value) = &param.value else {
            self.op_code(OpCode::PushNull);
            return Ok(self);
        };

        match value {
            ParameterValue::Boolean(b) => {
                self.push_bool(*b);
            }
            ParameterValue::Integer(i) => {
                self.push_integer(i);
            }
            ParameterValue::ByteArray(b) | ParameterValue::Signature(b) | ParameterValue::PublicKey(b) => {
                self.push_data(b);
            }
            ParameterValue::H160(h) => {
                self.push_data(&h.to_le_bytes());
            }
            ParameterValue::H256(h) => {
                self.push_data(&h.to_le_bytes());
            }
            ParameterValue::String(s) => {
                self.push_data(s.as_bytes());
            }
            ParameterValue::Array(items) => {
                self.push_array(items)?;
            }
            ParameterValue::Map(map) => {
                self.push_map(map.to_map().into_iter())?;
            }
        }
        Ok(self)
    }

    /// Pushes each parameter, most-significant last (so the callee sees
    /// them in declaration order once `PACK`ed), then packs them into a
    /// single array.
    pub fn push_params(&mut self, params: &[ContractParameter]) -> Result<&mut Self, BuilderError> {
        for param in params.iter().rev() {
            self.push_param(param)?;
        }
        self.push_integer(&BigInt::from(params.len()));
        self.op_code(OpCode::Pack);
        Ok(self)
    }

    /// Pushes an array of parameters. Empty arrays use the dedicated
    /// `NEWARRAY0` opcode rather than packing zero items.
    pub fn push_array(&mut self, items: &[ContractParameter]) -> Result<&mut Self, BuilderError> {
        if items.is_empty() {
            self.op_code(OpCode::NewArray0);
        } else {
            self.push_params(items)?;
        }
        Ok(self)
    }

    /// Pushes a map of parameters: each entry as `value` then `key`,
    /// followed by the entry count and `PACKMAP`.
    pub fn push_map(
        &mut self,
        entries: impl Iterator<Item = (ContractParameter, ContractParameter)>,
    ) -> Result<&mut Self, BuilderError> {
        let mut count = 0usize;
        for (key, value) in entries {
            self.push_param(&value)?;
            self.push_param(&key)?;
            count += 1;
        }
        self.push_integer(&BigInt::from(count));
        self.op_code(OpCode::PackMap);
        Ok(self)
    }

    /// Appends a `SYSCALL` to the named interop service.
    pub fn sys_call(&mut self, service: InteropService) -> &mut Self {
        self.op_code_with_arg(OpCode::Syscall, &service.hash())
    }

    /// Appends a full `System.Contract.Call` invocation: parameters, call
    /// flags, method name, target hash, then the syscall itself.
    pub fn contract_call(
        &mut self,
        contract_hash: Hash160,
        method: &str,
        params: &[ContractParameter],
        call_flags: CallFlags,
    ) -> Result<&mut Self, BuilderError> {
        if params.is_empty() {
            self.op_code(OpCode::NewArray0);
        } else {
            self.push_params(params)?;
        }
        self.push_integer(&BigInt::from(call_flags.value()));
        self.push_data(method.as_bytes());
        self.push_data(&contract_hash.to_le_bytes());
        self.sys_call(InteropService::SystemContractCall);
        Ok(self)
    }

    /// Appends `PACK`.
    pub fn pack(&mut self) -> &mut Self {
        self.op_code(OpCode::Pack)
    }

    /// Current script length in bytes.
    pub fn len(&self) -> usize {
        self.encoder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoder.is_empty()
    }

    /// Consumes the builder, returning the assembled script.
    pub fn to_bytes(self) -> Vec<u8> {
        self.encoder.to_bytes()
    }

    /// Builds a script that calls `method` on `contract_hash`, then drives
    /// the returned iterator to completion (up to `max_items`), collecting
    /// its values into an array left on the stack. Used for contract
    /// methods whose result is too large to return as a plain array.
    pub fn build_contract_call_and_unwrap_iterator(
        contract_hash: Hash160,
        method: &str,
        params: &[ContractParameter],
        max_items: u32,
        call_flags: CallFlags,
    ) -> Result<Vec<u8>, BuilderError> {
        let mut sb = Self::new();
        sb.push_integer(&BigInt::from(max_items));
        sb.contract_call(contract_hash, method, params, call_flags)?;
        sb.op_code(OpCode::NewArray);

        let cycle_start = sb.len();
        sb.op_code(OpCode::Over);
        sb.sys_call(InteropService::SystemIteratorNext);

        let jmp_if_not_at = sb.len();
        sb.op_code_with_arg(OpCode::JmpIf, &[0]);

        sb.op_code(OpCode::Dup).op_code(OpCode::Push2).op_code(OpCode::Pick);
        sb.sys_call(InteropService::SystemIteratorValue);
        sb.op_code(OpCode::Append);

        let jmp_back_offset = (cycle_start as i64 - sb.len() as i64) as i8;
        sb.op_code_with_arg(OpCode::Jmp, &(jmp_back_offset as u8).to_le_bytes());

        let break_at = sb.len();
        let jmp_if_not_offset = (break_at as i64 - jmp_if_not_at as i64) as i8;
        let mut bytes = sb.to_bytes();
        bytes[jmp_if_not_at + 1] = jmp_if_not_offset as u8;

        let mut sb = Self { encoder: Encoder::new() };
        sb.encoder.write_bytes(&bytes);
        sb.op_code(OpCode::Nip).op_code(OpCode::Nip);
        Ok(sb.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_crypto::Secp256r1PrivateKey;

    #[test]
    fn push_integer_uses_compact_forms() {
        let mut sb = ScriptBuilder::new();
        sb.push_integer(&BigInt::from(16));
        assert_eq!(sb.to_bytes(), vec![OpCode::Push16.opcode()]);

        let mut sb = ScriptBuilder::new();
        sb.push_integer(&BigInt::from(17));
        assert_eq!(sb.to_bytes(), vec![OpCode::PushInt8.opcode(), 17]);
    }

    #[test]
    fn push_data_chooses_pushdata1_for_short_strings() {
        let mut sb = ScriptBuilder::new();
        sb.push_data(b"hi");
        assert_eq!(sb.to_bytes(), vec![OpCode::PushData1.opcode(), 2, b'h', b'i']);
    }

    #[test]
    fn empty_array_uses_newarray0() {
        let mut sb = ScriptBuilder::new();
        sb.push_array(&[]).unwrap();
        assert_eq!(sb.to_bytes(), vec![OpCode::NewArray0.opcode()]);
    }

    #[test]
    fn contract_call_appends_syscall_hash() {
        let hash = Hash160::ZERO;
        let mut sb = ScriptBuilder::new();
        sb.contract_call(hash, "transfer", &[], CallFlags::ALL).unwrap();
        let bytes = sb.to_bytes();
        assert_eq!(&bytes[bytes.len() - 5..], &[
            OpCode::Syscall.opcode(),
            InteropService::SystemContractCall.hash()[0],
            InteropService::SystemContractCall.hash()[1],
            InteropService::SystemContractCall.hash()[2],
            InteropService::SystemContractCall.hash()[3],
        ]);
    }

    #[test]
    fn push_param_any_emits_pushnull() {
        let mut sb = ScriptBuilder::new();
        sb.push_param(&ContractParameter::any()).unwrap();
        assert_eq!(sb.to_bytes(), vec![OpCode::PushNull.opcode()]);
    }

    #[test]
    fn push_param_hash160_pushes_little_endian_bytes() {
        let private = Secp256r1PrivateKey::random();
        let hash = Hash160::from_script(&neo_crypto::build_verification_script(&private.to_public_key()));
        let mut sb = ScriptBuilder::new();
        sb.push_param(&ContractParameter::hash160(hash)).unwrap();
        let bytes = sb.to_bytes();
        assert_eq!(bytes[0], OpCode::PushData1.opcode());
        assert_eq!(bytes[1], 20);
        assert_eq!(&bytes[2..22], &hash.to_le_bytes());
    }
}

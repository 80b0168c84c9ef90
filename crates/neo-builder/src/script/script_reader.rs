//! Disassembles a NeoVM script back into a human-readable opcode listing.

use neo_codec::{Decoder, OpCode};

use crate::script::interop_service::InteropService;

/// A stateless disassembler.
pub struct ScriptReader;

impl ScriptReader {
    /// Looks up the interop service a `SYSCALL` hash resolves to.
    pub fn get_interop_service_code(hash_hex: &str) -> Option<InteropService> {
        InteropService::from_hash(hash_hex)
    }

    /// Renders `script` as one `OPCODE [operand]` line per instruction.
    /// Stops at the first byte that doesn't decode to a known opcode,
    /// appending nothing further for it.
    pub fn convert_to_op_code_string(script: &[u8]) -> String {
        let mut reader = Decoder::new(script);
        let mut result = String::new();

        while *reader.pointer() < script.len() {
            let Ok(byte) = reader.read_u8() else { break };
            let Ok(op_code) = OpCode::try_from(byte) else { break };

            result.push_str(&format!("{:?}", op_code).to_uppercase());

            match op_code {
                OpCode::PushData1 => {
                    let len = reader.read_u8().unwrap_or(0) as usize;
                    Self::push_hex(&mut result, &mut reader, len);
                }
                OpCode::PushData2 => {
                    let len = reader.read_u16().unwrap_or(0) as usize;
                    Self::push_hex(&mut result, &mut reader, len);
                }
                OpCode::PushData4 => {
                    let len = reader.read_u32().unwrap_or(0) as usize;
                    Self::push_hex(&mut result, &mut reader, len);
                }
                _ => {
                    if let Some(size) = op_code.operand_size() {
                        Self::push_hex(&mut result, &mut reader, size);
                    }
                }
            }
            result.push('\n');
        }
        result
    }

    fn push_hex(out: &mut String, reader: &mut Decoder, len: usize) {
        if let Ok(bytes) = reader.read_bytes(len) {
            out.push_str(&format!(" {}", hex::encode(bytes)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disassembles_pushdata_and_syscall() {
        let script = hex::decode(
            "0c0548656c6c6f0c05576f726c642150419bf667ce41e63f18841140",
        )
        .unwrap();
        let expected = "PUSHDATA1 48656c6c6f\nPUSHDATA1 576f726c64\nNOP\nSWAP\n\
SYSCALL 9bf667ce\nSYSCALL e63f1884\nPUSH1\nRET\n";
        assert_eq!(ScriptReader::convert_to_op_code_string(&script), expected);
    }

    #[test]
    fn interop_lookup_resolves_known_hash() {
        assert_eq!(
            ScriptReader::get_interop_service_code("9bf667ce"),
            Some(InteropService::SystemStorageGetContext)
        );
    }
}

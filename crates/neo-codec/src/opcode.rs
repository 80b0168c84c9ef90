//! NeoVM opcode table.
//!
//! Discriminants match the real Neo N3 virtual machine instruction set
//! bit-for-bit; every worked hex example in the specification this crate
//! implements decodes correctly against this table.

use neo_error::CodecError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// NeoVM instruction opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum OpCode {
	// Constants
	PushInt8 = 0x00,
	PushInt16 = 0x01,
	PushInt32 = 0x02,
	PushInt64 = 0x03,
	PushInt128 = 0x04,
	PushInt256 = 0x05,
	PushTrue = 0x08,
	PushFalse = 0x09,
	PushA = 0x0A,
	PushNull = 0x0B,
	PushData1 = 0x0C,
	PushData2 = 0x0D,
	PushData4 = 0x0E,
	PushM1 = 0x0F,
	Push0 = 0x10,
	Push1 = 0x11,
	Push2 = 0x12,
	Push3 = 0x13,
	Push4 = 0x14,
	Push5 = 0x15,
	Push6 = 0x16,
	Push7 = 0x17,
	Push8 = 0x18,
	Push9 = 0x19,
	Push10 = 0x1A,
	Push11 = 0x1B,
	Push12 = 0x1C,
	Push13 = 0x1D,
	Push14 = 0x1E,
	Push15 = 0x1F,
	Push16 = 0x20,

	// Flow control
	Nop = 0x21,
	Jmp = 0x22,
	JmpL = 0x23,
	JmpIf = 0x24,
	JmpIfL = 0x25,
	JmpIfNot = 0x26,
	JmpIfNotL = 0x27,
	JmpEq = 0x28,
	JmpEqL = 0x29,
	JmpNe = 0x2A,
	JmpNeL = 0x2B,
	JmpGt = 0x2C,
	JmpGtL = 0x2D,
	JmpGe = 0x2E,
	JmpGeL = 0x2F,
	JmpLt = 0x30,
	JmpLtL = 0x31,
	JmpLe = 0x32,
	JmpLeL = 0x33,
	Call = 0x34,
	CallL = 0x35,
	CallA = 0x36,
	CallT = 0x37,
	Abort = 0x38,
	Assert = 0x39,
	Throw = 0x3A,
	Try = 0x3B,
	TryL = 0x3C,
	EndTry = 0x3D,
	EndTryL = 0x3E,
	EndFinally = 0x3F,
	Ret = 0x40,
	Syscall = 0x41,

	// Stack
	Depth = 0x43,
	Drop = 0x45,
	Nip = 0x46,
	XDrop = 0x48,
	Clear = 0x49,
	Dup = 0x4A,
	Over = 0x4B,
	Pick = 0x4D,
	Tuck = 0x4E,
	Swap = 0x50,
	Rot = 0x51,
	Roll = 0x52,
	Reverse3 = 0x53,
	Reverse4 = 0x54,
	ReverseN = 0x55,

	// Slots
	InitSSlot = 0x56,
	InitSlot = 0x57,
	LdSFld0 = 0x58,
	LdSFld1 = 0x59,
	LdSFld2 = 0x5A,
	LdSFld3 = 0x5B,
	LdSFld4 = 0x5C,
	LdSFld5 = 0x5D,
	LdSFld6 = 0x5E,
	LdSFld = 0x5F,
	StSFld0 = 0x60,
	StSFld1 = 0x61,
	StSFld2 = 0x62,
	StSFld3 = 0x63,
	StSFld4 = 0x64,
	StSFld5 = 0x65,
	StSFld6 = 0x66,
	StSFld = 0x67,
	LdLoc0 = 0x68,
	LdLoc1 = 0x69,
	LdLoc2 = 0x6A,
	LdLoc3 = 0x6B,
	LdLoc4 = 0x6C,
	LdLoc5 = 0x6D,
	LdLoc6 = 0x6E,
	LdLoc = 0x6F,
	StLoc0 = 0x70,
	StLoc1 = 0x71,
	StLoc2 = 0x72,
	StLoc3 = 0x73,
	StLoc4 = 0x74,
	StLoc5 = 0x75,
	StLoc6 = 0x76,
	StLoc = 0x77,
	LdArg0 = 0x78,
	LdArg1 = 0x79,
	LdArg2 = 0x7A,
	LdArg3 = 0x7B,
	LdArg4 = 0x7C,
	LdArg5 = 0x7D,
	LdArg6 = 0x7E,
	LdArg = 0x7F,
	StArg0 = 0x80,
	StArg1 = 0x81,
	StArg2 = 0x82,
	StArg3 = 0x83,
	StArg4 = 0x84,
	StArg5 = 0x85,
	StArg6 = 0x86,
	StArg = 0x87,

	// Splice
	NewBuffer = 0x88,
	MemCpy = 0x89,
	Cat = 0x8B,
	SubStr = 0x8C,
	Left = 0x8D,
	Right = 0x8E,

	// Bitwise logic
	Invert = 0x90,
	And = 0x91,
	Or = 0x92,
	Xor = 0x93,
	Equal = 0x97,
	NotEqual = 0x98,

	// Arithmetic
	Sign = 0x99,
	Abs = 0x9A,
	Negate = 0x9B,
	Inc = 0x9C,
	Dec = 0x9D,
	Add = 0x9E,
	Sub = 0x9F,
	Mul = 0xA0,
	Div = 0xA1,
	Mod = 0xA2,
	Pow = 0xA3,
	Sqrt = 0xA4,
	ModMul = 0xA5,
	ModPow = 0xA6,
	Shl = 0xA8,
	Shr = 0xA9,
	Not = 0xAA,
	BoolAnd = 0xAB,
	BoolOr = 0xAC,
	Nz = 0xB1,
	NumEqual = 0xB3,
	NumNotEqual = 0xB4,
	Lt = 0xB5,
	Le = 0xB6,
	Gt = 0xB7,
	Ge = 0xB8,
	Min = 0xB9,
	Max = 0xBA,
	Within = 0xBB,

	// Compound-type
	PackMap = 0xBE,
	PackStruct = 0xBF,
	Pack = 0xC0,
	Unpack = 0xC1,
	NewArray0 = 0xC2,
	NewArray = 0xC3,
	NewArrayT = 0xC4,
	NewStruct0 = 0xC5,
	NewStruct = 0xC6,
	NewMap = 0xC8,
	Size = 0xCA,
	HasKey = 0xCB,
	Keys = 0xCC,
	Values = 0xCD,
	PickItem = 0xCE,
	Append = 0xCF,
	SetItem = 0xD0,
	ReverseItems = 0xD1,
	Remove = 0xD2,
	ClearItems = 0xD3,
	PopItem = 0xD4,

	// Types
	IsNull = 0xD8,
	IsType = 0xD9,
	Convert = 0xDB,

	// Extensions
	AbortMsg = 0xE0,
	AssertMsg = 0xE1,
}

impl OpCode {
	/// The raw opcode byte.
	pub fn opcode(&self) -> u8 {
		(*self).into()
	}

	/// Lowercase hex representation of the opcode byte, e.g. `"0c"`.
	pub fn to_hex_string(&self) -> String {
		format!("{:02x}", self.opcode())
	}

	/// Size in bytes of the fixed operand following this opcode, if any.
	///
	/// Variable-length operands (`PUSHDATA*`, `SYSCALL`'s 4-byte hash is
	/// fixed and counted here; the payload itself is not) are documented
	/// per-variant; `None` means the opcode takes no operand at all.
	pub fn operand_size(&self) -> Option<usize> {
		use OpCode::*;
		match self {
			PushInt8 => Some(1),
			PushInt16 => Some(2),
			PushInt32 => Some(4),
			PushInt64 => Some(8),
			PushInt128 => Some(16),
			PushInt256 => Some(32),
			PushData1 => Some(1), // length byte; payload follows separately
			PushData2 => Some(2),
			PushData4 => Some(4),
			Jmp | JmpIf | JmpIfNot | JmpEq | JmpNe | JmpGt | JmpGe | JmpLt | JmpLe | Call
			| EndTry => Some(1),
			JmpL | JmpIfL | JmpIfNotL | JmpEqL | JmpNeL | JmpGtL | JmpGeL | JmpLtL | JmpLeL
			| CallL | EndTryL => Some(4),
			CallA => None,
			CallT => Some(2),
			Try => Some(2),
			TryL => Some(8),
			Syscall => Some(4),
			InitSSlot => Some(1),
			InitSlot => Some(2),
			LdSFld | StSFld | LdLoc | StLoc | LdArg | StArg => Some(1),
			NewArrayT | IsType | Convert => Some(1),
			Pick | Roll | ReverseN => None,
			_ => None,
		}
	}
}

impl fmt::Display for OpCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}", self)
	}
}

impl TryFrom<u8> for &OpCode {
	type Error = CodecError;

	fn try_from(_value: u8) -> Result<Self, Self::Error> {
		unreachable!("use OpCode::try_from(u8) -> Result<OpCode, _> instead")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn protocol_accurate_values() {
		assert_eq!(OpCode::PushData1.opcode(), 0x0c);
		assert_eq!(OpCode::Syscall.opcode(), 0x41);
		assert_eq!(OpCode::Push0.opcode(), 0x10);
		assert_eq!(OpCode::PushM1.opcode(), 0x0f);
		assert_eq!(OpCode::Push16.opcode(), 0x20);
		assert_eq!(OpCode::InitSSlot.opcode(), 0x56);
		assert_eq!(OpCode::InitSlot.opcode(), 0x57);
		assert_eq!(OpCode::Ret.opcode(), 0x40);
	}

	#[test]
	fn round_trips_through_try_from() {
		for raw in 0u8..=255 {
			if let Ok(op) = OpCode::try_from(raw) {
				assert_eq!(op.opcode(), raw);
			}
		}
	}
}

use crate::encode::NeoSerializable;
use crate::opcode::OpCode;
use num_bigint::BigInt;

/// An append-only writer over Neo's little-endian wire format.
///
/// # Examples
///
/// ```rust
/// use neo_codec::binary_encoder::Encoder;
///
/// let mut encoder = Encoder::new();
/// encoder.write_u32(0x0403_0201);
/// assert_eq!(encoder.to_bytes(), vec![0x01, 0x02, 0x03, 0x04]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoder {
	buffer: Vec<u8>,
}

impl Encoder {
	/// Creates an empty encoder.
	pub fn new() -> Self {
		Self { buffer: Vec::new() }
	}

	/// Writes a boolean as a single `0x00`/`0x01` byte.
	pub fn write_bool(&mut self, value: bool) {
		self.buffer.push(value as u8);
	}

	/// Writes a single byte.
	pub fn write_u8(&mut self, value: u8) {
		self.buffer.push(value);
	}

	/// Writes a signed byte.
	pub fn write_i8(&mut self, value: i8) {
		self.buffer.push(value as u8);
	}

	/// Writes a little-endian `u16`.
	pub fn write_u16(&mut self, value: u16) {
		self.buffer.extend_from_slice(&value.to_le_bytes());
	}

	/// Writes a little-endian `i16`.
	pub fn write_i16(&mut self, value: i16) {
		self.buffer.extend_from_slice(&value.to_le_bytes());
	}

	/// Writes a little-endian `u32`.
	pub fn write_u32(&mut self, value: u32) {
		self.buffer.extend_from_slice(&value.to_le_bytes());
	}

	/// Writes a little-endian `i32`.
	pub fn write_i32(&mut self, value: i32) {
		self.buffer.extend_from_slice(&value.to_le_bytes());
	}

	/// Writes a little-endian `u64`.
	pub fn write_u64(&mut self, value: u64) {
		self.buffer.extend_from_slice(&value.to_le_bytes());
	}

	/// Writes a little-endian `i64`.
	pub fn write_i64(&mut self, value: i64) {
		self.buffer.extend_from_slice(&value.to_le_bytes());
	}

	/// Writes raw bytes verbatim, with no length prefix.
	pub fn write_bytes(&mut self, bytes: &[u8]) {
		self.buffer.extend_from_slice(bytes);
	}

	/// Writes a Neo-style variable-length integer, always in its shortest form.
	pub fn write_var_int(&mut self, value: u64) {
		if value < 0xfd {
			self.write_u8(value as u8);
		} else if value <= u16::MAX as u64 {
			self.write_u8(0xfd);
			self.write_u16(value as u16);
		} else if value <= u32::MAX as u64 {
			self.write_u8(0xfe);
			self.write_u32(value as u32);
		} else {
			self.write_u8(0xff);
			self.write_u64(value);
		}
	}

	/// Writes a varint length prefix followed by the raw bytes.
	pub fn write_var_bytes(&mut self, bytes: &[u8]) {
		self.write_var_int(bytes.len() as u64);
		self.write_bytes(bytes);
	}

	/// Writes a UTF-8 string as varbytes.
	pub fn write_var_string(&mut self, value: &str) {
		self.write_var_bytes(value.as_bytes());
	}

	/// Writes a UTF-8 string zero-padded to a fixed width of `size` bytes.
	///
	/// Fails via panic-free truncation guard: the caller must ensure
	/// `value.len() <= size`; this mirrors the reader's "length byte
	/// overflow is an error" rule by rejecting the condition up front.
	pub fn write_fixed_string(&mut self, value: &str, size: usize) -> Result<(), neo_error::CodecError> {
		let bytes = value.as_bytes();
		if bytes.len() > size {
			return Err(neo_error::CodecError::InvalidFormat(format!(
				"fixed string of {} bytes does not fit in {} byte field",
				bytes.len(),
				size
			)));
		}
		self.write_bytes(bytes);
		self.write_bytes(&vec![0u8; size - bytes.len()]);
		Ok(())
	}

	/// Writes a varint count followed by each item's own serialization.
	pub fn write_serializable_list<T: NeoSerializable>(&mut self, items: &[T]) {
		self.write_var_int(items.len() as u64);
		for item in items {
			item.encode(self);
		}
	}

	/// Writes a single `NeoSerializable` value.
	pub fn write_serializable<T: NeoSerializable>(&mut self, item: &T) {
		item.encode(self);
	}

	/// Emits the smallest `PUSHM1..PUSH16`/`PUSHINT8..256` form for `value`.
	pub fn push_int(&mut self, value: &BigInt) {
		use num_traits::ToPrimitive;

		if let Some(small) = value.to_i8() {
			if (-1..=16).contains(&small) {
				let op = (OpCode::Push0 as i16 + small as i16) as u8;
				self.write_u8(op);
				return;
			}
		}

		let mut bytes = value.to_signed_bytes_le();
		let width = if bytes.len() <= 1 {
			1
		} else if bytes.len() <= 2 {
			2
		} else if bytes.len() <= 4 {
			4
		} else if bytes.len() <= 8 {
			8
		} else if bytes.len() <= 16 {
			16
		} else {
			32
		};

		// sign-extend to the chosen width
		let fill = if value.sign() == num_bigint::Sign::Minus { 0xffu8 } else { 0x00u8 };
		bytes.resize(width, fill);

		let opcode = match width {
			1 => OpCode::PushInt8,
			2 => OpCode::PushInt16,
			4 => OpCode::PushInt32,
			8 => OpCode::PushInt64,
			16 => OpCode::PushInt128,
			32 => OpCode::PushInt256,
			_ => unreachable!("width is one of the six fixed sizes above"),
		};
		self.write_u8(opcode.opcode());
		self.write_bytes(&bytes);
	}

	/// Emits `PUSHDATA1/2/4` sized to `data`'s length, followed by `data`.
	pub fn push_data(&mut self, data: &[u8]) {
		if data.len() < 0x100 {
			self.write_u8(OpCode::PushData1.opcode());
			self.write_u8(data.len() as u8);
		} else if data.len() < 0x1_0000 {
			self.write_u8(OpCode::PushData2.opcode());
			self.write_u16(data.len() as u16);
		} else {
			self.write_u8(OpCode::PushData4.opcode());
			self.write_u32(data.len() as u32);
		}
		self.write_bytes(data);
	}

	/// Emits `PUSHT`/`PUSHF`.
	pub fn push_bool(&mut self, value: bool) {
		self.write_u8(if value { OpCode::PushTrue.opcode() } else { OpCode::PushFalse.opcode() });
	}

	/// Current length of the buffer in bytes.
	pub fn len(&self) -> usize {
		self.buffer.len()
	}

	/// Whether the encoder is empty.
	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}

	/// Consumes the encoder, returning its buffer.
	pub fn to_bytes(self) -> Vec<u8> {
		self.buffer
	}

	/// Borrows the buffer without consuming the encoder.
	pub fn as_bytes(&self) -> &[u8] {
		&self.buffer
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn var_int_shortest_form() {
		let mut e = Encoder::new();
		e.write_var_int(0xfc);
		assert_eq!(e.to_bytes(), vec![0xfc]);

		let mut e = Encoder::new();
		e.write_var_int(0xfd);
		assert_eq!(e.to_bytes(), vec![0xfd, 0xfd, 0x00]);

		let mut e = Encoder::new();
		e.write_var_int(0x1_0000);
		assert_eq!(e.to_bytes(), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);

		let mut e = Encoder::new();
		e.write_var_int(0x1_0000_0000);
		assert_eq!(e.to_bytes()[0], 0xff);
	}

	#[test]
	fn push_int_small_values() {
		let mut e = Encoder::new();
		e.push_int(&BigInt::from(-1));
		assert_eq!(e.to_bytes(), vec![OpCode::PushM1.opcode()]);

		let mut e = Encoder::new();
		e.push_int(&BigInt::from(16));
		assert_eq!(e.to_bytes(), vec![OpCode::Push16.opcode()]);

		let mut e = Encoder::new();
		e.push_int(&BigInt::from(17));
		assert_eq!(e.to_bytes(), vec![OpCode::PushInt8.opcode(), 17]);
	}

	#[test]
	fn push_int_negative_sign_extends() {
		let mut e = Encoder::new();
		e.push_int(&BigInt::from(-129));
		let bytes = e.to_bytes();
		assert_eq!(bytes[0], OpCode::PushInt16.opcode());
		assert_eq!(bytes.len(), 3);
		assert_eq!(bytes[2], 0xff);
	}

	#[test]
	fn push_data_chooses_smallest_opcode() {
		let mut e = Encoder::new();
		e.push_data(&[0u8; 10]);
		assert_eq!(e.to_bytes()[0], OpCode::PushData1.opcode());

		let mut e = Encoder::new();
		e.push_data(&vec![0u8; 300]);
		assert_eq!(e.to_bytes()[0], OpCode::PushData2.opcode());

		let mut e = Encoder::new();
		e.push_data(&vec![0u8; 70_000]);
		assert_eq!(e.to_bytes()[0], OpCode::PushData4.opcode());
	}
}

use crate::encode::NeoSerializable;
use crate::opcode::OpCode;
use neo_error::CodecError;

use getset::{Getters, Setters};
use num_bigint::BigInt;

/// A cursor-based reader over Neo's little-endian wire format.
///
/// # Examples
///
/// ```rust
/// use neo_codec::binary_decoder::Decoder;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut decoder = Decoder::new(&data);
///
/// assert_eq!(decoder.read_bool().unwrap(), true);
/// assert_eq!(decoder.read_u8().unwrap(), 2);
/// assert_eq!(decoder.read_u16().unwrap(), 0x0403);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Setters)]
pub struct Decoder<'a> {
	data: &'a [u8],
	#[getset(get = "pub")]
	pointer: usize,
	marker: usize,
}

impl<'a> Iterator for Decoder<'a> {
	type Item = u8;

	fn next(&mut self) -> Option<Self::Item> {
		if self.pointer < self.data.len() {
			let val = self.data[self.pointer];
			self.pointer += 1;
			Some(val)
		} else {
			None
		}
	}
}

impl<'a> Decoder<'a> {
	/// Creates a new decoder that reads from the given byte slice.
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, pointer: 0, marker: 0 }
	}

	/// Reads a boolean value (one byte, nonzero is `true`).
	pub fn read_bool(&mut self) -> Result<bool, CodecError> {
		Ok(self.read_u8()? != 0)
	}

	/// Reads an unsigned 8-bit integer.
	pub fn read_u8(&mut self) -> Result<u8, CodecError> {
		if self.pointer >= self.data.len() {
			return Err(CodecError::TruncatedInput {
				field: "u8".to_string(),
				offset: self.pointer,
				expected: 1,
			});
		}
		let val = self.data[self.pointer];
		self.pointer += 1;
		Ok(val)
	}

	/// Reads a little-endian unsigned 16-bit integer.
	pub fn read_u16(&mut self) -> Result<u16, CodecError> {
		let bytes = self.read_bytes_named(2, "u16")?;
		Ok(u16::from_le_bytes(bytes.try_into().expect("length checked above")))
	}

	/// Reads a little-endian signed 16-bit integer.
	pub fn read_i16(&mut self) -> Result<i16, CodecError> {
		let bytes = self.read_bytes_named(2, "i16")?;
		Ok(i16::from_le_bytes(bytes.try_into().expect("length checked above")))
	}

	/// Reads a little-endian unsigned 32-bit integer.
	pub fn read_u32(&mut self) -> Result<u32, CodecError> {
		let bytes = self.read_bytes_named(4, "u32")?;
		Ok(u32::from_le_bytes(bytes.try_into().expect("length checked above")))
	}

	/// Reads a little-endian signed 32-bit integer.
	pub fn read_i32(&mut self) -> Result<i32, CodecError> {
		let bytes = self.read_bytes_named(4, "i32")?;
		Ok(i32::from_le_bytes(bytes.try_into().expect("length checked above")))
	}

	/// Reads a little-endian unsigned 64-bit integer.
	pub fn read_u64(&mut self) -> Result<u64, CodecError> {
		let bytes = self.read_bytes_named(8, "u64")?;
		Ok(u64::from_le_bytes(bytes.try_into().expect("length checked above")))
	}

	/// Reads a little-endian signed 64-bit integer.
	pub fn read_i64(&mut self) -> Result<i64, CodecError> {
		let bytes = self.read_bytes_named(8, "i64")?;
		Ok(i64::from_le_bytes(bytes.try_into().expect("length checked above")))
	}

	/// Reads an encoded EC point (tag byte `0x02`/`0x03` followed by 32 bytes of x-coordinate).
	pub fn read_encoded_ec_point(&mut self) -> Result<Vec<u8>, CodecError> {
		let byte = self.read_u8()?;
		match byte {
			0x02 | 0x03 => self.read_bytes(32),
			other => Err(CodecError::UnknownDiscriminant { field: "ec_point_tag".into(), value: other as u64 }),
		}
	}

	/// Reads `length` raw bytes.
	pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>, CodecError> {
		self.read_bytes_named(length, "bytes")
	}

	fn read_bytes_named(&mut self, length: usize, field: &str) -> Result<Vec<u8>, CodecError> {
		if self.pointer + length > self.data.len() {
			return Err(CodecError::TruncatedInput {
				field: field.to_string(),
				offset: self.pointer,
				expected: length,
			});
		}
		let result = self.data[self.pointer..self.pointer + length].to_vec();
		self.pointer += length;
		Ok(result)
	}

	/// Reads a varint-prefixed byte string.
	pub fn read_var_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
		let len = self.read_var_int()? as usize;
		self.read_bytes_named(len, "var_bytes")
	}

	/// Reads a Neo-style variable-length integer.
	///
	/// `b<0xFD` is the literal value; `0xFD` is followed by a `u16`; `0xFE` by
	/// a `u32`; `0xFF` by a `u64`.
	pub fn read_var_int(&mut self) -> Result<u64, CodecError> {
		let first = self.read_u8()?;
		match first {
			0xfd => Ok(self.read_u16()? as u64),
			0xfe => Ok(self.read_u32()? as u64),
			0xff => self.read_u64(),
			_ => Ok(first as u64),
		}
	}

	/// Reads a varbytes payload and interprets it as UTF-8.
	pub fn read_var_string(&mut self) -> Result<String, CodecError> {
		let bytes = self.read_var_bytes()?;
		String::from_utf8(bytes).map_err(|e| CodecError::InvalidEncoding(e.to_string()))
	}

	/// Reads a fixed-width, zero-padded UTF-8 string of `size` bytes.
	pub fn read_fixed_string(&mut self, size: usize) -> Result<String, CodecError> {
		let bytes = self.read_bytes_named(size, "fixed_string")?;
		let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
		String::from_utf8(bytes[..end].to_vec()).map_err(|e| CodecError::InvalidEncoding(e.to_string()))
	}

	/// Reads a `PUSHDATA1/2/4`-prefixed byte string as emitted by the script builder.
	pub fn read_push_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
		let opcode = self.read_u8()?;
		let len = match OpCode::try_from(opcode)? {
			OpCode::PushData1 => self.read_u8()? as usize,
			OpCode::PushData2 => self.read_u16()? as usize,
			OpCode::PushData4 => self.read_u32()? as usize,
			_ => return Err(CodecError::InvalidOpCode(opcode as u32)),
		};
		self.read_bytes(len)
	}

	/// Reads a `PUSHM1..PUSH16`/`PUSHINT8..256` encoded integer.
	pub fn read_push_int(&mut self) -> Result<BigInt, CodecError> {
		let byte = self.read_u8()?;

		if (OpCode::PushM1 as u8..=OpCode::Push16 as u8).contains(&byte) {
			return Ok(BigInt::from(byte as i16 - OpCode::Push0 as i16));
		}

		let count = match OpCode::try_from(byte)? {
			OpCode::PushInt8 => 1,
			OpCode::PushInt16 => 2,
			OpCode::PushInt32 => 4,
			OpCode::PushInt64 => 8,
			OpCode::PushInt128 => 16,
			OpCode::PushInt256 => 32,
			_ => return Err(CodecError::InvalidOpCode(byte as u32)),
		};

		let mut bytes = self.read_bytes(count)?;
		bytes.reverse(); // little-endian on the wire, BigInt wants big-endian
		Ok(BigInt::from_signed_bytes_be(&bytes))
	}

	/// Reads a push-encoded string (`read_push_bytes` interpreted as UTF-8).
	pub fn read_push_string(&mut self) -> Result<String, CodecError> {
		let bytes = self.read_push_bytes()?;
		String::from_utf8(bytes).map_err(|e| CodecError::InvalidEncoding(e.to_string()))
	}

	/// Reads a single `NeoSerializable` value.
	pub fn read_serializable<T: NeoSerializable>(&mut self) -> Result<T, CodecError> {
		T::decode(self)
	}

	/// Reads a varint-prefixed list of `NeoSerializable` values.
	pub fn read_serializable_list<T: NeoSerializable>(&mut self) -> Result<Vec<T>, CodecError> {
		let len = self.read_var_int()?;
		let mut list = Vec::with_capacity(len as usize);
		for _ in 0..len {
			list.push(T::decode(self)?);
		}
		Ok(list)
	}

	pub fn mark(&mut self) {
		self.marker = self.pointer;
	}

	pub fn reset(&mut self) {
		self.pointer = self.marker;
	}

	/// Number of unread bytes remaining.
	pub fn available(&self) -> usize {
		self.data.len() - self.pointer
	}

	/// Whether the decoder has consumed every byte in its input.
	pub fn is_done(&self) -> bool {
		self.pointer == self.data.len()
	}

	/// Returns the raw input bytes in `[start, end)`, for callers that need
	/// to re-hash or re-validate a span they've already parsed (e.g. NEF
	/// checksum verification over the bytes preceding the checksum field).
	pub fn data_slice(&self, start: usize, end: usize) -> &'a [u8] {
		&self.data[start..end]
	}
}

#[cfg(test)]
mod tests {
	use crate::binary_decoder::Decoder;
	use num_bigint::BigInt;

	#[test]
	fn test_read_push_data_bytes() {
		let prefix_count_map = [
			(hex::decode("0c01").unwrap(), 1),
			(hex::decode("0cff").unwrap(), 255),
			(hex::decode("0d0001").unwrap(), 256),
			(hex::decode("0d0010").unwrap(), 4096),
			(hex::decode("0e00000100").unwrap(), 65536),
		];

		for (prefix, count) in prefix_count_map {
			let bytes = vec![1u8; count];
			let data = [prefix.as_slice(), bytes.as_slice()].concat();
			assert_eq!(Decoder::new(&data).read_push_bytes().unwrap(), bytes);
		}
	}

	#[test]
	fn test_fail_read_push_data() {
		let data = hex::decode("4b010000").unwrap();
		assert!(Decoder::new(&data).read_push_bytes().is_err());
	}

	#[test]
	fn test_read_push_data_string() {
		let empty = hex::decode("0c00").unwrap();
		assert_eq!(Decoder::new(&empty).read_push_string().unwrap(), "");

		let a = hex::decode("0c0161").unwrap();
		assert_eq!(Decoder::new(&a).read_push_string().unwrap(), "a");

		let bytes = vec![0x61u8; 10000];
		let input = [hex::decode("0e10270000").unwrap(), bytes.clone()].concat();
		let expected = String::from_utf8(bytes).unwrap();

		assert_eq!(Decoder::new(&input).read_push_string().unwrap(), expected);
	}

	#[test]
	fn test_read_push_data_big_integer() {
		let zero = hex::decode("10").unwrap();
		assert_eq!(Decoder::new(&zero).read_push_int().unwrap(), BigInt::from(0));

		let one = hex::decode("11").unwrap();
		assert_eq!(Decoder::new(&one).read_push_int().unwrap(), BigInt::from(1));

		let minus_one = hex::decode("0f").unwrap();
		assert_eq!(Decoder::new(&minus_one).read_push_int().unwrap(), BigInt::from(-1));

		let sixteen = hex::decode("20").unwrap();
		assert_eq!(Decoder::new(&sixteen).read_push_int().unwrap(), BigInt::from(16));
	}

	#[test]
	fn test_read_u32_little_endian() {
		let max = [0xffu8; 4];
		assert_eq!(Decoder::new(&max).read_u32().unwrap(), 4_294_967_295);

		let one = hex::decode("01000000").unwrap();
		assert_eq!(Decoder::new(&one).read_u32().unwrap(), 1);

		let zero = [0u8; 4];
		assert_eq!(Decoder::new(&zero).read_u32().unwrap(), 0);
	}

	#[test]
	fn test_read_i64_little_endian() {
		let min = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80];
		assert_eq!(Decoder::new(&min).read_i64().unwrap(), i64::MIN);

		let max = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f];
		assert_eq!(Decoder::new(&max).read_i64().unwrap(), i64::MAX);

		let zero = [0x00; 8];
		assert_eq!(Decoder::new(&zero).read_i64().unwrap(), 0);
	}

	#[test]
	fn test_var_int_forms() {
		assert_eq!(Decoder::new(&[0xfc]).read_var_int().unwrap(), 0xfc);
		assert_eq!(Decoder::new(&[0xfd, 0x00, 0x01]).read_var_int().unwrap(), 256);
		assert_eq!(
			Decoder::new(&[0xfe, 0x00, 0x00, 0x01, 0x00]).read_var_int().unwrap(),
			0x0001_0000
		);
	}

	#[test]
	fn test_deserialized_verification_script_length_256() {
		let mut data = vec![0xfd, 0x00, 0x01];
		data.extend(std::iter::repeat(0x01u8).take(256));
		let mut decoder = Decoder::new(&data);
		let payload = decoder.read_var_bytes().unwrap();
		assert_eq!(payload, vec![0x01u8; 256]);
		assert!(decoder.is_done());
	}

	#[test]
	fn reads_on_empty_or_truncated_input_fail_instead_of_panicking() {
		assert!(Decoder::new(&[]).read_u8().is_err());
		assert!(Decoder::new(&[]).read_bool().is_err());
		assert!(Decoder::new(&[]).read_var_int().is_err());
		assert!(Decoder::new(&[0xfd, 0x00]).read_var_int().is_err());
		assert!(Decoder::new(&[0x03, 0x01, 0x02]).read_var_bytes().is_err());
	}
}

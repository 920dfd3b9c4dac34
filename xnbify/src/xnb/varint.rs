//! 7-bit encoded integers as used by .NET `BinaryWriter`.
//!
//! Each byte carries 7 payload bits, least significant group first. Every
//! byte except the last has its high bit set. XNA's `ContentReader` decodes
//! counts and string lengths with `Read7BitEncodedInt`, so this must match
//! that convention exactly.

use std::io::{self, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

/// Longest encoding of a 32-bit value.
pub const MAX_ENCODED_LEN: usize = 5;

/// Number of bytes `value` occupies once encoded.
pub const fn encoded_len(value: u32) -> usize {
    let mut remaining = value;
    let mut len = 1;
    while remaining >= 0x80 {
        remaining >>= 7;
        len += 1;
    }
    len
}

/// Write `value` as a 7-bit encoded integer.
pub fn write_7bit_encoded_int<W: Write + ?Sized>(writer: &mut W, value: u32) -> io::Result<()> {
    let mut remaining = value;
    while remaining >= 0x80 {
        writer.write_u8((remaining & 0x7F) as u8 | 0x80)?;
        remaining >>= 7;
    }
    writer.write_u8(remaining as u8)
}

/// Read a 7-bit encoded integer.
///
/// Fails with `InvalidData` if the encoding runs past five bytes or the
/// fifth byte carries bits beyond the 32-bit range.
pub fn read_7bit_encoded_int<R: Read + ?Sized>(reader: &mut R) -> io::Result<u32> {
    let mut value: u32 = 0;
    for index in 0..MAX_ENCODED_LEN {
        let byte = reader.read_u8()?;
        if index == MAX_ENCODED_LEN - 1 && byte > 0x0F {
            break;
        }
        value |= u32::from(byte & 0x7F) << (7 * index);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        "malformed 7-bit encoded integer",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(value: u32) -> Vec<u8> {
        let mut out = Vec::new();
        write_7bit_encoded_int(&mut out, value).unwrap();
        out
    }

    #[test]
    fn test_single_byte_values() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(0x7F), vec![0x7F]);
    }

    #[test]
    fn test_continuation_bit_is_set() {
        assert_eq!(encode(0x80), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xAC, 0x02]);
        assert_eq!(encode(16_384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_texture_reader_name_length() {
        // The Texture2DReader name is 148 bytes long
        assert_eq!(encode(148), vec![0x94, 0x01]);
    }

    #[test]
    fn test_max_value_uses_five_bytes() {
        assert_eq!(encode(u32::MAX), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        assert_eq!(encoded_len(u32::MAX), MAX_ENCODED_LEN);
    }

    #[test]
    fn test_encoded_len_matches_output() {
        for value in [0, 1, 127, 128, 148, 16_383, 16_384, 2_097_152, u32::MAX] {
            assert_eq!(encoded_len(value), encode(value).len(), "value {}", value);
        }
    }

    #[test]
    fn test_read_decodes_multi_byte() {
        let mut cursor = Cursor::new(vec![0xAC, 0x02, 0xFF]);
        assert_eq!(read_7bit_encoded_int(&mut cursor).unwrap(), 300);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_read_rejects_overlong_encoding() {
        let mut cursor = Cursor::new(vec![0x80, 0x80, 0x80, 0x80, 0x80, 0x01]);
        let err = read_7bit_encoded_int(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_rejects_out_of_range_fifth_byte() {
        let mut cursor = Cursor::new(vec![0xFF, 0xFF, 0xFF, 0xFF, 0x1F]);
        assert!(read_7bit_encoded_int(&mut cursor).is_err());
    }

    #[test]
    fn test_read_truncated_input_is_eof() {
        let mut cursor = Cursor::new(vec![0x80]);
        let err = read_7bit_encoded_int(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}

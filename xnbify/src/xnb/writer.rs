//! Binary XNB writer.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use super::{varint, TypeReaderEntry, XnbHeader, FORMAT, SURFACE_FORMAT_COLOR};

/// Writes XNB container sections to an underlying byte sink.
///
/// The writer does not buffer; wrap files in a `BufWriter`.
pub struct XnbWriter<W: Write> {
    writer: W,
}

impl<W: Write> XnbWriter<W> {
    /// Create a new XNB writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write magic, platform, version and flags, followed by the file size
    /// when one is given.
    pub fn write_header(&mut self, header: &XnbHeader) -> io::Result<()> {
        self.writer.write_all(&FORMAT.magic)?;
        self.writer.write_u8(header.platform.as_byte())?;
        self.writer.write_u8(header.version)?;
        self.writer.write_u8(header.flags.bits())?;
        if let Some(file_size) = header.file_size {
            self.writer.write_u32::<LittleEndian>(file_size)?;
        }
        Ok(())
    }

    /// Write a .NET 7-bit encoded integer.
    pub fn write_7bit_encoded_int(&mut self, value: u32) -> io::Result<()> {
        varint::write_7bit_encoded_int(&mut self.writer, value)
    }

    /// Write a string as a 7-bit encoded byte length plus UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) -> io::Result<()> {
        let len = u32::try_from(value.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "string too long for XNB")
        })?;
        self.write_7bit_encoded_int(len)?;
        self.writer.write_all(value.as_bytes())
    }

    /// Write the type reader table.
    pub fn write_type_readers(&mut self, readers: &[TypeReaderEntry]) -> io::Result<()> {
        self.write_7bit_encoded_int(readers.len() as u32)?;
        for reader in readers {
            self.write_string(&reader.name)?;
            self.writer.write_i32::<LittleEndian>(reader.version)?;
        }
        Ok(())
    }

    /// Write the shared resource count.
    pub fn write_shared_resource_count(&mut self, count: u32) -> io::Result<()> {
        self.write_7bit_encoded_int(count)
    }

    /// Write a single-level Color `Texture2D` object referencing the first
    /// type reader.
    pub fn write_texture_2d(&mut self, width: u32, height: u32, pixels: &[u8]) -> io::Result<()> {
        let data_len = u32::try_from(pixels.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "pixel data exceeds 4 GiB")
        })?;

        self.writer.write_u8(1)?; // type id + 1
        self.writer.write_i32::<LittleEndian>(SURFACE_FORMAT_COLOR)?;
        self.writer.write_u32::<LittleEndian>(width)?;
        self.writer.write_u32::<LittleEndian>(height)?;
        self.writer.write_u32::<LittleEndian>(1)?; // mip count
        self.writer.write_u32::<LittleEndian>(data_len)?;
        self.writer.write_all(pixels)
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xnb::{EncodeOptions, Profile};

    #[test]
    fn test_write_header_uncompressed() {
        let mut writer = XnbWriter::new(Vec::new());
        let header = XnbHeader::new(&EncodeOptions::default(), Some(0x0102_0304));
        writer.write_header(&header).unwrap();

        assert_eq!(
            writer.into_inner(),
            vec![b'X', b'N', b'B', b'w', 5, 0x00, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_write_header_without_size() {
        let mut writer = XnbWriter::new(Vec::new());
        let options = EncodeOptions::new()
            .with_profile(Profile::HiDef)
            .with_compressed(true);
        writer.write_header(&XnbHeader::new(&options, None)).unwrap();

        assert_eq!(writer.into_inner(), b"XNBw\x05\x81".to_vec());
    }

    #[test]
    fn test_write_string_prefixes_byte_length() {
        let mut writer = XnbWriter::new(Vec::new());
        writer.write_string("héllo").unwrap();

        let bytes = writer.into_inner();
        assert_eq!(bytes[0], 6);
        assert_eq!(&bytes[1..], "héllo".as_bytes());
    }

    #[test]
    fn test_write_type_readers() {
        let mut writer = XnbWriter::new(Vec::new());
        writer
            .write_type_readers(&[TypeReaderEntry::texture_2d()])
            .unwrap();

        let bytes = writer.into_inner();
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..3], &[0x94, 0x01]);
        assert_eq!(&bytes[3..151], FORMAT.texture_reader.as_bytes());
        assert_eq!(&bytes[151..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_write_texture_2d() {
        let mut writer = XnbWriter::new(Vec::new());
        writer
            .write_texture_2d(1, 1, &[0xAA, 0xBB, 0xCC, 0xDD])
            .unwrap();

        assert_eq!(
            writer.into_inner(),
            vec![
                1, // type id
                0, 0, 0, 0, // surface format
                1, 0, 0, 0, // width
                1, 0, 0, 0, // height
                1, 0, 0, 0, // mip count
                4, 0, 0, 0, // data length
                0xAA, 0xBB, 0xCC, 0xDD,
            ]
        );
    }
}

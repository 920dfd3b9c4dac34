//! Binary XNB reader for single-texture containers.
//!
//! Mirrors what the runtime's `ContentReader` does for a `Texture2D` asset
//! so that written files can be checked without the runtime.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use super::counted::Counted;
use super::{
    varint, Platform, TypeReaderEntry, XnbError, XnbFlags, XnbHeader, XnbResult, FORMAT,
    SURFACE_FORMAT_COLOR,
};

/// A decoded `Texture2D` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XnbTexture {
    pub header: XnbHeader,
    pub type_readers: Vec<TypeReaderEntry>,
    pub shared_resource_count: u32,
    pub surface_format: i32,
    pub width: u32,
    pub height: u32,
    /// Pixel data per mip level, largest first.
    pub mip_levels: Vec<Vec<u8>>,
}

impl XnbTexture {
    /// Parse a complete container from memory.
    pub fn decode(bytes: &[u8]) -> XnbResult<Self> {
        XnbReader::new(bytes).read_texture()
    }

    /// Pixel data of the top mip level.
    pub fn pixels(&self) -> &[u8] {
        self.mip_levels.first().map(Vec::as_slice).unwrap_or_default()
    }
}

/// Reader for XNB containers.
pub struct XnbReader<R: Read> {
    reader: Counted<R>,
}

impl<R: Read> XnbReader<R> {
    /// Create a new XNB reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: Counted::new(reader),
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Read and validate the header.
    ///
    /// Compressed containers are rejected before the size field, matching
    /// the point where their layouts diverge.
    pub fn read_header(&mut self) -> XnbResult<XnbHeader> {
        let mut magic = [0u8; 3];
        self.reader.read_exact(&mut magic)?;
        if magic != FORMAT.magic {
            return Err(XnbError::InvalidMagic(magic));
        }

        let platform = Platform::from_byte(self.reader.read_u8()?);
        let version = self.reader.read_u8()?;
        if version != FORMAT.version {
            return Err(XnbError::UnsupportedVersion(version));
        }

        let flags = XnbFlags::from_bits_retain(self.reader.read_u8()?);
        if flags.is_compressed() {
            return Err(XnbError::Compressed);
        }

        let file_size = self.reader.read_u32::<LittleEndian>()?;
        Ok(XnbHeader {
            platform,
            version,
            flags,
            file_size: Some(file_size),
        })
    }

    /// Read a .NET 7-bit encoded integer.
    pub fn read_7bit_encoded_int(&mut self) -> XnbResult<u32> {
        Ok(varint::read_7bit_encoded_int(&mut self.reader)?)
    }

    /// Read a 7-bit length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> XnbResult<String> {
        let len = self.read_7bit_encoded_int()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes).map_err(|_| XnbError::InvalidString)
    }

    /// Read the type reader table.
    pub fn read_type_readers(&mut self) -> XnbResult<Vec<TypeReaderEntry>> {
        let count = self.read_7bit_encoded_int()?;
        let mut readers = Vec::new();
        for _ in 0..count {
            let name = self.read_string()?;
            let version = self.reader.read_i32::<LittleEndian>()?;
            readers.push(TypeReaderEntry { name, version });
        }
        Ok(readers)
    }

    /// Read a full container whose primary asset is a `Texture2D`.
    pub fn read_texture(mut self) -> XnbResult<XnbTexture> {
        let header = self.read_header()?;
        let type_readers = self.read_type_readers()?;
        let shared_resource_count = self.read_7bit_encoded_int()?;

        let type_id = self.reader.read_u8()?;
        let reader = match (type_id as usize).checked_sub(1) {
            Some(index) if index < type_readers.len() => &type_readers[index],
            _ => {
                return Err(XnbError::InvalidTypeId {
                    type_id,
                    readers: type_readers.len(),
                })
            }
        };
        if !reader.is_texture_2d() {
            return Err(XnbError::NotTexture2D(reader.name.clone()));
        }

        let surface_format = self.reader.read_i32::<LittleEndian>()?;
        if surface_format != SURFACE_FORMAT_COLOR {
            return Err(XnbError::UnsupportedSurfaceFormat(surface_format));
        }

        let width = self.reader.read_u32::<LittleEndian>()?;
        let height = self.reader.read_u32::<LittleEndian>()?;
        let mip_count = self.reader.read_u32::<LittleEndian>()?;

        let mut mip_levels = Vec::new();
        for level in 0..mip_count as usize {
            let actual = self.reader.read_u32::<LittleEndian>()?;
            let expected = level_size(width, height, level);
            if u64::from(actual) != expected {
                return Err(XnbError::InvalidLevelSize {
                    level,
                    expected,
                    actual,
                });
            }
            mip_levels.push(self.read_bytes(actual as usize)?);
        }

        // Trailing bytes count towards the size check
        let mut rest = Vec::new();
        self.reader.read_to_end(&mut rest)?;

        if let Some(declared) = header.file_size {
            let actual = self.position();
            if u64::from(declared) != actual {
                return Err(XnbError::SizeMismatch { declared, actual });
            }
        }

        Ok(XnbTexture {
            header,
            type_readers,
            shared_resource_count,
            surface_format,
            width,
            height,
            mip_levels,
        })
    }

    fn read_bytes(&mut self, len: usize) -> XnbResult<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(buf)
    }
}

/// Color byte size of mip `level` for a `width`×`height` base level.
fn level_size(width: u32, height: u32, level: usize) -> u64 {
    let shift = u32::try_from(level).unwrap_or(u32::MAX);
    let w = u64::from(width.checked_shr(shift).unwrap_or(0).max(1));
    let h = u64::from(height.checked_shr(shift).unwrap_or(0).max(1));
    w * h * 4
}

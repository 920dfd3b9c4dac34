//! XNB container format.
//!
//! Layout of an uncompressed XNB file holding a single `Texture2D`:
//!
//! ```text
//! "XNB" | platform | version | flags | file size (u32)
//! type reader count (7-bit) | reader name (7-bit len + UTF-8) | reader version (i32)
//! shared resource count (7-bit)
//! type id + 1 (u8) | surface format (i32) | width | height | mip count
//! per mip: data length (u32) | pixel bytes
//! ```
//!
//! All fixed-width integers are little-endian.

mod counted;
mod error;
mod reader;
pub mod varint;
mod writer;

use std::fmt;
use std::str::FromStr;

pub(crate) use counted::Counted;
pub use error::{XnbError, XnbResult};
pub use reader::{XnbReader, XnbTexture};
pub use writer::XnbWriter;

/// Size of magic, platform, version and flags.
pub const HEADER_SIZE: usize = 6;

/// Size of the total file size field present in uncompressed files.
pub const FILE_SIZE_FIELD_SIZE: usize = 4;

/// Size of a `Texture2D` object before its pixel bytes: type id, surface
/// format, width, height, mip count and the first level's data length.
pub const TEXTURE_OBJECT_HEADER_SIZE: usize = 1 + 4 + 4 + 4 + 4 + 4;

/// `SurfaceFormat.Color`: 32-bit RGBA, 8 bits per channel.
pub const SURFACE_FORMAT_COLOR: i32 = 0;

/// Fixed constants describing the containers this crate produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XnbFormat {
    /// Format identifier at the start of every file.
    pub magic: [u8; 3],
    /// XNB format version (XNA Game Studio 4.0).
    pub version: u8,
    /// Assembly-qualified name of the runtime's texture reader.
    pub texture_reader: &'static str,
    /// Version of the texture reader.
    pub texture_reader_version: i32,
}

impl XnbFormat {
    /// Bytes in a single-texture container that are not pixel data.
    pub const fn metadata_size(&self) -> usize {
        let name_len = self.texture_reader.len();
        HEADER_SIZE
            + FILE_SIZE_FIELD_SIZE
            + varint::encoded_len(1)
            + varint::encoded_len(name_len as u32)
            + name_len
            + 4
            + varint::encoded_len(0)
            + TEXTURE_OBJECT_HEADER_SIZE
    }
}

/// The XNA 4.0 texture container format.
pub const FORMAT: XnbFormat = XnbFormat {
    magic: *b"XNB",
    version: 5,
    texture_reader: "Microsoft.Xna.Framework.Content.Texture2DReader, Microsoft.Xna.Framework.Graphics, Version=4.0.0.0, Culture=neutral, PublicKeyToken=842cf8be1de50553",
    texture_reader_version: 0,
};

bitflags::bitflags! {
    /// XNB header flag bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct XnbFlags: u8 {
        /// Content targets the HiDef graphics profile (clear means Reach).
        const HIDEF = 0x01;
        /// Payload is LZ4 compressed (MonoGame extension).
        const COMPRESSED_LZ4 = 0x40;
        /// Payload is LZX compressed.
        const COMPRESSED = 0x80;
    }
}

impl XnbFlags {
    /// Whether either compression bit is set.
    pub fn is_compressed(self) -> bool {
        self.intersects(Self::COMPRESSED | Self::COMPRESSED_LZ4)
    }
}

/// Target platform identifier byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Microsoft Windows (`'w'`).
    Windows,
    /// Windows Phone 7 (`'m'`).
    WindowsPhone,
    /// Xbox 360 (`'x'`).
    Xbox360,
    /// Any other platform code, e.g. MonoGame targets.
    Other(u8),
}

impl Platform {
    /// The identifier byte written to the header.
    pub fn as_byte(self) -> u8 {
        match self {
            Platform::Windows => b'w',
            Platform::WindowsPhone => b'm',
            Platform::Xbox360 => b'x',
            Platform::Other(code) => code,
        }
    }

    /// Parse a header identifier byte.
    pub fn from_byte(code: u8) -> Self {
        match code {
            b'w' => Platform::Windows,
            b'm' => Platform::WindowsPhone,
            b'x' => Platform::Xbox360,
            other => Platform::Other(other),
        }
    }
}

/// Graphics capability tier the content is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Reach,
    HiDef,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Reach => write!(f, "reach"),
            Profile::HiDef => write!(f, "hidef"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reach" => Ok(Profile::Reach),
            "hidef" => Ok(Profile::HiDef),
            other => Err(format!(
                "unknown profile '{}', expected 'reach' or 'hidef'",
                other
            )),
        }
    }
}

/// Options controlling how a texture is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Request a compressed container. Always rejected by the encoder.
    pub compressed: bool,
    /// Graphics profile recorded in the header flags.
    pub profile: Profile,
}

impl EncodeOptions {
    /// Create options for an uncompressed Reach container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the graphics profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Set whether compression is requested.
    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    /// Header flag bits for these options.
    pub fn flags(&self) -> XnbFlags {
        let mut flags = XnbFlags::empty();
        if self.profile == Profile::HiDef {
            flags |= XnbFlags::HIDEF;
        }
        if self.compressed {
            flags |= XnbFlags::COMPRESSED;
        }
        flags
    }
}

/// Fixed-size container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XnbHeader {
    pub platform: Platform,
    pub version: u8,
    pub flags: XnbFlags,
    /// Total file size; only written for uncompressed containers.
    pub file_size: Option<u32>,
}

impl XnbHeader {
    /// Header for a Windows container with the given options.
    pub fn new(options: &EncodeOptions, file_size: Option<u32>) -> Self {
        Self {
            platform: Platform::Windows,
            version: FORMAT.version,
            flags: options.flags(),
            file_size,
        }
    }

    /// The graphics profile encoded in the flags.
    pub fn profile(&self) -> Profile {
        if self.flags.contains(XnbFlags::HIDEF) {
            Profile::HiDef
        } else {
            Profile::Reach
        }
    }
}

/// A named, versioned deserializer descriptor from the type reader table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReaderEntry {
    pub name: String,
    pub version: i32,
}

impl TypeReaderEntry {
    /// The runtime's `Texture2DReader`.
    pub fn texture_2d() -> Self {
        Self {
            name: FORMAT.texture_reader.to_string(),
            version: FORMAT.texture_reader_version,
        }
    }

    /// Whether this entry names a `Texture2DReader`, ignoring assembly details.
    pub fn is_texture_2d(&self) -> bool {
        let type_name = self.name.split(',').next().unwrap_or_default().trim();
        type_name == "Microsoft.Xna.Framework.Content.Texture2DReader"
    }
}

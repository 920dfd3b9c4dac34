//! Error types for XNB container parsing.

use thiserror::Error;

/// Result type for XNB operations.
pub type XnbResult<T> = Result<T, XnbError>;

/// Errors raised while reading an XNB container.
#[derive(Debug, Error)]
pub enum XnbError {
    /// I/O error, including truncated input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with "XNB".
    #[error("invalid magic bytes {0:02X?}, expected \"XNB\"")]
    InvalidMagic([u8; 3]),

    /// Format version other than XNA 4.0.
    #[error("unsupported XNB format version {0}")]
    UnsupportedVersion(u8),

    /// LZX/LZ4 compressed payloads are not supported.
    #[error("compressed XNB files are not supported")]
    Compressed,

    /// A length-prefixed string was not valid UTF-8.
    #[error("invalid UTF-8 in type reader name")]
    InvalidString,

    /// The primary object does not use a Texture2D reader.
    #[error("primary asset is not a Texture2D (reader: {0})")]
    NotTexture2D(String),

    /// The object's type id does not reference a registered reader.
    #[error("type id {type_id} out of range ({readers} readers)")]
    InvalidTypeId { type_id: u8, readers: usize },

    /// The texture uses a surface format other than Color.
    #[error("unsupported surface format {0}")]
    UnsupportedSurfaceFormat(i32),

    /// Mip level data length disagrees with the dimensions.
    #[error("mip level {level} has {actual} bytes, expected {expected}")]
    InvalidLevelSize {
        level: usize,
        expected: u64,
        actual: u32,
    },

    /// Header file size disagrees with the bytes actually present.
    #[error("header declares {declared} bytes but container holds {actual}")]
    SizeMismatch { declared: u32, actual: u64 },
}

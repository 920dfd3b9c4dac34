//! Error types for texture encoding operations.

use std::fmt;
use std::io;

/// Errors that can occur during texture normalization and encoding.
#[derive(Debug)]
pub enum TextureError {
    /// Image dimensions are invalid for encoding.
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: String,
    },
    /// Pixel buffer length does not match the dimensions.
    BufferSize { expected: u64, actual: usize },
    /// Unsupported container feature.
    Unsupported(String),
    /// Writing to the output sink failed.
    Io(io::Error),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::InvalidDimensions {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid dimensions {}×{}: {}", width, height, reason)
            }
            TextureError::BufferSize { expected, actual } => write!(
                f,
                "Pixel buffer holds {} bytes, expected {}",
                actual, expected
            ),
            TextureError::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            TextureError::Io(err) => write!(f, "Write failed: {}", err),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TextureError {
    fn from(err: io::Error) -> Self {
        TextureError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_texture_error_display_invalid_dimensions() {
        let err = TextureError::InvalidDimensions {
            width: 0,
            height: 200,
            reason: "image has no pixels".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions 0×200: image has no pixels"
        );
    }

    #[test]
    fn test_texture_error_display_buffer_size() {
        let err = TextureError::BufferSize {
            expected: 16,
            actual: 12,
        };
        assert_eq!(err.to_string(), "Pixel buffer holds 12 bytes, expected 16");
    }

    #[test]
    fn test_texture_error_display_unsupported() {
        let err = TextureError::Unsupported("LZX compression".to_string());
        assert_eq!(err.to_string(), "Unsupported: LZX compression");
    }

    #[test]
    fn test_texture_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::WriteZero, "disk full");
        let err: TextureError = io_err.into();
        assert!(matches!(err, TextureError::Io(_)));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Write failed: disk full");
    }
}

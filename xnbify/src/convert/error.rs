//! Error types for the conversion layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::texture::TextureError;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that can occur while converting images to XNB files.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input is missing, unreadable, or not a decodable image.
    #[error("failed to read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A container feature was requested that this tool cannot produce.
    #[error("{0}")]
    Unsupported(String),

    /// Arguments are missing or inconsistent.
    #[error("{0}")]
    Usage(String),

    /// The destination could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The image could not be encoded.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: TextureError,
    },

    /// A written file did not decode back to the source image.
    #[error("verification of {} failed: {reason}", path.display())]
    Verify { path: PathBuf, reason: String },
}

impl ConvertError {
    /// Wrap an I/O error on an input path.
    pub(crate) fn input_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConvertError::Input {
            path: path.into(),
            source: image::ImageError::IoError(source),
        }
    }

    /// Classify an encoder failure while writing `path`.
    pub(crate) fn from_texture(path: impl Into<PathBuf>, err: TextureError) -> Self {
        match err {
            TextureError::Unsupported(msg) => ConvertError::Unsupported(msg),
            TextureError::Io(source) => ConvertError::Output {
                path: path.into(),
                source,
            },
            other => ConvertError::Encode {
                path: path.into(),
                source: other,
            },
        }
    }

    /// Whether this error stems from how the tool was invoked.
    pub fn is_usage(&self) -> bool {
        matches!(self, ConvertError::Usage(_))
    }
}

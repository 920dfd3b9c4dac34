//! XNB texture encoder implementation.
//!
//! Provides a `TextureEncoder` that writes a canonical RGBA image as an
//! uncompressed XNB container holding one `Texture2D` with Color surface
//! format and a single mip level.

use std::io::Write;

use tracing::debug;

use crate::canonical::CanonicalImage;
use crate::texture::{TextureEncoder, TextureError};
use crate::xnb::{EncodeOptions, Profile, TypeReaderEntry, XnbHeader, XnbWriter, FORMAT};

/// XNB texture encoder.
///
/// # Example
///
/// ```
/// use xnbify::texture::{TextureEncoder, XnbTextureEncoder};
/// use xnbify::xnb::{EncodeOptions, Profile};
///
/// let encoder = XnbTextureEncoder::new(EncodeOptions::new().with_profile(Profile::HiDef));
///
/// assert_eq!(encoder.extension(), "xnb");
/// assert_eq!(encoder.name(), "XNB Texture2D (HiDef)");
/// assert_eq!(encoder.expected_size(2, 1), 187 + 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct XnbTextureEncoder {
    options: EncodeOptions,
}

impl XnbTextureEncoder {
    /// Create a new XNB encoder with the given options.
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Get the encoding options.
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Total container size for `pixel_bytes` bytes of pixel data, if it
    /// fits the header's 32-bit size field.
    fn file_size(pixel_bytes: usize) -> Option<u32> {
        FORMAT
            .metadata_size()
            .checked_add(pixel_bytes)
            .and_then(|size| u32::try_from(size).ok())
    }
}

impl TextureEncoder for XnbTextureEncoder {
    fn encode_to(&self, image: &CanonicalImage, sink: &mut dyn Write) -> Result<(), TextureError> {
        let mut writer = XnbWriter::new(sink);

        if self.options.compressed {
            writer.write_header(&XnbHeader::new(&self.options, None))?;
            return Err(TextureError::Unsupported(
                "compressed XNB files are not supported".to_string(),
            ));
        }

        let file_size = Self::file_size(image.pixel_data_len()).ok_or_else(|| {
            TextureError::InvalidDimensions {
                width: image.width(),
                height: image.height(),
                reason: "container would exceed 4 GiB".to_string(),
            }
        })?;

        debug!(
            width = image.width(),
            height = image.height(),
            file_size,
            profile = %self.options.profile,
            "Writing XNB texture"
        );

        writer.write_header(&XnbHeader::new(&self.options, Some(file_size)))?;
        writer.write_type_readers(&[TypeReaderEntry::texture_2d()])?;
        writer.write_shared_resource_count(0)?;
        writer.write_texture_2d(image.width(), image.height(), image.pixels())?;
        writer.flush()?;
        Ok(())
    }

    fn expected_size(&self, width: u32, height: u32) -> usize {
        FORMAT.metadata_size() + width as usize * height as usize * 4
    }

    fn extension(&self) -> &str {
        "xnb"
    }

    fn name(&self) -> &str {
        match self.options.profile {
            Profile::Reach => "XNB Texture2D (Reach)",
            Profile::HiDef => "XNB Texture2D (HiDef)",
        }
    }
}

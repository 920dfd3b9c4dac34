//! Canonical pixel layout.
//!
//! Every encoder in this crate consumes [`CanonicalImage`]: 8-bit RGBA,
//! straight (non-premultiplied) alpha, row-major from the top row. Decoded
//! images in any other representation are converted into it here.
//!
//! Fully transparent pixels also have their color channels cleared, so two
//! images that look identical encode to identical bytes regardless of what
//! color data the source kept behind alpha 0.

use image::{ColorType, DynamicImage, RgbaImage};
use tracing::debug;

use crate::texture::TextureError;

/// An RGBA8 image ready for encoding.
///
/// Invariant: `width > 0`, `height > 0`, and the buffer holds exactly
/// `width * height * 4` bytes with transparent pixels cleared to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalImage {
    image: RgbaImage,
}

/// Whether a decoded image is already stored as 8-bit straight RGBA.
pub fn is_canonical_layout(image: &DynamicImage) -> bool {
    image.color() == ColorType::Rgba8
}

impl CanonicalImage {
    /// Normalize a decoded image.
    ///
    /// RGBA8 sources are taken over without copying; anything else is
    /// converted pixel by pixel into a new buffer of the same bounds.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, TextureError> {
        let zero_copy = is_canonical_layout(&image);
        let rgba = match image {
            DynamicImage::ImageRgba8(buffer) => buffer,
            other => other.to_rgba8(),
        };
        debug!(
            width = rgba.width(),
            height = rgba.height(),
            zero_copy,
            "Normalized image to RGBA8"
        );
        Self::from_rgba8(rgba)
    }

    /// Normalize an image that is already RGBA8.
    pub fn from_rgba8(mut image: RgbaImage) -> Result<Self, TextureError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimensions {
                width,
                height,
                reason: "image has no pixels".to_string(),
            });
        }
        clear_transparent(&mut image);
        Ok(Self { image })
    }

    /// Build from a raw RGBA8 buffer.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        let expected = u64::from(width) * u64::from(height) * 4;
        let actual = pixels.len();
        match RgbaImage::from_raw(width, height, pixels) {
            Some(image) if actual as u64 == expected => Self::from_rgba8(image),
            _ => Err(TextureError::BufferSize { expected, actual }),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel bytes in R, G, B, A order, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Length of the pixel payload, `width * height * 4`.
    pub fn pixel_data_len(&self) -> usize {
        self.pixels().len()
    }

    /// Borrow as an `image` buffer.
    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_inner(self) -> RgbaImage {
        self.image
    }
}

/// Zero the color channels of every pixel with alpha 0.
fn clear_transparent(image: &mut RgbaImage) {
    for pixel in image.chunks_exact_mut(4) {
        if pixel[3] == 0 {
            pixel[..3].fill(0);
        }
    }
}

//! Texture encoder trait.

use std::io::Write;

use crate::canonical::CanonicalImage;
use crate::texture::TextureError;

/// Encodes canonical RGBA images into a texture container format.
///
/// Implementations must be deterministic: the same image and settings
/// always produce identical bytes.
pub trait TextureEncoder: Send + Sync {
    /// Encode `image` into `sink`.
    ///
    /// On error the sink may hold a partial container; callers must discard it.
    fn encode_to(&self, image: &CanonicalImage, sink: &mut dyn Write) -> Result<(), TextureError>;

    /// Encode `image` into a new buffer.
    fn encode(&self, image: &CanonicalImage) -> Result<Vec<u8>, TextureError> {
        let mut out = Vec::with_capacity(self.expected_size(image.width(), image.height()));
        self.encode_to(image, &mut out)?;
        Ok(out)
    }

    /// Exact encoded size in bytes for an image of the given dimensions.
    fn expected_size(&self, width: u32, height: u32) -> usize;

    /// File extension for encoded output, without the dot.
    fn extension(&self) -> &str;

    /// Human-readable encoder name for logs.
    fn name(&self) -> &str;
}

//! xnbify - Raster image to XNB texture conversion
//!
//! This library turns decoded PNG/GIF/JPEG images into the XNB container
//! format read by the XNA / MonoGame content pipeline, without requiring
//! the pipeline's authoring toolchain.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────────┐    ┌────────────────────┐
//! │  convert    │───▶│ canonical        │───▶│ texture::XnbTexture│
//! │ (file I/O)  │    │ (RGBA8 normalize)│    │ Encoder → xnb      │
//! └─────────────┘    └──────────────────┘    └────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use xnbify::canonical::CanonicalImage;
//! use xnbify::texture::{TextureEncoder, XnbTextureEncoder};
//! use xnbify::xnb::EncodeOptions;
//!
//! let mut image = RgbaImage::new(2, 1);
//! image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
//! image.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
//!
//! let canonical = CanonicalImage::from_rgba8(image).unwrap();
//! let encoder = XnbTextureEncoder::new(EncodeOptions::default());
//! let bytes = encoder.encode(&canonical).unwrap();
//!
//! assert_eq!(&bytes[..3], b"XNB");
//! assert_eq!(&bytes[bytes.len() - 8..], &[0xFF, 0, 0, 0xFF, 0, 0xFF, 0, 0xFF]);
//! ```

pub mod canonical;
pub mod config;
pub mod convert;
pub mod texture;
pub mod xnb;

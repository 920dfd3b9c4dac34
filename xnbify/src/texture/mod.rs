//! Texture encoding abstractions.
//!
//! The [`TextureEncoder`] trait defines the interface for encoding
//! canonical RGBA images into texture containers, so the conversion layer
//! works with any encoder implementation without direct coupling.
//!
//! ```text
//! ┌─────────────────────┐
//! │  convert (file I/O) │
//! │                     │
//! │  &dyn TextureEncoder│
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  TextureEncoder     │ (trait)
//! └──────────┬──────────┘
//!            │
//!            ▼
//!    ┌───────────────┐
//!    │ XnbTexture    │
//!    │ Encoder       │
//!    └───────────────┘
//! ```
//!
//! # Available Encoders
//!
//! - [`XnbTextureEncoder`] - Uncompressed XNB `Texture2D`, Color format

mod encoder;
mod error;
mod xnb;

pub use encoder::TextureEncoder;
pub use error::TextureError;
pub use xnb::XnbTextureEncoder;

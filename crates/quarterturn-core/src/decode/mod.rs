//! Image decoding for quarterturn.
//!
//! This module provides functionality for:
//! - Loading an image file from disk, detecting its format from content
//! - Decoding an encoded image held in memory
//! - The [`DecodedImage`] representation shared by the rest of the crate
//!
//! # Architecture
//!
//! Decoding is delegated to the `image` crate. The decoded pixels are copied
//! into a [`DecodedImage`] that keeps the source pixel format (bit depth and
//! channel layout) so that later stages never resample or convert.
//!
//! # Examples
//!
//! ```ignore
//! use quarterturn_core::decode::load_image;
//!
//! let image = load_image("photo.png").unwrap();
//! println!("Decoded {}x{} {:?} image", image.width, image.height, image.format);
//! ```

mod file;
mod types;

pub use file::{decode_bytes, load_image};
pub use types::{DecodeError, DecodedImage, PixelFormat};

pub(crate) use types::expected_len;

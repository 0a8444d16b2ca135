//! Image encoding for quarterturn.
//!
//! This module provides functionality for:
//! - Choosing an output format from a destination path's extension
//! - Saving a [`DecodedImage`](crate::decode::DecodedImage) to disk
//! - Encoding to an in-memory buffer in an explicit format
//!
//! There is no implicit pixel conversion: if the target format cannot store
//! the image's channels or bit depth (for example alpha in JPEG), encoding is
//! refused before any codec runs. Encoding always happens in memory, so a
//! failed save leaves nothing on disk.
//!
//! # Examples
//!
//! ```ignore
//! use quarterturn_core::encode::save_image;
//!
//! save_image(&image, "rotated.png").unwrap();
//! ```

mod file;

pub use file::{
    encode_image, format_for_path, save_image, supports_pixel_format, EncodeError,
};

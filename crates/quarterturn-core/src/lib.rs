//! Quarterturn Core - quarter-turn image rotation library
//!
//! This crate provides the core functionality behind the `quarterturn`
//! command-line tool: decoding an image file into an in-memory
//! [`DecodedImage`], rotating it 90° clockwise, and encoding the result in
//! the format implied by the destination path.
//!
//! # Module Structure
//!
//! - `decode` - Image loading and the shared [`DecodedImage`] type
//! - `transform` - Exact 90° clockwise rotation and input normalization
//! - `encode` - Image saving with extension-based format selection

pub mod decode;
pub mod encode;
pub mod transform;

pub use decode::{decode_bytes, load_image, DecodeError, DecodedImage, PixelFormat};
pub use encode::{
    encode_image, format_for_path, save_image, supports_pixel_format, EncodeError,
};
pub use transform::{normalize, rotate, rotate_clockwise, ImageInput, TransformError};

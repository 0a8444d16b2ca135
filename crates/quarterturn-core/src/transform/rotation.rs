//! Exact quarter-turn rotation.
//!
//! Rotation by 90° clockwise is a pure index remap: no pixel is resampled
//! or interpolated, and the pixel format is preserved.
//!
//! # Algorithm
//!
//! For a W×H source, the destination canvas is H×W and
//! ```text
//! dst_x = H - 1 - src_y
//! dst_y = src_x
//! ```
//!
//! # Input normalization
//!
//! [`rotate`] accepts either a [`DecodedImage`] or a raw `u8` array shaped
//! `(height, width)` or `(height, width, channels)`. Both go through
//! [`normalize`] so the rotation itself only ever sees a `DecodedImage`.

use ndarray::{Array2, Array3, ArrayD};
use thiserror::Error;

use crate::decode::{expected_len, DecodedImage, PixelFormat};

/// Errors raised while normalizing rotation input.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The array is not shaped `(height, width)` or `(height, width, 1..=4)`.
    #[error("Unsupported array shape {0:?}: expected (height, width) or (height, width, channels) with 1-4 channels")]
    UnsupportedShape(Vec<usize>),

    /// A decoded image's buffer length disagrees with its dimensions and format.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferMismatch { expected: usize, actual: usize },

    /// An array dimension does not fit in a `u32`.
    #[error("Array dimensions {width}x{height} exceed the supported image size")]
    DimensionOverflow { width: usize, height: usize },
}

/// Image accepted by [`rotate`].
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// An already decoded image.
    Decoded(DecodedImage),
    /// Raw 8-bit samples shaped `(height, width[, channels])`.
    Raw(ArrayD<u8>),
}

impl From<DecodedImage> for ImageInput {
    fn from(image: DecodedImage) -> Self {
        ImageInput::Decoded(image)
    }
}

impl From<ArrayD<u8>> for ImageInput {
    fn from(array: ArrayD<u8>) -> Self {
        ImageInput::Raw(array)
    }
}

impl From<Array2<u8>> for ImageInput {
    fn from(array: Array2<u8>) -> Self {
        ImageInput::Raw(array.into_dyn())
    }
}

impl From<Array3<u8>> for ImageInput {
    fn from(array: Array3<u8>) -> Self {
        ImageInput::Raw(array.into_dyn())
    }
}

/// Dimensions of an image after a quarter turn.
///
/// # Example
///
/// ```ignore
/// use quarterturn_core::transform::rotated_dimensions;
///
/// assert_eq!(rotated_dimensions(100, 50), (50, 100));
/// ```
#[inline]
pub fn rotated_dimensions(width: u32, height: u32) -> (u32, u32) {
    (height, width)
}

/// Resolve an [`ImageInput`] into a [`DecodedImage`].
///
/// Decoded images pass through once their buffer length is checked against
/// their dimensions and format. A two-dimensional array is read as
/// grayscale; a three-dimensional array's last axis selects the format
/// (1 = L8, 2 = La8, 3 = Rgb8, 4 = Rgba8).
///
/// # Errors
///
/// Returns `TransformError::BufferMismatch` for a decoded image whose buffer
/// is the wrong length, `TransformError::UnsupportedShape` for any other rank
/// or channel count, and `TransformError::DimensionOverflow` if width or
/// height exceed `u32::MAX`.
pub fn normalize(input: ImageInput) -> Result<DecodedImage, TransformError> {
    match input {
        ImageInput::Decoded(image) => {
            let expected = expected_len(image.width, image.height, image.format);
            if image.pixels.len() != expected {
                return Err(TransformError::BufferMismatch {
                    expected,
                    actual: image.pixels.len(),
                });
            }
            Ok(image)
        }
        ImageInput::Raw(array) => from_array(array),
    }
}

fn from_array(array: ArrayD<u8>) -> Result<DecodedImage, TransformError> {
    let shape = array.shape().to_vec();
    let (height, width, channels) = match *shape.as_slice() {
        [h, w] => (h, w, 1),
        [h, w, c] => (h, w, c),
        _ => return Err(TransformError::UnsupportedShape(shape)),
    };

    let format = PixelFormat::from_channels_u8(channels)
        .ok_or_else(|| TransformError::UnsupportedShape(shape.clone()))?;

    let overflow = || TransformError::DimensionOverflow { width, height };
    let width_px = u32::try_from(width).map_err(|_| overflow())?;
    let height_px = u32::try_from(height).map_err(|_| overflow())?;

    // Logical iteration order is row-major regardless of memory layout
    let pixels: Vec<u8> = array.iter().copied().collect();

    Ok(DecodedImage::new(width_px, height_px, format, pixels))
}

/// Rotate an image 90° clockwise.
///
/// Accepts a [`DecodedImage`] or a raw `u8` array (see [`normalize`]).
/// The result has width and height swapped and the same pixel format.
///
/// # Example
///
/// ```ignore
/// use ndarray::Array3;
/// use quarterturn_core::transform::rotate;
///
/// let raw = Array3::<u8>::zeros((2, 3, 3));
/// let rotated = rotate(raw).unwrap();
/// assert_eq!((rotated.width, rotated.height), (2, 3));
/// ```
pub fn rotate(input: impl Into<ImageInput>) -> Result<DecodedImage, TransformError> {
    let image = normalize(input.into())?;
    Ok(rotate_clockwise(&image))
}

/// Rotate a decoded image 90° clockwise.
///
/// Pixel (x, y) of the W×H source lands at (H - 1 - y, x) in the H×W result.
/// The source is not modified.
///
/// The buffer length is not checked here: pixels missing from a short buffer
/// come out as zeros and surplus bytes are ignored. Use [`rotate`] for input
/// that has not been validated.
pub fn rotate_clockwise(image: &DecodedImage) -> DecodedImage {
    let (dst_w, dst_h) = rotated_dimensions(image.width, image.height);
    log::debug!(
        "rotating {}x{} {:?} image clockwise to {}x{}",
        image.width,
        image.height,
        image.format,
        dst_w,
        dst_h
    );

    if image.is_empty() {
        return DecodedImage {
            width: dst_w,
            height: dst_h,
            format: image.format,
            pixels: image.pixels.clone(),
        };
    }

    let bpp = image.format.bytes_per_pixel();
    let src_h = image.height as usize;
    let row_bytes = image.width as usize * bpp;
    let dst_stride = dst_w as usize;

    let mut output = vec![0u8; expected_len(dst_w, dst_h, image.format)];

    for (src_y, row) in image.pixels.chunks_exact(row_bytes).take(src_h).enumerate() {
        let dst_x = src_h - 1 - src_y;
        for (src_x, pixel) in row.chunks_exact(bpp).enumerate() {
            let dst_idx = (src_x * dst_stride + dst_x) * bpp;
            output[dst_idx..dst_idx + bpp].copy_from_slice(pixel);
        }
    }

    DecodedImage {
        width: dst_w,
        height: dst_h,
        format: image.format,
        pixels: output,
    }
}

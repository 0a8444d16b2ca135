//! Core types for decoded images.

use image::{DynamicImage, ImageBuffer};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// I/O error while opening or reading the source.
    #[error("I/O error: {0}")]
    Io(String),

    /// The format is not recognized or its codec is not enabled.
    #[error("Invalid or unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The pixel buffer does not match the declared dimensions and format.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferMismatch { expected: usize, actual: usize },
}

/// Pixel layout of a decoded image.
///
/// Multi-byte samples (16-bit and float formats) are stored in native
/// endianness inside [`DecodedImage::pixels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit grayscale.
    L8,
    /// 8-bit grayscale with alpha.
    La8,
    /// 8-bit RGB.
    Rgb8,
    /// 8-bit RGBA.
    Rgba8,
    /// 16-bit grayscale.
    L16,
    /// 16-bit grayscale with alpha.
    La16,
    /// 16-bit RGB.
    Rgb16,
    /// 16-bit RGBA.
    Rgba16,
    /// 32-bit float RGB.
    Rgb32F,
    /// 32-bit float RGBA.
    Rgba32F,
}

impl PixelFormat {
    /// Number of channels per pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::L8 | PixelFormat::L16 => 1,
            PixelFormat::La8 | PixelFormat::La16 => 2,
            PixelFormat::Rgb8 | PixelFormat::Rgb16 | PixelFormat::Rgb32F => 3,
            PixelFormat::Rgba8 | PixelFormat::Rgba16 | PixelFormat::Rgba32F => 4,
        }
    }

    /// Number of bytes per channel sample.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            PixelFormat::L8 | PixelFormat::La8 | PixelFormat::Rgb8 | PixelFormat::Rgba8 => 1,
            PixelFormat::L16 | PixelFormat::La16 | PixelFormat::Rgb16 | PixelFormat::Rgba16 => 2,
            PixelFormat::Rgb32F | PixelFormat::Rgba32F => 4,
        }
    }

    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        self.channels() * self.bytes_per_sample()
    }

    /// Map a channel count of 8-bit samples to a format.
    ///
    /// Returns `None` for channel counts outside 1..=4.
    pub fn from_channels_u8(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(PixelFormat::L8),
            2 => Some(PixelFormat::La8),
            3 => Some(PixelFormat::Rgb8),
            4 => Some(PixelFormat::Rgba8),
            _ => None,
        }
    }
}

/// A decoded image with raw pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Layout of each pixel in `pixels`.
    pub format: PixelFormat,
    /// Pixel data in row-major order.
    /// Length should be width * height * format.bytes_per_pixel().
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions, format and pixel data.
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height, format),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Create a DecodedImage from an `image::DynamicImage`, keeping its pixel format.
    ///
    /// Color types this crate has no layout for are widened to RGBA float.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (format, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => (PixelFormat::L8, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (PixelFormat::La8, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb8, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba8, buf.into_raw()),
            DynamicImage::ImageLuma16(_) => (PixelFormat::L16, img.as_bytes().to_vec()),
            DynamicImage::ImageLumaA16(_) => (PixelFormat::La16, img.as_bytes().to_vec()),
            DynamicImage::ImageRgb16(_) => (PixelFormat::Rgb16, img.as_bytes().to_vec()),
            DynamicImage::ImageRgba16(_) => (PixelFormat::Rgba16, img.as_bytes().to_vec()),
            DynamicImage::ImageRgb32F(_) => (PixelFormat::Rgb32F, img.as_bytes().to_vec()),
            DynamicImage::ImageRgba32F(_) => (PixelFormat::Rgba32F, img.as_bytes().to_vec()),
            other => {
                log::warn!(
                    "unrecognized color type {:?}, widening to RGBA float",
                    other.color()
                );
                let widened = DynamicImage::ImageRgba32F(other.to_rgba32f());
                (PixelFormat::Rgba32F, widened.as_bytes().to_vec())
            }
        };
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Convert to an `image::DynamicImage` of the same pixel format.
    ///
    /// Fails only when the buffer length disagrees with the dimensions.
    pub fn to_dynamic(&self) -> Result<DynamicImage, DecodeError> {
        let (w, h) = (self.width, self.height);
        let raw = self.pixels.clone();
        let converted = match self.format {
            PixelFormat::L8 => ImageBuffer::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
            PixelFormat::La8 => ImageBuffer::from_raw(w, h, raw).map(DynamicImage::ImageLumaA8),
            PixelFormat::Rgb8 => ImageBuffer::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
            PixelFormat::Rgba8 => ImageBuffer::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
            PixelFormat::L16 => {
                ImageBuffer::from_raw(w, h, samples_u16(&raw)).map(DynamicImage::ImageLuma16)
            }
            PixelFormat::La16 => {
                ImageBuffer::from_raw(w, h, samples_u16(&raw)).map(DynamicImage::ImageLumaA16)
            }
            PixelFormat::Rgb16 => {
                ImageBuffer::from_raw(w, h, samples_u16(&raw)).map(DynamicImage::ImageRgb16)
            }
            PixelFormat::Rgba16 => {
                ImageBuffer::from_raw(w, h, samples_u16(&raw)).map(DynamicImage::ImageRgba16)
            }
            PixelFormat::Rgb32F => {
                ImageBuffer::from_raw(w, h, samples_f32(&raw)).map(DynamicImage::ImageRgb32F)
            }
            PixelFormat::Rgba32F => {
                ImageBuffer::from_raw(w, h, samples_f32(&raw)).map(DynamicImage::ImageRgba32F)
            }
        };
        converted.ok_or(DecodeError::BufferMismatch {
            expected: expected_len(w, h, self.format),
            actual: self.pixels.len(),
        })
    }

    /// Raw bytes of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let bpp = self.format.bytes_per_pixel();
        let idx = (y as usize * self.width as usize + x as usize) * bpp;
        &self.pixels[idx..idx + bpp]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Expected buffer length for the given dimensions and format.
pub(crate) fn expected_len(width: u32, height: u32, format: PixelFormat) -> usize {
    width as usize * height as usize * format.bytes_per_pixel()
}

fn samples_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|b| u16::from_ne_bytes([b[0], b[1]]))
        .collect()
}

fn samples_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

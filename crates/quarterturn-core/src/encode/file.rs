//! Encoding to files and byte buffers.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageError, ImageFormat};
use thiserror::Error;

use crate::decode::{expected_len, DecodedImage, PixelFormat};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The destination extension does not name a known image format.
    #[error("Cannot determine output format from path: {0}")]
    UnknownExtension(String),

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The target format cannot hold the image's channels or bit depth
    #[error("{format:?} cannot store {pixel_format:?} pixels without conversion")]
    IncompatiblePixelFormat {
        format: ImageFormat,
        pixel_format: PixelFormat,
    },

    /// The codec rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the destination failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Determine the output format implied by the extension of `path`.
///
/// # Errors
///
/// Returns `EncodeError::UnknownExtension` when the path has no extension or
/// the extension is not an image format the `image` crate knows.
pub fn format_for_path(path: impl AsRef<Path>) -> Result<ImageFormat, EncodeError> {
    let path = path.as_ref();
    ImageFormat::from_path(path)
        .map_err(|_| EncodeError::UnknownExtension(path.display().to_string()))
}

/// Whether `format` stores `pixel_format` without dropping channels or
/// narrowing samples.
///
/// Formats whose codec is not enabled support nothing.
pub fn supports_pixel_format(format: ImageFormat, pixel_format: PixelFormat) -> bool {
    use PixelFormat::*;

    match format {
        ImageFormat::Png => matches!(
            pixel_format,
            L8 | La8 | Rgb8 | Rgba8 | L16 | La16 | Rgb16 | Rgba16
        ),
        ImageFormat::Jpeg => matches!(pixel_format, L8 | Rgb8),
        ImageFormat::Bmp => matches!(pixel_format, L8 | Rgb8 | Rgba8),
        ImageFormat::Gif => matches!(pixel_format, Rgb8 | Rgba8),
        ImageFormat::Tiff => matches!(pixel_format, L8 | Rgb8 | Rgba8 | L16 | Rgb16 | Rgba16),
        _ => false,
    }
}

/// Save an image to `path`, in the format implied by the path's extension.
///
/// The image is encoded in memory first, so nothing is written when encoding
/// fails.
///
/// # Errors
///
/// Returns `EncodeError::UnknownExtension` if the extension is not
/// recognized and `EncodeError::IncompatiblePixelFormat` if the format cannot
/// hold the image's pixels. Returns `EncodeError::EncodingFailed` if the
/// codec rejects the image, and `EncodeError::Io` if the file cannot be
/// written.
pub fn save_image(image: &DecodedImage, path: impl AsRef<Path>) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let format = format_for_path(path)?;
    let bytes = encode_image(image, format)?;

    std::fs::write(path, bytes).map_err(|e| EncodeError::Io(e.to_string()))?;
    log::debug!(
        "saved {}x{} {:?} image to {} as {:?}",
        image.width,
        image.height,
        image.format,
        path.display(),
        format
    );
    Ok(())
}

/// Encode an image to bytes in the given format.
///
/// Pixels are never converted: an image the format cannot hold as-is (alpha
/// in JPEG, 16-bit samples in BMP) is rejected with
/// `EncodeError::IncompatiblePixelFormat`.
///
/// # Example
///
/// ```ignore
/// use image::ImageFormat;
/// use quarterturn_core::encode::encode_image;
///
/// let png = encode_image(&image, ImageFormat::Png).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode_image(image: &DecodedImage, format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
    if !supports_pixel_format(format, image.format) {
        return Err(EncodeError::IncompatiblePixelFormat {
            format,
            pixel_format: image.format,
        });
    }

    let dynamic = to_dynamic(image)?;

    let mut buffer = Cursor::new(Vec::new());
    dynamic
        .write_to(&mut buffer, format)
        .map_err(map_image_error)?;

    Ok(buffer.into_inner())
}

fn to_dynamic(image: &DecodedImage) -> Result<DynamicImage, EncodeError> {
    // Validate dimensions
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    // Validate pixel data length
    let expected = expected_len(image.width, image.height, image.format);
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    image
        .to_dynamic()
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))
}

fn map_image_error(err: ImageError) -> EncodeError {
    EncodeError::EncodingFailed(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_bytes;

    fn marker_image() -> DecodedImage {
        let pixels: Vec<u8> = (0..(4 * 3 * 3)).map(|v| (v * 7) as u8).collect();
        DecodedImage::new(4, 3, PixelFormat::Rgb8, pixels)
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(format_for_path("out.png").unwrap(), ImageFormat::Png);
        assert_eq!(format_for_path("out.jpg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(format_for_path("dir/out.bmp").unwrap(), ImageFormat::Bmp);
        assert_eq!(format_for_path("out.gif").unwrap(), ImageFormat::Gif);
    }

    #[test]
    fn test_format_for_path_unknown() {
        assert!(matches!(
            format_for_path("out.notanimage"),
            Err(EncodeError::UnknownExtension(_))
        ));
        assert!(matches!(
            format_for_path("no_extension"),
            Err(EncodeError::UnknownExtension(_))
        ));
    }

    #[test]
    fn test_encode_png_lossless() {
        let img = marker_image();
        let png = encode_image(&img, ImageFormat::Png).unwrap();

        // PNG signature
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

        let decoded = decode_bytes(&png).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_encode_jpeg_magic_bytes() {
        let img = marker_image();
        let jpeg = encode_image(&img, ImageFormat::Jpeg).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_invalid_dimensions() {
        let img = DecodedImage {
            width: 0,
            height: 10,
            format: PixelFormat::Rgb8,
            pixels: vec![],
        };
        let result = encode_image(&img, ImageFormat::Png);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_encode_invalid_pixel_data() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            format: PixelFormat::Rgba8,
            pixels: vec![0; 100],
        };
        let result = encode_image(&img, ImageFormat::Png);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 100
            })
        ));
    }

    #[test]
    fn test_save_unknown_extension_writes_nothing() {
        let path = std::env::temp_dir().join(format!(
            "quarterturn-core-unknown-{}.notanimage",
            std::process::id()
        ));
        let result = save_image(&marker_image(), &path);

        assert!(matches!(result, Err(EncodeError::UnknownExtension(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_into_missing_directory() {
        let path = std::env::temp_dir()
            .join("quarterturn-core-no-such-dir")
            .join("nested")
            .join("out.png");
        let result = save_image(&marker_image(), &path);
        assert!(matches!(result, Err(EncodeError::Io(_))));
    }

    #[test]
    fn test_supports_pixel_format() {
        assert!(supports_pixel_format(ImageFormat::Png, PixelFormat::Rgba16));
        assert!(supports_pixel_format(ImageFormat::Jpeg, PixelFormat::L8));
        assert!(!supports_pixel_format(ImageFormat::Jpeg, PixelFormat::Rgba8));
        assert!(!supports_pixel_format(ImageFormat::Jpeg, PixelFormat::L16));
        assert!(!supports_pixel_format(ImageFormat::Bmp, PixelFormat::L16));
        assert!(!supports_pixel_format(ImageFormat::Gif, PixelFormat::L16));
        assert!(!supports_pixel_format(ImageFormat::Png, PixelFormat::Rgb32F));
        assert!(!supports_pixel_format(ImageFormat::WebP, PixelFormat::Rgb8));
    }

    #[test]
    fn test_encode_rejects_alpha_in_jpeg() {
        let img = DecodedImage::new(2, 2, PixelFormat::Rgba8, vec![200; 16]);
        let result = encode_image(&img, ImageFormat::Jpeg);
        assert!(matches!(
            result,
            Err(EncodeError::IncompatiblePixelFormat {
                format: ImageFormat::Jpeg,
                pixel_format: PixelFormat::Rgba8
            })
        ));
    }

    #[test]
    fn test_encode_rejects_sixteen_bit_in_bmp() {
        let img = DecodedImage::new(2, 2, PixelFormat::L16, vec![0x40; 8]);
        let result = encode_image(&img, ImageFormat::Bmp);
        assert!(matches!(
            result,
            Err(EncodeError::IncompatiblePixelFormat { .. })
        ));
    }

    #[test]
    fn test_encode_sixteen_bit_png_lossless() {
        let samples: [u16; 6] = [0, 1, 0x0102, 0x8000, 0xFFFE, u16::MAX];
        let pixels: Vec<u8> = samples.iter().flat_map(|s| s.to_ne_bytes()).collect();
        let img = DecodedImage::new(3, 2, PixelFormat::L16, pixels);

        let png = encode_image(&img, ImageFormat::Png).unwrap();
        assert_eq!(decode_bytes(&png).unwrap(), img);
    }

    #[test]
    fn test_save_rejected_image_writes_nothing() {
        let path = std::env::temp_dir().join(format!(
            "quarterturn-core-rejected-{}.gif",
            std::process::id()
        ));
        let img = DecodedImage::new(3, 2, PixelFormat::L16, vec![0; 12]);

        let result = save_image(&img, &path);
        assert!(matches!(
            result,
            Err(EncodeError::IncompatiblePixelFormat { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_png_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "quarterturn-core-saved-{}.png",
            std::process::id()
        ));
        let img = marker_image();

        save_image(&img, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(decode_bytes(&bytes).unwrap(), img);
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (5) must be non-zero"
        );

        let err = EncodeError::IncompatiblePixelFormat {
            format: ImageFormat::Jpeg,
            pixel_format: PixelFormat::Rgba8,
        };
        assert_eq!(
            err.to_string(),
            "Jpeg cannot store Rgba8 pixels without conversion"
        );
    }
}

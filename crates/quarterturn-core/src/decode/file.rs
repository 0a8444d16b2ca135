//! Decoding from files and byte buffers.

use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use image::{ImageError, ImageReader};

use super::{DecodeError, DecodedImage};

/// Load and decode the image file at `path`.
///
/// The format is guessed from the file content, falling back to the file
/// extension when the content is not recognized.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be opened or read.
/// Returns `DecodeError::UnsupportedFormat` if no enabled codec handles the file.
/// Returns `DecodeError::CorruptedFile` if the codec rejects the data.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage, DecodeError> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)
        .map_err(|e| DecodeError::Io(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(e.to_string()))?;

    let image = decode_reader(reader)?;
    log::debug!(
        "loaded {} ({}x{}, {:?})",
        path.display(),
        image.width,
        image.height,
        image.format
    );
    Ok(image)
}

/// Decode an encoded image held in memory.
///
/// # Errors
///
/// Same as [`load_image`], minus file access failures.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(e.to_string()))?;

    decode_reader(reader)
}

fn decode_reader<R: BufRead + Seek>(reader: ImageReader<R>) -> Result<DecodedImage, DecodeError> {
    if reader.format().is_none() {
        return Err(DecodeError::UnsupportedFormat(
            "format could not be determined".to_string(),
        ));
    }

    let img = reader.decode().map_err(map_image_error)?;
    Ok(DecodedImage::from_dynamic(img))
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::IoError(e) => DecodeError::Io(e.to_string()),
        ImageError::Unsupported(e) => DecodeError::UnsupportedFormat(e.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

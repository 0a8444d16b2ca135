//! Image transformation operations.
//!
//! The only transform is an exact 90° clockwise rotation with expand
//! semantics: the output canvas is the source canvas with width and height
//! swapped, so nothing is cropped or padded.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - x grows to the right, y grows downward
//! - Source (x, y) in a W×H image maps to (H - 1 - y, x) in the H×W result

mod rotation;

pub use rotation::{
    normalize, rotate, rotate_clockwise, rotated_dimensions, ImageInput, TransformError,
};

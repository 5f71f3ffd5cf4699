//! Image decoding adapter.
//!
//! This module turns an input file into something implementing
//! [`RasterSource`], the narrow view of an image that the converter needs:
//! color mode, dimensions, pixel bytes and (for palette images) the palette
//! table plus a transparency-key flag.
//!
//! # Format routing
//!
//! - **PNG** is read with the `png` crate so palette indices and the PLTE
//!   table survive decoding.
//! - **Everything else** (JPEG, BMP) goes through the `image` crate, which
//!   only ever yields grayscale or RGB data for these formats.
//!
//! # Examples
//!
//! ```ignore
//! use img2raw_core::decode::{decode_file, RasterSource};
//!
//! let image = decode_file("sprite.png".as_ref())?;
//! println!("{} {:?}", image.color_mode(), image.dimensions());
//! ```

mod generic;
mod png_reader;
mod types;

use std::path::Path;

use crate::ConvertError;

pub use generic::{decode_generic, from_dynamic};
pub use png_reader::decode_png;
pub use types::{ColorMode, DecodedImage, RasterSource};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decode an in-memory image file.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, ConvertError> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        decode_png(bytes)
    } else {
        decode_generic(bytes)
    }
}

/// Read and decode an image file.
///
/// # Errors
///
/// - `InputNotFound` if `path` is not a regular file
/// - `Io` if the file cannot be read
/// - `DecodeFailed` if the contents are not a supported image
pub fn decode_file(path: &Path) -> Result<DecodedImage, ConvertError> {
    if !path.is_file() {
        return Err(ConvertError::InputNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "Read input image");

    decode_bytes(&bytes)
}

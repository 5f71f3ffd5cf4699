//! Decoding of non-PNG formats through the `image` crate.

use std::io::Cursor;

use image::{DynamicImage, ImageReader};

use super::DecodedImage;
use crate::ConvertError;

/// Decode image bytes of any format the `image` crate was built with.
///
/// `Luma8` becomes a grayscale image and `Rgb8` an RGB24 image. Other
/// layouts are returned with `ColorMode::Other` naming the layout.
///
/// # Errors
///
/// Returns `ConvertError::DecodeFailed` if the format is not recognized or
/// the data is corrupted.
pub fn decode_generic(bytes: &[u8]) -> Result<DecodedImage, ConvertError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ConvertError::DecodeFailed(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| ConvertError::DecodeFailed(e.to_string()))?;

    Ok(from_dynamic(img))
}

/// Map a `DynamicImage` onto the layouts the converter understands.
pub fn from_dynamic(img: DynamicImage) -> DecodedImage {
    let (width, height) = (img.width(), img.height());
    match img {
        DynamicImage::ImageLuma8(buf) => DecodedImage::grayscale(width, height, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => DecodedImage::rgb24(width, height, buf.into_raw()),
        other => DecodedImage::unsupported(width, height, format!("{:?}", other.color())),
    }
}

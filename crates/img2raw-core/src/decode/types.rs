//! Core types for image decoding.

use std::fmt;

/// Pixel layout reported by a decoder.
///
/// Only the first three layouts can be converted; everything else is carried
/// as `Other` so the classifier can name it in its error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMode {
    /// 8-bit luminance, one byte per pixel.
    Grayscale,
    /// 8-bit palette indices, one byte per pixel.
    PaletteIndexed,
    /// 8-bit RGB, three bytes per pixel.
    Rgb24,
    /// Any other layout (alpha, 16-bit, ...).
    Other(String),
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Grayscale => f.write_str("Grayscale"),
            ColorMode::PaletteIndexed => f.write_str("PaletteIndexed"),
            ColorMode::Rgb24 => f.write_str("Rgb24"),
            ColorMode::Other(name) => f.write_str(name),
        }
    }
}

/// The operations the converter needs from a decoded image.
///
/// Implemented by [`DecodedImage`]; other decoders can be plugged in by
/// implementing it over their own image type.
pub trait RasterSource {
    /// Color mode as reported by the decoder.
    fn color_mode(&self) -> &ColorMode;

    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Pixel data in row-major order.
    ///
    /// One byte per pixel for grayscale and palette images, three bytes
    /// (R, G, B) per pixel for RGB24.
    fn pixels(&self) -> &[u8];

    /// Palette table for palette-indexed images.
    fn palette(&self) -> Option<&[[u8; 3]]>;

    /// Whether the decoder reported a transparency key.
    ///
    /// Palette index 0 is assumed to be the transparent entry.
    fn has_transparency_key(&self) -> bool;
}

/// A decoded image held fully in memory.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Layout of `pixels`.
    pub mode: ColorMode,
    /// Pixel data in row-major order.
    pub pixels: Vec<u8>,
    /// Palette table, empty unless `mode` is `PaletteIndexed`.
    pub palette: Vec<[u8; 3]>,
    /// Set when the source defines a transparency key.
    pub transparency_key: bool,
}

impl DecodedImage {
    /// Create a grayscale image.
    pub fn grayscale(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            mode: ColorMode::Grayscale,
            pixels,
            palette: Vec::new(),
            transparency_key: false,
        }
    }

    /// Create an RGB24 image.
    pub fn rgb24(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize) * 3);
        Self {
            width,
            height,
            mode: ColorMode::Rgb24,
            pixels,
            palette: Vec::new(),
            transparency_key: false,
        }
    }

    /// Create a palette-indexed image.
    pub fn indexed(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Vec<[u8; 3]>,
        transparency_key: bool,
    ) -> Self {
        debug_assert_eq!(indices.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            mode: ColorMode::PaletteIndexed,
            pixels: indices,
            palette,
            transparency_key,
        }
    }

    /// Create an image whose layout cannot be converted.
    pub fn unsupported(width: u32, height: u32, mode: impl Into<String>) -> Self {
        Self {
            width,
            height,
            mode: ColorMode::Other(mode.into()),
            pixels: Vec::new(),
            palette: Vec::new(),
            transparency_key: false,
        }
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

impl RasterSource for DecodedImage {
    fn color_mode(&self) -> &ColorMode {
        &self.mode
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn palette(&self) -> Option<&[[u8; 3]]> {
        match self.mode {
            ColorMode::PaletteIndexed => Some(&self.palette),
            _ => None,
        }
    }

    fn has_transparency_key(&self) -> bool {
        self.transparency_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_display() {
        assert_eq!(ColorMode::Grayscale.to_string(), "Grayscale");
        assert_eq!(ColorMode::Other("Rgba8".into()).to_string(), "Rgba8");
    }

    #[test]
    fn test_palette_only_for_indexed() {
        let gray = DecodedImage::grayscale(2, 1, vec![0, 255]);
        assert!(gray.palette().is_none());

        let indexed = DecodedImage::indexed(2, 1, vec![0, 1], vec![[0, 0, 0], [9, 9, 9]], true);
        assert_eq!(indexed.palette().map(|p| p.len()), Some(2));
        assert!(indexed.has_transparency_key());
    }

    #[test]
    fn test_dimensions_and_count() {
        let img = DecodedImage::rgb24(4, 3, vec![0; 36]);
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.pixel_count(), 12);
        assert_eq!(img.pixels().len(), 36);
    }
}

//! Mapping from decoder color modes to raw output kinds.

use crate::decode::ColorMode;
use crate::ConvertError;

/// Pixel encoding of a raw output file.
///
/// The discriminant is the type tag written to the first byte of the raw
/// header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OutputKind {
    /// One luminance byte per pixel.
    Grayscale = 0,
    /// One palette index byte per pixel, plus a `.pal` file.
    PaletteIndexed = 1,
    /// Three bytes (R, G, B) per pixel.
    Rgb24 = 2,
}

impl OutputKind {
    /// Type tag stored in the raw header.
    #[inline]
    pub fn type_tag(self) -> u8 {
        self as u8
    }

    /// Parse a type tag read from a raw header.
    pub fn from_type_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(OutputKind::Grayscale),
            1 => Some(OutputKind::PaletteIndexed),
            2 => Some(OutputKind::Rgb24),
            _ => None,
        }
    }

    /// Bytes per pixel in the raw body.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            OutputKind::Grayscale | OutputKind::PaletteIndexed => 1,
            OutputKind::Rgb24 => 3,
        }
    }

    /// File extension of the raw output.
    pub fn raw_extension(self) -> &'static str {
        match self {
            OutputKind::Grayscale | OutputKind::PaletteIndexed => "8",
            OutputKind::Rgb24 => "24",
        }
    }

    /// Whether a palette file accompanies the raw file.
    #[inline]
    pub fn has_palette(self) -> bool {
        self == OutputKind::PaletteIndexed
    }
}

/// Classify a decoder color mode.
///
/// # Errors
///
/// Returns `ConvertError::UnsupportedMode` for any mode other than
/// grayscale, palette-indexed or RGB24.
pub fn classify(mode: &ColorMode) -> Result<OutputKind, ConvertError> {
    match mode {
        ColorMode::Grayscale => Ok(OutputKind::Grayscale),
        ColorMode::PaletteIndexed => Ok(OutputKind::PaletteIndexed),
        ColorMode::Rgb24 => Ok(OutputKind::Rgb24),
        ColorMode::Other(name) => Err(ConvertError::UnsupportedMode(name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_supported_modes() {
        assert_eq!(classify(&ColorMode::Grayscale).unwrap(), OutputKind::Grayscale);
        assert_eq!(
            classify(&ColorMode::PaletteIndexed).unwrap(),
            OutputKind::PaletteIndexed
        );
        assert_eq!(classify(&ColorMode::Rgb24).unwrap(), OutputKind::Rgb24);
    }

    #[test]
    fn test_classify_other_mode() {
        let result = classify(&ColorMode::Other("GrayscaleAlpha8".to_string()));
        assert!(matches!(result, Err(ConvertError::UnsupportedMode(m)) if m == "GrayscaleAlpha8"));
    }

    #[test]
    fn test_type_tags_are_stable() {
        assert_eq!(OutputKind::Grayscale.type_tag(), 0);
        assert_eq!(OutputKind::PaletteIndexed.type_tag(), 1);
        assert_eq!(OutputKind::Rgb24.type_tag(), 2);
    }

    #[test]
    fn test_from_type_tag() {
        for kind in [OutputKind::Grayscale, OutputKind::PaletteIndexed, OutputKind::Rgb24] {
            assert_eq!(OutputKind::from_type_tag(kind.type_tag()), Some(kind));
        }
        assert_eq!(OutputKind::from_type_tag(3), None);
    }

    #[test]
    fn test_layout_per_kind() {
        assert_eq!(OutputKind::Grayscale.bytes_per_pixel(), 1);
        assert_eq!(OutputKind::Rgb24.bytes_per_pixel(), 3);
        assert_eq!(OutputKind::PaletteIndexed.raw_extension(), "8");
        assert_eq!(OutputKind::Rgb24.raw_extension(), "24");
        assert!(OutputKind::PaletteIndexed.has_palette());
        assert!(!OutputKind::Grayscale.has_palette());
    }
}

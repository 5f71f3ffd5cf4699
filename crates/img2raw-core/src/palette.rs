//! Color-range analysis for palette-indexed images.
//!
//! A palette image rarely references all 256 palette entries. The analyzer
//! finds the smallest contiguous slice `[base, last]` covering every index
//! that occurs in the pixel data, so only that slice is written to the
//! palette file.

use crate::ConvertError;

/// Inclusive range of palette indices.
///
/// Invariant: `base <= last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub base: u8,
    pub last: u8,
}

impl ColorRange {
    /// The whole 256-entry palette.
    pub const FULL: ColorRange = ColorRange { base: 0, last: 255 };

    /// Create a range, returning `None` if `base > last`.
    pub fn new(base: u8, last: u8) -> Option<Self> {
        (base <= last).then_some(Self { base, last })
    }

    /// Number of palette entries in the range.
    #[inline]
    pub fn count(self) -> u16 {
        u16::from(self.last) - u16::from(self.base) + 1
    }
}

/// Which palette entries to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteMode {
    /// Only the slice referenced by pixel data.
    #[default]
    Used,
    /// All 256 entries, regardless of usage.
    Full,
}

/// Compute the range of palette indices used by `indices`.
///
/// Only presence matters: an index occurring once or a thousand times
/// contributes the same to the bounds.
///
/// # Errors
///
/// Returns `ConvertError::EmptyImage` if `indices` is empty.
pub fn used_color_range(indices: &[u8]) -> Result<ColorRange, ConvertError> {
    let mut bins = [0u32; 256];
    for &index in indices {
        bins[index as usize] += 1;
    }

    let mut used = bins
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(index, _)| index as u8);

    let base = used.next().ok_or(ConvertError::EmptyImage)?;
    let last = used.last().unwrap_or(base);

    Ok(ColorRange { base, last })
}

/// Select the palette range for a conversion.
///
/// `PaletteMode::Full` skips the histogram and always yields `0..=255`.
pub fn select_range(indices: &[u8], mode: PaletteMode) -> Result<ColorRange, ConvertError> {
    match mode {
        PaletteMode::Full => Ok(ColorRange::FULL),
        PaletteMode::Used => used_color_range(indices),
    }
}

/// Extract the entries of `range` from a palette table.
///
/// # Errors
///
/// Returns `ConvertError::PaletteTooShort` if the table holds fewer than
/// `range.last + 1` entries.
pub fn slice_palette(palette: &[[u8; 3]], range: ColorRange) -> Result<&[[u8; 3]], ConvertError> {
    let end = range.last as usize + 1;
    palette
        .get(range.base as usize..end)
        .ok_or(ConvertError::PaletteTooShort {
            needed: end,
            available: palette.len(),
        })
}

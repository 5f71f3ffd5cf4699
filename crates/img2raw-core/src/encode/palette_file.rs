//! Palette file layout.
//!
//! ```text
//! offset 0: u16  base index, big-endian
//! offset 2: u16  color count, big-endian
//! offset 4: color count x (R, G, B)
//! ```

use crate::palette::ColorRange;
use crate::ConvertError;

/// Size of the palette file header in bytes.
pub const PALETTE_HEADER_LEN: usize = 4;

/// Header of a palette file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteHeader {
    pub base_index: u16,
    pub color_count: u16,
}

impl From<ColorRange> for PaletteHeader {
    fn from(range: ColorRange) -> Self {
        Self {
            base_index: range.base.into(),
            color_count: range.count(),
        }
    }
}

impl PaletteHeader {
    pub fn to_bytes(&self) -> [u8; PALETTE_HEADER_LEN] {
        let base = self.base_index.to_be_bytes();
        let count = self.color_count.to_be_bytes();
        [base[0], base[1], count[0], count[1]]
    }

    /// Parse a header from the start of a palette file.
    pub fn parse(bytes: &[u8]) -> Result<Self, ConvertError> {
        match bytes {
            [b0, b1, c0, c1, ..] => Ok(Self {
                base_index: u16::from_be_bytes([*b0, *b1]),
                color_count: u16::from_be_bytes([*c0, *c1]),
            }),
            _ => Err(ConvertError::InvalidHeader(format!(
                "palette header needs {PALETTE_HEADER_LEN} bytes, got {}",
                bytes.len()
            ))),
        }
    }
}

/// Encode a palette file for `range` from the already-sliced `colors`.
///
/// # Errors
///
/// Returns `ConvertError::PaletteTooShort` if `colors` does not hold exactly
/// `range.count()` entries.
pub fn encode_palette(range: ColorRange, colors: &[[u8; 3]]) -> Result<Vec<u8>, ConvertError> {
    let header = PaletteHeader::from(range);
    let count = header.color_count as usize;
    if colors.len() != count {
        return Err(ConvertError::PaletteTooShort {
            needed: count,
            available: colors.len(),
        });
    }

    let mut out = Vec::with_capacity(PALETTE_HEADER_LEN + count * 3);
    out.extend_from_slice(&header.to_bytes());
    out.extend(colors.iter().flatten());
    Ok(out)
}

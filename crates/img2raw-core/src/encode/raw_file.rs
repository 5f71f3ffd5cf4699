//! Raw pixel file layout.
//!
//! ```text
//! offset 0: u8   type tag (0 = grayscale, 1 = palette, 2 = RGB24)
//! offset 1: u8   transparency key flag (0 or 1)
//! offset 2: u16  width, big-endian
//! offset 4: u16  height, big-endian
//! offset 6: pixel bytes, row-major
//! ```

use crate::classify::OutputKind;
use crate::ConvertError;

/// Size of the raw file header in bytes.
pub const RAW_HEADER_LEN: usize = 6;

/// Header of a raw pixel file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub kind: OutputKind,
    pub has_transparency_key: bool,
    pub width: u16,
    pub height: u16,
}

impl RawHeader {
    /// Build a header, validating that the dimensions fit in 16 bits.
    ///
    /// The transparency flag is only kept for palette images; it is always
    /// cleared for grayscale and RGB24.
    pub fn new(
        kind: OutputKind,
        has_transparency_key: bool,
        width: u32,
        height: u32,
    ) -> Result<Self, ConvertError> {
        let too_large = || ConvertError::DimensionsTooLarge { width, height };
        Ok(Self {
            kind,
            has_transparency_key: has_transparency_key && kind.has_palette(),
            width: u16::try_from(width).map_err(|_| too_large())?,
            height: u16::try_from(height).map_err(|_| too_large())?,
        })
    }

    /// Expected length of the pixel body following this header.
    pub fn body_len(&self) -> usize {
        self.width as usize * self.height as usize * self.kind.bytes_per_pixel()
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> [u8; RAW_HEADER_LEN] {
        let w = self.width.to_be_bytes();
        let h = self.height.to_be_bytes();
        [
            self.kind.type_tag(),
            u8::from(self.has_transparency_key),
            w[0],
            w[1],
            h[0],
            h[1],
        ]
    }

    /// Parse a header from the start of a raw file.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::InvalidHeader` if the input is shorter than
    /// the header, the type tag is unknown, or the transparency byte is not
    /// 0 or 1.
    pub fn parse(bytes: &[u8]) -> Result<Self, ConvertError> {
        let header: &[u8; RAW_HEADER_LEN] = bytes
            .get(..RAW_HEADER_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| {
                ConvertError::InvalidHeader(format!(
                    "raw header needs {RAW_HEADER_LEN} bytes, got {}",
                    bytes.len()
                ))
            })?;

        let kind = OutputKind::from_type_tag(header[0]).ok_or_else(|| {
            ConvertError::InvalidHeader(format!("unknown type tag {}", header[0]))
        })?;
        let has_transparency_key = match header[1] {
            0 => false,
            1 => true,
            other => {
                return Err(ConvertError::InvalidHeader(format!(
                    "transparency flag must be 0 or 1, got {other}"
                )))
            }
        };

        Ok(Self {
            kind,
            has_transparency_key,
            width: u16::from_be_bytes([header[2], header[3]]),
            height: u16::from_be_bytes([header[4], header[5]]),
        })
    }
}

/// Encode a raw pixel file: header followed by the pixel bytes.
///
/// # Errors
///
/// Returns `ConvertError::PixelDataMismatch` if `pixels` is not exactly
/// `width * height * bytes_per_pixel` bytes long.
pub fn encode_raw(header: &RawHeader, pixels: &[u8]) -> Result<Vec<u8>, ConvertError> {
    let expected = header.body_len();
    if pixels.len() != expected {
        return Err(ConvertError::PixelDataMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let mut out = Vec::with_capacity(RAW_HEADER_LEN + expected);
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(pixels);
    Ok(out)
}

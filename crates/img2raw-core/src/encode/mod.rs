//! Binary serialization of raw pixel and palette files.
//!
//! Both formats are a fixed-size big-endian header followed by tightly
//! packed bytes. Encoding happens entirely in memory; writing to disk is
//! handled by [`crate::convert`].
//!
//! # Examples
//!
//! ```ignore
//! use img2raw_core::classify::OutputKind;
//! use img2raw_core::encode::{encode_raw, RawHeader};
//!
//! let header = RawHeader::new(OutputKind::Rgb24, false, 2, 1)?;
//! let bytes = encode_raw(&header, &[10, 20, 30, 40, 50, 60])?;
//! assert_eq!(&bytes[..6], &[2, 0, 0, 2, 0, 1]);
//! ```

mod palette_file;
mod raw_file;

pub use palette_file::{encode_palette, PaletteHeader, PALETTE_HEADER_LEN};
pub use raw_file::{encode_raw, RawHeader, RAW_HEADER_LEN};

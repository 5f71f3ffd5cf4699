//! img2raw Core - raw image asset conversion
//!
//! This crate converts decoded raster images (grayscale, palette-indexed or
//! 24-bit RGB) into fixed-layout binary files for embedded and retro-style
//! renderers: a raw pixel file and, for palette images, a palette file
//! holding only the slice of the palette the pixels actually use.
//!
//! # Pipeline
//!
//! 1. [`decode`] - read the input and expose it as a [`RasterSource`]
//! 2. [`classify`] - map the color mode to an [`OutputKind`]
//! 3. [`palette`] - compute the used [`ColorRange`] (palette images only)
//! 4. [`encode`] - serialize headers and pixel bytes
//! 5. [`convert`] - tie the stages together and write the files
//!
//! Every stage reports failures as [`ConvertError`]; nothing is retried.

pub mod classify;
pub mod convert;
pub mod decode;
pub mod encode;
mod error;
pub mod palette;

pub use classify::{classify, OutputKind};
pub use convert::{convert, convert_file, prepare, ConversionReport, ConvertOptions, OutputPaths};
pub use decode::{decode_file, ColorMode, DecodedImage, RasterSource};
pub use error::ConvertError;
pub use palette::{ColorRange, PaletteMode};

//! Conversion pipeline: classify, analyze the palette, serialize, write.
//!
//! All output bytes are built in memory by [`prepare`] before anything
//! touches the filesystem, so every validation error is reported before the
//! first file is created. [`Conversion::write`] then writes the palette file
//! (palette images only) followed by the raw file.
//!
//! Writes are not transactional. An interrupted write can leave a truncated
//! file behind.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::classify::{classify, OutputKind};
use crate::decode::{decode_file, RasterSource};
use crate::encode::{encode_palette, encode_raw, RawHeader};
use crate::palette::{select_range, slice_palette, ColorRange, PaletteMode};
use crate::ConvertError;

/// Options controlling a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Overwrite existing output files.
    pub force: bool,
    /// Which palette entries to write for palette images.
    pub palette_mode: PaletteMode,
}

/// Destination paths derived from an output basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// `<basename>.pal`, present for palette images only.
    pub palette: Option<PathBuf>,
    /// `<basename>.8` or `<basename>.24`.
    pub raw: PathBuf,
}

impl OutputPaths {
    /// Derive output paths for `kind`.
    ///
    /// The extension is appended to the basename; an existing extension in
    /// the basename is kept.
    pub fn new(basename: &Path, kind: OutputKind) -> Self {
        Self {
            palette: kind.has_palette().then(|| with_suffix(basename, "pal")),
            raw: with_suffix(basename, kind.raw_extension()),
        }
    }
}

fn with_suffix(basename: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(basename.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Encoded palette file together with the range it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteOutput {
    pub range: ColorRange,
    pub bytes: Vec<u8>,
}

/// A fully materialized conversion, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub header: RawHeader,
    pub palette: Option<PaletteOutput>,
    pub raw: Vec<u8>,
}

/// Summary of a completed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub kind: OutputKind,
    pub width: u16,
    pub height: u16,
    pub color_range: Option<ColorRange>,
    pub paths: OutputPaths,
}

/// Build the output files for `source` in memory.
///
/// # Errors
///
/// - `UnsupportedMode` if the color mode cannot be converted
/// - `DimensionsTooLarge` if width or height exceeds 65535
/// - `EmptyImage` if a palette image has no pixels and the used range is requested
/// - `PaletteTooShort` if the palette table does not cover the selected range
/// - `PixelDataMismatch` if the pixel buffer doesn't match the dimensions
pub fn prepare<S>(source: &S, palette_mode: PaletteMode) -> Result<Conversion, ConvertError>
where
    S: RasterSource + ?Sized,
{
    let kind = classify(source.color_mode())?;
    let (width, height) = source.dimensions();
    tracing::debug!(?kind, width, height, "Classified image");

    let header = RawHeader::new(kind, source.has_transparency_key(), width, height)?;

    let palette = if kind.has_palette() {
        let range = select_range(source.pixels(), palette_mode)?;
        tracing::debug!(base = range.base, last = range.last, "Selected palette range");

        let colors = slice_palette(source.palette().unwrap_or_default(), range)?;
        Some(PaletteOutput {
            range,
            bytes: encode_palette(range, colors)?,
        })
    } else {
        None
    };

    let raw = encode_raw(&header, source.pixels())?;

    Ok(Conversion {
        header,
        palette,
        raw,
    })
}

impl Conversion {
    pub fn kind(&self) -> OutputKind {
        self.header.kind
    }

    /// Write the palette file (if any), then the raw file.
    ///
    /// Without `force`, an existing destination fails with `OutputExists`
    /// and is left untouched. A failure on the raw file does not remove a
    /// palette file that was already written.
    pub fn write(&self, paths: &OutputPaths, force: bool) -> Result<(), ConvertError> {
        if let (Some(palette), Some(path)) = (&self.palette, &paths.palette) {
            tracing::info!(
                base = palette.range.base,
                last = palette.range.last,
                colors = palette.range.count(),
                path = %path.display(),
                "Saving palette"
            );
            write_output(path, &palette.bytes, force)?;
        }

        tracing::info!(
            width = self.header.width,
            height = self.header.height,
            path = %paths.raw.display(),
            "Saving image"
        );
        write_output(&paths.raw, &self.raw, force)
    }
}

/// Create `path` and write `bytes` to it.
///
/// Without `force` the file is opened with `create_new`, so the existence
/// check and the creation are a single filesystem operation.
fn write_output(path: &Path, bytes: &[u8], force: bool) -> Result<(), ConvertError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => ConvertError::OutputExists(path.to_path_buf()),
        _ => ConvertError::io(path, e),
    })?;

    file.write_all(bytes).map_err(|e| ConvertError::io(path, e))
}

/// Convert an in-memory image and write its output files next to `basename`.
pub fn convert<S>(
    source: &S,
    basename: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError>
where
    S: RasterSource + ?Sized,
{
    let conversion = prepare(source, options.palette_mode)?;
    let paths = OutputPaths::new(basename, conversion.kind());
    conversion.write(&paths, options.force)?;

    Ok(ConversionReport {
        kind: conversion.kind(),
        width: conversion.header.width,
        height: conversion.header.height,
        color_range: conversion.palette.as_ref().map(|p| p.range),
        paths,
    })
}

/// Decode `input` and write its raw (and palette) files next to `basename`.
pub fn convert_file(
    input: &Path,
    basename: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    let image = decode_file(input)?;
    convert(&image, basename, options)
}

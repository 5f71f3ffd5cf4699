//! Error type shared by every stage of the conversion pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting an image to raw output files.
///
/// Every variant is fatal: the pipeline stops at the first error and nothing
/// is retried.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path does not reference a regular file.
    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The image decoder could not parse the input.
    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    /// The decoded color mode is not grayscale, palette-indexed or RGB24.
    #[error("Unknown color space: \"{0}\"")]
    UnsupportedMode(String),

    /// The image has no pixels, so no color range can be computed.
    #[error("Image has no pixels")]
    EmptyImage,

    /// The palette table does not cover the selected color range.
    #[error("Palette too short: need {needed} entries, image has {available}")]
    PaletteTooShort { needed: usize, available: usize },

    /// Width or height does not fit the 16-bit header fields.
    #[error("Image dimensions {width}x{height} exceed 65535x65535")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// Pixel buffer length doesn't match the image dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    PixelDataMismatch { expected: usize, actual: usize },

    /// A raw or palette header could not be parsed.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A destination file already exists and overwrite was not forced.
    #[error("Will not overwrite output file: {}", .0.display())]
    OutputExists(PathBuf),

    /// Filesystem failure while reading the input or writing an output.
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = ConvertError::UnsupportedMode("Rgba8".to_string());
        assert_eq!(err.to_string(), "Unknown color space: \"Rgba8\"");

        let err = ConvertError::PaletteTooShort {
            needed: 10,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "Palette too short: need 10 entries, image has 4"
        );

        let err = ConvertError::OutputExists(PathBuf::from("out.pal"));
        assert_eq!(err.to_string(), "Will not overwrite output file: out.pal");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = ConvertError::io(
            "out.8",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error on out.8");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("denied"));
    }
}

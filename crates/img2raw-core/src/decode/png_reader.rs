//! PNG decoding that keeps palette indices intact.
//!
//! The `image` crate expands indexed PNGs to RGB(A), which loses the palette
//! table. PNG input is therefore read with the `png` crate directly, with no
//! transformations applied.

use std::io::Cursor;

use png::{BitDepth, ColorType, Transformations};

use super::DecodedImage;
use crate::ConvertError;

/// Decode PNG bytes into a [`DecodedImage`].
///
/// Indexed images at 1, 2, 4 or 8 bits are unpacked to one index byte per
/// pixel. Grayscale below 8 bits is scaled to the full 0-255 range. Layouts
/// with alpha or 16-bit samples are returned with `ColorMode::Other`.
///
/// # Errors
///
/// Returns `ConvertError::DecodeFailed` if the bytes are not a valid PNG.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, ConvertError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(Transformations::IDENTITY);

    let mut reader = decoder
        .read_info()
        .map_err(|e| ConvertError::DecodeFailed(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| ConvertError::DecodeFailed(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    let (width, height) = (frame.width, frame.height);
    let bits = frame.bit_depth as u8;

    let image = match (frame.color_type, frame.bit_depth) {
        (ColorType::Indexed, BitDepth::Sixteen) => {
            return Err(ConvertError::DecodeFailed(
                "16-bit indexed PNG is invalid".to_string(),
            ));
        }
        (ColorType::Indexed, _) => {
            let info = reader.info();
            let palette = info
                .palette
                .as_deref()
                .map(palette_entries)
                .ok_or_else(|| ConvertError::DecodeFailed("missing PLTE chunk".to_string()))?;
            let transparency_key = info.trns.is_some();
            let indices = unpack_samples(&buf, width, height, frame.line_size, bits);
            DecodedImage::indexed(width, height, indices, palette, transparency_key)
        }
        (ColorType::Grayscale, BitDepth::Eight) => DecodedImage::grayscale(width, height, buf),
        (ColorType::Grayscale, BitDepth::Sixteen) => {
            DecodedImage::unsupported(width, height, "Grayscale16")
        }
        (ColorType::Grayscale, _) => {
            let scale = 255 / ((1u16 << bits) - 1) as u8;
            let levels = unpack_samples(&buf, width, height, frame.line_size, bits)
                .into_iter()
                .map(|v| v * scale)
                .collect();
            DecodedImage::grayscale(width, height, levels)
        }
        (ColorType::Rgb, BitDepth::Eight) => DecodedImage::rgb24(width, height, buf),
        (color_type, _) => {
            DecodedImage::unsupported(width, height, format!("{:?}{}", color_type, bits))
        }
    };

    Ok(image)
}

/// Split a PLTE chunk into RGB triples. A trailing partial entry is dropped.
fn palette_entries(plte: &[u8]) -> Vec<[u8; 3]> {
    plte.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}

/// Unpack 1/2/4/8-bit samples into one byte per pixel.
///
/// Rows are `line_size` bytes long; the padding bits at the end of each row
/// are skipped.
fn unpack_samples(data: &[u8], width: u32, height: u32, line_size: usize, bits: u8) -> Vec<u8> {
    let width = width as usize;
    if bits == 8 {
        return data.to_vec();
    }

    let bits = bits as usize;
    let mask = ((1u16 << bits) - 1) as u8;
    let mut out = Vec::with_capacity(width * height as usize);

    for row in data.chunks(line_size).take(height as usize) {
        for x in 0..width {
            let bit_offset = x * bits;
            let shift = 8 - bits - (bit_offset % 8);
            out.push((row[bit_offset / 8] >> shift) & mask);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{ColorMode, RasterSource};

    fn encode_png(
        width: u32,
        height: u32,
        color: ColorType,
        depth: BitDepth,
        plte: Option<&[u8]>,
        trns: Option<&[u8]>,
        data: &[u8],
    ) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            if let Some(plte) = plte {
                encoder.set_palette(plte.to_vec());
            }
            if let Some(trns) = trns {
                encoder.set_trns(trns.to_vec());
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_decode_indexed_8bit() {
        let plte = [0, 0, 0, 255, 0, 0, 0, 255, 0];
        let bytes = encode_png(3, 1, ColorType::Indexed, BitDepth::Eight, Some(&plte), None, &[2, 0, 1]);

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.mode, ColorMode::PaletteIndexed);
        assert_eq!(img.pixels, vec![2, 0, 1]);
        assert_eq!(img.palette, vec![[0, 0, 0], [255, 0, 0], [0, 255, 0]]);
        assert!(!img.has_transparency_key());
    }

    #[test]
    fn test_decode_indexed_with_trns() {
        let plte = [1, 2, 3, 4, 5, 6];
        let bytes = encode_png(
            2,
            1,
            ColorType::Indexed,
            BitDepth::Eight,
            Some(&plte),
            Some(&[0]),
            &[0, 1],
        );

        let img = decode_png(&bytes).unwrap();
        assert!(img.has_transparency_key());
    }

    #[test]
    fn test_decode_indexed_4bit_unpacks_rows() {
        // 3 pixels per row -> 2 bytes per row, low nibble of byte 2 is padding
        let plte: Vec<u8> = (0..16u8).flat_map(|i| [i, i, i]).collect();
        let data = [0x12, 0x30, 0xFE, 0xD0];
        let bytes = encode_png(3, 2, ColorType::Indexed, BitDepth::Four, Some(&plte), None, &data);

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.pixels, vec![1, 2, 3, 15, 14, 13]);
        assert_eq!(img.palette.len(), 16);
    }

    #[test]
    fn test_decode_indexed_1bit() {
        let plte = [0, 0, 0, 255, 255, 255];
        let bytes = encode_png(10, 1, ColorType::Indexed, BitDepth::One, Some(&plte), None, &[0b1010_0000, 0b1100_0000]);

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.pixels, vec![1, 0, 1, 0, 0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_decode_grayscale_8bit() {
        let bytes = encode_png(2, 2, ColorType::Grayscale, BitDepth::Eight, None, None, &[0, 64, 128, 255]);

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.mode, ColorMode::Grayscale);
        assert_eq!(img.pixels, vec![0, 64, 128, 255]);
    }

    #[test]
    fn test_decode_grayscale_2bit_scaled() {
        let bytes = encode_png(4, 1, ColorType::Grayscale, BitDepth::Two, None, None, &[0b0001_1011]);

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.pixels, vec![0, 85, 170, 255]);
    }

    #[test]
    fn test_decode_rgb_8bit() {
        let bytes = encode_png(2, 1, ColorType::Rgb, BitDepth::Eight, None, None, &[10, 20, 30, 40, 50, 60]);

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.mode, ColorMode::Rgb24);
        assert_eq!(img.pixels, vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_decode_rgba_is_unsupported() {
        let bytes = encode_png(1, 1, ColorType::Rgba, BitDepth::Eight, None, None, &[1, 2, 3, 4]);

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.mode, ColorMode::Other("Rgba8".to_string()));
    }

    #[test]
    fn test_decode_gray16_is_unsupported() {
        let bytes = encode_png(1, 1, ColorType::Grayscale, BitDepth::Sixteen, None, None, &[1, 2]);

        let img = decode_png(&bytes).unwrap();
        assert_eq!(img.mode, ColorMode::Other("Grayscale16".to_string()));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_png(&[0x89, b'P', b'N', b'G', 0, 0]);
        assert!(matches!(result, Err(ConvertError::DecodeFailed(_))));
    }

    #[test]
    fn test_unpack_samples_2bit() {
        let out = unpack_samples(&[0b1110_0100], 4, 1, 1, 2);
        assert_eq!(out, vec![3, 2, 1, 0]);
    }
}

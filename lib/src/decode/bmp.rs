//! Uncompressed 24-bit bitmap decoding
//!
//! Only the fixed 54-byte header is consulted. Pixel data is expected to
//! follow it directly as packed blue-green-red triples, bottom row first,
//! with no row padding.

use crate::error::{LoadError, Result};
use image::{Rgb, RgbImage};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const HEADER_LEN: usize = 54;

const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const BPP_OFFSET: usize = 28;

/// Open `path` and decode it as a 24-bit bitmap
pub fn load_bmp(path: &Path) -> Result<RgbImage> {
    let file = File::open(path).map_err(|e| LoadError::unreadable(path, e))?;
    decode_bmp(BufReader::new(file), path)
}

/// Decode a 24-bit bitmap from `reader`
///
/// Nothing past `54 + 3 * width * height` bytes is read.
///
/// # Arguments
/// * `reader` - Stream positioned at the `BM` signature
/// * `source` - Path used only to label errors
///
/// # Returns
/// The RGB grid with row 0 at the visual top
pub fn decode_bmp<R: Read>(mut reader: R, source: &Path) -> Result<RgbImage> {
    let mut header = [0u8; HEADER_LEN];
    reader
        .read_exact(&mut header)
        .map_err(|e| LoadError::unreadable(source, e))?;

    let width = le_i32(&header, WIDTH_OFFSET);
    let height = le_i32(&header, HEIGHT_OFFSET);
    let bpp = u16::from_le_bytes([header[BPP_OFFSET], header[BPP_OFFSET + 1]]);

    if bpp != 24 {
        return Err(LoadError::UnsupportedFormat(format!(
            "{bpp} bits per pixel, only 24-bit bitmaps are supported"
        )));
    }
    if width <= 0 || height <= 0 {
        return Err(LoadError::UnsupportedFormat(format!(
            "bitmap dimensions {width}x{height}"
        )));
    }

    let (width, height) = (width as u32, height as u32);
    let row_len = width as usize * 3;
    let data_len = row_len
        .checked_mul(height as usize)
        .ok_or_else(|| LoadError::UnsupportedFormat(format!("bitmap too large: {width}x{height}")))?;

    // Grow the buffer as bytes arrive rather than trusting the header size
    let mut data = Vec::new();
    reader
        .take(data_len as u64)
        .read_to_end(&mut data)
        .map_err(|e| LoadError::unreadable(source, e))?;
    if data.len() < data_len {
        return Err(LoadError::unreadable(
            source,
            std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("pixel data ends after {} of {} bytes", data.len(), data_len),
            ),
        ));
    }

    let mut raw = RgbImage::new(width, height);
    for (stored_row, row) in data.chunks_exact(row_len).enumerate() {
        // Rows are stored bottom-up
        let y = height - 1 - stored_row as u32;
        for (x, bgr) in row.chunks_exact(3).enumerate() {
            raw.put_pixel(x as u32, y, Rgb([bgr[2], bgr[1], bgr[0]]));
        }
    }

    log::debug!("decoded {}x{} bitmap from {}", width, height, source.display());
    Ok(raw)
}

fn le_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Encode `rows` (top row first, RGB) as a headered 24-bit bitmap
///
/// Produces exactly the layout [`decode_bmp`] reads: no padding, rows
/// bottom-up, BGR order.
#[cfg(test)]
pub(crate) fn encode_test_bmp(width: u32, height: u32, bpp: u16, rows: &[Vec<[u8; 3]>]) -> Vec<u8> {
    let mut bytes = vec![0u8; HEADER_LEN];
    bytes[0] = b'B';
    bytes[1] = b'M';
    bytes[10..14].copy_from_slice(&(HEADER_LEN as u32).to_le_bytes());
    bytes[14..18].copy_from_slice(&40u32.to_le_bytes());
    bytes[WIDTH_OFFSET..WIDTH_OFFSET + 4].copy_from_slice(&(width as i32).to_le_bytes());
    bytes[HEIGHT_OFFSET..HEIGHT_OFFSET + 4].copy_from_slice(&(height as i32).to_le_bytes());
    bytes[26..28].copy_from_slice(&1u16.to_le_bytes());
    bytes[BPP_OFFSET..BPP_OFFSET + 2].copy_from_slice(&bpp.to_le_bytes());
    for row in rows.iter().rev() {
        for &[r, g, b] in row {
            bytes.extend_from_slice(&[b, g, r]);
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source() -> &'static Path {
        Path::new("test.bmp")
    }

    #[test]
    fn test_decode_dimensions_and_row_order() {
        let top = vec![[255, 0, 0], [0, 255, 0], [0, 0, 255]];
        let bottom = vec![[1, 2, 3], [4, 5, 6], [7, 8, 9]];
        let bytes = encode_test_bmp(3, 2, 24, &[top, bottom]);

        let raw = decode_bmp(Cursor::new(bytes), source()).unwrap();
        assert_eq!(raw.dimensions(), (3, 2));
        assert_eq!(raw.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(raw.get_pixel(2, 0), &Rgb([0, 0, 255]));
        assert_eq!(raw.get_pixel(1, 1), &Rgb([4, 5, 6]));
    }

    #[test]
    fn test_decode_swaps_bgr() {
        let bytes = encode_test_bmp(1, 1, 24, &[vec![[10, 20, 30]]]);
        // Stored as B, G, R
        assert_eq!(&bytes[HEADER_LEN..], &[30, 20, 10]);
        let raw = decode_bmp(Cursor::new(bytes), source()).unwrap();
        assert_eq!(raw.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_rejects_other_bit_depths() {
        for bpp in [1u16, 8, 16, 32] {
            let bytes = encode_test_bmp(1, 1, bpp, &[vec![[0, 0, 0]]]);
            let err = decode_bmp(Cursor::new(bytes), source()).unwrap_err();
            assert!(matches!(err, LoadError::UnsupportedFormat(_)), "bpp {bpp}");
        }
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let mut bytes = encode_test_bmp(1, 1, 24, &[vec![[0, 0, 0]]]);
        bytes[HEIGHT_OFFSET..HEIGHT_OFFSET + 4].copy_from_slice(&(-1i32).to_le_bytes());
        let err = decode_bmp(Cursor::new(bytes), source()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));

        let bytes = encode_test_bmp(0, 1, 24, &[]);
        let err = decode_bmp(Cursor::new(bytes), source()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_short_header_is_unreadable() {
        let err = decode_bmp(Cursor::new(vec![b'B', b'M', 0, 0]), source()).unwrap_err();
        assert!(matches!(err, LoadError::UnreadableFile { .. }));
    }

    #[test]
    fn test_truncated_pixels_are_unreadable() {
        let mut bytes = encode_test_bmp(2, 2, 24, &[vec![[0; 3]; 2], vec![[0; 3]; 2]]);
        bytes.truncate(bytes.len() - 1);
        let err = decode_bmp(Cursor::new(bytes), source()).unwrap_err();
        assert!(matches!(err, LoadError::UnreadableFile { .. }));
    }

    #[test]
    fn test_trailing_bytes_are_not_read() {
        let mut bytes = encode_test_bmp(1, 1, 24, &[vec![[9, 9, 9]]]);
        bytes.extend_from_slice(b"trailer");
        let mut cursor = Cursor::new(bytes);
        decode_bmp(&mut cursor, source()).unwrap();
        assert_eq!(cursor.position() as usize, HEADER_LEN + 3);
    }

    #[test]
    fn test_missing_file() {
        let err = load_bmp(Path::new("/definitely/not/here.bmp")).unwrap_err();
        assert!(matches!(err, LoadError::UnreadableFile { .. }));
    }
}

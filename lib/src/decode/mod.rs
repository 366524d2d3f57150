//! Format-specific decoding into a raw RGB grid
//!
//! Each supported format is a variant of [`ImageFormat`]. Decoding fully
//! consumes the format-specific logic; what comes out is always a plain
//! [`RgbImage`] with row 0 at the visual top.

mod bmp;
mod jpeg;

pub use bmp::{HEADER_LEN as BMP_HEADER_LEN, decode_bmp, load_bmp};
pub use jpeg::{decode_jpeg, load_jpeg};

#[cfg(test)]
pub(crate) use bmp::encode_test_bmp;

use crate::error::{LoadError, Result};
use image::RgbImage;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Uncompressed 24-bit bitmap
    Bitmap,
    /// Compressed photographic image
    Jpeg,
}

impl ImageFormat {
    /// Guess the format from the file extension, case-insensitively
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "bmp" => Some(ImageFormat::Bitmap),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    /// Guess the format from the leading magic bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b'B', b'M', ..] => Some(ImageFormat::Bitmap),
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    /// Decode the file at `path` as this format
    pub fn load(self, path: &Path) -> Result<RgbImage> {
        match self {
            ImageFormat::Bitmap => load_bmp(path),
            ImageFormat::Jpeg => load_jpeg(path),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Bitmap => "bmp",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Work out the format of `path` from its extension, falling back to its
/// first bytes
pub fn detect_format(path: &Path) -> Result<ImageFormat> {
    if let Some(format) = ImageFormat::from_path(path) {
        return Ok(format);
    }

    let mut magic = Vec::with_capacity(3);
    File::open(path)
        .and_then(|file| file.take(3).read_to_end(&mut magic))
        .map_err(|e| LoadError::unreadable(path, e))?;

    ImageFormat::sniff(&magic).ok_or_else(|| {
        LoadError::UnsupportedFormat(format!(
            "'{}' is neither a bmp nor a jpeg image",
            path.display()
        ))
    })
}

/// Detect the format of `path` and decode it
pub fn decode_path(path: &Path) -> Result<(ImageFormat, RgbImage)> {
    let format = detect_format(path)?;
    log::debug!("loading {} as {}", path.display(), format);
    let raw = format.load(path)?;
    Ok((format, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_path_extensions() {
        assert_eq!(ImageFormat::from_path(Path::new("a.bmp")), Some(ImageFormat::Bitmap));
        assert_eq!(ImageFormat::from_path(Path::new("a.BMP")), Some(ImageFormat::Bitmap));
        assert_eq!(ImageFormat::from_path(Path::new("dir/a.jpg")), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path(Path::new("a.JPEG")), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path(Path::new("a.png")), None);
        assert_eq!(ImageFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(ImageFormat::sniff(b"BM\x00\x00"), Some(ImageFormat::Bitmap));
        assert_eq!(ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::sniff(b"\x89PNG"), None);
        assert_eq!(ImageFormat::sniff(b""), None);
    }

    #[test]
    fn test_missing_path_is_unreadable_for_both_formats() {
        for name in ["/no/such/dir/image.bmp", "/no/such/dir/image.jpg"] {
            let err = decode_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, LoadError::UnreadableFile { .. }), "{name}");
        }
    }

    #[test]
    fn test_missing_path_without_extension_is_unreadable() {
        let err = decode_path(Path::new("/no/such/dir/image")).unwrap_err();
        assert!(matches!(err, LoadError::UnreadableFile { .. }));
    }

    #[test]
    fn test_sniffs_bitmap_without_extension() {
        let bytes = encode_test_bmp(2, 1, 24, &[vec![[1, 2, 3], [4, 5, 6]]]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let (format, raw) = decode_path(file.path()).unwrap();
        assert_eq!(format, ImageFormat::Bitmap);
        assert_eq!(raw.dimensions(), (2, 1));
    }

    #[test]
    fn test_unknown_content_is_unsupported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        let err = decode_path(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }
}

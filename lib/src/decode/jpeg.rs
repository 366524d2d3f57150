//! Compressed photographic (JPEG) decoding
//!
//! The entropy/DCT work is done by the `image` crate's JPEG decoder. This
//! module reads the frame header itself to vet the component count and
//! size, then expands the decoded samples into RGB.

use crate::error::{LoadError, Result};
use image::codecs::jpeg::JpegDecoder;
use image::error::ImageError;
use image::{ColorType, ImageDecoder, Limits, Rgb, RgbImage};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Open `path` and decode it as a JPEG
pub fn load_jpeg(path: &Path) -> Result<RgbImage> {
    let file = File::open(path).map_err(|e| LoadError::unreadable(path, e))?;
    let raw = decode_jpeg(BufReader::new(file))?;
    log::debug!(
        "decoded {}x{} jpeg from {}",
        raw.width(),
        raw.height(),
        path.display()
    );
    Ok(raw)
}

/// Decode a JPEG stream
///
/// The frame header is checked before any pixel memory is reserved: only 1
/// or 3 components are accepted, and the decoded size must fit the default
/// [`Limits`]. The decoder and its reader are dropped on every return path,
/// including failures in the middle of the scan.
///
/// # Arguments
/// * `reader` - The complete encoded stream
///
/// # Returns
/// The RGB grid, row 0 at the top, or the reason the stream was refused
pub fn decode_jpeg<R: Read>(mut reader: R) -> Result<RgbImage> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| LoadError::DecodeError(e.to_string()))?;

    // The decoder folds CMYK and YCCK into RGB, so the raw count is read here
    if let Some(frame) = read_frame_header(&bytes) {
        if frame.components != 1 && frame.components != 3 {
            return Err(LoadError::UnsupportedFormat(format!(
                "{} color components, expected 1 or 3",
                frame.components
            )));
        }
        if frame.width == 0 || frame.height == 0 {
            return Err(LoadError::UnsupportedFormat(format!(
                "jpeg dimensions {}x{}",
                frame.width, frame.height
            )));
        }
    }

    let mut decoder =
        JpegDecoder::new(Cursor::new(&bytes)).map_err(|e| LoadError::DecodeError(e.to_string()))?;

    let mut limits = Limits::default();
    decoder.set_limits(limits.clone()).map_err(limit_error)?;

    let (width, height) = decoder.dimensions();
    let components = match decoder.color_type() {
        ColorType::L8 => 1,
        ColorType::Rgb8 => 3,
        other => {
            return Err(LoadError::UnsupportedFormat(format!(
                "jpeg decodes to {other:?}, expected 8-bit gray or RGB"
            )));
        }
    };
    if width == 0 || height == 0 {
        return Err(LoadError::UnsupportedFormat(format!(
            "jpeg dimensions {width}x{height}"
        )));
    }

    let total = decoder.total_bytes();
    limits.reserve(total).map_err(limit_error)?;
    let total = usize::try_from(total)
        .map_err(|_| LoadError::UnsupportedFormat(format!("jpeg too large: {width}x{height}")))?;
    let mut samples = vec![0u8; total];
    decoder
        .read_image(&mut samples)
        .map_err(|e| LoadError::DecodeError(e.to_string()))?;

    expand_components(width, height, components, &samples)
}

fn limit_error(e: ImageError) -> LoadError {
    match e {
        ImageError::Limits(limit) => {
            LoadError::UnsupportedFormat(format!("jpeg exceeds decoding limits: {limit}"))
        }
        other => LoadError::DecodeError(other.to_string()),
    }
}

/// Fields of the first start-of-frame segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameHeader {
    pub width: u16,
    pub height: u16,
    pub components: u8,
}

/// Walk the marker segments up to the first start-of-frame
///
/// Returns `None` when the stream is not a JPEG or ends before a frame
/// header; the decoder then reports the problem itself.
pub(crate) fn read_frame_header(bytes: &[u8]) -> Option<FrameHeader> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    loop {
        if *bytes.get(pos)? != 0xFF {
            return None;
        }
        // Fill bytes
        while *bytes.get(pos + 1)? == 0xFF {
            pos += 1;
        }
        let marker = bytes[pos + 1];
        match marker {
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            0xD9 | 0xDA => return None,
            _ => {}
        }

        let len = u16::from_be_bytes([*bytes.get(pos + 2)?, *bytes.get(pos + 3)?]) as usize;
        let is_frame = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame {
            let segment = bytes.get(pos + 4..pos + 10)?;
            return Some(FrameHeader {
                height: u16::from_be_bytes([segment[1], segment[2]]),
                width: u16::from_be_bytes([segment[3], segment[4]]),
                components: segment[5],
            });
        }
        pos += 2 + len;
    }
}

/// Turn component-interleaved rows into an RGB grid
///
/// One component is replicated into all three channels; three are taken as
/// red, green, blue. Rows are already top-down.
pub(crate) fn expand_components(
    width: u32,
    height: u32,
    components: usize,
    samples: &[u8],
) -> Result<RgbImage> {
    if width == 0 || height == 0 {
        return Err(LoadError::UnsupportedFormat(format!(
            "image dimensions {width}x{height}"
        )));
    }
    if components != 1 && components != 3 {
        return Err(LoadError::UnsupportedFormat(format!(
            "{components} color components, expected 1 or 3"
        )));
    }

    let expected = width as usize * height as usize * components;
    if samples.len() != expected {
        return Err(LoadError::DecodeError(format!(
            "decoder produced {} samples, expected {}",
            samples.len(),
            expected
        )));
    }

    let mut raw = RgbImage::new(width, height);
    for (pixel, chunk) in raw.pixels_mut().zip(samples.chunks_exact(components)) {
        *pixel = match *chunk {
            [grey] => Rgb([grey, grey, grey]),
            [red, green, blue] => Rgb([red, green, blue]),
            _ => unreachable!("component count checked above"),
        };
    }

    Ok(raw)
}

//! glyphcast - terminal ASCII art from raster images
//!
//! Images are decoded into a raw RGB grid, reduced to sRGB-correct
//! luminance, mapped onto a glyph ramp and fitted to the terminal's
//! character grid. Negate, mirror, brightness and ramp changes operate on
//! the grayscale grid in between.
//!
//! # Example
//! ```no_run
//! use glyphcast::{GlyphRamp, RasterImage, TerminalSurface};
//!
//! let mut image = RasterImage::load("photo.jpg", GlyphRamp::default()).unwrap();
//! image.negate_image();
//! image.convert_grey_to_ascii();
//! image.display(&mut TerminalSurface::stdout()).unwrap();
//! ```

pub mod ascii;
pub mod decode;
pub mod error;
pub mod filters;
pub mod fit;
pub mod pixel;
pub mod ramp;
pub mod raster;
pub mod terminal;

// Re-export main types for convenience
pub use ascii::GlyphGrid;
pub use decode::ImageFormat;
pub use error::{LoadError, Result};
pub use pixel::PixelSample;
pub use ramp::{GlyphRamp, RampError, RampPreset};
pub use raster::RasterImage;
pub use terminal::{MemorySurface, Surface, TermSize, TerminalSurface};

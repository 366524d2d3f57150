use crate::ascii::{GlyphGrid, convert_grey_to_ascii};
use crate::decode::{ImageFormat, decode_path};
use crate::error::Result;
use crate::filters;
use crate::fit::resize_ascii_image;
use crate::ramp::GlyphRamp;
use crate::terminal::{Surface, TermSize};
use image::{GrayImage, RgbImage};
use std::io;
use std::path::{Path, PathBuf};

/// Fitted grid together with the inputs it was computed from
#[derive(Debug, Clone)]
struct FittedCache {
    source: (usize, usize),
    term: TermSize,
    grid: GlyphGrid,
}

/// A decoded image and every representation derived from it
///
/// The raw grid is fixed at construction. The grayscale grid starts out as
/// its luminance and is what filters edit in place; the glyph grid follows
/// the grayscale grid through the active ramp, and the fitted grid follows
/// the glyph grid through the terminal size.
///
/// Filters only touch the grayscale grid. Call
/// [`convert_grey_to_ascii`](Self::convert_grey_to_ascii) afterwards to make
/// the change visible.
#[derive(Debug, Clone)]
pub struct RasterImage {
    path: PathBuf,
    format: ImageFormat,
    raw: RgbImage,
    gray: GrayImage,
    glyphs: GlyphGrid,
    ramp: GlyphRamp,
    fitted: Option<FittedCache>,
}

impl RasterImage {
    /// Decode `path` and prepare its grayscale and glyph grids
    ///
    /// On failure nothing is returned; there is no half-loaded image.
    pub fn load(path: impl AsRef<Path>, ramp: GlyphRamp) -> Result<Self> {
        let path = path.as_ref();
        let (format, raw) = decode_path(path)?;
        Ok(Self::from_raw(raw, format, path, ramp))
    }

    /// Wrap an already decoded grid
    ///
    /// # Panics
    /// If `raw` has a zero dimension
    pub fn from_raw(raw: RgbImage, format: ImageFormat, path: impl Into<PathBuf>, ramp: GlyphRamp) -> Self {
        assert!(
            raw.width() > 0 && raw.height() > 0,
            "raw grid must not be empty"
        );
        let gray = filters::to_grayscale(&raw);
        let glyphs = convert_grey_to_ascii(&gray, &ramp);
        Self {
            path: path.into(),
            format,
            raw,
            gray,
            glyphs,
            ramp,
            fitted: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.raw.width()
    }

    pub fn height(&self) -> u32 {
        self.raw.height()
    }

    pub fn raw(&self) -> &RgbImage {
        &self.raw
    }

    pub fn gray(&self) -> &GrayImage {
        &self.gray
    }

    pub fn glyphs(&self) -> &GlyphGrid {
        &self.glyphs
    }

    pub fn ramp(&self) -> &GlyphRamp {
        &self.ramp
    }

    /// The last fitted grid, if one has been computed since the glyphs
    /// last changed
    pub fn fitted(&self) -> Option<&GlyphGrid> {
        self.fitted.as_ref().map(|f| &f.grid)
    }

    /// Recompute the grayscale grid from the raw grid, discarding filters
    pub fn to_grey_scale(&mut self) {
        self.gray = filters::to_grayscale(&self.raw);
    }

    /// Remap the grayscale grid onto the ramp
    pub fn convert_grey_to_ascii(&mut self) {
        self.glyphs = convert_grey_to_ascii(&self.gray, &self.ramp);
        self.fitted = None;
    }

    /// Fit the glyph grid to `term`, reusing the previous result when
    /// neither the glyph grid nor the terminal size changed
    pub fn resize_ascii_image(&mut self, term: TermSize) -> &GlyphGrid {
        let source = self.glyphs.dimensions();
        let stale = !matches!(
            &self.fitted,
            Some(cache) if cache.source == source && cache.term == term && !cache.grid.is_empty()
        );

        if stale {
            log::debug!(
                "fitting {}x{} glyphs to {}x{} terminal",
                source.0,
                source.1,
                term.columns,
                term.rows
            );
            self.fitted = Some(FittedCache {
                source,
                term,
                grid: resize_ascii_image(&self.glyphs, term),
            });
        } else {
            log::trace!("reusing fitted grid for {}", self.path.display());
        }

        match &self.fitted {
            Some(cache) => &cache.grid,
            None => unreachable!("fitted grid populated above"),
        }
    }

    pub fn negate_image(&mut self) {
        filters::negate(&mut self.gray);
    }

    pub fn mirror_image(&mut self) {
        filters::mirror(&mut self.gray);
    }

    /// Shift every grayscale cell by `delta`, clamped to [0, 255]
    pub fn change_brightness(&mut self, delta: i32) {
        filters::change_brightness(&mut self.gray, delta);
    }

    /// Replace the ramp and remap the glyphs
    pub fn set_ramp(&mut self, ramp: GlyphRamp) {
        self.ramp = ramp;
        self.convert_grey_to_ascii();
    }

    /// Clear `surface` and write the fitted grid row by row
    ///
    /// # Panics
    /// If no fitted grid has been computed since the glyphs last changed
    pub fn print_ascii_art<S: Surface>(&self, surface: &mut S) -> io::Result<()> {
        let fitted = self
            .fitted()
            .expect("print_ascii_art called before resize_ascii_image");

        surface.clear_and_home()?;
        for row in fitted.rows() {
            surface.write_row(row)?;
        }
        surface.flush()
    }

    /// Fit to the surface's current size and draw
    pub fn display<S: Surface>(&mut self, surface: &mut S) -> io::Result<()> {
        let term = surface.size()?;
        self.resize_ascii_image(term);
        self.print_ascii_art(surface)
    }
}

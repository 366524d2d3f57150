//! Terminal-fit resampling
//!
//! Terminal cells are roughly twice as tall as they are wide, so an image
//! drawn one glyph per pixel looks stretched vertically. Fitting halves the
//! row count first, then shrinks proportionally until both axes fit the
//! terminal, and finally samples the source grid nearest-neighbour.

use crate::ascii::GlyphGrid;
use crate::terminal::TermSize;

/// Compute the fitted (width, height) for a source glyph grid
///
/// Steps, all truncating like integer assignment:
/// 1. height is halved for the cell aspect ratio
/// 2. if the width exceeds the terminal, both axes scale so width fits
/// 3. if the height still exceeds the terminal, both scale so height fits
///
/// A result that truncates to zero on an axis is lifted to one cell so tiny
/// images still show up.
///
/// # Arguments
/// * `src_width`, `src_height` - Glyph grid dimensions
/// * `term` - Terminal size in character cells
///
/// # Returns
/// `(columns, rows)` never exceeding `term`, or `(0, 0)` for an empty source
/// or a terminal with no cells
pub fn fit_dimensions(src_width: usize, src_height: usize, term: TermSize) -> (usize, usize) {
    let term_width = term.columns as usize;
    let term_height = term.rows as usize;

    if src_width == 0 || src_height == 0 || term_width == 0 || term_height == 0 {
        return (0, 0);
    }

    let mut width = src_width;
    let mut height = (0.5 * src_height as f64) as usize;

    if width > term_width {
        let scale = term_width as f64 / width as f64;
        width = term_width;
        height = (height as f64 * scale) as usize;
    }

    if height > term_height {
        let scale = term_height as f64 / height as f64;
        height = term_height;
        width = (width as f64 * scale) as usize;
    }

    (width.max(1), height.max(1))
}

/// Downsample `glyphs` to fit inside `term`
///
/// Target cell `(tx, ty)` takes source glyph
/// `(floor(tx * src_w / w), floor(ty * src_h / h))`; no averaging.
pub fn resize_ascii_image(glyphs: &GlyphGrid, term: TermSize) -> GlyphGrid {
    let (src_width, src_height) = glyphs.dimensions();
    let (width, height) = fit_dimensions(src_width, src_height, term);

    if width == 0 || height == 0 {
        return GlyphGrid::default();
    }

    let x_scale = src_width as f64 / width as f64;
    let y_scale = src_height as f64 / height as f64;

    let mut fitted = GlyphGrid::filled(width, height, ' ');
    for ty in 0..height {
        let sy = ((ty as f64 * y_scale) as usize).min(src_height - 1);
        for tx in 0..width {
            let sx = ((tx as f64 * x_scale) as usize).min(src_width - 1);
            fitted.set(tx, ty, glyphs.get(sx, sy));
        }
    }

    fitted
}

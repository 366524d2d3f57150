use crate::ramp::GlyphRamp;
use image::GrayImage;

/// A row-major grid of glyphs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl GlyphGrid {
    /// Grid of the given size filled with `fill`
    pub fn filled(width: usize, height: usize, fill: char) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Build a grid from equal-length rows
    ///
    /// # Panics
    /// If the rows differ in length
    pub fn from_rows<R: AsRef<str>>(rows: &[R]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let before = cells.len();
            cells.extend(row.as_ref().chars());
            assert_eq!(cells.len() - before, width, "GlyphGrid rows must be equal length");
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, glyph: char) {
        self.cells[y * self.width + x] = glyph;
    }

    pub fn row(&self, y: usize) -> &[char] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks_exact panics on 0, and a zero-width grid has no cells anyway
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Rows joined with `\n`, no trailing newline
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter());
        }
        out
    }
}

/// Map every grayscale cell onto the ramp
///
/// The output has exactly the dimensions of `gray`.
pub fn convert_grey_to_ascii(gray: &GrayImage, ramp: &GlyphRamp) -> GlyphGrid {
    let (width, height) = gray.dimensions();
    let cells = gray.pixels().map(|p| ramp.glyph_for(p[0])).collect();

    GlyphGrid {
        width: width as usize,
        height: height as usize,
        cells,
    }
}

//! Display surfaces
//!
//! The render pipeline only needs three things from a display: its size in
//! character cells, a way to clear it, and a way to write one row of glyphs.
//! [`TerminalSurface`] does this on a real terminal through crossterm;
//! [`MemorySurface`] records what would have been drawn.

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};

/// Terminal dimensions in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermSize {
    pub columns: u16,
    pub rows: u16,
}

impl TermSize {
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }
}

impl Default for TermSize {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 24,
        }
    }
}

/// Something a glyph grid can be drawn on
pub trait Surface {
    /// Current size in character cells
    fn size(&self) -> io::Result<TermSize>;

    /// Clear everything and move the cursor to the top-left cell
    fn clear_and_home(&mut self) -> io::Result<()>;

    /// Write one row followed by a line break
    fn write_row(&mut self, row: &[char]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A surface backed by a terminal writer, usually stdout
pub struct TerminalSurface<W: Write> {
    out: W,
    line: String,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> io::Result<TermSize> {
        let (columns, rows) = terminal::size()?;
        Ok(TermSize { columns, rows })
    }

    fn clear_and_home(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn write_row(&mut self, row: &[char]) -> io::Result<()> {
        self.line.clear();
        self.line.extend(row.iter());
        writeln!(self.out, "{}", self.line)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// A fixed-size surface that keeps the rows drawn since the last clear
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub size: TermSize,
    pub rows: Vec<String>,
    pub clears: usize,
}

impl MemorySurface {
    pub fn new(size: TermSize) -> Self {
        Self {
            size,
            rows: Vec::new(),
            clears: 0,
        }
    }

    /// Rows joined with `\n`
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> io::Result<TermSize> {
        Ok(self.size)
    }

    fn clear_and_home(&mut self) -> io::Result<()> {
        self.rows.clear();
        self.clears += 1;
        Ok(())
    }

    fn write_row(&mut self, row: &[char]) -> io::Result<()> {
        self.rows.push(row.iter().collect());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_size_default() {
        let size = TermSize::default();
        assert_eq!(size.columns, 80);
        assert_eq!(size.rows, 24);
    }

    #[test]
    fn test_memory_surface_records_rows() {
        let mut surface = MemorySurface::new(TermSize::new(10, 5));
        surface.write_row(&['a', 'b']).unwrap();
        surface.write_row(&['c']).unwrap();
        assert_eq!(surface.text(), "ab\nc");

        surface.clear_and_home().unwrap();
        assert!(surface.rows.is_empty());
        assert_eq!(surface.clears, 1);
    }

    #[test]
    fn test_terminal_surface_writes_rows() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.write_row(&['#', ' ', '#']).unwrap();
        surface.write_row(&['.']).unwrap();
        surface.flush().unwrap();
        let bytes = surface.into_inner();
        assert_eq!(String::from_utf8(bytes).unwrap(), "# #\n.\n");
    }

    #[test]
    fn test_terminal_surface_clear_emits_escape() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.clear_and_home().unwrap();
        let bytes = surface.into_inner();
        // ESC[2J then ESC[1;1H
        assert_eq!(bytes, b"\x1b[2J\x1b[1;1H");
    }
}

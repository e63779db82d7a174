use crate::color::Color;
use crate::host::{FontMetrics, Surface};
use crossterm::cursor::MoveTo;
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

/// Font metrics for a terminal, measured in cells.
///
/// A glyph occupies a single row, so ascent and descent are one row each. The
/// line height is the height of the font the wave is scaled against, which
/// lets a tall line height move characters across several rows.
#[derive(Clone, Copy, Debug)]
pub struct CellMetrics {
    line_height: i32,
}

impl CellMetrics {
    pub fn new(line_height: i32) -> Self {
        Self { line_height }
    }
}

impl FontMetrics for CellMetrics {
    fn char_advance(&self, ch: char) -> i32 {
        ch.width().unwrap_or(0) as i32
    }

    fn ascent(&self) -> i32 {
        1
    }

    fn descent(&self) -> i32 {
        1
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Blank,
    Glyph(char, Color),
    /// The right half of a double width glyph.
    Continuation,
}

/// A frame buffer of terminal cells.
///
/// Glyphs are drawn into memory and written out in one go by [TerminalSurface::render].
#[derive(Debug)]
pub struct TerminalSurface {
    columns: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows, cells: vec![Cell::Blank; columns as usize * rows as usize] }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        *self = Self::new(columns, rows);
    }

    /// Blank out every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Blank);
    }

    /// The character drawn at a cell, if any.
    #[cfg(test)]
    pub(crate) fn glyph_at(&self, column: u16, row: u16) -> Option<(char, Color)> {
        match self.cells.get(self.offset(column, row)?) {
            Some(Cell::Glyph(ch, color)) => Some((*ch, *color)),
            _ => None,
        }
    }

    /// Write the whole frame, starting at the top left corner of the terminal.
    pub fn render<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.queue(MoveTo(0, 0))?;
        writer.queue(Clear(ClearType::All))?;
        for row in 0..self.rows {
            let start = row as usize * self.columns as usize;
            let cells = &self.cells[start..start + self.columns as usize];
            if cells.iter().all(|cell| *cell == Cell::Blank) {
                continue;
            }
            writer.queue(MoveTo(0, row))?;
            for cell in cells {
                match cell {
                    Cell::Blank => {
                        writer.queue(Print(' '))?;
                    }
                    Cell::Glyph(ch, color) => {
                        writer.queue(SetForegroundColor((*color).into()))?;
                        writer.queue(Print(*ch))?;
                    }
                    Cell::Continuation => (),
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    fn offset(&self, column: u16, row: u16) -> Option<usize> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }

    fn in_bounds(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let column = u16::try_from(x).ok()?;
        let row = u16::try_from(y).ok()?;
        (column < self.columns && row < self.rows).then_some((column, row))
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (i32, i32) {
        (self.columns as i32, self.rows as i32)
    }

    fn draw_glyph(&mut self, x: i32, baseline: i32, ch: char, color: Color) {
        // A glyph sits right on its baseline row.
        let width = ch.width().unwrap_or(0);
        if width == 0 {
            return;
        }
        let Some((column, row)) = self.in_bounds(x, baseline) else {
            return;
        };
        // Double width glyphs that don't fit are dropped rather than split.
        if width == 2 && column + 1 >= self.columns {
            return;
        }
        let Some(offset) = self.offset(column, row) else {
            return;
        };
        self.cells[offset] = Cell::Glyph(ch, color);
        if width == 2 {
            self.cells[offset + 1] = Cell::Continuation;
        }
    }
}

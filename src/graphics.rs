use crate::geometry::{Point, Segment};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

/// A single character cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: ' ',
        color: Color::Reset,
    };
}

/// Character-cell frame buffer
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resizes the buffer, clearing it
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::BLANK; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    /// Sets one cell, ignoring coordinates outside the canvas
    pub fn plot(&mut self, x: isize, y: isize, glyph: char, color: Color) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = Cell { glyph, color };
        }
    }

    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x].glyph)
        } else {
            None
        }
    }

    /// Draws a line between two points using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, glyph: char, color: Color) {
        let (mut x0, mut y0, x1, y1) = (
            x0.round() as isize,
            y0.round() as isize,
            x1.round() as isize,
            y1.round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            self.plot(x0, y0, glyph, color);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn draw_segment(&mut self, segment: &Segment, glyph: char, color: Color) {
        let end = segment.endpoint();
        self.draw_line(segment.x, segment.y, end.x, end.y, glyph, color);
    }

    pub fn draw_marker(&mut self, point: Point, glyph: char, color: Color) {
        self.plot(point.x.round() as isize, point.y.round() as isize, glyph, color);
    }

    /// Writes `text` starting at `(x, y)`, clipped to the canvas
    pub fn draw_text(&mut self, x: isize, y: isize, text: &str, color: Color) {
        for (i, glyph) in text.chars().enumerate() {
            self.plot(x + i as isize, y, glyph, color);
        }
    }

    /// Writes `text` so it ends `margin` cells from the right edge
    pub fn draw_text_right(&mut self, y: isize, text: &str, margin: usize, color: Color) {
        let len = text.chars().count();
        let x = self.width as isize - (len + margin) as isize;
        self.draw_text(x.max(0), y, text, color);
    }

    /// Queues the whole frame on `out`, switching colour only between runs
    pub fn present<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (row, cells) in self.cells.chunks(self.width.max(1)).enumerate() {
            queue!(out, MoveTo(0, row as u16))?;
            let mut current: Option<Color> = None;
            let mut run = String::with_capacity(self.width);
            for cell in cells {
                if current != Some(cell.color) {
                    if let Some(color) = current {
                        queue!(out, SetForegroundColor(color), Print(&run))?;
                        run.clear();
                    }
                    current = Some(cell.color);
                }
                run.push(cell.glyph);
            }
            if let Some(color) = current {
                queue!(out, SetForegroundColor(color), Print(&run))?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()
    }
}

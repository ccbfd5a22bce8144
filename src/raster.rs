use std::fmt;

use crate::camera::{ScreenPoint, Viewport};

/// Row-major character grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl FrameBuffer {
    pub fn new(viewport: Viewport, fill: char) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            cells: vec![fill; viewport.width * viewport.height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    pub fn clear(&mut self, fill: char) {
        self.cells.fill(fill);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write one cell. Out-of-bounds writes are ignored.
    pub fn put(&mut self, x: i32, y: i32, ch: char) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = ch;
        }
    }

    /// Integer Bresenham line from `a` to `b`, both ends included.
    pub fn draw_line(&mut self, a: ScreenPoint, b: ScreenPoint, ch: char) {
        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (a.x, a.y);

        loop {
            self.put(x, y, ch);
            if x == b.x && y == b.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn row(&self, y: usize) -> Option<&[char]> {
        if y >= self.height {
            return None;
        }
        self.cells.get(y * self.width..(y + 1) * self.width)
    }

    /// Rows top to bottom. An empty buffer yields no rows.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.viewport().contains(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for ch in row {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

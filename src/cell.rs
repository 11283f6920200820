use egui::{Pos2, Rect, pos2};

use crate::color::PixelColor;

/// One square unit of the sheet.
///
/// Position, size and index are fixed when the owning [`crate::Grid`] is
/// built; only the color changes afterwards. Edges are shared exactly with
/// the neighbouring cells, so the cells of a sheet tile its canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    index: usize,
    row: usize,
    col: usize,
    min: Pos2,
    max: Pos2,
    size: f32,
    color: PixelColor,
    dirty: bool,
}

/// Offset of the `line`-th cell edge on a canvas split into `width` cells.
fn edge(line: usize, width: usize, canvas_size: f32) -> f32 {
    if line >= width {
        canvas_size
    } else {
        line as f32 * canvas_size / width as f32
    }
}

impl Cell {
    pub fn new(index: usize, width: usize, canvas_size: f32, color: PixelColor) -> Self {
        let row = index / width;
        let col = index % width;
        Self {
            index,
            row,
            col,
            min: pos2(edge(col, width, canvas_size), edge(row, width, canvas_size)),
            max: pos2(edge(col + 1, width, canvas_size), edge(row + 1, width, canvas_size)),
            size: canvas_size / width as f32,
            color,
            // Freshly built cells have never been drawn.
            dirty: true,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn pos(&self) -> Pos2 {
        self.min
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> PixelColor {
        self.color
    }

    /// Area covered by the cell in canvas-local coordinates
    pub fn rect(&self) -> Rect {
        Rect::from_min_max(self.min, self.max)
    }

    /// Overwrite the color and flag the cell for redraw.
    pub fn set_color(&mut self, color: PixelColor) {
        self.color = color;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Half-open hit test: the right and bottom edges belong to the
    /// neighbouring cell.
    pub fn collides(&self, x: f32, y: f32) -> bool {
        x >= self.min.x && x < self.max.x && y >= self.min.y && y < self.max.y
    }

    /// Orthogonal neighbours in the order left, up, right, down.
    pub fn neighbors(&self, width: usize) -> Neighbors {
        let mut slots = [None; 4];
        if self.col > 0 {
            slots[0] = Some(self.index - 1);
        }
        if self.row > 0 {
            slots[1] = Some(self.index - width);
        }
        if self.col + 1 < width {
            slots[2] = Some(self.index + 1);
        }
        if self.row + 1 < width {
            slots[3] = Some(self.index + width);
        }
        Neighbors { slots, next: 0 }
    }
}

/// Iterator over the up-to-four orthogonal neighbours of a cell
#[derive(Debug, Clone)]
pub struct Neighbors {
    slots: [Option<usize>; 4],
    next: usize,
}

impl Iterator for Neighbors {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next < self.slots.len() {
            let slot = self.slots[self.next];
            self.next += 1;
            if slot.is_some() {
                return slot;
            }
        }
        None
    }
}

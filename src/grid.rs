use crate::cell::Cell;
use crate::color::PixelColor;
use crate::error::GridError;
use crate::renderer::CellRenderer;
use crate::serializer::{self, SerializeError};
use crate::tools::ToolType;

pub type GridResult<T> = Result<T, GridError>;

/// The paintable sheet: a square, row-major grid of [`Cell`]s.
///
/// A grid is never resized or partially rebuilt. Opening a file or undoing
/// produces a new `Grid` that replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    canvas_size: f32,
    cell_size: f32,
    cells: Vec<Cell>,
}

/// Cells per side of a fresh sheet
pub const DEFAULT_WIDTH: usize = 16;
/// Edge length of the canvas in points
pub const DEFAULT_CANVAS_SIZE: f32 = 512.0;

impl Default for Grid {
    fn default() -> Self {
        let len = DEFAULT_WIDTH * DEFAULT_WIDTH;
        Self::build(DEFAULT_WIDTH, DEFAULT_CANVAS_SIZE, vec![PixelColor::Transparent; len])
    }
}

impl Grid {
    /// Creates a `width` × `width` grid with every cell transparent.
    pub fn new(width: usize, canvas_size: f32) -> GridResult<Self> {
        let len = width
            .checked_mul(width)
            .ok_or(GridError::InvalidWidth(width))?;
        Self::from_colors(width, canvas_size, vec![PixelColor::Transparent; len])
    }

    /// Rebuilds a grid from row-major colors.
    pub fn from_colors(width: usize, canvas_size: f32, colors: Vec<PixelColor>) -> GridResult<Self> {
        if width == 0 {
            return Err(GridError::InvalidWidth(width));
        }
        if !canvas_size.is_finite() || canvas_size <= 0.0 {
            return Err(GridError::InvalidCanvasSize(canvas_size));
        }
        let expected = width
            .checked_mul(width)
            .ok_or(GridError::InvalidWidth(width))?;
        if colors.len() != expected {
            return Err(GridError::ColorCountMismatch {
                expected,
                found: colors.len(),
            });
        }

        Ok(Self::build(width, canvas_size, colors))
    }

    fn build(width: usize, canvas_size: f32, colors: Vec<PixelColor>) -> Self {
        let cell_size = canvas_size / width as f32;
        let cells = colors
            .into_iter()
            .enumerate()
            .map(|(index, color)| Cell::new(index, width, canvas_size, color))
            .collect();

        Self {
            width,
            canvas_size,
            cell_size,
            cells,
        }
    }

    /// Parses a serialized sheet into a fresh grid.
    pub fn from_snapshot(text: &str, canvas_size: f32) -> Result<Self, SerializeError> {
        let (width, colors) = serializer::deserialize(text)?;
        Self::from_colors(width, canvas_size, colors)
            .map_err(|e| SerializeError::MalformedFile(e.to_string()))
    }

    pub fn to_snapshot(&self) -> String {
        serializer::serialize(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn canvas_size(&self) -> f32 {
        self.canvas_size
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn color_at(&self, index: usize) -> Option<PixelColor> {
        self.cells.get(index).map(Cell::color)
    }

    pub fn colors(&self) -> impl Iterator<Item = PixelColor> + '_ {
        self.cells.iter().map(Cell::color)
    }

    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.width && col < self.width).then_some(row * self.width + col)
    }

    fn check_index(&self, index: usize) -> GridResult<()> {
        if index < self.cells.len() {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                index,
                len: self.cells.len(),
            })
        }
    }

    /// Finds the cell under a canvas-local point.
    ///
    /// The candidate comes from direct index arithmetic; the neighbouring
    /// rows/columns are consulted only when float rounding puts the point on
    /// the other side of a cell edge, so the answer always agrees with
    /// [`Cell::collides`].
    pub fn resolve_cell(&self, x: f32, y: f32) -> Option<usize> {
        if !(x >= 0.0 && y >= 0.0 && x < self.canvas_size && y < self.canvas_size) {
            return None;
        }
        let last = self.width - 1;
        let col = ((x / self.cell_size).floor() as usize).min(last);
        let row = ((y / self.cell_size).floor() as usize).min(last);

        let candidate = row * self.width + col;
        if self.cells[candidate].collides(x, y) {
            return Some(candidate);
        }

        let rows = row.saturating_sub(1)..=(row + 1).min(last);
        rows.flat_map(|r| {
            let cols = col.saturating_sub(1)..=(col + 1).min(last);
            cols.map(move |c| r * self.width + c)
        })
        .find(|&index| self.cells[index].collides(x, y))
    }

    /// Sets one cell. Returns the changed indices (empty when the cell
    /// already had `color`).
    pub fn paint(&mut self, index: usize, color: PixelColor) -> GridResult<Vec<usize>> {
        self.check_index(index)?;
        let cell = &mut self.cells[index];
        if cell.color() == color {
            return Ok(Vec::new());
        }
        cell.set_color(color);
        Ok(vec![index])
    }

    /// Resolves the cell under `(x, y)` and applies `tool` to it.
    pub fn apply_tool(
        &mut self,
        x: f32,
        y: f32,
        tool: ToolType,
        color: PixelColor,
    ) -> GridResult<Vec<usize>> {
        let index = self
            .resolve_cell(x, y)
            .ok_or(GridError::PointOutside { x, y })?;
        tool.apply(self, index, color)
    }

    /// Recolors the 4-connected region of the seed's original color.
    ///
    /// Uses an explicit stack, so region size is bounded by memory rather
    /// than call depth. Indices are marked visited when pushed, so each cell
    /// is queued at most once. Returns the changed indices in visit order.
    pub fn flood_fill(&mut self, seed: usize, new_color: PixelColor) -> GridResult<Vec<usize>> {
        self.check_index(seed)?;

        let target = self.cells[seed].color();
        if target == new_color {
            return Ok(Vec::new());
        }

        let mut visited = vec![false; self.cells.len()];
        let mut stack = vec![seed];
        visited[seed] = true;
        let mut changed = Vec::new();

        while let Some(index) = stack.pop() {
            self.cells[index].set_color(new_color);
            changed.push(index);

            for neighbor in self.cells[index].neighbors(self.width) {
                if !visited[neighbor] && self.cells[neighbor].color() == target {
                    visited[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }

        log::debug!(
            "Flood fill from {} recolored {} cells to {}",
            seed,
            changed.len(),
            new_color
        );
        Ok(changed)
    }

    pub fn has_dirty(&self) -> bool {
        self.cells.iter().any(Cell::is_dirty)
    }

    /// Draws every cell once, in index order.
    pub fn render_all(&mut self, renderer: &mut dyn CellRenderer) {
        for cell in &mut self.cells {
            renderer.render_cell(cell.rect(), cell.color());
            cell.clear_dirty();
        }
    }

    /// Draws only the cells changed since the last render.
    pub fn render_dirty(&mut self, renderer: &mut dyn CellRenderer) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_dirty()) {
            renderer.render_cell(cell.rect(), cell.color());
            cell.clear_dirty();
        }
    }
}

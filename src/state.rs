use crate::color::PixelColor;
use crate::config::SheetConfig;
use crate::error::{GridError, SessionError};
use crate::grid::Grid;
use crate::history::SnapshotHistory;
use crate::tools::ToolType;

pub type SessionResult<T> = Result<T, SessionError>;

/// Pointer state between press and release
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeState {
    #[default]
    Idle,
    /// Button held. `changed` records whether any cell was recolored since
    /// the press, which decides if release commits a snapshot.
    Drawing { changed: bool },
}

/// The editing session: the active sheet plus everything the input handlers
/// need (tool, color, pointer state, undo history).
#[derive(Debug, Clone)]
pub struct EditorState {
    grid: Grid,
    history: SnapshotHistory,
    tool: ToolType,
    color: PixelColor,
    stroke: StrokeState,
}

impl Default for EditorState {
    fn default() -> Self {
        let grid = Grid::default();
        Self {
            history: SnapshotHistory::new(grid.to_snapshot()),
            grid,
            tool: ToolType::default(),
            color: PixelColor::rgb(0, 0, 0),
            stroke: StrokeState::Idle,
        }
    }
}

impl EditorState {
    pub fn new(width: usize, canvas_size: f32, color: PixelColor) -> SessionResult<Self> {
        let grid = Grid::new(width, canvas_size)?;
        let history = SnapshotHistory::new(grid.to_snapshot());
        Ok(Self {
            grid,
            history,
            tool: ToolType::default(),
            color,
            stroke: StrokeState::Idle,
        })
    }

    pub fn from_config(config: &SheetConfig) -> SessionResult<Self> {
        Self::new(config.default_width, config.canvas_size, config.initial_color())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn tool(&self) -> ToolType {
        self.tool
    }

    pub fn color(&self) -> PixelColor {
        self.color
    }

    pub fn stroke(&self) -> StrokeState {
        self.stroke
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.stroke, StrokeState::Drawing { .. })
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn select_tool(&mut self, name: &str) -> SessionResult<()> {
        let tool = name.parse::<ToolType>()?;
        self.set_tool(tool);
        Ok(())
    }

    pub fn set_tool(&mut self, tool: ToolType) {
        if tool != self.tool {
            log::info!("Tool selected: {}", tool);
        }
        self.tool = tool;
    }

    pub fn select_color(&mut self, color: PixelColor) {
        self.color = color;
    }

    /// Starts a stroke. The bucket fires here and only here.
    ///
    /// A stroke still open from a press whose release never arrived is
    /// committed first, so its changes stay undoable.
    pub fn pointer_press(&mut self, x: f32, y: f32) -> SessionResult<Vec<usize>> {
        if self.is_pressed() {
            log::debug!("Press while a stroke is open, closing it");
            self.finish_stroke();
        }
        self.stroke = StrokeState::Drawing { changed: false };
        self.apply_at(x, y)
    }

    /// Continues a stroke. Ignored unless pressed; never fires the bucket.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> SessionResult<Vec<usize>> {
        if !self.is_pressed() || !self.tool.paints_while_dragging() {
            return Ok(Vec::new());
        }
        self.apply_at(x, y)
    }

    /// Ends a stroke and commits a snapshot if anything changed.
    pub fn pointer_release(&mut self, x: f32, y: f32) -> SessionResult<Vec<usize>> {
        if !self.is_pressed() {
            return Ok(Vec::new());
        }
        let result = if self.tool.paints_while_dragging() {
            self.apply_at(x, y)
        } else {
            Ok(Vec::new())
        };

        self.finish_stroke();
        result
    }

    fn finish_stroke(&mut self) {
        if let StrokeState::Drawing { changed: true } = self.stroke {
            self.history.commit(&self.grid);
            log::debug!("Committed snapshot #{}", self.history.len());
        }
        self.stroke = StrokeState::Idle;
    }

    fn apply_at(&mut self, x: f32, y: f32) -> SessionResult<Vec<usize>> {
        let changed = match self.grid.apply_tool(x, y, self.tool, self.color) {
            Ok(changed) => changed,
            Err(GridError::PointOutside { .. }) => {
                log::debug!("Skipping point ({}, {}) outside the canvas", x, y);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        if !changed.is_empty() {
            if let StrokeState::Drawing { changed: flag } = &mut self.stroke {
                *flag = true;
            }
        }
        Ok(changed)
    }

    /// Serialized form of the current sheet.
    pub fn save(&self) -> String {
        self.grid.to_snapshot()
    }

    /// Replaces the sheet with a parsed one and reseeds the history.
    ///
    /// The new grid is fully built before the swap; on error the current
    /// sheet and history are untouched.
    pub fn load(&mut self, text: &str) -> SessionResult<()> {
        let grid = Grid::from_snapshot(text, self.grid.canvas_size())?;
        log::info!("Loaded {}x{} sheet", grid.width(), grid.width());
        self.replace_grid(grid);
        Ok(())
    }

    /// Starts over with a blank sheet of `width` cells per side.
    pub fn new_sheet(&mut self, width: usize) -> SessionResult<()> {
        let grid = Grid::new(width, self.grid.canvas_size())?;
        log::info!("New {}x{} sheet", width, width);
        self.replace_grid(grid);
        Ok(())
    }

    fn replace_grid(&mut self, grid: Grid) {
        self.history.reset(grid.to_snapshot());
        self.grid = grid;
        self.stroke = StrokeState::Idle;
    }

    /// Rolls back to the previous snapshot. A no-op at the history floor.
    ///
    /// The snapshot is parsed before the history is popped; on error both
    /// the sheet and the history are untouched.
    pub fn undo(&mut self) -> SessionResult<()> {
        let Some(previous) = self.history.previous() else {
            return Ok(());
        };
        let grid = Grid::from_snapshot(previous, self.grid.canvas_size())?;
        self.history.undo();
        self.grid = grid;
        self.stroke = StrokeState::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditorState {
        EditorState::new(4, 40.0, PixelColor::rgb(255, 0, 0)).unwrap()
    }

    #[test]
    fn test_stroke_state_transitions() {
        let mut state = session();
        assert_eq!(state.stroke(), StrokeState::Idle);
        state.pointer_press(5.0, 5.0).unwrap();
        assert_eq!(state.stroke(), StrokeState::Drawing { changed: true });
        state.pointer_release(5.0, 5.0).unwrap();
        assert_eq!(state.stroke(), StrokeState::Idle);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut state = session();
        assert!(state.pointer_move(5.0, 5.0).unwrap().is_empty());
        assert!(state.pointer_release(5.0, 5.0).unwrap().is_empty());
        assert_eq!(state.grid().color_at(0), Some(PixelColor::Transparent));
    }

    #[test]
    fn test_points_outside_are_skipped() {
        let mut state = session();
        assert!(state.pointer_press(-3.0, 5.0).unwrap().is_empty());
        assert!(state.is_pressed());
        assert_eq!(state.pointer_move(15.0, 5.0).unwrap(), vec![1]);
        state.pointer_release(100.0, 100.0).unwrap();
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_press_closes_open_stroke() {
        let mut state = session();
        // Release never arrives for the first stroke.
        state.pointer_press(5.0, 5.0).unwrap();
        let painted = state.save();

        state.set_tool(ToolType::Bucket);
        state.select_color(PixelColor::rgb(0, 0, 255));
        state.pointer_press(25.0, 25.0).unwrap();
        state.pointer_release(25.0, 25.0).unwrap();

        assert_eq!(state.history().len(), 3);
        assert_eq!(state.history().current(), state.save());
        state.undo().unwrap();
        assert_eq!(state.save(), painted);
    }

    #[test]
    fn test_failed_undo_keeps_history() {
        let mut state = session();
        state.history.reset("2;#000".to_owned());
        state.history.commit(&state.grid);
        let before = state.save();

        assert!(state.undo().is_err());
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history().current(), before);
        assert_eq!(state.save(), before);
    }

    #[test]
    fn test_select_tool_by_name() {
        let mut state = session();
        state.select_tool("bucket").unwrap();
        assert_eq!(state.tool(), ToolType::Bucket);
        assert!(state.select_tool("spray").is_err());
        assert_eq!(state.tool(), ToolType::Bucket);
    }
}

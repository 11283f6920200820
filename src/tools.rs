use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::PixelColor;
use crate::error::{GridError, SessionError};
use crate::grid::Grid;

/// The painting tools available on the sheet
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    #[default]
    Pencil,
    Eraser,
    Bucket,
}

impl ToolType {
    pub const ALL: [ToolType; 3] = [ToolType::Pencil, ToolType::Eraser, ToolType::Bucket];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Eraser => "eraser",
            Self::Bucket => "bucket",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pencil => "✏ Pencil",
            Self::Eraser => "⌫ Eraser",
            Self::Bucket => "◼ Bucket",
        }
    }

    pub fn shortcut(&self) -> egui::Key {
        match self {
            Self::Pencil => egui::Key::P,
            Self::Eraser => egui::Key::E,
            Self::Bucket => egui::Key::B,
        }
    }

    /// Whether pointer moves with the button held keep applying the tool.
    ///
    /// A fill re-triggered on every move would run over and over, so the
    /// bucket only fires on the press edge.
    pub fn paints_while_dragging(&self) -> bool {
        !matches!(self, Self::Bucket)
    }

    /// Applies the tool to the cell at `index`, returning changed indices.
    pub fn apply(&self, grid: &mut Grid, index: usize, color: PixelColor) -> Result<Vec<usize>, GridError> {
        match self {
            Self::Pencil => grid.paint(index, color),
            Self::Eraser => grid.paint(index, PixelColor::Transparent),
            Self::Bucket => grid.flood_fill(index, color),
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolType {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SessionError::UnknownTool(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!("pencil".parse::<ToolType>().unwrap(), ToolType::Pencil);
        assert_eq!("Eraser".parse::<ToolType>().unwrap(), ToolType::Eraser);
        assert_eq!(" BUCKET ".parse::<ToolType>().unwrap(), ToolType::Bucket);
        assert!(matches!(
            "brush".parse::<ToolType>(),
            Err(SessionError::UnknownTool(name)) if name == "brush"
        ));
    }

    #[test]
    fn test_drag_policy() {
        assert!(ToolType::Pencil.paints_while_dragging());
        assert!(ToolType::Eraser.paints_while_dragging());
        assert!(!ToolType::Bucket.paints_while_dragging());
    }

    #[test]
    fn test_apply_dispatch() {
        let mut grid = Grid::new(2, 2.0).unwrap();
        let blue = PixelColor::rgb(0, 0, 255);

        assert_eq!(ToolType::Pencil.apply(&mut grid, 0, blue).unwrap(), vec![0]);
        assert_eq!(grid.color_at(0), Some(blue));

        assert_eq!(ToolType::Eraser.apply(&mut grid, 0, blue).unwrap(), vec![0]);
        assert_eq!(grid.color_at(0), Some(PixelColor::Transparent));

        let mut filled = ToolType::Bucket.apply(&mut grid, 3, blue).unwrap();
        filled.sort_unstable();
        assert_eq!(filled, vec![0, 1, 2, 3]);
    }
}

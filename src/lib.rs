#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod cell;
pub mod color;
pub mod config;
pub mod error;
pub mod file_handler;
pub mod grid;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod serializer;
pub mod state;
pub mod tools;

pub use app::PaintApp;
pub use cell::Cell;
pub use color::PixelColor;
pub use error::{GridError, SessionError};
pub use grid::Grid;
pub use history::SnapshotHistory;
pub use input::{InputEvent, InputHandler};
pub use renderer::{CellRenderer, Renderer};
pub use state::EditorState;
pub use tools::ToolType;

//! Single-line text format for sheets:
//!
//! ```text
//! <width>;<color_0>;<color_1>;...;<color_{width*width-1}>
//! ```
//!
//! Colors use [`PixelColor::encode`], none of whose forms contain the
//! delimiter.

use thiserror::Error;

use crate::color::{ColorParseError, PixelColor};
use crate::grid::Grid;

/// Separator between the width and every color token
pub const DELIMITER: char = ';';

/// Suffix for sheet files. Informational only, the content is self-describing.
pub const FILE_EXTENSION: &str = "pxs";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SerializeError {
    #[error("malformed sheet file: {0}")]
    MalformedFile(String),
}

impl From<ColorParseError> for SerializeError {
    fn from(error: ColorParseError) -> Self {
        SerializeError::MalformedFile(error.to_string())
    }
}

pub type SerializeResult<T> = Result<T, SerializeError>;

pub fn serialize(grid: &Grid) -> String {
    let mut out = grid.width().to_string();
    for color in grid.colors() {
        out.push(DELIMITER);
        out.push_str(&color.encode());
    }
    out
}

/// Splits a sheet file into its width and row-major colors.
///
/// Surrounding whitespace (such as a trailing newline) is ignored.
pub fn deserialize(text: &str) -> SerializeResult<(usize, Vec<PixelColor>)> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SerializeError::MalformedFile("file is empty".to_owned()));
    }

    let mut tokens = text.split(DELIMITER);
    let width_token = tokens.next().unwrap_or_default().trim();
    let width: usize = width_token.parse().map_err(|_| {
        SerializeError::MalformedFile(format!("width {:?} is not a positive integer", width_token))
    })?;
    if width == 0 {
        return Err(SerializeError::MalformedFile("width must be positive".to_owned()));
    }

    let expected = width
        .checked_mul(width)
        .ok_or_else(|| SerializeError::MalformedFile(format!("width {} is too large", width)))?;

    let colors = tokens
        .map(str::parse::<PixelColor>)
        .collect::<Result<Vec<_>, _>>()?;

    if colors.len() != expected {
        return Err(SerializeError::MalformedFile(format!(
            "expected {} colors for width {}, found {}",
            expected,
            width,
            colors.len()
        )));
    }

    Ok((width, colors))
}

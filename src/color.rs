use std::fmt;
use std::str::FromStr;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token written for [`PixelColor::Transparent`].
pub const TRANSPARENT_TOKEN: &str = "transparent";

/// Error produced when a textual color cannot be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color value: {0:?}")]
pub struct ColorParseError(pub String);

/// The color held by a single cell.
///
/// Channels are stored unmultiplied so that the textual form round-trips
/// exactly. `Transparent` is the "no color" sentinel and is distinct from
/// any `Rgba` value, including a fully transparent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PixelColor {
    #[default]
    Transparent,
    Rgba([u8; 4]),
}

impl PixelColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgba([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::Rgba([r, g, b, a])
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// Color to hand to the painter. The sentinel has no fill of its own.
    pub fn to_color32(&self) -> Option<Color32> {
        match *self {
            Self::Transparent => None,
            Self::Rgba([r, g, b, a]) => Some(Color32::from_rgba_unmultiplied(r, g, b, a)),
        }
    }

    /// Build from an egui color picker value.
    pub fn from_color32(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self::Rgba([r, g, b, a])
    }

    /// Textual encoding used by the sheet file format.
    ///
    /// Opaque colors are written as `#RRGGBB`, translucent ones as
    /// `rgba(r,g,b,a)` with alpha in `[0, 1]`.
    pub fn encode(&self) -> String {
        match *self {
            Self::Transparent => TRANSPARENT_TOKEN.to_owned(),
            Self::Rgba([r, g, b, 255]) => format!("#{:02X}{:02X}{:02X}", r, g, b),
            Self::Rgba([r, g, b, a]) => {
                format!("rgba({},{},{},{:.3})", r, g, b, f32::from(a) / 255.0)
            }
        }
    }
}

impl fmt::Display for PixelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for PixelColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let err = || ColorParseError(s.to_owned());

        if text.eq_ignore_ascii_case(TRANSPARENT_TOKEN) {
            return Ok(Self::Transparent);
        }

        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }

        let lower = text.to_ascii_lowercase();
        if let Some(body) = lower.strip_prefix("rgba(").and_then(|b| b.strip_suffix(')')) {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            if parts.len() != 4 {
                return Err(err());
            }
            let r = parts[0].parse::<u8>().map_err(|_| err())?;
            let g = parts[1].parse::<u8>().map_err(|_| err())?;
            let b = parts[2].parse::<u8>().map_err(|_| err())?;
            let a = parse_alpha(parts[3]).ok_or_else(err)?;
            return Ok(Self::Rgba([r, g, b, a]));
        }

        if let Some(body) = lower.strip_prefix("rgb(").and_then(|b| b.strip_suffix(')')) {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(err());
            }
            let r = parts[0].parse::<u8>().map_err(|_| err())?;
            let g = parts[1].parse::<u8>().map_err(|_| err())?;
            let b = parts[2].parse::<u8>().map_err(|_| err())?;
            return Ok(Self::rgb(r, g, b));
        }

        Err(err())
    }
}

fn parse_hex(hex: &str) -> Option<PixelColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                let nibble = c.to_digit(16)? as u8;
                *slot = nibble * 17;
            }
            Some(PixelColor::rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Some(PixelColor::rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(PixelColor::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

fn parse_alpha(text: &str) -> Option<u8> {
    let alpha: f32 = text.parse().ok()?;
    if !(0.0..=1.0).contains(&alpha) {
        return None;
    }
    Some((alpha * 255.0).round() as u8)
}

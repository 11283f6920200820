use std::fmt;

use eframe::egui::{self, Color32, ColorImage, Rect, TextureHandle, TextureOptions, pos2};

use crate::color::PixelColor;
use crate::grid::Grid;

/// Output surface for drawing cells.
///
/// `rect` is in canvas-local coordinates (origin at the sheet's top-left).
pub trait CellRenderer {
    fn render_cell(&mut self, rect: Rect, color: PixelColor);
}

/// Colors used for the transparent placeholder pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkerboard {
    pub light: Color32,
    pub dark: Color32,
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self {
            light: Color32::from_gray(230),
            dark: Color32::from_gray(190),
        }
    }
}

impl Checkerboard {
    /// Shade of one quarter of a cell, light in the top-left and
    /// bottom-right quarters.
    pub fn shade(&self, dx: usize, dy: usize) -> Color32 {
        if dx == dy { self.light } else { self.dark }
    }

    /// `color` composited over the pattern for one quarter.
    pub fn composite(&self, color: PixelColor, dx: usize, dy: usize) -> Color32 {
        let shade = self.shade(dx, dy);
        match color {
            PixelColor::Transparent => shade,
            PixelColor::Rgba([r, g, b, a]) => {
                let mix = |top: u8, bottom: u8| {
                    ((top as u32 * a as u32 + bottom as u32 * (255 - a as u32) + 127) / 255) as u8
                };
                Color32::from_rgb(mix(r, shade.r()), mix(g, shade.g()), mix(b, shade.b()))
            }
        }
    }
}

/// Each cell owns a 2×2 block of texels so the checkerboard survives
/// nearest-neighbour scaling.
const TEXELS_PER_CELL: usize = 2;

/// CPU copy of the sheet texture plus its GPU handle
struct SheetTexture {
    image: ColorImage,
    handle: TextureHandle,
}

/// Writes cells into the texel buffer of a [`SheetTexture`]
struct TexelWriter<'a> {
    image: &'a mut ColorImage,
    cell_size: f32,
    checkerboard: Checkerboard,
    written: usize,
}

impl CellRenderer for TexelWriter<'_> {
    fn render_cell(&mut self, rect: Rect, color: PixelColor) {
        let col = (rect.min.x / self.cell_size).round() as usize;
        let row = (rect.min.y / self.cell_size).round() as usize;
        let [width, height] = self.image.size;
        for dy in 0..TEXELS_PER_CELL {
            for dx in 0..TEXELS_PER_CELL {
                let x = col * TEXELS_PER_CELL + dx;
                let y = row * TEXELS_PER_CELL + dy;
                if x < width && y < height {
                    self.image.pixels[y * width + x] = self.checkerboard.composite(color, dx, dy);
                }
            }
        }
        self.written += 1;
    }
}

/// Draws the sheet into an egui painter.
///
/// The sheet is kept as a texture; each frame only the cells changed since
/// the previous frame are redrawn into it.
#[derive(Default)]
pub struct Renderer {
    checkerboard: Checkerboard,
    show_grid_lines: bool,
    sheet: Option<SheetTexture>,
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("checkerboard", &self.checkerboard)
            .field("show_grid_lines", &self.show_grid_lines)
            .field("texture_size", &self.texture_size())
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_grid_lines(&self) -> bool {
        self.show_grid_lines
    }

    pub fn set_show_grid_lines(&mut self, show: bool) {
        self.show_grid_lines = show;
    }

    /// Texel size of the cached sheet texture, if one has been built.
    pub fn texture_size(&self) -> Option<[usize; 2]> {
        self.sheet.as_ref().map(|sheet| sheet.image.size)
    }

    /// Brings the cached texture up to date with `grid`.
    ///
    /// A sheet of a new width rebuilds the texture from every cell; otherwise
    /// only dirty cells are redrawn and uploaded. Returns how many cells were
    /// drawn.
    pub fn sync(&mut self, ctx: &egui::Context, grid: &mut Grid) -> usize {
        let texels = grid.width() * TEXELS_PER_CELL;
        let cell_size = grid.cell_size();

        let reusable = self
            .sheet
            .as_ref()
            .is_some_and(|sheet| sheet.image.size == [texels, texels]);
        if !reusable {
            let mut image = ColorImage::new([texels, texels], Color32::TRANSPARENT);
            let mut writer = TexelWriter {
                image: &mut image,
                cell_size,
                checkerboard: self.checkerboard,
                written: 0,
            };
            grid.render_all(&mut writer);
            let written = writer.written;
            log::debug!("Built {}x{} sheet texture", texels, texels);
            let handle = ctx.load_texture("pixel_sheet", image.clone(), TextureOptions::NEAREST);
            self.sheet = Some(SheetTexture { image, handle });
            return written;
        }

        let Some(sheet) = self.sheet.as_mut() else {
            return 0;
        };
        if !grid.has_dirty() {
            return 0;
        }
        let mut writer = TexelWriter {
            image: &mut sheet.image,
            cell_size,
            checkerboard: self.checkerboard,
            written: 0,
        };
        grid.render_dirty(&mut writer);
        let written = writer.written;
        sheet.handle.set(sheet.image.clone(), TextureOptions::NEAREST);
        written
    }

    /// Draws `grid` into `rect`, refreshing the texture first.
    pub fn render(&mut self, painter: &egui::Painter, rect: Rect, grid: &mut Grid) {
        self.sync(painter.ctx(), grid);
        if let Some(sheet) = &self.sheet {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(sheet.handle.id(), rect, uv, Color32::WHITE);
        }

        if self.show_grid_lines {
            let stroke = egui::Stroke::new(1.0, Color32::from_black_alpha(40));
            for i in 1..grid.width() {
                let offset = grid.cells()[i].rect().min.x;
                painter.vline(rect.min.x + offset, rect.y_range(), stroke);
                painter.hline(rect.x_range(), rect.min.y + offset, stroke);
            }
        }
    }
}

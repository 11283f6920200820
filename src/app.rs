use std::path::Path;

use crate::color::PixelColor;
use crate::config::SheetConfig;
use crate::file_handler;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::EditorState;
use crate::tools::ToolType;

/// What survives a restart. The sheet itself is kept in its file format.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedState {
    tool: ToolType,
    color: Option<PixelColor>,
    file_name: Option<String>,
    new_width: Option<usize>,
    show_grid_lines: bool,
    snapshot: Option<String>,
}

pub struct PaintApp {
    state: EditorState,
    renderer: Renderer,
    input: InputHandler,
    file_name: String,
    new_width: usize,
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SheetConfig) -> Self {
        let mut app = Self::with_config(config);
        if let Some(storage) = cc.storage {
            if let Some(persisted) = eframe::get_value::<PersistedState>(storage, eframe::APP_KEY) {
                app.restore(persisted);
            }
        }
        app
    }

    pub fn with_config(config: SheetConfig) -> Self {
        let state = EditorState::from_config(&config).unwrap_or_else(|e| {
            log::warn!("Config rejected ({}), using defaults", e);
            EditorState::default()
        });
        Self {
            file_name: config.file_name,
            new_width: state.grid().width(),
            state,
            renderer: Renderer::new(),
            input: InputHandler::new(egui::Rect::NOTHING),
            status: None,
        }
    }

    fn restore(&mut self, persisted: PersistedState) {
        self.state.set_tool(persisted.tool);
        if let Some(color) = persisted.color {
            self.state.select_color(color);
        }
        if let Some(file_name) = persisted.file_name {
            self.file_name = file_name;
        }
        if let Some(width) = persisted.new_width {
            self.new_width = width.max(1);
        }
        self.renderer.set_show_grid_lines(persisted.show_grid_lines);
        if let Some(snapshot) = persisted.snapshot {
            if let Err(e) = self.state.load(&snapshot) {
                log::warn!("Discarding stored sheet: {}", e);
            }
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn file_name_mut(&mut self) -> &mut String {
        &mut self.file_name
    }

    pub fn new_width_mut(&mut self) -> &mut usize {
        &mut self.new_width
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, status: String) {
        self.status = Some(status);
    }

    pub fn undo(&mut self) {
        if let Err(e) = self.state.undo() {
            log::warn!("Undo failed: {}", e);
            self.set_status(format!("Undo failed: {}", e));
        }
    }

    pub fn new_sheet(&mut self) {
        match self.state.new_sheet(self.new_width) {
            Ok(()) => self.set_status(format!("New {0}x{0} sheet", self.new_width)),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn save_file(&mut self) {
        match file_handler::save_to_path(Path::new(&self.file_name), &self.state) {
            Ok(path) => self.set_status(format!("Saved {}", path.display())),
            Err(e) => {
                log::warn!("{}", e);
                self.set_status(e.to_string());
            }
        }
    }

    pub fn open_file(&mut self) {
        let path = file_handler::with_sheet_extension(Path::new(&self.file_name));
        match file_handler::load_from_path(&path, &mut self.state) {
            Ok(()) => {
                self.new_width = self.state.grid().width();
                self.set_status(format!("Opened {}", path.display()));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Routes this frame's pointer input for the canvas at `canvas_rect`.
    ///
    /// `hovered` tells whether the canvas is the topmost widget under the
    /// pointer; presses while something else covers it are ignored.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect, hovered: bool) {
        self.input.set_canvas_rect(canvas_rect);
        self.input.set_accepts_press(hovered);
        for event in self.input.process_input(ctx) {
            if let Err(e) = event.dispatch(&mut self.state) {
                log::warn!("Input {:?} failed: {}", event, e);
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let undo = ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z));
        if undo {
            self.undo();
        }
        for tool in ToolType::ALL {
            if ctx.input(|i| i.key_pressed(tool.shortcut()) && i.modifiers.is_none()) {
                self.state.set_tool(tool);
            }
        }
    }

    pub fn render_canvas(&mut self, painter: &egui::Painter, rect: egui::Rect) {
        self.renderer.render(painter, rect, self.state.grid_mut());
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persisted = PersistedState {
            tool: self.state.tool(),
            color: Some(self.state.color()),
            file_name: Some(self.file_name.clone()),
            new_width: Some(self.new_width),
            show_grid_lines: self.renderer.show_grid_lines(),
            snapshot: Some(self.state.save()),
        };
        eframe::set_value(storage, eframe::APP_KEY, &persisted);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

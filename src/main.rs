#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use std::path::Path;

    use eframe_pixel_sheet::PaintApp;
    use eframe_pixel_sheet::config::{CONFIG_FILE_NAME, SheetConfig};

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = SheetConfig::load_or_default(Path::new(CONFIG_FILE_NAME));
    let side = config.canvas_size + 260.0;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side, config.canvas_size + 40.0])
            .with_min_inner_size([300.0, 220.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Pixel Sheet",
        native_options,
        Box::new(move |cc| Ok(Box::new(PaintApp::new(cc, config)))),
    )
}

// The sheet editor only ships a native build.
#[cfg(target_arch = "wasm32")]
fn main() {}

#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use signature_pad::PadConfig;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // Optional path to a JSON pad config as the first argument
    let config = std::env::args().nth(1).and_then(|path| match PadConfig::load(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            log::error!("Ignoring config {}: {}", path, e);
            None
        }
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 320.0])
            .with_min_inner_size([240.0, 160.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Signature Pad",
        native_options,
        Box::new(|cc| Ok(Box::new(signature_pad::SignatureApp::new(cc, config)))),
    )
}

use std::path::Path;

use d120::prelude::Config;
use eframe::egui;

pub mod app;

const INITIAL_SIZE: (f32, f32) = (560.0, 820.0);

fn main() -> eframe::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => match Config::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config from {}: {}", path.to_string_lossy(), e);
                Config::default()
            }
        },
        None => Config::default(),
    };

    let options = eframe::NativeOptions {
        window_builder: Some(Box::new(move |wb| {
            wb.with_inner_size(egui::Vec2::new(INITIAL_SIZE.0, INITIAL_SIZE.1))
                .with_min_inner_size(egui::Vec2::new(INITIAL_SIZE.0 * 0.75, INITIAL_SIZE.1 * 0.75))
        })),
        ..Default::default()
    };
    eframe::run_native(
        "D120",
        options,
        Box::new(move |_cc| Ok(Box::new(app::App::new(config)?))),
    )
}

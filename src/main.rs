mod app;
mod color;
mod config;
mod data;
mod session;
mod state;
mod ui;

use app::MovieDashboardApp;
use config::StoreConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = StoreConfig::from_env();
    log::info!("Reading movies from {}", config.describe());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "IMDb 2024 Movies Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(MovieDashboardApp::new(config)))),
    )
}

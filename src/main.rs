mod app;
mod color;
mod config;
mod data;
mod format;
mod geo;
mod state;
mod ui;

use app::PollutionPanelApp;
use config::Config;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load(std::env::args())?;
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mortes atribuídas à poluição do ar",
        options,
        Box::new(|_cc| Ok(Box::new(PollutionPanelApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}

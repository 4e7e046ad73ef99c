use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PollutionPanelApp {
    pub state: AppState,
}

impl PollutionPanelApp {
    /// Build the app and load the configured dataset.  A missing or broken
    /// file leaves the dashboard empty with the error in the status line.
    pub fn new(config: Config) -> Self {
        let data_path = config.data_path.clone();
        let mut state = AppState::new(config);
        state.open(&data_path);
        Self { state }
    }
}

impl eframe::App for PollutionPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: view + selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                plot::dashboard(ui, &mut self.state);
            });
    }
}

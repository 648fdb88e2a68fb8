use eframe::egui;

use crate::config::StoreConfig;
use crate::state::{AppState, Page};
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MovieDashboardApp {
    pub state: AppState,
}

impl MovieDashboardApp {
    /// Start a session by loading the configured store.
    pub fn new(config: StoreConfig) -> Self {
        let mut state = AppState::new(config.clone());
        state.open_store(config);
        Self { state }
    }
}

impl eframe::App for MovieDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        if self.state.page == Page::Dashboard {
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: page content ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => pages::home(ui, &self.state),
            Page::Dashboard => pages::dashboard(ui, &self.state),
        });
    }
}

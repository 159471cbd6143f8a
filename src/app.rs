use std::sync::Arc;

use eframe::egui;

use crate::data::model::LaunchDataset;
use crate::state::DashboardState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: DashboardState,
}

impl LaunchDashApp {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        Self {
            state: DashboardState::new(dataset),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            panels::header(ui, &self.state);
        });

        // ---- Left side panel: selectors + outcome breakdown ----
        egui::SidePanel::left("selector_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: payload distribution ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::distribution_chart(ui, &self.state);
        });
    }
}

use eframe::egui::{self, RichText, Ui};

use crate::data::selection::PayloadRange;
use crate::state::DashboardState;
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

/// Render the title and the loaded/visible counts.
pub fn header(ui: &mut Ui, state: &DashboardState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(DASHBOARD_TITLE).size(28.0).strong());
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} launches loaded", state.dataset().len()));
        ui.separator();
        ui.label(format!(
            "{} in payload range",
            state.distribution().rows.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – selectors and the outcome breakdown
// ---------------------------------------------------------------------------

/// Render the site dropdown, the payload sliders and the pie chart.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    site_selector(ui, state);
    ui.add_space(8.0);
    payload_selector(ui, state);
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            charts::breakdown_chart(ui, state);
            ui.add_space(4.0);
            charts::outcome_legend(ui);
        });
}

fn site_selector(ui: &mut Ui, state: &mut DashboardState) {
    ui.strong("Launch site");

    let current = state.site_choice().clone();
    let current_label = state
        .site_options
        .iter()
        .find(|o| o.choice == current)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| current.to_string());

    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .width(ui.available_width())
        .selected_text(current_label)
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.site_options {
                if ui
                    .selectable_label(option.choice == current, &option.label)
                    .clicked()
                {
                    picked = Some(option.choice.clone());
                }
            }
        });

    if let Some(choice) = picked {
        state.set_site_choice(choice);
    }
}

fn payload_selector(ui: &mut Ui, state: &mut DashboardState) {
    ui.strong("Payload range (Kg):");

    let slider = state.slider.clone();
    let PayloadRange { mut low, mut high } = state.payload_range();

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, slider.min..=slider.max)
                .step_by(slider.step)
                .suffix(" kg")
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, slider.min..=slider.max)
                .step_by(slider.step)
                .suffix(" kg")
                .text("to"),
        )
        .changed();

    ui.horizontal(|ui: &mut Ui| {
        for mark in &slider.marks {
            ui.weak(format!("{mark:.0} kg"));
        }
    });

    if ui.small_button("Full range").clicked() {
        let full = PayloadRange::full(state.dataset());
        state.set_payload_range(full);
    } else if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }

    if !state.payload_range().is_valid() {
        let warn = ui.visuals().warn_fg_color;
        ui.colored_label(warn, "Lower bound exceeds upper bound");
    }
}

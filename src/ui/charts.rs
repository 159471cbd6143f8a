use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::outcome_color;
use crate::data::aggregate::{BreakdownTable, DistributionTable};
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Pie chart geometry
// ---------------------------------------------------------------------------

/// Angular extent of one breakdown row, in radians, starting at 12 o'clock
/// and running clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub row: usize,
    pub start: f32,
    pub sweep: f32,
    pub fraction: f32,
}

/// Slices for the non-empty rows of `table`, in row order. Empty when every
/// count is zero.
pub fn pie_slices(table: &BreakdownTable) -> Vec<PieSlice> {
    let total = table.total();
    if total == 0 {
        return Vec::new();
    }

    let mut start = -FRAC_PI_2;
    let mut slices = Vec::new();
    for (row, entry) in table.rows.iter().enumerate() {
        if entry.count == 0 {
            continue;
        }
        let fraction = entry.count as f32 / total as f32;
        let sweep = fraction * TAU;
        slices.push(PieSlice { row, start, sweep, fraction });
        start += sweep;
    }
    slices
}

/// Marker radius for a scatter point, growing with the square root of its
/// payload so area tracks mass.
pub fn marker_radius(payload_mass_kg: f64, max_payload: f64) -> f32 {
    const MIN_RADIUS: f32 = 2.5;
    const MAX_RADIUS: f32 = 12.0;
    if max_payload <= 0.0 {
        return MIN_RADIUS;
    }
    let scale = (payload_mass_kg / max_payload).clamp(0.0, 1.0).sqrt() as f32;
    MIN_RADIUS + scale * (MAX_RADIUS - MIN_RADIUS)
}

// ---------------------------------------------------------------------------
// Outcome breakdown (pie + counts)
// ---------------------------------------------------------------------------

/// Render the breakdown as a pie chart with a count table under it.
pub fn breakdown_chart(ui: &mut Ui, state: &DashboardState) {
    let table = state.breakdown();
    ui.strong(&table.title);

    let side = ui.available_width().min(260.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
    let center = response.rect.center();
    let radius = side * 0.45;

    let slices = pie_slices(table);
    if slices.is_empty() {
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "No launches",
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
    }

    for slice in &slices {
        let color = state.site_colors.color_for_key(&table.rows[slice.row].color_key);
        // Sub-arcs of at most 90° keep every polygon convex.
        let pieces = (slice.sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        let piece_sweep = slice.sweep / pieces as f32;
        for p in 0..pieces {
            let a0 = slice.start + p as f32 * piece_sweep;
            let steps = 16;
            let mut points = vec![center];
            for s in 0..=steps {
                let a = a0 + piece_sweep * s as f32 / steps as f32;
                points.push(center + Vec2::angled(a) * radius);
            }
            painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
        }

        if slice.fraction >= 0.05 {
            let mid = slice.start + slice.sweep / 2.0;
            let pos: Pos2 = center + Vec2::angled(mid) * radius * 0.65;
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                format!("{:.1}%", slice.fraction * 100.0),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }
    }

    ui.add_space(6.0);
    counts_table(ui, state, table);
}

fn counts_table(ui: &mut Ui, state: &DashboardState, table: &BreakdownTable) {
    let total = table.total();
    TableBuilder::new(ui)
        .id_salt("breakdown_counts")
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Category");
            });
            header.col(|ui| {
                ui.strong("Count");
            });
            header.col(|ui| {
                ui.strong("Share");
            });
        })
        .body(|mut body| {
            for row in &table.rows {
                body.row(18.0, |mut table_row| {
                    let color = state.site_colors.color_for_key(&row.color_key);
                    table_row.col(|ui| {
                        ui.colored_label(color, &row.label);
                    });
                    table_row.col(|ui| {
                        ui.label(row.count.to_string());
                    });
                    table_row.col(|ui| {
                        if total > 0 {
                            ui.label(format!("{:.1}%", row.count as f64 * 100.0 / total as f64));
                        } else {
                            ui.label("–");
                        }
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Payload distribution (scatter)
// ---------------------------------------------------------------------------

/// Render payload (x) against outcome (y), one colour per booster category.
pub fn distribution_chart(ui: &mut Ui, state: &DashboardState) {
    let table: &DistributionTable = state.distribution();
    let (_, max_payload) = state.dataset().payload_bounds();
    let range = state.payload_range();

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(&table.title);
        ui.label(format!("({} launches)", table.rows.len()));
    });

    Plot::new("payload_scatter")
        .legend(Legend::default().position(egui_plot::Corner::RightBottom))
        .x_axis_label(table.x_label.as_str())
        .y_axis_label(table.y_label.as_str())
        .include_y(-0.5)
        .include_y(1.5)
        .include_x(range.low.min(range.high))
        .include_x(range.high.max(range.low))
        .y_axis_formatter(|mark, _range| match mark.value {
            v if v == 0.0 => "0".to_string(),
            v if v == 1.0 => "1".to_string(),
            _ => String::new(),
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Equal names share one legend entry, so each point can carry
            // its own radius.
            for row in &table.rows {
                let y = f64::from(row.outcome.as_class());
                let points = Points::new(PlotPoints::new(vec![[row.payload_mass_kg, y]]))
                    .name(&row.booster_category)
                    .color(state.booster_colors.color_for(&row.booster_category))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(marker_radius(row.payload_mass_kg, max_payload));
                plot_ui.points(points);
            }
        });
}

/// Small legend for the fixed outcome colours, shown next to the pie.
pub fn outcome_legend(ui: &mut Ui) {
    ui.horizontal(|ui: &mut Ui| {
        for outcome in crate::data::model::Outcome::ALL {
            ui.colored_label(outcome_color(outcome), "■");
            ui.label(outcome.label());
        }
    });
}

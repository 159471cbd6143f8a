use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::ColorKey;
use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Fixed outcome colours
// ---------------------------------------------------------------------------

const FAILURE_COLOR: Color32 = Color32::from_rgb(0x77, 0x33, 0x22);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x22, 0x77, 0x33);

/// Outcome colours never depend on which rows happen to be present.
pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Failure => FAILURE_COLOR,
        Outcome::Success => SUCCESS_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of one categorical column (site, booster category) to
/// distinct colours, assigned in sorted label order.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(labels: &BTreeSet<String>) -> Self {
        let palette = generate_palette(labels.len());
        let mapping = labels.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a label; unknown labels are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }

    /// Colour for a breakdown row.
    pub fn color_for_key(&self, key: &ColorKey) -> Color32 {
        match key {
            ColorKey::Outcome(outcome) => outcome_color(*outcome),
            ColorKey::Site(site) => self.color_for(site),
        }
    }
}

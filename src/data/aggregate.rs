use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{LaunchDataset, Outcome};
use super::selection::{PayloadRange, SiteChoice};

// ---------------------------------------------------------------------------
// Outcome breakdown (pie chart)
// ---------------------------------------------------------------------------

/// What a breakdown row's colour is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "by", content = "key", rename_all = "snake_case")]
pub enum ColorKey {
    Outcome(Outcome),
    Site(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownKind {
    /// Successful launches grouped by site.
    SuccessesBySite,
    /// Failure and success counts.
    ByOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub count: usize,
    pub color_key: ColorKey,
}

/// Grouped counts ready for the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownTable {
    pub title: String,
    pub kind: BreakdownKind,
    pub rows: Vec<BreakdownRow>,
}

impl BreakdownTable {
    /// Sum of all row counts.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }
}

/// Count launches for the site dropdown's current choice.
///
/// * `AllBySite` – successes per site, one row for every site in the dataset
///   (zero-count sites included), ordered by site label.
/// * `AllFlat` / `Specific` – exactly two rows, `Failure` then `Success`, with
///   zero counts kept so the chart categories never shift.
pub fn compute_outcome_breakdown(dataset: &LaunchDataset, choice: &SiteChoice) -> BreakdownTable {
    match choice {
        SiteChoice::AllBySite => {
            let mut per_site: BTreeMap<&str, usize> =
                dataset.sites().iter().map(|s| (s.as_str(), 0)).collect();
            for rec in dataset.records() {
                if rec.outcome == Outcome::Success {
                    *per_site.entry(rec.site.as_str()).or_default() += 1;
                }
            }
            BreakdownTable {
                title: "Origin of successful launches".to_string(),
                kind: BreakdownKind::SuccessesBySite,
                rows: per_site
                    .into_iter()
                    .map(|(site, count)| BreakdownRow {
                        label: site.to_string(),
                        count,
                        color_key: ColorKey::Site(site.to_string()),
                    })
                    .collect(),
            }
        }
        SiteChoice::AllFlat => outcome_table(
            "All Successful and Failed Launches".to_string(),
            dataset,
            None,
        ),
        SiteChoice::Specific(site) => {
            outcome_table(format!("Launches from {site}"), dataset, Some(site))
        }
    }
}

fn outcome_table(title: String, dataset: &LaunchDataset, site: Option<&str>) -> BreakdownTable {
    let mut counts = [0usize; 2];
    for rec in dataset.records() {
        if site.map_or(true, |s| rec.site == s) {
            counts[usize::from(rec.outcome.as_class())] += 1;
        }
    }
    BreakdownTable {
        title,
        kind: BreakdownKind::ByOutcome,
        rows: Outcome::ALL
            .iter()
            .map(|&outcome| BreakdownRow {
                label: outcome.label().to_string(),
                count: counts[usize::from(outcome.as_class())],
                color_key: ColorKey::Outcome(outcome),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Payload distribution (scatter chart)
// ---------------------------------------------------------------------------

/// One dataset row carried into the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRow {
    /// Position of the row in the dataset.
    pub index: usize,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

/// Filtered rows plus the chart's title and axis/legend names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionTable {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_label: String,
    pub rows: Vec<DistributionRow>,
}

/// Rows whose payload lies in `range` (inclusive), restricted to the chosen
/// site when the choice names one. Rows keep dataset order.
///
/// An invalid range (`low > high` or NaN) yields no rows.
pub fn compute_payload_distribution(
    dataset: &LaunchDataset,
    choice: &SiteChoice,
    range: &PayloadRange,
) -> DistributionTable {
    let rows = if range.is_valid() {
        let site = choice.site();
        dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
            .filter(|(_, rec)| site.map_or(true, |s| rec.site == s))
            .map(|(index, rec)| DistributionRow {
                index,
                payload_mass_kg: rec.payload_mass_kg,
                outcome: rec.outcome,
                booster_category: rec.booster_category.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    DistributionTable {
        title: "Payload versus Outcome".to_string(),
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "Success".to_string(),
        legend_label: "Booster Version Category".to_string(),
        rows,
    }
}

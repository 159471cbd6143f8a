use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{
    BreakdownTable, DistributionTable, compute_outcome_breakdown, compute_payload_distribution,
};
use crate::data::model::LaunchDataset;
use crate::data::selection::{PayloadRange, PayloadSlider, SiteChoice, SiteOption, site_options};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Selector values and the two derived views, independent of rendering.
///
/// Every recomputation starts from the full dataset; nothing is cached between
/// selector changes beyond the latest outputs themselves.
pub struct DashboardState {
    dataset: Arc<LaunchDataset>,

    /// Dropdown entries, fixed for the dataset's lifetime.
    pub site_options: Vec<SiteOption>,
    pub slider: PayloadSlider,

    site_choice: SiteChoice,
    payload_range: PayloadRange,

    breakdown: BreakdownTable,
    distribution: DistributionTable,

    /// Colours for per-site pie slices.
    pub site_colors: ColorMap,
    /// Colours for scatter points.
    pub booster_colors: ColorMap,
}

impl DashboardState {
    /// Initial view: successes per site over the dataset's full payload range.
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let site_choice = SiteChoice::default();
        let payload_range = PayloadRange::full(&dataset);
        let breakdown = compute_outcome_breakdown(&dataset, &site_choice);
        let distribution = compute_payload_distribution(&dataset, &site_choice, &payload_range);

        Self {
            site_options: site_options(&dataset),
            slider: PayloadSlider::for_dataset(&dataset),
            site_colors: ColorMap::new(dataset.sites()),
            booster_colors: ColorMap::new(dataset.booster_categories()),
            site_choice,
            payload_range,
            breakdown,
            distribution,
            dataset,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn site_choice(&self) -> &SiteChoice {
        &self.site_choice
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn breakdown(&self) -> &BreakdownTable {
        &self.breakdown
    }

    pub fn distribution(&self) -> &DistributionTable {
        &self.distribution
    }

    /// Both views depend on the site choice.
    pub fn set_site_choice(&mut self, choice: SiteChoice) {
        if choice == self.site_choice {
            return;
        }
        log::debug!("site choice: {} -> {}", self.site_choice, choice);
        self.site_choice = choice;
        self.breakdown = compute_outcome_breakdown(&self.dataset, &self.site_choice);
        self.refresh_distribution();
    }

    /// Only the distribution depends on the payload range.
    ///
    /// An inverted range is stored as given and selects no rows.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        log::debug!(
            "payload range: [{}, {}] -> [{}, {}]",
            self.payload_range.low,
            self.payload_range.high,
            range.low,
            range.high
        );
        if !range.is_valid() {
            log::warn!("payload range [{}, {}] is empty", range.low, range.high);
        }
        self.payload_range = range;
        self.refresh_distribution();
    }

    fn refresh_distribution(&mut self) {
        self.distribution =
            compute_payload_distribution(&self.dataset, &self.site_choice, &self.payload_range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn state() -> DashboardState {
        let rec = |site: &str, payload: f64, outcome: Outcome, booster: &str| {
            LaunchRecord::new(site, payload, outcome, booster).unwrap()
        };
        DashboardState::new(Arc::new(LaunchDataset::from_records(vec![
            rec("CCAFS LC-40", 500.0, Outcome::Failure, "v1.0"),
            rec("KSC LC-39A", 2500.0, Outcome::Success, "FT"),
            rec("KSC LC-39A", 6000.0, Outcome::Failure, "B4"),
            rec("VAFB SLC-4E", 9600.0, Outcome::Success, "FT"),
        ])))
    }

    #[test]
    fn starts_with_all_sites_and_full_range() {
        let state = state();
        assert_eq!(state.site_choice(), &SiteChoice::AllBySite);
        assert_eq!(state.payload_range(), PayloadRange::new(500.0, 9600.0));
        assert_eq!(state.breakdown().total(), 2);
        assert_eq!(state.distribution().rows.len(), 4);
        assert_eq!(state.site_options.len(), 5);
    }

    #[test]
    fn site_change_recomputes_both_views() {
        let mut state = state();
        state.set_site_choice(SiteChoice::Specific("KSC LC-39A".into()));

        assert_eq!(state.breakdown().title, "Launches from KSC LC-39A");
        let counts: Vec<usize> = state.breakdown().rows.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![1, 1]);
        assert_eq!(state.distribution().rows.len(), 2);
    }

    #[test]
    fn range_change_leaves_breakdown_alone() {
        let mut state = state();
        state.set_site_choice(SiteChoice::AllFlat);
        let before = state.breakdown().clone();

        state.set_payload_range(PayloadRange::new(2500.0, 6000.0));
        assert_eq!(state.breakdown(), &before);
        let payloads: Vec<f64> = state
            .distribution()
            .rows
            .iter()
            .map(|r| r.payload_mass_kg)
            .collect();
        assert_eq!(payloads, vec![2500.0, 6000.0]);
    }

    #[test]
    fn inverted_range_empties_distribution() {
        let mut state = state();
        state.set_payload_range(PayloadRange::new(6000.0, 2500.0));
        assert!(state.distribution().rows.is_empty());
        assert_eq!(state.payload_range(), PayloadRange::new(6000.0, 2500.0));

        state.set_payload_range(PayloadRange::new(0.0, 10_000.0));
        assert_eq!(state.distribution().rows.len(), 4);
    }

    #[test]
    fn recompute_matches_fresh_computation() {
        let mut state = state();
        state.set_site_choice(SiteChoice::Specific("VAFB SLC-4E".into()));
        state.set_payload_range(PayloadRange::new(0.0, 5000.0));
        state.set_site_choice(SiteChoice::AllFlat);

        let fresh = compute_payload_distribution(
            state.dataset(),
            &SiteChoice::AllFlat,
            &PayloadRange::new(0.0, 5000.0),
        );
        assert_eq!(state.distribution(), &fresh);
    }
}

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// SiteChoice – the site dropdown value
// ---------------------------------------------------------------------------

/// Dropdown key for "successful launches per site".
pub const ALL_BY_SITE_KEY: &str = "ALL-S";
/// Dropdown key for "all successful and failed launches".
pub const ALL_FLAT_KEY: &str = "ALL-L";

/// Which slice of the dataset the views are computed over.
///
/// Parsed once from the raw dropdown string; the aggregator never looks at the
/// string form again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteChoice {
    /// Successful launches, one bucket per site.
    #[default]
    AllBySite,
    /// Every launch, bucketed by outcome.
    AllFlat,
    /// Launches from one site, bucketed by outcome. Unknown labels are kept
    /// and simply match nothing.
    Specific(String),
}

impl SiteChoice {
    pub fn parse(raw: &str) -> Self {
        match raw {
            ALL_BY_SITE_KEY => SiteChoice::AllBySite,
            ALL_FLAT_KEY => SiteChoice::AllFlat,
            site => SiteChoice::Specific(site.to_string()),
        }
    }

    /// The dropdown key this choice was parsed from.
    pub fn as_key(&self) -> &str {
        match self {
            SiteChoice::AllBySite => ALL_BY_SITE_KEY,
            SiteChoice::AllFlat => ALL_FLAT_KEY,
            SiteChoice::Specific(site) => site,
        }
    }

    /// The site label to filter on, if this choice names one.
    pub fn site(&self) -> Option<&str> {
        match self {
            SiteChoice::Specific(site) => Some(site),
            _ => None,
        }
    }
}

impl FromStr for SiteChoice {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SiteChoice::parse(s))
    }
}

impl fmt::Display for SiteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteOption {
    pub label: String,
    pub choice: SiteChoice,
}

/// Dropdown entries: the two aggregate views first, then each site label.
pub fn site_options(dataset: &LaunchDataset) -> Vec<SiteOption> {
    let mut options = vec![
        SiteOption {
            label: "Successful Launches from Each Site".to_string(),
            choice: SiteChoice::AllBySite,
        },
        SiteOption {
            label: "All Successful and Failed Launches".to_string(),
            choice: SiteChoice::AllFlat,
        },
    ];
    options.extend(dataset.sites().iter().map(|site| SiteOption {
        label: site.clone(),
        choice: SiteChoice::Specific(site.clone()),
    }));
    options
}

// ---------------------------------------------------------------------------
// PayloadRange – the range slider value
// ---------------------------------------------------------------------------

/// Closed payload interval `[low, high]` in kg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// The dataset's observed min/max, used as the initial slider value.
    pub fn full(dataset: &LaunchDataset) -> Self {
        let (low, high) = dataset.payload_bounds();
        PayloadRange { low, high }
    }

    /// `low > high` or a NaN bound selects nothing.
    pub fn is_valid(&self) -> bool {
        self.low <= self.high
    }

    /// Inclusive at both ends.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([low, high]: [f64; 2]) -> Self {
        PayloadRange { low, high }
    }
}

// ---------------------------------------------------------------------------
// PayloadSlider – slider widget configuration
// ---------------------------------------------------------------------------

/// Bounds, step and tick marks for the payload range slider.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
}

impl PayloadSlider {
    const DEFAULT_MAX: f64 = 10_000.0;
    const STEP: f64 = 500.0;

    /// `[0, 10000]` in 500 kg steps, widened upward to the next step if the
    /// dataset holds heavier payloads.
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        let (_, max_payload) = dataset.payload_bounds();
        let max = if max_payload > Self::DEFAULT_MAX {
            (max_payload / Self::STEP).ceil() * Self::STEP
        } else {
            Self::DEFAULT_MAX
        };
        PayloadSlider {
            min: 0.0,
            max,
            step: Self::STEP,
            marks: vec![2_500.0, 5_000.0, 7_500.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset(payloads: &[(&str, f64)]) -> LaunchDataset {
        LaunchDataset::from_records(
            payloads
                .iter()
                .map(|&(site, p)| LaunchRecord::new(site, p, Outcome::Success, "FT").unwrap())
                .collect(),
        )
    }

    #[test]
    fn parse_sentinels_and_sites() {
        assert_eq!(SiteChoice::parse("ALL-S"), SiteChoice::AllBySite);
        assert_eq!(SiteChoice::parse("ALL-L"), SiteChoice::AllFlat);
        assert_eq!(
            SiteChoice::parse("KSC LC-39A"),
            SiteChoice::Specific("KSC LC-39A".into())
        );
        // Only the exact sentinels are aggregate views.
        assert_eq!(SiteChoice::parse("ALL"), SiteChoice::Specific("ALL".into()));
        assert_eq!(SiteChoice::parse(""), SiteChoice::Specific(String::new()));
    }

    #[test]
    fn key_round_trips_through_display() {
        for key in ["ALL-S", "ALL-L", "CCAFS SLC-40"] {
            let choice: SiteChoice = key.parse().unwrap();
            assert_eq!(choice.to_string(), key);
        }
        assert_eq!(SiteChoice::default(), SiteChoice::AllBySite);
    }

    #[test]
    fn options_list_aggregates_then_sites() {
        let ds = dataset(&[("VAFB SLC-4E", 1.0), ("CCAFS LC-40", 2.0), ("VAFB SLC-4E", 3.0)]);
        let choices: Vec<String> = site_options(&ds)
            .into_iter()
            .map(|o| o.choice.as_key().to_string())
            .collect();
        assert_eq!(choices, vec!["ALL-S", "ALL-L", "CCAFS LC-40", "VAFB SLC-4E"]);
    }

    #[test]
    fn range_is_inclusive_and_validated() {
        let r = PayloadRange::new(500.0, 900.0);
        assert!(r.contains(500.0));
        assert!(r.contains(900.0));
        assert!(!r.contains(499.999));
        assert!(!r.contains(900.001));

        let point = PayloadRange::new(700.0, 700.0);
        assert!(point.is_valid());
        assert!(point.contains(700.0));

        assert!(!PayloadRange::new(900.0, 500.0).is_valid());
        assert!(!PayloadRange::new(f64::NAN, 500.0).is_valid());
    }

    #[test]
    fn full_range_uses_dataset_bounds() {
        let ds = dataset(&[("A", 100.0), ("B", 1500.0), ("A", 900.0)]);
        assert_eq!(PayloadRange::full(&ds), PayloadRange::new(100.0, 1500.0));
    }

    #[test]
    fn slider_widens_for_heavy_payloads() {
        let light = PayloadSlider::for_dataset(&dataset(&[("A", 9600.0)]));
        assert_eq!(light.max, 10_000.0);
        assert_eq!(light.step, 500.0);

        let heavy = PayloadSlider::for_dataset(&dataset(&[("A", 15_600.0)]));
        assert_eq!(heavy.max, 16_000.0);
    }
}

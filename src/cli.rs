use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use crate::data::aggregate::{
    BreakdownTable, DistributionTable, compute_outcome_breakdown, compute_payload_distribution,
};
use crate::data::model::LaunchDataset;
use crate::data::selection::{PayloadRange, SiteChoice};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Launch records dashboard: success breakdown and payload distribution
#[derive(Parser, Debug, Clone)]
#[command(name = "launch-dash", version, about)]
pub struct Args {
    /// Launch records file (.csv, .json or .parquet); a file dialog opens if omitted
    #[arg(long, env = "LAUNCH_DASH_DATA", value_hint = clap::ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Print both views as JSON and exit instead of opening a window
    #[arg(long)]
    pub summary: bool,

    /// Site selector for --summary: ALL-S, ALL-L or a launch site label
    #[arg(long, default_value = "ALL-S")]
    pub site: SiteChoice,

    /// Payload range for --summary (defaults to the dataset's min/max)
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"])]
    pub payload: Option<Vec<f64>>,
}

impl Args {
    /// The dataset path from the flag/env, or from a native file dialog.
    pub fn resolve_data_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data {
            return Ok(path.clone());
        }
        if self.summary {
            bail!("--summary needs --data or LAUNCH_DASH_DATA");
        }
        rfd::FileDialog::new()
            .set_title("Open launch records")
            .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .add_filter("Parquet", &["parquet", "pq"])
            .pick_file()
            .context("no launch records file selected")
    }

    pub fn payload_range(&self, dataset: &LaunchDataset) -> PayloadRange {
        match self.payload.as_deref() {
            Some(&[low, high]) => PayloadRange::new(low, high),
            _ => PayloadRange::full(dataset),
        }
    }
}

// ---------------------------------------------------------------------------
// Headless summary
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct Summary {
    pub site: String,
    pub payload_range: [f64; 2],
    pub breakdown: BreakdownTable,
    pub distribution: DistributionTable,
}

/// Compute both views for the selectors given on the command line.
pub fn summarize(dataset: &LaunchDataset, args: &Args) -> Summary {
    let range = args.payload_range(dataset);
    Summary {
        site: args.site.to_string(),
        payload_range: [range.low, range.high],
        breakdown: compute_outcome_breakdown(dataset, &args.site),
        distribution: compute_payload_distribution(dataset, &args.site, &range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("KSC LC-39A", 100.0, Outcome::Success, "FT").unwrap(),
            LaunchRecord::new("KSC LC-39A", 4000.0, Outcome::Failure, "B4").unwrap(),
            LaunchRecord::new("CCAFS LC-40", 700.0, Outcome::Failure, "v1.0").unwrap(),
        ])
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "launch-dash",
            "--data",
            "launches.csv",
            "--summary",
            "--site",
            "KSC LC-39A",
            "--payload",
            "0",
            "2500",
        ])
        .unwrap();
        assert_eq!(args.data, Some(PathBuf::from("launches.csv")));
        assert!(args.summary);
        assert_eq!(args.site, SiteChoice::Specific("KSC LC-39A".into()));
        assert_eq!(args.payload_range(&dataset()), PayloadRange::new(0.0, 2500.0));
    }

    #[test]
    fn defaults_to_all_sites_and_full_range() {
        let args = Args::try_parse_from(["launch-dash", "--data", "x.csv"]).unwrap();
        assert_eq!(args.site, SiteChoice::AllBySite);
        assert_eq!(args.payload_range(&dataset()), PayloadRange::new(100.0, 4000.0));
        assert_eq!(args.resolve_data_path().unwrap(), PathBuf::from("x.csv"));
    }

    #[test]
    fn payload_needs_two_values() {
        assert!(Args::try_parse_from(["launch-dash", "--payload", "5"]).is_err());
    }

    #[test]
    fn summary_serializes_both_views() {
        let args = Args::try_parse_from([
            "launch-dash",
            "--site",
            "ALL-L",
            "--payload",
            "500",
            "5000",
        ])
        .unwrap();
        let summary = summarize(&dataset(), &args);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["site"], "ALL-L");
        assert_eq!(json["breakdown"]["rows"][0]["label"], "Failure");
        assert_eq!(json["breakdown"]["rows"][0]["count"], 2);
        assert_eq!(json["breakdown"]["rows"][1]["color_key"]["key"], "Success");
        assert_eq!(json["distribution"]["rows"].as_array().unwrap().len(), 2);
        assert_eq!(json["distribution"]["rows"][0]["index"], 1);
    }
}

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// RecordError – a row that violates a launch-record invariant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("payload mass {0} kg is negative")]
    NegativePayload(f64),
    #[error("payload mass is not a finite number")]
    NonFinitePayload,
    #[error("outcome class {0} is not 0 or 1")]
    InvalidOutcome(i64),
}

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Ordered so that `Failure` always sorts before `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Both outcomes in display order.
    pub const ALL: [Outcome; 2] = [Outcome::Failure, Outcome::Success];

    /// Interpret the raw `class` value (1 = success, 0 = failure).
    pub fn from_class(class: i64) -> Result<Self, RecordError> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(RecordError::InvalidOutcome(other)),
        }
    }

    pub fn as_class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Fixed display label, independent of data order.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site label, e.g. `KSC LC-39A`.
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Only used to group points in the payload distribution.
    pub booster_category: String,
}

impl LaunchRecord {
    /// Build a record, rejecting negative or non-finite payloads.
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Result<Self, RecordError> {
        if !payload_mass_kg.is_finite() {
            return Err(RecordError::NonFinitePayload);
        }
        if payload_mass_kg < 0.0 {
            return Err(RecordError::NegativePayload(payload_mass_kg));
        }
        Ok(LaunchRecord {
            site: site.into(),
            payload_mass_kg,
            outcome,
            booster_category: booster_category.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed label sets and payload bounds.
///
/// Read-only once built: fields are private and there is no mutating API, so a
/// shared `Arc<LaunchDataset>` can be queried from any thread.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchDataset {
    /// Build label indices and payload bounds from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for rec in &records {
            sites.insert(rec.site.clone());
            booster_categories.insert(rec.booster_category.clone());
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
        }

        if records.is_empty() {
            min_payload = 0.0;
            max_payload = 0.0;
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            min_payload,
            max_payload,
        }
    }

    /// All records in file order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Sorted set of launch-site labels seen at load time.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Observed `(min, max)` payload mass; `(0, 0)` for an empty dataset.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.min_payload, self.max_payload)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

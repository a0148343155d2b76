use serde::Serialize;

use super::error::DatasetError;

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    /// Launch site identifier, e.g. `CCAFS LC-40`.
    pub site: String,
    /// Payload mass in kilograms, always finite and `>= 0`.
    pub payload_mass_kg: f64,
    /// Class label: 1 = success, 0 = failure.
    pub outcome: u8,
    /// Booster family, used for colouring only.
    pub booster_version_category: String,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: u8,
        booster_version_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            outcome,
            booster_version_category: booster_version_category.into(),
            flight_number: None,
            booster_version: None,
        }
    }

    /// Check the row invariants. `row` is only used for error messages.
    pub fn validate(&self, row: usize) -> Result<(), DatasetError> {
        if self.site.trim().is_empty() {
            return Err(DatasetError::EmptySite { row });
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(DatasetError::InvalidPayload {
                row,
                value: self.payload_mass_kg,
            });
        }
        if self.outcome > 1 {
            return Err(DatasetError::InvalidOutcome {
                row,
                value: self.outcome.to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, validated dataset with pre-computed category indices.
///
/// Built once at startup and never mutated afterwards; shells hold it
/// behind an `Arc` and every derived table borrows from it.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories in order of first appearance.
    booster_categories: Vec<String>,
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Validate every record and build the category indices.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for (row, rec) in records.iter().enumerate() {
            rec.validate(row)?;

            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            if !booster_categories.contains(&rec.booster_version_category) {
                booster_categories.push(rec.booster_version_category.clone());
            }
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                None => (m, m),
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
            });
        }

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// `(min, max)` payload mass over all records, `None` when empty.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

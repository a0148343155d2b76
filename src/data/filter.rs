use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{LaunchDataset, LaunchRecord};

/// Dropdown value meaning "do not restrict by site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Filter inputs
// ---------------------------------------------------------------------------

/// The site dropdown value: the `ALL` sentinel or a single site name.
///
/// Any other string is accepted as a site name; a name that matches no
/// record simply filters everything out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn parse(raw: &str) -> Self {
        Self::from(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelection::All)
    }

    /// Whether a record launched from `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl From<String> for SiteSelection {
    fn from(raw: String) -> Self {
        if raw == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(raw)
        }
    }
}

impl From<SiteSelection> for String {
    fn from(sel: SiteSelection) -> Self {
        match sel {
            SiteSelection::All => ALL_SITES.to_string(),
            SiteSelection::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive payload interval `[low, high]` in kilograms.
///
/// No clamping and no reordering: an inverted range (`low > high`) or a
/// NaN bound matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Range spanning every record, `[0, 0]` for an empty dataset.
    pub fn full(dataset: &LaunchDataset) -> Self {
        let (low, high) = dataset.payload_bounds().unwrap_or((0.0, 0.0));
        Self { low, high }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([low, high]: [f64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(range: PayloadRange) -> Self {
        [range.low, range.high]
    }
}

// ---------------------------------------------------------------------------
// Outcome distribution (pie chart table)
// ---------------------------------------------------------------------------

/// Sum of class labels for one site, i.e. its number of successful launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSuccess {
    pub site: String,
    pub success_total: u64,
}

/// Number of launches with a given class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeCount {
    pub outcome: u8,
    pub count: usize,
}

/// Table behind the outcome pie chart. Its shape depends on the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "rows", rename_all = "snake_case")]
pub enum OutcomeDistribution {
    /// `ALL` selected: one row per site, in dataset order.
    PerSite(Vec<SiteSuccess>),
    /// Single site selected: one row per class label present, ascending.
    PerOutcome(Vec<OutcomeCount>),
}

impl OutcomeDistribution {
    pub fn len(&self) -> usize {
        match self {
            OutcomeDistribution::PerSite(rows) => rows.len(),
            OutcomeDistribution::PerOutcome(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the pie chart table for the selected site.
///
/// With `ALL` the raw class labels are summed per site (success counts, not
/// success rates). For a single site the launches are counted per class
/// label; labels that never occur are left out, and an unknown site yields
/// an empty table.
pub fn outcome_distribution(dataset: &LaunchDataset, site: &SiteSelection) -> OutcomeDistribution {
    match site {
        SiteSelection::All => {
            let mut totals: HashMap<&str, u64> = HashMap::with_capacity(dataset.sites().len());
            for rec in dataset.records() {
                *totals.entry(rec.site.as_str()).or_default() += u64::from(rec.outcome);
            }
            let rows = dataset
                .sites()
                .iter()
                .map(|s| SiteSuccess {
                    site: s.clone(),
                    success_total: totals.get(s.as_str()).copied().unwrap_or(0),
                })
                .collect();
            OutcomeDistribution::PerSite(rows)
        }
        SiteSelection::Site(name) => {
            let mut counts = [0usize; 2];
            for rec in dataset.records().iter().filter(|r| &r.site == name) {
                counts[usize::from(rec.outcome.min(1))] += 1;
            }
            let rows = counts
                .iter()
                .enumerate()
                .filter(|(_, &count)| count > 0)
                .map(|(outcome, &count)| OutcomeCount {
                    outcome: outcome as u8,
                    count,
                })
                .collect();
            OutcomeDistribution::PerOutcome(rows)
        }
    }
}

// ---------------------------------------------------------------------------
// Payload correlation (scatter chart table)
// ---------------------------------------------------------------------------

/// Records inside the payload range (inclusive) and matching the site,
/// in dataset order. Nothing is aggregated.
pub fn payload_correlation<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .filter(|rec| site.matches(&rec.site))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_launches() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 500.0, 1, "v1.0"),
            LaunchRecord::new("CCAFS LC-40", 6000.0, 0, "v1.0"),
            LaunchRecord::new("KSC LC-39A", 3000.0, 1, "v1.1"),
        ])
        .unwrap()
    }

    fn mixed_launches() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, 0, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", 500.0, 0, "v1.1"),
            LaunchRecord::new("KSC LC-39A", 2490.0, 1, "FT"),
            LaunchRecord::new("CCAFS SLC-40", 9600.0, 1, "B5"),
            LaunchRecord::new("KSC LC-39A", 5300.0, 1, "FT"),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, 0, "FT"),
            LaunchRecord::new("CCAFS LC-40", 3170.0, 1, "v1.1"),
            LaunchRecord::new("KSC LC-39A", 4000.0, 0, "B4"),
        ])
        .unwrap()
    }

    #[test]
    fn site_selection_parses_sentinel() {
        assert_eq!(SiteSelection::parse("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::parse("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
        // Case matters: only the exact sentinel means "all".
        assert!(!SiteSelection::parse("all").is_all());
        assert_eq!(SiteSelection::Site("X".into()).to_string(), "X");
    }

    #[test]
    fn selection_types_serialize_as_plain_values() {
        let json = serde_json::to_string(&(SiteSelection::All, PayloadRange::new(0.0, 10.0)))
            .unwrap();
        assert_eq!(json, r#"["ALL",[0.0,10.0]]"#);

        let back: SiteSelection = serde_json::from_str(r#""VAFB SLC-4E""#).unwrap();
        assert_eq!(back, SiteSelection::Site("VAFB SLC-4E".into()));
    }

    #[test]
    fn single_site_counts_each_class() {
        let dist = outcome_distribution(&three_launches(), &SiteSelection::parse("CCAFS LC-40"));
        assert_eq!(
            dist,
            OutcomeDistribution::PerOutcome(vec![
                OutcomeCount { outcome: 0, count: 1 },
                OutcomeCount { outcome: 1, count: 1 },
            ])
        );
    }

    #[test]
    fn single_site_omits_absent_classes() {
        let dist = outcome_distribution(&three_launches(), &SiteSelection::parse("KSC LC-39A"));
        assert_eq!(
            dist,
            OutcomeDistribution::PerOutcome(vec![OutcomeCount { outcome: 1, count: 1 }])
        );
    }

    #[test]
    fn unknown_site_yields_empty_distribution() {
        let dist = outcome_distribution(&three_launches(), &SiteSelection::parse("Boca Chica"));
        assert!(dist.is_empty());
        assert!(matches!(dist, OutcomeDistribution::PerOutcome(_)));
    }

    #[test]
    fn all_sites_sums_raw_class_labels() {
        let ds = mixed_launches();
        let OutcomeDistribution::PerSite(rows) = outcome_distribution(&ds, &SiteSelection::All)
        else {
            panic!("expected per-site rows");
        };

        let sites: Vec<&str> = rows.iter().map(|r| r.site.as_str()).collect();
        assert_eq!(sites, ds.sites());

        let total = |name: &str| rows.iter().find(|r| r.site == name).unwrap().success_total;
        assert_eq!(total("CCAFS LC-40"), 1);
        assert_eq!(total("KSC LC-39A"), 2);
        assert_eq!(total("CCAFS SLC-40"), 1);
        // A site with no successes still gets its (zero) slice row.
        assert_eq!(total("VAFB SLC-4E"), 0);
    }

    #[test]
    fn all_sites_on_empty_dataset_is_empty() {
        let ds = LaunchDataset::from_records(Vec::new()).unwrap();
        assert!(outcome_distribution(&ds, &SiteSelection::All).is_empty());
    }

    #[test]
    fn correlation_keeps_rows_in_range_in_order() {
        let ds = three_launches();
        let rows = payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(0.0, 4000.0));
        assert_eq!(rows, vec![&ds.records()[0], &ds.records()[2]]);
    }

    #[test]
    fn correlation_bounds_are_inclusive() {
        let ds = three_launches();
        let rows = payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(500.0, 3000.0));
        let masses: Vec<f64> = rows.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, [500.0, 3000.0]);
    }

    #[test]
    fn correlation_inverted_range_is_empty() {
        let ds = mixed_launches();
        let rows = payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(5000.0, 100.0));
        assert!(rows.is_empty());
    }

    #[test]
    fn correlation_nan_bound_is_empty() {
        let ds = mixed_launches();
        let range = PayloadRange::new(f64::NAN, 10_000.0);
        assert!(payload_correlation(&ds, &SiteSelection::All, range).is_empty());
    }

    #[test]
    fn correlation_accepts_out_of_domain_bounds() {
        let ds = mixed_launches();
        let rows = payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(-1e9, 1e9));
        assert_eq!(rows.len(), ds.len());

        let above = PayloadRange::new(20_000.0, 30_000.0);
        let none = payload_correlation(&ds, &SiteSelection::All, above);
        assert!(none.is_empty());
    }

    #[test]
    fn correlation_restricts_to_selected_site() {
        let ds = mixed_launches();
        let site = SiteSelection::parse("KSC LC-39A");
        let rows = payload_correlation(&ds, &site, PayloadRange::new(0.0, 5000.0));
        let masses: Vec<f64> = rows.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, [2490.0, 4000.0]);
        assert!(rows.iter().all(|r| r.site == "KSC LC-39A"));
    }

    #[test]
    fn correlation_rows_always_within_range() {
        let ds = mixed_launches();
        let bounds = [0.0, 500.0, 2490.0, 4000.0, 9600.0, 10_000.0];
        for &low in &bounds {
            for &high in &bounds {
                let range = PayloadRange::new(low, high);
                let selections = ds.sites().iter().map(|s| SiteSelection::parse(s));
                for site in selections.chain([SiteSelection::All]) {
                    let rows = payload_correlation(&ds, &site, range);
                    if low > high {
                        assert!(rows.is_empty());
                    }
                    for rec in &rows {
                        assert!(low <= rec.payload_mass_kg && rec.payload_mass_kg <= high);
                        assert!(site.matches(&rec.site));
                    }
                    let expected = ds
                        .records()
                        .iter()
                        .filter(|r| range.contains(r.payload_mass_kg) && site.matches(&r.site))
                        .count();
                    assert_eq!(rows.len(), expected);
                }
            }
        }
    }

    #[test]
    fn engine_is_idempotent() {
        let ds = mixed_launches();
        let site = SiteSelection::parse("VAFB SLC-4E");
        let range = PayloadRange::full(&ds);

        assert_eq!(outcome_distribution(&ds, &site), outcome_distribution(&ds, &site));
        assert_eq!(
            outcome_distribution(&ds, &SiteSelection::All),
            outcome_distribution(&ds, &SiteSelection::All)
        );
        assert_eq!(
            payload_correlation(&ds, &site, range),
            payload_correlation(&ds, &site, range)
        );
    }

    #[test]
    fn full_range_covers_dataset() {
        let ds = mixed_launches();
        assert_eq!(PayloadRange::full(&ds), PayloadRange::new(0.0, 9600.0));
        let rows = payload_correlation(&ds, &SiteSelection::All, PayloadRange::full(&ds));
        assert_eq!(rows.len(), ds.len());
    }
}

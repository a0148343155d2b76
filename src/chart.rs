//! Chart renderers: derived tables → library-independent chart specs.
//!
//! Renderers never filter or aggregate; they map the table produced by
//! [`crate::data::filter`] one row to one slice / point. The specs serialize
//! to JSON for the web page and are drawn directly by the native viewer.

use serde::Serialize;

use crate::color::ColorMap;
use crate::data::filter::{OutcomeDistribution, SiteSelection};
use crate::data::loader::{COL_BOOSTER_CATEGORY, COL_CLASS, COL_PAYLOAD};
use crate::data::model::{LaunchDataset, LaunchRecord};

pub const PIE_TITLE_ALL: &str = "Success count for all launch sites";
pub const PIE_TITLE_SITE: &str = "Total success launches for site";
pub const SCATTER_TITLE_ALL: &str = "Success count on payload mass for all sites";

// ---------------------------------------------------------------------------
// Chart spec types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(pie) => &pie.title,
            ChartSpec::Scatter(scatter) => &scatter.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// `#rrggbb`
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Column driving the colour channel.
    pub color_by: String,
    /// One series per colour label, in order of first appearance.
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Hover label.
    pub text: String,
}

// ---------------------------------------------------------------------------
// Colour assignments shared by both charts
// ---------------------------------------------------------------------------

/// Colour maps built once from the full dataset.
#[derive(Debug, Clone)]
pub struct ChartPalette {
    pub sites: ColorMap,
    pub outcomes: ColorMap,
    pub boosters: ColorMap,
}

impl ChartPalette {
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        Self {
            sites: ColorMap::new(dataset.sites()),
            outcomes: ColorMap::new(["0", "1"]),
            boosters: ColorMap::new(dataset.booster_categories()),
        }
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Pie chart of the outcome distribution.
///
/// Per-site tables become one slice per site; per-outcome tables one slice
/// per class label. The title follows the selection mode.
pub fn render_outcome_chart(
    table: &OutcomeDistribution,
    site: &SiteSelection,
    palette: &ChartPalette,
) -> ChartSpec {
    let title = if site.is_all() { PIE_TITLE_ALL } else { PIE_TITLE_SITE };

    let slices = match table {
        OutcomeDistribution::PerSite(rows) => rows
            .iter()
            .map(|row| PieSlice {
                label: row.site.clone(),
                value: row.success_total as f64,
                color: palette.sites.hex_for(&row.site),
            })
            .collect(),
        OutcomeDistribution::PerOutcome(rows) => rows
            .iter()
            .map(|row| {
                let label = row.outcome.to_string();
                PieSlice {
                    color: palette.outcomes.hex_for(&label),
                    label,
                    value: row.count as f64,
                }
            })
            .collect(),
    };

    ChartSpec::Pie(PieChart {
        title: title.to_string(),
        slices,
    })
}

/// Scatter chart of payload mass (x) against class label (y), one point per
/// row, coloured by booster version category.
pub fn render_scatter_chart(
    rows: &[&LaunchRecord],
    site: &SiteSelection,
    palette: &ChartPalette,
) -> ChartSpec {
    let title = match site {
        SiteSelection::All => SCATTER_TITLE_ALL.to_string(),
        SiteSelection::Site(name) => format!("Success count on payload mass for site {name}"),
    };

    let mut series: Vec<ScatterSeries> = Vec::new();
    for rec in rows {
        let category = &rec.booster_version_category;
        let idx = match series.iter().position(|s| &s.name == category) {
            Some(idx) => idx,
            None => {
                series.push(ScatterSeries {
                    name: category.clone(),
                    color: palette.boosters.hex_for(category),
                    points: Vec::new(),
                });
                series.len() - 1
            }
        };
        series[idx].points.push(ScatterPoint {
            x: rec.payload_mass_kg,
            y: f64::from(rec.outcome),
            text: hover_text(rec),
        });
    }

    ChartSpec::Scatter(ScatterChart {
        title,
        x_label: COL_PAYLOAD.to_string(),
        y_label: COL_CLASS.to_string(),
        color_by: COL_BOOSTER_CATEGORY.to_string(),
        series,
    })
}

fn hover_text(rec: &LaunchRecord) -> String {
    let mut text = rec.site.clone();
    if let Some(n) = rec.flight_number {
        text = format!("Flight {n} · {text}");
    }
    if let Some(version) = &rec.booster_version {
        text.push_str(" · ");
        text.push_str(version);
    }
    text
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chart::{ChartPalette, ChartSpec, render_outcome_chart, render_scatter_chart};
use crate::data::filter::{PayloadRange, SiteSelection, outcome_distribution, payload_correlation};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// The current user-chosen filter parameters, independent of rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl SelectionState {
    /// Startup defaults: all sites, payload range spanning the dataset.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        Self {
            site: SiteSelection::All,
            payload: PayloadRange::full(dataset),
        }
    }

    /// Apply one input change and report which charts must be recomputed.
    pub fn apply(&mut self, event: SelectionEvent) -> AffectedCharts {
        match event {
            SelectionEvent::SiteChanged(site) => {
                self.site = SiteSelection::from(site);
                AffectedCharts::Both
            }
            SelectionEvent::PayloadChanged([low, high]) => {
                self.payload = PayloadRange::new(low, high);
                AffectedCharts::ScatterOnly
            }
        }
    }
}

/// A single UI input change.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Dropdown value: `ALL` or a site name.
    SiteChanged(String),
    /// Range slider value `[low, high]`.
    PayloadChanged([f64; 2]),
}

/// Which figures an event invalidates. The pie chart only depends on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffectedCharts {
    Both,
    ScatterOnly,
}

impl AffectedCharts {
    pub fn outcome(self) -> bool {
        matches!(self, AffectedCharts::Both)
    }

    pub fn scatter(self) -> bool {
        matches!(self, AffectedCharts::Both | AffectedCharts::ScatterOnly)
    }
}

// ---------------------------------------------------------------------------
// Dashboard: shared dataset + recomputation
// ---------------------------------------------------------------------------

/// Both figures for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFigures {
    pub outcome: ChartSpec,
    pub scatter: ChartSpec,
}

/// Read-only dataset plus the colour assignments derived from it.
///
/// Holds no selection: every call takes the state explicitly, so one
/// `Dashboard` can serve any number of sessions.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<LaunchDataset>,
    palette: ChartPalette,
}

impl Dashboard {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let palette = ChartPalette::for_dataset(&dataset);
        Self { dataset, palette }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn palette(&self) -> &ChartPalette {
        &self.palette
    }

    pub fn initial_state(&self) -> SelectionState {
        SelectionState::initial(&self.dataset)
    }

    pub fn outcome_chart(&self, site: &SiteSelection) -> ChartSpec {
        let table = outcome_distribution(&self.dataset, site);
        log::debug!("outcome distribution for {site}: {} rows", table.len());
        render_outcome_chart(&table, site, &self.palette)
    }

    pub fn scatter_chart(&self, site: &SiteSelection, payload: PayloadRange) -> ChartSpec {
        let rows = payload_correlation(&self.dataset, site, payload);
        log::debug!(
            "payload correlation for {site} in [{}, {}]: {} rows",
            payload.low,
            payload.high,
            rows.len()
        );
        render_scatter_chart(&rows, site, &self.palette)
    }

    pub fn figures(&self, state: &SelectionState) -> DashboardFigures {
        DashboardFigures {
            outcome: self.outcome_chart(&state.site),
            scatter: self.scatter_chart(&state.site, state.payload),
        }
    }

    /// Apply `event` to `state` and refresh only the invalidated figures.
    pub fn handle(
        &self,
        state: &mut SelectionState,
        event: SelectionEvent,
        figures: &mut DashboardFigures,
    ) -> AffectedCharts {
        let affected = state.apply(event);
        if affected.outcome() {
            figures.outcome = self.outcome_chart(&state.site);
        }
        if affected.scatter() {
            figures.scatter = self.scatter_chart(&state.site, state.payload);
        }
        affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{PIE_TITLE_ALL, PIE_TITLE_SITE, SCATTER_TITLE_ALL};
    use crate::data::model::LaunchRecord;

    fn dashboard() -> Dashboard {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 500.0, 1, "v1.0"),
            LaunchRecord::new("CCAFS LC-40", 6000.0, 0, "v1.0"),
            LaunchRecord::new("KSC LC-39A", 3000.0, 1, "v1.1"),
        ])
        .unwrap();
        Dashboard::new(Arc::new(ds))
    }

    fn scatter_points(spec: &ChartSpec) -> usize {
        match spec {
            ChartSpec::Scatter(s) => s.point_count(),
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn every_event_kind_refreshes_scatter() {
        assert!(AffectedCharts::Both.outcome() && AffectedCharts::Both.scatter());
        assert!(!AffectedCharts::ScatterOnly.outcome() && AffectedCharts::ScatterOnly.scatter());
    }

    #[test]
    fn initial_state_spans_dataset() {
        let dash = dashboard();
        let state = dash.initial_state();
        assert_eq!(state.site, SiteSelection::All);
        assert_eq!(state.payload, PayloadRange::new(500.0, 6000.0));
    }

    #[test]
    fn payload_change_only_touches_scatter() {
        let dash = dashboard();
        let mut state = dash.initial_state();
        let mut figures = dash.figures(&state);
        let before = figures.outcome.clone();
        assert_eq!(scatter_points(&figures.scatter), 3);

        let affected = dash.handle(
            &mut state,
            SelectionEvent::PayloadChanged([0.0, 4000.0]),
            &mut figures,
        );

        assert_eq!(affected, AffectedCharts::ScatterOnly);
        assert_eq!(figures.outcome, before);
        assert_eq!(scatter_points(&figures.scatter), 2);
        assert_eq!(state.payload, PayloadRange::new(0.0, 4000.0));
    }

    #[test]
    fn site_change_refreshes_both() {
        let dash = dashboard();
        let mut state = dash.initial_state();
        let mut figures = dash.figures(&state);
        assert_eq!(figures.outcome.title(), PIE_TITLE_ALL);
        assert_eq!(figures.scatter.title(), SCATTER_TITLE_ALL);

        let affected = dash.handle(
            &mut state,
            SelectionEvent::SiteChanged("KSC LC-39A".into()),
            &mut figures,
        );

        assert_eq!(affected, AffectedCharts::Both);
        assert_eq!(figures.outcome.title(), PIE_TITLE_SITE);
        assert_eq!(scatter_points(&figures.scatter), 1);
        assert_eq!(figures, dash.figures(&state));
    }

    #[test]
    fn switching_back_to_all_restores_defaults() {
        let dash = dashboard();
        let mut state = dash.initial_state();
        let initial = dash.figures(&state);
        let mut figures = initial.clone();

        dash.handle(&mut state, SelectionEvent::SiteChanged("CCAFS LC-40".into()), &mut figures);
        dash.handle(&mut state, SelectionEvent::SiteChanged("ALL".into()), &mut figures);

        assert_eq!(figures, initial);
    }

    #[test]
    fn inverted_slider_empties_scatter_without_error() {
        let dash = dashboard();
        let mut state = dash.initial_state();
        let mut figures = dash.figures(&state);

        dash.handle(&mut state, SelectionEvent::PayloadChanged([5000.0, 100.0]), &mut figures);
        assert_eq!(scatter_points(&figures.scatter), 0);
    }
}

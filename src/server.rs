//! HTTP dashboard: serves the page and the chart specs it renders.
//!
//! Selection state travels in each request's query string, so the server
//! holds nothing per user; the dataset is shared read-only behind an `Arc`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, Json},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::chart::ChartSpec;
use crate::config::{DashboardConfig, SliderConfig};
use crate::data::filter::{ALL_SITES, PayloadRange, SiteSelection};
use crate::state::{Dashboard, DashboardFigures, SelectionState};

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// Shared server state.
struct AppState {
    dashboard: Dashboard,
    config: DashboardConfig,
    index_html: String,
}

impl AppState {
    /// Fill unspecified query values from the startup defaults.
    fn selection(
        &self,
        site: Option<String>,
        low: Option<f64>,
        high: Option<f64>,
    ) -> SelectionState {
        let defaults = self.dashboard.initial_state();
        SelectionState {
            site: site.map(SiteSelection::from).unwrap_or(defaults.site),
            payload: PayloadRange::new(
                low.unwrap_or(defaults.payload.low),
                high.unwrap_or(defaults.payload.high),
            ),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SiteParams {
    site: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SelectionParams {
    site: Option<String>,
    low: Option<f64>,
    high: Option<f64>,
}

#[derive(Debug, Serialize)]
struct SiteOption {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct OptionsResponse {
    title: String,
    sites: Vec<SiteOption>,
    slider: SliderConfig,
    marks: Vec<f64>,
    defaults: SelectionState,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    records: usize,
    sites: usize,
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.index_html.clone())
}

async fn handle_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let mut sites = vec![SiteOption {
        label: "All Sites".to_string(),
        value: ALL_SITES.to_string(),
    }];
    sites.extend(state.dashboard.dataset().sites().iter().map(|s| SiteOption {
        label: s.clone(),
        value: s.clone(),
    }));

    Json(OptionsResponse {
        title: state.config.title.clone(),
        sites,
        slider: state.config.slider,
        marks: state.config.slider.marks(),
        defaults: state.dashboard.initial_state(),
    })
}

async fn handle_outcome(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SiteParams>,
) -> Json<ChartSpec> {
    let site = params.site.map(SiteSelection::from).unwrap_or_default();
    Json(state.dashboard.outcome_chart(&site))
}

async fn handle_scatter(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> Json<ChartSpec> {
    let selection = state.selection(params.site, params.low, params.high);
    Json(
        state
            .dashboard
            .scatter_chart(&selection.site, selection.payload),
    )
}

async fn handle_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> Json<DashboardFigures> {
    let selection = state.selection(params.site, params.low, params.high);
    Json(state.dashboard.figures(&selection))
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = state.dashboard.dataset();
    Json(HealthResponse {
        status: "ok",
        records: dataset.len(),
        sites: dataset.sites().len(),
    })
}

fn render_index(title: &str) -> String {
    INDEX_TEMPLATE.replace("{{title}}", title)
}

/// Build the axum router.
pub fn build_router(dashboard: Dashboard, config: DashboardConfig) -> Router {
    let index_html = render_index(&config.title);
    let state = Arc::new(AppState {
        dashboard,
        config,
        index_html,
    });

    Router::new()
        .route("/", get(handle_index))
        .route("/api/options", get(handle_options))
        .route("/api/outcome", get(handle_outcome))
        .route("/api/scatter", get(handle_scatter))
        .route("/api/dashboard", get(handle_dashboard))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Run the HTTP dashboard until the process is stopped.
pub async fn run_server(dashboard: Dashboard, config: DashboardConfig) -> Result<()> {
    let addr = config.bind_addr;
    let app = build_router(dashboard, config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("Dashboard running at http://{addr}");

    axum::serve(listener, app).await.context("serving dashboard")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{PIE_TITLE_ALL, PIE_TITLE_SITE};
    use crate::data::model::{LaunchDataset, LaunchRecord};

    fn app_state() -> Arc<AppState> {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 500.0, 1, "v1.0"),
            LaunchRecord::new("CCAFS LC-40", 6000.0, 0, "v1.0"),
            LaunchRecord::new("KSC LC-39A", 3000.0, 1, "v1.1"),
        ])
        .unwrap();
        let config = DashboardConfig::default();
        Arc::new(AppState {
            dashboard: Dashboard::new(Arc::new(ds)),
            index_html: render_index(&config.title),
            config,
        })
    }

    fn points(spec: &ChartSpec) -> Vec<f64> {
        match spec {
            ChartSpec::Scatter(s) => s
                .series
                .iter()
                .flat_map(|series| series.points.iter().map(|p| p.x))
                .collect(),
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn options_list_all_sites_first() {
        let Json(options) = handle_options(State(app_state())).await;
        let values: Vec<&str> = options.sites.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["ALL", "CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(options.sites[0].label, "All Sites");
        assert_eq!(options.defaults.payload, PayloadRange::new(500.0, 6000.0));
        assert_eq!(options.slider.max, 10_000.0);
        assert_eq!(options.marks.first(), Some(&0.0));
        assert_eq!(options.marks.last(), Some(&10_000.0));
    }

    #[tokio::test]
    async fn outcome_defaults_to_all_sites() {
        let Json(spec) = handle_outcome(State(app_state()), Query(SiteParams::default())).await;
        assert_eq!(spec.title(), PIE_TITLE_ALL);

        let params = SiteParams {
            site: Some("KSC LC-39A".into()),
        };
        let Json(spec) = handle_outcome(State(app_state()), Query(params)).await;
        assert_eq!(spec.title(), PIE_TITLE_SITE);
    }

    #[tokio::test]
    async fn scatter_applies_query_range() {
        let params = SelectionParams {
            site: Some("ALL".into()),
            low: Some(0.0),
            high: Some(4000.0),
        };
        let Json(spec) = handle_scatter(State(app_state()), Query(params)).await;
        assert_eq!(points(&spec), [500.0, 3000.0]);
    }

    #[tokio::test]
    async fn scatter_missing_bounds_use_dataset_range() {
        let params = SelectionParams {
            low: Some(1000.0),
            ..Default::default()
        };
        let Json(spec) = handle_scatter(State(app_state()), Query(params)).await;
        assert_eq!(points(&spec), [6000.0, 3000.0]);
    }

    #[tokio::test]
    async fn dashboard_returns_both_figures() {
        let params = SelectionParams {
            site: Some("CCAFS LC-40".into()),
            low: Some(0.0),
            high: Some(10_000.0),
        };
        let Json(figures) = handle_dashboard(State(app_state()), Query(params)).await;
        assert_eq!(figures.outcome.title(), PIE_TITLE_SITE);
        assert_eq!(points(&figures.scatter), [500.0, 6000.0]);
    }

    #[tokio::test]
    async fn unknown_site_is_not_an_error() {
        let params = SelectionParams {
            site: Some("Boca Chica".into()),
            ..Default::default()
        };
        let Json(figures) = handle_dashboard(State(app_state()), Query(params)).await;
        assert!(points(&figures.scatter).is_empty());
        match figures.outcome {
            ChartSpec::Pie(pie) => assert!(pie.slices.is_empty()),
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn health_reports_dataset_size() {
        let Json(health) = handle_health(State(app_state())).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.records, 3);
        assert_eq!(health.sites, 2);
    }

    #[test]
    fn index_page_carries_title() {
        let html = render_index("Launch Board");
        assert!(html.contains("<title>Launch Board</title>"));
        assert!(!html.contains("{{title}}"));
    }

    #[test]
    fn index_page_drops_stale_and_failed_responses() {
        let html = render_index("Launch Board");
        assert!(html.contains("if (!res.ok)"));
        assert!(html.contains("if (seq !== outcomeSeq) return;"));
        assert!(html.contains("if (seq !== scatterSeq) return;"));
    }
}

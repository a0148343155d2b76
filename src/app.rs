use eframe::egui::{self, RichText};

use crate::config::{DashboardConfig, SliderConfig};
use crate::state::{Dashboard, DashboardFigures, SelectionEvent, SelectionState};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchViewerApp {
    pub dashboard: Dashboard,
    pub state: SelectionState,
    pub figures: DashboardFigures,
    pub title: String,
    pub slider: SliderConfig,
}

impl LaunchViewerApp {
    pub fn new(dashboard: Dashboard, config: &DashboardConfig) -> Self {
        let state = dashboard.initial_state();
        let figures = dashboard.figures(&state);
        Self {
            dashboard,
            state,
            figures,
            title: config.title.clone(),
            slider: config.slider,
        }
    }

    /// Route one input change through the dashboard.
    pub fn dispatch(&mut self, event: SelectionEvent) {
        log::debug!("selection event: {event:?}");
        self.dashboard
            .handle(&mut self.state, event, &mut self.figures);
    }
}

impl eframe::App for LaunchViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new(&self.title).strong());
            });
            panels::status_line(ui, &self.dashboard, &self.figures);
        });

        // ---- Left side panel: site + payload inputs ----
        let events = egui::SidePanel::left("selection_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.dashboard, &self.state, &self.slider)
            })
            .inner;

        for event in events {
            self.dispatch(event);
        }

        // ---- Central panel: pie over scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let half = (ui.available_height() / 2.0 - 8.0).max(120.0);
            plot::outcome_plot(ui, &self.figures.outcome, half);
            ui.separator();
            plot::scatter_plot(ui, &self.figures.scatter, half);
        });
    }
}

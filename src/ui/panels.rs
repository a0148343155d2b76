use eframe::egui::{self, Color32, RichText, Ui};
use palette::Srgb;

use crate::chart::ChartSpec;
use crate::config::SliderConfig;
use crate::data::filter::{ALL_SITES, PayloadRange};
use crate::state::{Dashboard, DashboardFigures, SelectionEvent, SelectionState};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the selection panel and return the input changes made this frame.
///
/// Widgets only read `state`; every change comes back as a
/// [`SelectionEvent`] for the caller to apply.
pub fn side_panel(
    ui: &mut Ui,
    dashboard: &Dashboard,
    state: &SelectionState,
    slider: &SliderConfig,
) -> Vec<SelectionEvent> {
    let mut events = Vec::new();

    ui.heading("Launch site");
    ui.separator();

    let current = state.site.as_str().to_string();
    let selected_text = if state.site.is_all() {
        "All Sites".to_string()
    } else {
        current.clone()
    };

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == ALL_SITES, "All Sites")
                .clicked()
            {
                events.push(SelectionEvent::SiteChanged(ALL_SITES.to_string()));
            }
            for site in dashboard.dataset().sites() {
                if ui.selectable_label(current == *site, site).clicked() {
                    events.push(SelectionEvent::SiteChanged(site.clone()));
                }
            }
        });

    ui.add_space(12.0);
    ui.heading("Payload range (kg)");
    ui.separator();

    let mut low = state.payload.low;
    let mut high = state.payload.high;
    let range = slider.min..=slider.max;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, range.clone()).text("from"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, range).text("to"))
        .changed();
    if low_changed || high_changed {
        events.push(SelectionEvent::PayloadChanged([low, high]));
    }

    if low > high {
        ui.label(RichText::new("Lower bound exceeds upper bound").weak());
    }

    ui.add_space(12.0);
    if ui.button("Reset").clicked() {
        let full = PayloadRange::full(dashboard.dataset());
        events.push(SelectionEvent::SiteChanged(ALL_SITES.to_string()));
        events.push(SelectionEvent::PayloadChanged([full.low, full.high]));
    }

    ui.add_space(12.0);
    booster_legend(ui, dashboard);

    events
}

/// Colour key for the booster categories, in the order the scatter assigns them.
fn booster_legend(ui: &mut Ui, dashboard: &Dashboard) {
    ui.heading("Booster versions");
    ui.separator();
    for (label, color) in dashboard.palette().boosters.legend_entries() {
        ui.horizontal(|ui: &mut Ui| {
            ui.colored_label(swatch(color), "⏺");
            ui.label(label);
        });
    }
}

fn swatch(color: Srgb<u8>) -> Color32 {
    Color32::from_rgb(color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Record counts under the title.
pub fn status_line(ui: &mut Ui, dashboard: &Dashboard, figures: &DashboardFigures) {
    let shown = match &figures.scatter {
        ChartSpec::Scatter(scatter) => scatter.point_count(),
        ChartSpec::Pie(_) => 0,
    };
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} launches loaded, {} in payload range",
            dashboard.dataset().len(),
            shown
        ));
    });
}

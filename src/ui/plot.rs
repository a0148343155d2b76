use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{ChartSpec, PieChart, ScatterChart};

/// Vertices per full turn of a pie slice outline.
const ARC_RESOLUTION: f64 = 180.0;

fn spec_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::GRAY)
}

// ---------------------------------------------------------------------------
// Outcome pie
// ---------------------------------------------------------------------------

/// Render the outcome chart (pie) at the given height.
pub fn outcome_plot(ui: &mut Ui, spec: &ChartSpec, height: f32) {
    ui.strong(spec.title());
    match spec {
        ChartSpec::Pie(pie) => pie_plot(ui, pie, height),
        ChartSpec::Scatter(scatter) => scatter_points(ui, scatter, height),
    }
}

/// Outline of one slice: centre, then the arc from `start` to `end`
/// (radians, clockwise from twelve o'clock).
pub fn slice_outline(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU) * ARC_RESOLUTION).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = FRAC_PI_2 - (start + (end - start) * i as f64 / steps as f64);
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

fn pie_plot(ui: &mut Ui, pie: &PieChart, height: f32) {
    let total = pie.total();
    if total <= 0.0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches to show for this selection");
        });
        return;
    }

    Plot::new("outcome_plot")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for slice in &pie.slices {
                let fraction = slice.value / total;
                let end = start + fraction * TAU;
                let color = spec_color(&slice.color);

                if fraction > 0.0 {
                    let polygon = Polygon::new(PlotPoints::from(slice_outline(start, end)))
                        .name(&slice.label)
                        .fill_color(color);
                    plot_ui.polygon(polygon);

                    let mid = FRAC_PI_2 - (start + end) / 2.0;
                    let label = format!("{:.1}%", fraction * 100.0);
                    plot_ui.text(
                        Text::new(PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()), label)
                            .color(Color32::WHITE),
                    );
                }
                start = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Payload scatter
// ---------------------------------------------------------------------------

/// Render the payload vs. class scatter chart at the given height.
pub fn scatter_plot(ui: &mut Ui, spec: &ChartSpec, height: f32) {
    ui.strong(spec.title());
    match spec {
        ChartSpec::Scatter(scatter) => scatter_points(ui, scatter, height),
        ChartSpec::Pie(pie) => pie_plot(ui, pie, height),
    }
}

fn scatter_points(ui: &mut Ui, scatter: &ScatterChart, height: f32) {
    Plot::new("scatter_plot")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(scatter.x_label.as_str())
        .y_axis_label(scatter.y_label.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &scatter.series {
                let points: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .color(spec_color(&series.color))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

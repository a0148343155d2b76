use std::sync::Arc;

use anyhow::{Result, anyhow};
use eframe::egui;
use launch_dashboard::app::LaunchViewerApp;
use launch_dashboard::config::DashboardConfig;
use launch_dashboard::data::loader;
use launch_dashboard::state::Dashboard;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let dataset = loader::load_file(&config.dataset_path).inspect_err(|e| {
        log::error!("Failed to load launch records: {e:#}");
    })?;
    log::info!(
        "Loaded {} launch records from sites {:?}",
        dataset.len(),
        dataset.sites()
    );

    let dashboard = Dashboard::new(Arc::new(dataset));
    let app = LaunchViewerApp::new(dashboard, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("viewer exited with error: {e}"))
}

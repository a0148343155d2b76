use std::sync::Arc;

use anyhow::Result;
use launch_dashboard::config::DashboardConfig;
use launch_dashboard::data::loader;
use launch_dashboard::server;
use launch_dashboard::state::Dashboard;

#[tokio::main]
async fn main() -> Result<()> {
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
    server::run_server(dashboard, config).await
}

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::Serialize;

/// Fixed dashboard settings. There are no flags or environment overrides;
/// logging verbosity is the only runtime knob (`RUST_LOG`).
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub bind_addr: SocketAddr,
    pub dataset_path: PathBuf,
    pub title: String,
    pub slider: SliderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8050)),
            dataset_path: PathBuf::from("spacex_launch_dash.csv"),
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider: SliderConfig::default(),
        }
    }
}

/// Payload range slider bounds in kilograms.
///
/// These only constrain the widget; the filter engine accepts any range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl SliderConfig {
    /// Slider tick marks from `min` to `max` inclusive.
    pub fn marks(&self) -> Vec<f64> {
        if self.step.is_nan() || self.step <= 0.0 || self.max < self.min {
            return vec![self.min];
        }
        let n = ((self.max - self.min) / self.step).floor() as usize;
        (0..=n).map(|i| self.min + i as f64 * self.step).collect()
    }
}

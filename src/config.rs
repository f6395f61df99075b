use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Presentation settings for the dashboard. Every field has a default, so a
/// JSON config file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Heading shown above the controls.
    pub title: String,
    /// Sites offered by the selector after "All Sites".
    /// Empty means "every site found in the dataset".
    pub sites: Vec<String>,
    /// Payload slider lower bound in kg.
    pub payload_min: f64,
    /// Payload slider upper bound in kg.
    pub payload_max: f64,
    /// Slider step in kg.
    pub payload_step: f64,
    /// Initial window size `[width, height]`.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            sites: vec![
                "CCAFS LC-40".to_string(),
                "CCAFS SLC-40".to_string(),
                "KSC LC-39A".to_string(),
                "VAFB SLC-4E".to_string(),
            ],
            payload_min: 0.0,
            payload_max: 10000.0,
            payload_step: 2500.0,
            window_size: [1200.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Site options for the selector, falling back to the dataset's sites.
    pub fn site_options(&self, dataset: &LaunchDataset) -> Vec<String> {
        if self.sites.is_empty() {
            dataset.sites.clone()
        } else {
            self.sites.clone()
        }
    }

    /// Slider bounds: the configured range widened to cover the dataset, then
    /// rounded outward to whole steps so a stepped slider can reach both ends.
    pub fn slider_bounds(&self, dataset: &LaunchDataset) -> (f64, f64) {
        let (lo, hi) = match dataset.payload_bounds() {
            Some((lo, hi)) => (self.payload_min.min(lo), self.payload_max.max(hi)),
            None => (self.payload_min, self.payload_max),
        };
        let step = self.payload_step;
        if step > 0.0 {
            ((lo / step).floor() * step, (hi / step).ceil() * step)
        } else {
            (lo, hi)
        }
    }
}

use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::aggregate::{compute_pie_data, ChartInput};
use crate::data::filter::compute_scatter_data;
use crate::data::loader::load_file;
use crate::data::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Chart inputs are recomputed only when a selection changes, through
/// [`AppState::set_site`] and [`AppState::set_payload_range`].
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset, read-only until another file is opened.
    pub dataset: LaunchDataset,

    /// File the dataset came from, if any.
    pub source: Option<PathBuf>,

    /// Entries of the site selector after "All Sites".
    pub site_options: Vec<String>,

    /// Slider limits in kg.
    pub slider_bounds: (f64, f64),

    /// Current site selection.
    pub site: SiteSelection,

    /// Current payload range.
    pub payload_range: PayloadRange,

    /// Pie chart input for `site`.
    pub pie: ChartInput,

    /// Records in the scatter plot for `site` and `payload_range`.
    pub scatter: Vec<LaunchRecord>,

    /// Colours of the pie slices.
    pub pie_colors: ColorMap,

    /// Colours of booster version categories in the scatter plot.
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: LaunchDataset, source: Option<PathBuf>) -> Self {
        let mut state = Self {
            config,
            dataset: LaunchDataset::from_records(Vec::new(), Vec::new()),
            source: None,
            site_options: Vec::new(),
            slider_bounds: (0.0, 0.0),
            site: SiteSelection::All,
            payload_range: PayloadRange::new(0.0, 0.0),
            pie: ChartInput {
                title: String::new(),
                slices: Vec::new(),
            },
            scatter: Vec::new(),
            pie_colors: ColorMap::new(std::iter::empty::<&str>()),
            booster_colors: ColorMap::new(std::iter::empty::<&str>()),
            status_message: None,
        };
        state.set_dataset(dataset, source);
        state
    }

    /// Ingest a newly loaded dataset: reset selections, colours and charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: Option<PathBuf>) {
        self.site_options = self.config.site_options(&dataset);
        self.slider_bounds = self.config.slider_bounds(&dataset);
        self.payload_range = PayloadRange::new(self.slider_bounds.0, self.slider_bounds.1);
        self.site = SiteSelection::All;
        self.booster_colors =
            ColorMap::new(dataset.booster_categories.iter().map(String::as_str));

        self.status_message = match dataset.skipped.len() {
            0 => None,
            n => Some(format!("{n} malformed rows skipped")),
        };
        self.dataset = dataset;
        self.source = source;

        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Load another file. On failure the current dataset stays in place.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Change the site selection. Both charts depend on it.
    pub fn set_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        self.site = site;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Change the payload range. Only the scatter plot depends on it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.recompute_scatter();
    }

    /// Records currently shown in the scatter plot, in file order.
    pub fn scatter_records(&self) -> impl Iterator<Item = &LaunchRecord> {
        self.scatter.iter()
    }

    fn recompute_pie(&mut self) {
        self.pie = compute_pie_data(&self.dataset.records, &self.site);
        self.pie_colors = ColorMap::new(self.pie.slices.iter().map(|s| s.label.as_str()));
        log::debug!("Pie recomputed for {}: {} slices", self.site, self.pie.slices.len());
    }

    fn recompute_scatter(&mut self) {
        self.scatter = compute_scatter_data(&self.dataset.records, &self.site, self.payload_range)
            .into_iter()
            .cloned()
            .collect();
        log::debug!(
            "Scatter recomputed for {} in [{}, {}] kg: {} records",
            self.site,
            self.payload_range.low,
            self.payload_range.high,
            self.scatter.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn state() -> AppState {
        let ds = LaunchDataset::from_records(
            vec![
                record("CCAFS LC-40", 0.0, false, "v1.0"),
                record("KSC LC-39A", 3000.0, true, "FT"),
                record("CCAFS LC-40", 6000.0, true, "v1.1"),
                record("VAFB SLC-4E", 9600.0, false, "B4"),
            ],
            Vec::new(),
        );
        AppState::new(DashboardConfig::default(), ds, None)
    }

    #[test]
    fn starts_with_all_sites_and_full_range() {
        let st = state();
        assert_eq!(st.site, SiteSelection::All);
        assert_eq!(st.payload_range, PayloadRange::new(0.0, 10000.0));
        assert_eq!(st.pie.slices.len(), 3);
        assert_eq!(st.scatter, st.dataset.records);
        assert!(st.status_message.is_none());
    }

    #[test]
    fn site_change_updates_both_charts() {
        let mut st = state();
        st.set_site(SiteSelection::Site("CCAFS LC-40".into()));
        assert_eq!(st.pie.slices[0].value, 1.0);
        assert_eq!(st.pie.slices[1].value, 1.0);
        let payloads: Vec<f64> = st.scatter_records().map(|r| r.payload_mass_kg).collect();
        assert_eq!(payloads, vec![0.0, 6000.0]);
    }

    #[test]
    fn payload_change_updates_scatter_only() {
        let mut st = state();
        let pie_before = st.pie.clone();
        st.set_payload_range(PayloadRange::new(2500.0, 7500.0));
        assert_eq!(st.pie, pie_before);
        let sites: Vec<&str> = st.scatter_records().map(|r| r.launch_site.as_str()).collect();
        assert_eq!(sites, vec!["KSC LC-39A", "CCAFS LC-40"]);
    }

    #[test]
    fn failed_open_keeps_current_dataset() {
        let mut st = state();
        st.open(Path::new("/definitely/not/here.csv"));
        assert_eq!(st.dataset.len(), 4);
        assert!(st
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error:")));
    }
}

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use launch_dash::app::LaunchDashApp;
use launch_dash::config::DashboardConfig;
use launch_dash::data::loader::load_file;
use launch_dash::data::model::SiteSelection;
use launch_dash::state::AppState;

/// Interactive dashboard of launch success by site and payload.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(short, long, default_value = "spacex_launch_dash.csv")]
    data: PathBuf,

    /// JSON file overriding dashboard settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initially selected launch site, or ALL
    #[arg(short, long, default_value = "ALL")]
    site: SiteSelection,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };

    // The dashboard has nothing to show without its dataset.
    let dataset = load_file(&args.data).context("cannot start dashboard")?;

    let title = config.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };
    let mut state = AppState::new(config, dataset, Some(args.data));
    state.set_site(args.site);

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_flag_parses_into_a_selection() {
        let args = Args::try_parse_from(["launch-dash", "--site", "KSC LC-39A"]).unwrap();
        assert_eq!(args.site, SiteSelection::Site("KSC LC-39A".into()));

        let args = Args::try_parse_from(["launch-dash"]).unwrap();
        assert_eq!(args.site, SiteSelection::All);
        assert_eq!(args.data, PathBuf::from("spacex_launch_dash.csv"));
    }
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use order_dashboard::app::OrderDashboardApp;
use order_dashboard::config::DashboardConfig;
use order_dashboard::state::AppState;

/// Interactive dashboard for e-commerce order exports.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Order export to open at startup (.xlsx, .csv, .json or .parquet)
    path: Option<PathBuf>,

    /// JSON file overriding column names, status labels and display options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    let mut state = AppState::new(config);
    if let Some(path) = &args.path {
        // A bad startup file is shown in the top bar, not fatal.
        let _ = state.open(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Order Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(OrderDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}

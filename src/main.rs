mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();

    // No dataset, no dashboard: any load failure ends the process here.
    let dataset = args
        .resolve_data_path()
        .and_then(|path| data::loader::load_file(&path))
        .inspect_err(|e| log::error!("Failed to load launch records: {e:#}"))?;
    log::info!(
        "Loaded {} launches from {} sites",
        dataset.len(),
        dataset.sites().len()
    );

    if args.summary {
        let summary = cli::summarize(&dataset, &args);
        let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{json}");
        return Ok(());
    }

    let dataset = Arc::new(dataset);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        ui::panels::DASHBOARD_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}

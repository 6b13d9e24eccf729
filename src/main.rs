//! power-sim entry point: CLI wiring and config-driven engine construction.

use std::io;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use power_sim::cli::Args;
use power_sim::devices::solar::{REGIONAL_MAX_SUN_HOURS, sun_hours};
use power_sim::io::export::{export_series_csv, export_toggles_csv};
use power_sim::sim::engine::Engine;
use power_sim::sim::event::EventLog;
use power_sim::sim::sink::SeriesRecorder;
use power_sim::sim::summary::RunSummary;
use power_sim::telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let scenario = match args.scenario_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }
    for w in scenario.warnings() {
        warn!("{w}");
    }

    let config = scenario.to_sim_config();
    let load = scenario.load.resolve();
    info!(
        sun_hours = %format!("{:.2}", sun_hours(config.std_dev)),
        regional_max = REGIONAL_MAX_SUN_HOURS,
        "Simulated sun hours"
    );
    info!(
        policy = %scenario.simulation.policy,
        solar_w = config.solar_w,
        battery_wh = config.max_battery_wh,
        off_wh = config.off_threshold_wh,
        on_wh = config.on_threshold_wh,
        load_w = %format!("{:.2}", config.load_w),
        brightness = %format!("{:.0}%", load.brightness_percent()),
        controller_w = config.controller_w,
        std_dev = config.std_dev,
        "Running simulation"
    );

    // Build and run
    let engine = Engine::new(config, scenario.simulation.policy);
    let config = engine.config();
    let mut log = EventLog::new();
    let mut series = SeriesRecorder::with_capacity(config.horizon.total_ticks());
    engine.run((&mut log, &mut series));

    // Print transitions and summary
    log.write_to(io::stdout().lock())
        .context("failed to print transition log")?;
    let summary = RunSummary::from_series(series.points(), config);
    println!("\n{summary}");

    // Export CSV if requested
    if let Some(ref path) = args.telemetry_out {
        export_series_csv(series.points(), config, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), rows = series.points().len(), "Battery series written");
    }
    if let Some(ref path) = args.toggles_out {
        export_toggles_csv(log.toggles(), path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), rows = log.toggles().len(), "Toggle feed written");
    }

    Ok(())
}

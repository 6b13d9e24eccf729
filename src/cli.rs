use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::{ConfigError, ScenarioConfig};
use crate::sim::controller::Policy;

/// Estimate how long a solar-charged battery keeps a load running.
///
/// The scenario comes from `--scenario`, `--preset`, or the baseline preset;
/// any hardware flag given on the command line overrides it.
#[derive(Debug, Parser)]
#[command(name = "power-sim", version, about)]
pub struct Args {
    /// Load the scenario from a TOML file.
    #[arg(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, dim, overcast, fixed_floor).
    #[arg(long)]
    pub preset: Option<String>,

    /// Usable battery capacity in Wh.
    #[arg(long = "battery-wh", short = 'b')]
    pub battery_wh: Option<f64>,

    /// Peak solar output in W, already derated for latitude.
    #[arg(long = "solar-w", short = 's')]
    pub solar_w: Option<f64>,

    /// Charge at which the load shuts off, in percent of capacity.
    #[arg(long = "min-battery")]
    pub min_battery: Option<f64>,

    /// Charge at which the load resumes, in percent of capacity.
    #[arg(long = "resume-battery")]
    pub resume_battery: Option<f64>,

    /// LED brightness in percent; over 100 is allowed for busier music.
    #[arg(long, short = 'p', conflicts_with = "project_w")]
    pub brightness: Option<f64>,

    /// Explicit load draw in W.
    #[arg(long = "project-w", short = 'w')]
    pub project_w: Option<f64>,

    /// Standard deviation of the insolation curve, in hours.
    #[arg(long = "std-dev")]
    pub std_dev: Option<f64>,

    /// Load-switching policy (hysteresis, fixed_floor).
    #[arg(long)]
    pub policy: Option<Policy>,

    /// Constant draw of the switching electronics in W.
    #[arg(long = "controller-w")]
    pub controller_w: Option<f64>,

    /// Number of days to simulate.
    #[arg(long)]
    pub days: Option<usize>,

    /// Write the per-minute battery series to this CSV file.
    #[arg(long = "telemetry-out")]
    pub telemetry_out: Option<PathBuf>,

    /// Write the load toggle times to this CSV file.
    #[arg(long = "toggles-out")]
    pub toggles_out: Option<PathBuf>,
}

impl Args {
    /// Loads the base scenario and applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the scenario file or preset cannot be loaded.
    pub fn scenario_config(&self) -> Result<ScenarioConfig, ConfigError> {
        let mut scenario = match (&self.scenario, &self.preset) {
            (Some(path), _) => ScenarioConfig::from_toml_file(Path::new(path))?,
            (None, Some(name)) => ScenarioConfig::from_preset(name)?,
            (None, None) => ScenarioConfig::baseline(),
        };
        self.apply_overrides(&mut scenario);
        Ok(scenario)
    }

    /// Overwrites every field given on the command line.
    pub fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(wh) = self.battery_wh {
            scenario.battery.capacity_wh = wh;
        }
        if let Some(w) = self.solar_w {
            scenario.solar.peak_w = w;
        }
        if let Some(pct) = self.min_battery {
            scenario.battery.off_percent = pct;
        }
        if let Some(pct) = self.resume_battery {
            scenario.battery.resume_percent = pct;
        }
        // a load flag replaces whatever load the scenario specified
        if let Some(pct) = self.brightness {
            scenario.load.brightness_percent = Some(pct);
            scenario.load.watts = None;
        }
        if let Some(w) = self.project_w {
            scenario.load.watts = Some(w);
            scenario.load.brightness_percent = None;
        }
        if let Some(std_dev) = self.std_dev {
            scenario.solar.std_dev = std_dev;
        }
        if let Some(policy) = self.policy {
            scenario.simulation.policy = policy;
        }
        if let Some(w) = self.controller_w {
            scenario.controller.draw_w = w;
        }
        if let Some(days) = self.days {
            scenario.simulation.days = days;
        }
    }
}

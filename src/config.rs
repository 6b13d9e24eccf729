//! TOML-based scenario configuration, presets, validation, and warnings.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::devices::load::{IDLE_W, Load};
use crate::devices::solar::{REGIONAL_MAX_SUN_HOURS, sun_hours};
use crate::sim::clock::{Horizon, MAX_DAYS, START_HOUR, WEEKDAYS, weekday_index};
use crate::sim::controller::Policy;
use crate::sim::types::SimConfig;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Horizon and switching policy.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Solar panel parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Battery capacity and thresholds.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Load draw.
    #[serde(default)]
    pub load: LoadConfig,
    /// Switching electronics.
    #[serde(default)]
    pub controller: ControllerConfig,
}

/// Horizon and switching policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of labeled days to simulate (must be > 0).
    pub days: usize,
    /// Hour at which the last day ends (1–23).
    pub end_hour: u32,
    /// Weekday label of the first day (`"Mon"` … `"Sun"`).
    pub first_day: String,
    /// Load-switching policy.
    pub policy: Policy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let horizon = Horizon::default();
        Self {
            days: horizon.days,
            end_hour: horizon.end_hour,
            first_day: "Wed".to_string(),
            policy: Policy::Hysteresis,
        }
    }
}

/// Solar panel parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Peak output at solar noon (W).
    pub peak_w: f64,
    /// Insolation curve width (hours).
    pub std_dev: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            // 200 W of panels, ~90 % of rating at Colorado's latitude
            peak_w: 180.0,
            std_dev: 2.3,
        }
    }
}

/// Battery capacity and switching thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Usable capacity (Wh).
    pub capacity_wh: f64,
    /// Charge at which the load is switched off (percent of capacity).
    pub off_percent: f64,
    /// Charge at which the load is switched back on (percent of capacity).
    pub resume_percent: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            // 80 Ah at 12 V, aged to ~80 %
            capacity_wh: 768.0,
            off_percent: 25.0,
            resume_percent: 40.0,
        }
    }
}

/// Load draw: an explicit wattage or a brightness, never both.
///
/// With neither set the load runs at 100 % brightness.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Explicit draw while on (W).
    pub watts: Option<f64>,
    /// Brightness mapped between the idle and full-load draw (percent).
    pub brightness_percent: Option<f64>,
}

impl LoadConfig {
    /// Brightness assumed when neither field is set.
    pub const DEFAULT_BRIGHTNESS: f64 = 100.0;

    /// Resolves the draw in watts.
    pub fn resolve(&self) -> Load {
        match self.watts {
            Some(w) => Load::new(w),
            None => Load::from_brightness(
                self.brightness_percent
                    .unwrap_or(Self::DEFAULT_BRIGHTNESS),
            ),
        }
    }
}

/// Switching electronics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Constant draw of the controller (W).
    pub draw_w: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { draw_w: 0.5 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.off_percent"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Advisory finding that does not block a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// The load draws less than the hardware needs just to idle.
    LoadBelowIdle { load_w: f64, idle_w: f64 },
    /// The insolation curve is wider than the sunniest local summer allows.
    UnrealisticSunHours { sun_hours: f64, max_sun_hours: f64 },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadBelowIdle { load_w, idle_w } => write!(
                f,
                "load {load_w:.2} W is unrealistically below idle {idle_w:.2} W"
            ),
            Self::UnrealisticSunHours {
                sun_hours,
                max_sun_hours,
            } => write!(
                f,
                "std_dev gives {sun_hours:.2} sun hours per day, above the regional maximum of {max_sun_hours}"
            ),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: the reference hardware at full brightness.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the dim preset: baseline hardware at half brightness.
    pub fn dim() -> Self {
        Self {
            load: LoadConfig {
                brightness_percent: Some(50.0),
                ..LoadConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the overcast preset: a narrow insolation curve.
    pub fn overcast() -> Self {
        Self {
            solar: SolarConfig {
                std_dev: 1.6,
                ..SolarConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the fixed-floor preset: baseline with the single-threshold
    /// policy and no controller draw.
    pub fn fixed_floor() -> Self {
        Self {
            simulation: SimulationConfig {
                policy: Policy::FixedFloor,
                ..SimulationConfig::default()
            },
            controller: ControllerConfig { draw_w: 0.0 },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "dim", "overcast", "fixed_floor"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "dim" => Ok(Self::dim()),
            "overcast" => Ok(Self::overcast()),
            "fixed_floor" => Ok(Self::fixed_floor()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if !(1..=MAX_DAYS).contains(&s.days) {
            errors.push(ConfigError::new(
                "simulation.days",
                format!("must be in [1, {MAX_DAYS}], got {}", s.days),
            ));
        }
        if !(1..=23).contains(&s.end_hour) {
            errors.push(ConfigError::new("simulation.end_hour", "must be in [1, 23]"));
        } else if s.days == 1 && s.end_hour <= START_HOUR {
            errors.push(ConfigError::new(
                "simulation.end_hour",
                format!("a single-day run starts at {START_HOUR}:00 and must end after it"),
            ));
        }
        if weekday_index(&s.first_day).is_none() {
            errors.push(ConfigError::new(
                "simulation.first_day",
                format!(
                    "must be one of {}, got \"{}\"",
                    WEEKDAYS.join(", "),
                    s.first_day
                ),
            ));
        }

        let sol = &self.solar;
        if !(sol.peak_w >= 0.0) {
            errors.push(ConfigError::new("solar.peak_w", "must be >= 0"));
        }
        if !(sol.std_dev > 0.0) {
            errors.push(ConfigError::new("solar.std_dev", "must be > 0"));
        }

        let bat = &self.battery;
        if !(bat.capacity_wh > 0.0) {
            errors.push(ConfigError::new("battery.capacity_wh", "must be > 0"));
        }
        let off_ok = (1.0..=100.0).contains(&bat.off_percent);
        let resume_ok = (1.0..=100.0).contains(&bat.resume_percent);
        if !off_ok {
            errors.push(ConfigError::new(
                "battery.off_percent",
                format!("must be in [1, 100], got {}", bat.off_percent),
            ));
        }
        if !resume_ok {
            errors.push(ConfigError::new(
                "battery.resume_percent",
                format!("must be in [1, 100], got {}", bat.resume_percent),
            ));
        }
        if off_ok && resume_ok && bat.resume_percent <= bat.off_percent {
            errors.push(ConfigError::new(
                "battery.resume_percent",
                "must be > battery.off_percent",
            ));
        }

        let load = &self.load;
        if load.watts.is_some() && load.brightness_percent.is_some() {
            errors.push(ConfigError::new(
                "load",
                "only one of load.watts and load.brightness_percent may be set",
            ));
        }
        if let Some(w) = load.watts
            && !(w >= 0.0)
        {
            errors.push(ConfigError::new("load.watts", "must be >= 0"));
        }
        // catches ".5" typed for "50"
        if let Some(b) = load.brightness_percent
            && !(b >= 2.0)
        {
            errors.push(ConfigError::new(
                "load.brightness_percent",
                format!("must be >= 2, got {b}"),
            ));
        }

        if !(self.controller.draw_w >= 0.0) {
            errors.push(ConfigError::new("controller.draw_w", "must be >= 0"));
        }

        errors
    }

    /// Returns advisory warnings. Meaningful only for a configuration that validates.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let load = self.load.resolve();
        if load.below_idle() {
            warnings.push(ConfigWarning::LoadBelowIdle {
                load_w: load.watts,
                idle_w: IDLE_W,
            });
        }

        let hours = sun_hours(self.solar.std_dev);
        if hours > REGIONAL_MAX_SUN_HOURS {
            warnings.push(ConfigWarning::UnrealisticSunHours {
                sun_hours: hours,
                max_sun_hours: REGIONAL_MAX_SUN_HOURS,
            });
        }

        warnings
    }

    /// Builds the immutable run configuration. Call only after [`ScenarioConfig::validate`]
    /// returned no errors.
    pub fn to_sim_config(&self) -> SimConfig {
        let bat = &self.battery;
        let mut config = SimConfig::new(
            self.solar.peak_w,
            bat.capacity_wh,
            bat.capacity_wh * bat.off_percent / 100.0,
            bat.capacity_wh * bat.resume_percent / 100.0,
            self.load.resolve().watts,
            self.solar.std_dev,
        );
        config.controller_w = self.controller.draw_w;
        config.horizon = Horizon::new(self.simulation.days, self.simulation.end_hour);
        if let Some(first_day) = weekday_index(&self.simulation.first_day) {
            config.first_day = first_day;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
        assert!(cfg.warnings().is_empty());
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
days = 3
end_hour = 9
first_day = "Fri"
policy = "fixed_floor"

[solar]
peak_w = 100.0
std_dev = 2.0

[battery]
capacity_wh = 500.0
off_percent = 20.0
resume_percent = 50.0

[load]
watts = 40.0

[controller]
draw_w = 0.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.days), Some(3));
        assert_eq!(
            cfg.as_ref().map(|c| c.simulation.policy),
            Some(Policy::FixedFloor)
        );
        assert_eq!(cfg.as_ref().and_then(|c| c.load.watts), Some(40.0));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
capacity_wh = 500.0
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn unknown_policy_rejected_at_parse() {
        let toml = r#"
[simulation]
policy = "bang_bang"
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[solar]
std_dev = 2.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.solar.std_dev), Some(2.0));
        assert_eq!(cfg.as_ref().map(|c| c.solar.peak_w), Some(180.0));
        assert_eq!(cfg.as_ref().map(|c| c.battery.off_percent), Some(25.0));
        assert_eq!(
            cfg.as_ref().map(|c| c.simulation.policy),
            Some(Policy::Hysteresis)
        );
    }

    #[test]
    fn validation_catches_percent_out_of_range() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.off_percent = 0.5;
        cfg.battery.resume_percent = 101.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.off_percent"));
        assert!(errors.iter().any(|e| e.field == "battery.resume_percent"));
    }

    #[test]
    fn validation_catches_resume_not_above_off() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.off_percent = 40.0;
        cfg.battery.resume_percent = 40.0;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "battery.resume_percent" && e.message.contains("off_percent"))
        );
    }

    #[test]
    fn validation_catches_watts_and_brightness() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.load.watts = Some(45.0);
        cfg.load.brightness_percent = Some(80.0);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "load"));
    }

    #[test]
    fn validation_catches_negative_watts() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.load.watts = Some(-1.0);
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].field, "load.watts");

        cfg.load.watts = Some(0.0);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validation_catches_tiny_brightness() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.load.brightness_percent = Some(0.5);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "load.brightness_percent"));
    }

    #[test]
    fn validation_catches_bad_horizon() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.days = 1;
        cfg.simulation.end_hour = 12;
        assert!(
            cfg.validate()
                .iter()
                .any(|e| e.field == "simulation.end_hour")
        );

        cfg.simulation.days = 0;
        assert!(cfg.validate().iter().any(|e| e.field == "simulation.days"));
    }

    #[test]
    fn validation_bounds_days() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.days = MAX_DAYS;
        assert!(cfg.validate().is_empty());

        for days in [MAX_DAYS + 1, usize::MAX] {
            cfg.simulation.days = days;
            let errors = cfg.validate();
            assert_eq!(errors.len(), 1, "days={days}: {errors:?}");
            assert_eq!(errors[0].field, "simulation.days");
        }
    }

    #[test]
    fn validation_catches_bad_day_and_curve() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.first_day = "Someday".to_string();
        cfg.solar.std_dev = 0.0;
        cfg.battery.capacity_wh = -1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.first_day"));
        assert!(errors.iter().any(|e| e.field == "solar.std_dev"));
        assert!(errors.iter().any(|e| e.field == "battery.capacity_wh"));
    }

    #[test]
    fn warns_on_load_below_idle() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.load.watts = Some(20.0);
        assert!(cfg.validate().is_empty());
        assert!(
            cfg.warnings()
                .iter()
                .any(|w| matches!(w, ConfigWarning::LoadBelowIdle { .. }))
        );
    }

    #[test]
    fn warns_on_wide_curve() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.solar.std_dev = 3.0;
        assert!(cfg.validate().is_empty());
        assert!(
            cfg.warnings()
                .iter()
                .any(|w| matches!(w, ConfigWarning::UnrealisticSunHours { .. }))
        );
    }

    #[test]
    fn sim_config_thresholds_from_percentages() {
        let sim = ScenarioConfig::baseline().to_sim_config();
        assert_abs_diff_eq!(sim.max_battery_wh, 768.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sim.off_threshold_wh, 192.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sim.on_threshold_wh, 307.2, epsilon = 1e-9);
        assert_abs_diff_eq!(sim.solar_w, 180.0, epsilon = 1e-9);
        assert_eq!(sim.controller_w, 0.5);
        assert_eq!(sim.horizon, Horizon::default());
    }

    #[test]
    fn sim_config_uses_explicit_watts() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.load.watts = Some(45.0);
        assert_eq!(cfg.to_sim_config().load_w, 45.0);
    }

    #[test]
    fn fixed_floor_preset_switches_policy() {
        let cfg = ScenarioConfig::fixed_floor();
        assert_eq!(cfg.simulation.policy, Policy::FixedFloor);
        assert_eq!(cfg.to_sim_config().controller_w, 0.0);
    }
}

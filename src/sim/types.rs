//! Core simulation types: the immutable per-run configuration.

use super::clock::{Horizon, weekday_index};

/// Validated, immutable configuration of one simulation run.
///
/// The simulator trusts these values: the configuration layer is expected
/// to have enforced `0 < off_threshold_wh <= on_threshold_wh <= max_battery_wh`
/// and `std_dev > 0` before a run starts.
///
/// # Examples
///
/// ```
/// use power_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(180.0, 768.0, 192.0, 307.2, 45.0, 2.3);
/// assert_eq!(cfg.horizon.total_ticks(), 6120);
/// assert_eq!(cfg.controller_w, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Peak panel output at solar noon (W).
    pub solar_w: f64,
    /// Battery capacity ceiling (Wh).
    pub max_battery_wh: f64,
    /// Charge below which the load is switched off (Wh).
    pub off_threshold_wh: f64,
    /// Charge above which the load is switched back on (Wh).
    pub on_threshold_wh: f64,
    /// Draw of the load while on (W).
    pub load_w: f64,
    /// Width of the insolation curve (hours).
    pub std_dev: f64,
    /// Constant draw of the switching electronics (W).
    pub controller_w: f64,
    /// How long the run lasts.
    pub horizon: Horizon,
    /// Index into [`WEEKDAYS`](super::clock::WEEKDAYS) labeling day 0.
    pub first_day: usize,
}

impl SimConfig {
    /// Creates a configuration with no controller draw, the default
    /// five-day horizon, and day 0 labeled Wednesday.
    ///
    /// # Arguments
    ///
    /// * `solar_w` - Peak panel output (W)
    /// * `max_battery_wh` - Battery capacity (Wh)
    /// * `off_threshold_wh` - Switch-off threshold (Wh)
    /// * `on_threshold_wh` - Switch-on threshold (Wh)
    /// * `load_w` - Load draw while on (W)
    /// * `std_dev` - Insolation curve width (hours)
    pub fn new(
        solar_w: f64,
        max_battery_wh: f64,
        off_threshold_wh: f64,
        on_threshold_wh: f64,
        load_w: f64,
        std_dev: f64,
    ) -> Self {
        Self {
            solar_w,
            max_battery_wh,
            off_threshold_wh,
            on_threshold_wh,
            load_w,
            std_dev,
            controller_w: 0.0,
            horizon: Horizon::default(),
            first_day: weekday_index("Wed").unwrap_or(0),
        }
    }

    /// Battery charge as a percentage of capacity.
    pub fn percent_of_capacity(&self, battery_wh: f64) -> f64 {
        battery_wh / self.max_battery_wh * 100.0
    }
}

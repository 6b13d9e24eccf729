//! Load-switching policies deciding when the battery may power the load.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::types::SimConfig;

/// Battery charge and switch state after applying a policy to one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Charge after any floor clamping (Wh). The ceiling is handled by the engine.
    pub battery_wh: f64,
    /// Whether the load is on for this tick.
    pub power_on: bool,
}

/// Decides the load switch state from the candidate charge of a tick.
pub trait PowerController {
    /// # Arguments
    ///
    /// * `candidate_wh` - Charge after applying this tick's energy delta
    /// * `was_on` - Switch state of the previous tick
    /// * `config` - Thresholds and capacity
    fn decide(&self, candidate_wh: f64, was_on: bool, config: &SimConfig) -> Decision;

    /// Whether the load draws from the battery on a tick whose previous
    /// switch state was `was_on`.
    fn load_drawn(&self, was_on: bool) -> bool {
        was_on
    }
}

/// Hard floor at the off threshold with no memory of the previous switch state.
///
/// The load is charged every tick. Whenever the candidate charge drops
/// below the threshold, charge is held at the threshold and the load is
/// reported off, so the battery sits at the floor until the sun covers
/// the load again.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedFloorController;

impl PowerController for FixedFloorController {
    fn decide(&self, candidate_wh: f64, _was_on: bool, config: &SimConfig) -> Decision {
        if candidate_wh < config.off_threshold_wh {
            Decision {
                battery_wh: config.off_threshold_wh,
                power_on: false,
            }
        } else {
            Decision {
                battery_wh: candidate_wh,
                power_on: true,
            }
        }
    }

    fn load_drawn(&self, _was_on: bool) -> bool {
        true
    }
}

/// Two-threshold policy: off below `off_threshold_wh`, back on only above
/// `on_threshold_wh`, unchanged in between. Charge is never clamped at the floor.
#[derive(Debug, Default, Clone, Copy)]
pub struct HysteresisController;

impl PowerController for HysteresisController {
    fn decide(&self, candidate_wh: f64, was_on: bool, config: &SimConfig) -> Decision {
        let power_on = if candidate_wh < config.off_threshold_wh {
            false
        } else if candidate_wh > config.on_threshold_wh {
            true
        } else {
            was_on
        };
        Decision {
            battery_wh: candidate_wh,
            power_on,
        }
    }
}

/// Policy selected by name in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    FixedFloor,
    #[default]
    Hysteresis,
}

impl Policy {
    /// Accepted configuration names.
    pub const NAMES: &[&str] = &["fixed_floor", "hysteresis"];

    pub fn name(self) -> &'static str {
        match self {
            Self::FixedFloor => "fixed_floor",
            Self::Hysteresis => "hysteresis",
        }
    }
}

impl PowerController for Policy {
    fn decide(&self, candidate_wh: f64, was_on: bool, config: &SimConfig) -> Decision {
        match self {
            Self::FixedFloor => FixedFloorController.decide(candidate_wh, was_on, config),
            Self::Hysteresis => HysteresisController.decide(candidate_wh, was_on, config),
        }
    }

    fn load_drawn(&self, was_on: bool) -> bool {
        match self {
            Self::FixedFloor => FixedFloorController.load_drawn(was_on),
            Self::Hysteresis => HysteresisController.load_drawn(was_on),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed_floor" => Ok(Self::FixedFloor),
            "hysteresis" => Ok(Self::Hysteresis),
            other => Err(format!(
                "must be one of {}, got \"{other}\"",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Per-tick simulation state.

use super::clock::SimTime;
use super::types::SimConfig;

/// The three booleans whose changes are reported as transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// The load is switched on.
    pub power_on: bool,
    /// The battery hit its capacity ceiling this tick.
    pub maxed: bool,
    /// Charge went up this tick.
    pub increasing: bool,
}

/// Snapshot of the simulation after one tick.
///
/// States are values: the engine never mutates one in place but derives
/// the next from the previous, keeping the prior tick's flags in
/// `previous` for edge detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimState {
    /// Simulated time of this tick.
    pub time: SimTime,
    /// Current state of charge (Wh).
    pub battery_wh: f64,
    pub flags: Flags,
    /// Flags of the tick before this one.
    pub previous: Flags,
    /// Energy change computed for this tick before any clamping (Wh).
    pub delta_wh: f64,
}

impl SimState {
    /// Battery full, load on, at noon of day 0.
    ///
    /// The battery starts at its ceiling, so the initial state counts as
    /// maxed and not increasing; the first tick's flags are compared
    /// against these.
    pub fn initial(config: &SimConfig) -> Self {
        let flags = Flags {
            power_on: true,
            maxed: true,
            increasing: false,
        };
        Self {
            time: SimTime::START,
            battery_wh: config.max_battery_wh,
            flags,
            previous: flags,
            delta_wh: 0.0,
        }
    }

    /// Returns `true` if any flag differs from the previous tick.
    pub fn changed(&self) -> bool {
        self.flags != self.previous
    }

    /// Returns `true` if the load switched on or off this tick.
    pub fn toggled(&self) -> bool {
        self.flags.power_on != self.previous.power_on
    }
}

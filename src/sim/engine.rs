//! Minute-stepped energy balance of panel, battery, and load.

use crate::devices::{Device, DeviceContext, Load, SolarPanel, StandbyDraw};

use super::clock::MINUTES_PER_HOUR;
use super::controller::PowerController;
use super::sink::Sink;
use super::state::{Flags, SimState};
use super::types::SimConfig;

/// Computes the state one simulated minute after `state`.
///
/// Pure: the same inputs always yield the same output, and nothing outside
/// the returned value changes. The controller says whether the load draws
/// this tick given the previous switch state, then decides the switch state
/// for this one.
///
/// # Arguments
///
/// * `state` - State after the previous tick
/// * `config` - Run configuration
/// * `controller` - Load-switching policy
pub fn transition<C: PowerController + ?Sized>(
    state: &SimState,
    config: &SimConfig,
    controller: &C,
) -> SimState {
    let time = state.time.advanced();
    let context = DeviceContext::with_power(
        time.hour,
        time.minute,
        controller.load_drawn(state.flags.power_on),
    );

    // 1. Net power into the battery
    let panel = SolarPanel::new(config.solar_w, config.std_dev);
    let load = Load::new(config.load_w);
    let standby = StandbyDraw::new(config.controller_w);
    let net_w = panel.power_w(&context) + load.power_w(&context) + standby.power_w(&context);

    // 2. Candidate charge for this minute
    let delta_wh = net_w / f64::from(MINUTES_PER_HOUR);
    let candidate_wh = state.battery_wh + delta_wh;

    // 3. Floor handling and switch decision
    let decision = controller.decide(candidate_wh, state.flags.power_on, config);

    // 4. Capacity ceiling
    let (battery_wh, maxed) = if decision.battery_wh > config.max_battery_wh {
        (config.max_battery_wh, true)
    } else {
        (decision.battery_wh, false)
    };

    SimState {
        time,
        battery_wh,
        flags: Flags {
            power_on: decision.power_on,
            maxed,
            increasing: battery_wh > state.battery_wh,
        },
        previous: state.flags,
        delta_wh,
    }
}

/// Simulation engine owning the configuration and the switching policy.
///
/// Generic over `C: PowerController` for static dispatch.
pub struct Engine<C: PowerController> {
    config: SimConfig,
    controller: C,
}

impl<C: PowerController> Engine<C> {
    /// Creates a new simulation engine.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated run configuration
    /// * `controller` - Load-switching policy
    pub fn new(config: SimConfig, controller: C) -> Self {
        Self { config, controller }
    }

    /// Executes one tick from `state` and returns the next state.
    pub fn step(&self, state: &SimState) -> SimState {
        transition(state, &self.config, &self.controller)
    }

    /// Runs the full horizon, feeding every tick to `sink`, and returns the final state.
    ///
    /// Always performs exactly `config.horizon.total_ticks()` ticks, then
    /// calls [`Sink::finish`] once.
    pub fn run(&self, mut sink: impl Sink) -> SimState {
        let total = self.config.horizon.total_ticks();
        let mut state = SimState::initial(&self.config);
        for elapsed in 1..=total {
            state = self.step(&state);
            sink.tick(elapsed, &state, &self.config);
        }
        sink.finish(total, &state, &self.config);
        state
    }

    /// Returns a reference to the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Returns a reference to the switching policy.
    pub fn controller(&self) -> &C {
        &self.controller
    }
}

//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use power_sim::sim::sink::Sink;
use power_sim::sim::state::SimState;
use power_sim::sim::types::SimConfig;

/// Reference scenario: 180 W panel, 768 Wh battery, thresholds at 25 % / 40 %,
/// 45 W load, std dev 2.3 h, no controller draw.
pub fn reference_config() -> SimConfig {
    SimConfig::new(180.0, 768.0, 192.0, 307.2, 45.0, 2.3)
}

/// Keeps every state the engine produced, including the previous-tick one
/// for the first tick.
pub struct Trace {
    pub states: Vec<SimState>,
}

impl Trace {
    pub fn starting_at(initial: SimState) -> Self {
        Self {
            states: vec![initial],
        }
    }

    /// Consecutive `(before, after)` pairs, one per tick.
    pub fn ticks(&self) -> impl Iterator<Item = (&SimState, &SimState)> {
        self.states.iter().zip(self.states.iter().skip(1))
    }
}

impl Sink for Trace {
    fn tick(&mut self, _elapsed_minutes: usize, state: &SimState, _config: &SimConfig) {
        self.states.push(*state);
    }
}

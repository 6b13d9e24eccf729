//! Observers the engine feeds every tick.
//!
//! The engine itself keeps no history; anything that wants one (the
//! transition log, a plotter-facing series, nothing at all) plugs in here.

use super::clock::SimTime;
use super::state::{Flags, SimState};
use super::types::SimConfig;

/// Receives each simulated tick in order.
pub trait Sink {
    /// Called once per tick with the state that tick produced.
    ///
    /// # Arguments
    ///
    /// * `elapsed_minutes` - Ticks since the start, starting at 1
    /// * `state` - State after the tick
    /// * `config` - Configuration of the run
    fn tick(&mut self, elapsed_minutes: usize, state: &SimState, config: &SimConfig);

    /// Called once after the final tick, with the final state.
    fn finish(&mut self, _elapsed_minutes: usize, _state: &SimState, _config: &SimConfig) {}
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn tick(&mut self, elapsed_minutes: usize, state: &SimState, config: &SimConfig) {
        (**self).tick(elapsed_minutes, state, config);
    }

    fn finish(&mut self, elapsed_minutes: usize, state: &SimState, config: &SimConfig) {
        (**self).finish(elapsed_minutes, state, config);
    }
}

/// Fans every call out to both sinks, left first.
impl<A: Sink, B: Sink> Sink for (A, B) {
    fn tick(&mut self, elapsed_minutes: usize, state: &SimState, config: &SimConfig) {
        self.0.tick(elapsed_minutes, state, config);
        self.1.tick(elapsed_minutes, state, config);
    }

    fn finish(&mut self, elapsed_minutes: usize, state: &SimState, config: &SimConfig) {
        self.0.finish(elapsed_minutes, state, config);
        self.1.finish(elapsed_minutes, state, config);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Sink for NullSink {
    fn tick(&mut self, _elapsed_minutes: usize, _state: &SimState, _config: &SimConfig) {}
}

/// One sample of the per-minute battery series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// Minutes since the start of the run.
    pub elapsed_minutes: usize,
    pub time: SimTime,
    /// State of charge (Wh).
    pub battery_wh: f64,
    pub flags: Flags,
}

/// Records the full per-minute battery series.
#[derive(Debug, Clone, Default)]
pub struct SeriesRecorder {
    points: Vec<SeriesPoint>,
}

impl SeriesRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocates room for `ticks` samples.
    pub fn with_capacity(ticks: usize) -> Self {
        Self {
            points: Vec::with_capacity(ticks),
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<SeriesPoint> {
        self.points
    }
}

impl Sink for SeriesRecorder {
    fn tick(&mut self, elapsed_minutes: usize, state: &SimState, _config: &SimConfig) {
        self.points.push(SeriesPoint {
            elapsed_minutes,
            time: state.time,
            battery_wh: state.battery_wh,
            flags: state.flags,
        });
    }
}

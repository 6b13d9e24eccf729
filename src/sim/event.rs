//! Edge-triggered transition log and load toggle feed.

use std::fmt;
use std::io::{self, Write};

use super::clock::{SimTime, day_label};
use super::sink::Sink;
use super::state::{Flags, SimState};
use super::types::SimConfig;

/// One human-readable line of the transition log.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Minutes since the start of the run.
    pub elapsed_minutes: usize,
    /// Weekday label of the simulated day.
    pub day: &'static str,
    pub time: SimTime,
    /// State of charge (Wh).
    pub battery_wh: f64,
    /// State of charge as a percentage of capacity.
    pub battery_pct: f64,
    pub flags: Flags,
}

impl EventRecord {
    /// Builds the record describing `state`.
    pub fn from_state(elapsed_minutes: usize, state: &SimState, config: &SimConfig) -> Self {
        Self {
            elapsed_minutes,
            day: day_label(config.first_day, state.time.day),
            time: state.time,
            battery_wh: state.battery_wh,
            battery_pct: config.percent_of_capacity(state.battery_wh),
            flags: state.flags,
        }
    }
}

/// `Wed 14:03 768.00 Wh 100% maxed decreasing`
impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.2} Wh {:.0}%",
            self.day, self.time, self.battery_wh, self.battery_pct
        )?;
        if self.flags.maxed {
            f.write_str(" maxed")?;
        }
        if !self.flags.power_on {
            f.write_str(" off")
        } else if self.flags.increasing {
            f.write_str(" increasing")
        } else {
            f.write_str(" decreasing")
        }
    }
}

/// A change of the load switch, fed to external visualizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    /// Minutes since the start of the run.
    pub elapsed_minutes: usize,
    /// Switch state after the change.
    pub power_on: bool,
}

/// Edge-triggered transition log.
///
/// Records a line whenever any of the three flags differs from the previous
/// tick, plus one final line for the last tick whether or not it changed
/// anything. Separately keeps every load toggle in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
    toggles: Vec<Toggle>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition records in emission order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Load toggles in time order.
    pub fn toggles(&self) -> &[Toggle] {
        &self.toggles
    }

    /// Number of times the load came back on after an outage.
    pub fn resumptions(&self) -> usize {
        self.toggles.iter().filter(|t| t.power_on).count()
    }

    /// Writes one formatted line per record.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if writing fails.
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        for record in &self.records {
            writeln!(writer, "{record}")?;
        }
        writer.flush()
    }
}

impl Sink for EventLog {
    fn tick(&mut self, elapsed_minutes: usize, state: &SimState, config: &SimConfig) {
        if state.changed() {
            self.records
                .push(EventRecord::from_state(elapsed_minutes, state, config));
        }
        if state.toggled() {
            self.toggles.push(Toggle {
                elapsed_minutes,
                power_on: state.flags.power_on,
            });
        }
    }

    fn finish(&mut self, elapsed_minutes: usize, state: &SimState, config: &SimConfig) {
        self.records
            .push(EventRecord::from_state(elapsed_minutes, state, config));
    }
}

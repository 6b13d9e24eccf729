//! Post-hoc endurance metrics computed from a recorded battery series.

use std::fmt;

use super::sink::SeriesPoint;
use super::types::SimConfig;

/// Aggregate figures derived from a complete run.
///
/// Computed post-hoc from the per-minute series so the summary always agrees
/// with the exported trace.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of simulated minutes.
    pub ticks: usize,
    /// Minutes the load spent switched off.
    pub minutes_off: usize,
    /// Share of minutes the load was on (0–100).
    pub uptime_pct: f64,
    /// Number of times the load switched off.
    pub outages: usize,
    /// Minutes from the start until the load first switched off, if it ever did.
    pub first_shutdown_minutes: Option<usize>,
    /// Lowest state of charge seen (Wh).
    pub min_battery_wh: f64,
    /// State of charge at the end of the run (Wh).
    pub final_battery_wh: f64,
    /// Final state of charge as a percentage of capacity.
    pub final_battery_pct: f64,
}

impl RunSummary {
    /// Computes the summary from a per-minute series.
    ///
    /// # Arguments
    ///
    /// * `points` - Series in tick order, as recorded by
    ///   [`SeriesRecorder`](super::sink::SeriesRecorder)
    /// * `config` - Run configuration; the battery starts full at its capacity
    pub fn from_series(points: &[SeriesPoint], config: &SimConfig) -> Self {
        let initial_battery_wh = config.max_battery_wh;
        let Some(last) = points.last() else {
            return Self {
                ticks: 0,
                minutes_off: 0,
                uptime_pct: 100.0,
                outages: 0,
                first_shutdown_minutes: None,
                min_battery_wh: initial_battery_wh,
                final_battery_wh: initial_battery_wh,
                final_battery_pct: config.percent_of_capacity(initial_battery_wh),
            };
        };

        let mut minutes_off = 0_usize;
        let mut outages = 0_usize;
        let mut first_shutdown = None;
        let mut min_battery = initial_battery_wh;
        // the run starts with the load on
        let mut was_on = true;

        for p in points {
            if !p.flags.power_on {
                minutes_off += 1;
                if was_on {
                    outages += 1;
                    first_shutdown.get_or_insert(p.elapsed_minutes);
                }
            }
            was_on = p.flags.power_on;
            min_battery = min_battery.min(p.battery_wh);
        }

        let ticks = points.len();
        Self {
            ticks,
            minutes_off,
            uptime_pct: 100.0 * (ticks - minutes_off) as f64 / ticks as f64,
            outages,
            first_shutdown_minutes: first_shutdown,
            min_battery_wh: min_battery,
            final_battery_wh: last.battery_wh,
            final_battery_pct: config.percent_of_capacity(last.battery_wh),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(
            f,
            "Simulated:          {} min ({:.1} h)",
            self.ticks,
            self.ticks as f64 / 60.0
        )?;
        writeln!(f, "Uptime:             {:.1}%", self.uptime_pct)?;
        writeln!(
            f,
            "Time off:           {} min across {} outage(s)",
            self.minutes_off, self.outages
        )?;
        match self.first_shutdown_minutes {
            Some(m) => writeln!(f, "First shutdown:     after {:.1} h", m as f64 / 60.0)?,
            None => writeln!(f, "First shutdown:     never")?,
        }
        writeln!(f, "Lowest charge:      {:.2} Wh", self.min_battery_wh)?;
        write!(
            f,
            "Final charge:       {:.2} Wh ({:.0}%)",
            self.final_battery_wh, self.final_battery_pct
        )
    }
}

//! CSV export of simulation traces for external plotting.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::clock::day_label;
use crate::sim::event::Toggle;
use crate::sim::sink::SeriesPoint;
use crate::sim::types::SimConfig;

/// Column header of the per-minute battery series.
const SERIES_HEADER: &str = "elapsed_min,day,time,battery_wh,battery_pct,power_on,maxed,increasing";

/// Column header of the toggle feed.
const TOGGLES_HEADER: &str = "elapsed_min,power_on";

/// Exports the per-minute battery series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_series_csv(points: &[SeriesPoint], config: &SimConfig, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_series_csv(points, config, io::BufWriter::new(file))
}

/// Writes the per-minute battery series as CSV to any writer.
///
/// One row per tick, deterministic for identical inputs.
///
/// # Arguments
///
/// * `points` - Series recorded by a [`SeriesRecorder`](crate::sim::sink::SeriesRecorder)
/// * `config` - Run configuration, for day labels and percentages
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_series_csv(
    points: &[SeriesPoint],
    config: &SimConfig,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(SERIES_HEADER.split(','))?;
    for p in points {
        wtr.write_record(&[
            p.elapsed_minutes.to_string(),
            day_label(config.first_day, p.time.day).to_string(),
            p.time.to_string(),
            format!("{:.4}", p.battery_wh),
            format!("{:.2}", config.percent_of_capacity(p.battery_wh)),
            p.flags.power_on.to_string(),
            p.flags.maxed.to_string(),
            p.flags.increasing.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the toggle feed to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_toggles_csv(toggles: &[Toggle], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_toggles_csv(toggles, io::BufWriter::new(file))
}

/// Writes the toggle feed as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_toggles_csv(toggles: &[Toggle], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(TOGGLES_HEADER.split(','))?;
    for t in toggles {
        wtr.write_record(&[t.elapsed_minutes.to_string(), t.power_on.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

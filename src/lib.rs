//! Minute-resolution solar + battery endurance simulator.

pub mod cli;
pub mod config;
pub mod devices;
pub mod io;
/// Simulation engine, switching policies, event log, and sinks.
pub mod sim;
pub mod telemetry;

/// Simulated time, horizon, and day labels.
pub mod clock;
pub mod controller;
pub mod engine;
pub mod event;
pub mod sink;
pub mod state;
pub mod summary;
pub mod types;

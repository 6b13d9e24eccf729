//! Devices connected to the battery: panel, load, and controller electronics.

/// Switchable LED load.
pub mod load;
/// Solar panel and insolation curve.
pub mod solar;
pub mod standby;
pub mod types;

// Re-export the main types for convenience
pub use load::Load;
pub use solar::{SolarPanel, insolation, sun_hours};
pub use standby::StandbyDraw;
pub use types::Device;
pub use types::DeviceContext;

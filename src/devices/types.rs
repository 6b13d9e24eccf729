//! Common types and traits for the devices wired to the battery.

/// Contextual information passed to devices during power calculations.
///
/// # Fields
/// * `hour` - Simulated hour of day (0–23)
/// * `minute` - Simulated minute of the hour (0–59)
/// * `power_on` - Whether the driven load is switched on for this tick
#[derive(Debug, Clone, Copy)]
pub struct DeviceContext {
    pub hour: u32,
    pub minute: u32,
    pub power_on: bool,
}

impl DeviceContext {
    /// Creates a new DeviceContext for the given time of day with the load switched on.
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour,
            minute,
            power_on: true,
        }
    }

    /// Creates a new DeviceContext with an explicit load switch state.
    pub fn with_power(hour: u32, minute: u32, power_on: bool) -> Self {
        Self {
            hour,
            minute,
            power_on,
        }
    }
}

/// Trait defining a device that feeds or drains the battery.
///
/// # Power Flow Convention (Battery)
/// - Positive power: charging the battery (generation)
/// - Negative power: discharging the battery (load)
pub trait Device {
    /// Returns the power in watts flowing into the battery at the given moment.
    ///
    /// # Arguments
    ///
    /// * `context` - Time of day and switch state for this tick
    fn power_w(&self, context: &DeviceContext) -> f64;

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;
}

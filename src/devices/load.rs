use crate::devices::types::{Device, DeviceContext};

/// Measured draw of the LED project at full brightness while reacting to music.
///
/// Two strips of twelve segments at 2.478 W each.
pub const FULL_BRIGHTNESS_W: f64 = 2.478 * 2.0 * 12.0;

/// Measured draw of the LED project when idle.
pub const IDLE_W: f64 = 1.614 * 2.0 * 12.0;

/// The switchable load driven from the battery.
///
/// Draws a constant `watts` while switched on and nothing while off.
///
/// # Examples
///
/// ```
/// use power_sim::devices::load::{Load, FULL_BRIGHTNESS_W, IDLE_W};
///
/// assert!((Load::from_brightness(100.0).watts - FULL_BRIGHTNESS_W).abs() < 1e-9);
/// assert_eq!(Load::from_brightness(0.0).watts, IDLE_W);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Load {
    /// Power draw in watts while switched on.
    pub watts: f64,
}

impl Load {
    /// Creates a load with an explicit wattage.
    pub fn new(watts: f64) -> Self {
        Self { watts }
    }

    /// Creates a load by mapping a brightness percentage linearly between
    /// [`IDLE_W`] (0 %) and [`FULL_BRIGHTNESS_W`] (100 %).
    ///
    /// Percentages above 100 extrapolate; the full-brightness figure comes
    /// from a single song and busier music lights more LEDs.
    pub fn from_brightness(percent: f64) -> Self {
        Self {
            watts: (FULL_BRIGHTNESS_W - IDLE_W) * percent / 100.0 + IDLE_W,
        }
    }

    /// Inverse of [`Load::from_brightness`]: the brightness this wattage corresponds to.
    pub fn brightness_percent(&self) -> f64 {
        (self.watts - IDLE_W) / (FULL_BRIGHTNESS_W - IDLE_W) * 100.0
    }

    /// Returns `true` if the draw is below what the hardware needs just to idle.
    pub fn below_idle(&self) -> bool {
        self.watts < IDLE_W
    }
}

impl Device for Load {
    /// Returns the draw in battery convention (negative) when switched on, zero otherwise.
    fn power_w(&self, context: &DeviceContext) -> f64 {
        if context.power_on { -self.watts } else { 0.0 }
    }

    fn device_type(&self) -> &'static str {
        "Load"
    }
}

//! Solar panel model driven by a normalized Gaussian insolation curve.

use crate::devices::types::{Device, DeviceContext};

/// Hour of day at which the insolation curve peaks.
pub const SOLAR_NOON_HOUR: f64 = 12.0;

/// Minimum insolation fraction before the panel starts producing.
///
/// Below this the panel voltage is too low for the charge controller to
/// harvest anything, so the output is modeled as zero.
pub const CUT_IN_FRACTION: f64 = 0.05;

/// Peak summer sun hours per day in southern Colorado.
pub const REGIONAL_MAX_SUN_HOURS: f64 = 5.72;

/// Returns the fraction (0.0 to 1.0) of peak solar power available at a time of day.
///
/// The curve is a Gaussian density centered on solar noon with spread
/// `std_dev` hours, normalized by its value at the mean so that noon yields
/// exactly 1.0. Fractions under [`CUT_IN_FRACTION`] are reported as 0.0.
///
/// # Examples
///
/// ```
/// use power_sim::devices::solar::insolation;
///
/// assert_eq!(insolation(12, 0, 2.3), 1.0);
/// assert_eq!(insolation(11, 0, 2.3), insolation(13, 0, 2.3));
/// assert_eq!(insolation(3, 0, 2.3), 0.0);
/// ```
pub fn insolation(hour: u32, minute: u32, std_dev: f64) -> f64 {
    let t = f64::from(hour) + f64::from(minute) / 60.0;
    let z = (t - SOLAR_NOON_HOUR) / std_dev;
    // pdf(t) / pdf(mean) reduces to the exponential term alone
    let scaled = (-0.5 * z * z).exp();

    if scaled < CUT_IN_FRACTION {
        0.0
    } else {
        scaled
    }
}

/// Simulated sun hours per day: the insolation fraction summed over the 24 whole hours.
pub fn sun_hours(std_dev: f64) -> f64 {
    (0..24).map(|hour| insolation(hour, 0, std_dev)).sum()
}

/// A solar panel whose output follows [`insolation`].
#[derive(Debug, Clone, Copy)]
pub struct SolarPanel {
    /// Peak output in watts at solar noon (already derated for latitude).
    pub peak_w: f64,

    /// Width of the insolation curve in hours.
    pub std_dev: f64,
}

impl SolarPanel {
    /// Creates a new solar panel.
    ///
    /// # Arguments
    ///
    /// * `peak_w` - Output at solar noon in watts
    /// * `std_dev` - Insolation curve width in hours (must be > 0)
    pub fn new(peak_w: f64, std_dev: f64) -> Self {
        Self { peak_w, std_dev }
    }

    /// Returns the insolation fraction for the given moment.
    pub fn fraction(&self, context: &DeviceContext) -> f64 {
        insolation(context.hour, context.minute, self.std_dev)
    }
}

impl Device for SolarPanel {
    /// Generation in watts; always non-negative and independent of the load switch.
    fn power_w(&self, context: &DeviceContext) -> f64 {
        self.fraction(context) * self.peak_w
    }

    fn device_type(&self) -> &'static str {
        "SolarPanel"
    }
}

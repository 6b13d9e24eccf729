use crate::devices::types::{Device, DeviceContext};

/// Constant draw of the power-switching electronics.
///
/// Unlike [`Load`](super::Load) this never switches off: the controller that
/// decides when to cut the load has to stay powered to turn it back on.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandbyDraw {
    /// Draw in watts (0.0 disables it).
    pub watts: f64,
}

impl StandbyDraw {
    pub fn new(watts: f64) -> Self {
        Self { watts }
    }
}

impl Device for StandbyDraw {
    fn power_w(&self, _context: &DeviceContext) -> f64 {
        -self.watts
    }

    fn device_type(&self) -> &'static str {
        "StandbyDraw"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_regardless_of_switch() {
        let standby = StandbyDraw::new(0.5);
        assert_eq!(standby.power_w(&DeviceContext::with_power(0, 0, true)), -0.5);
        assert_eq!(standby.power_w(&DeviceContext::with_power(0, 0, false)), -0.5);
    }

    #[test]
    fn default_is_free() {
        assert_eq!(StandbyDraw::default().power_w(&DeviceContext::new(3, 0)), 0.0);
    }
}

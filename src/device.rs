//! Battery and notification status supplied by the host.
//!
//! Both values are queried on every frame and never cached by the engine.

/// Highest battery percentage the face displays.
pub const BATTERY_MAX_PERCENT: u8 = 100;

/// Device status the face displays.
pub trait DeviceStatus {
    /// Battery charge in percent. Readings above 100 are clamped when drawn.
    fn battery_percent(&self) -> u8;

    /// Number of unread notifications.
    fn unread_count(&self) -> u32;
}

/// Clamp a raw battery reading to the displayable range.
#[inline]
pub fn clamp_battery(percent: u8) -> u8 {
    percent.min(BATTERY_MAX_PERCENT)
}

/// Device status the host sets directly (simulator keys, tests).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedDevice {
    battery: u8,
    unread: u32,
}

impl SimulatedDevice {
    pub const fn new(battery: u8, unread: u32) -> Self {
        Self { battery, unread }
    }

    /// Raise or lower the battery, saturating at 0 and 100.
    pub fn adjust_battery(&mut self, delta: i16) {
        let next = (i16::from(self.battery) + delta).clamp(0, i16::from(BATTERY_MAX_PERCENT));
        self.battery = u8::try_from(next).unwrap_or(BATTERY_MAX_PERCENT);
    }

    pub const fn set_unread(&mut self, count: u32) {
        self.unread = count;
    }

    pub const fn increment_unread(&mut self) {
        self.unread = self.unread.saturating_add(1);
    }

    pub const fn decrement_unread(&mut self) {
        self.unread = self.unread.saturating_sub(1);
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new(BATTERY_MAX_PERCENT, 0)
    }
}

impl DeviceStatus for SimulatedDevice {
    fn battery_percent(&self) -> u8 {
        self.battery
    }

    fn unread_count(&self) -> u32 {
        self.unread
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_battery() {
        assert_eq!(clamp_battery(0), 0);
        assert_eq!(clamp_battery(42), 42);
        assert_eq!(clamp_battery(100), 100);
        assert_eq!(clamp_battery(255), 100);
    }

    #[test]
    fn test_adjust_battery_saturates() {
        let mut device = SimulatedDevice::new(95, 0);
        device.adjust_battery(10);
        assert_eq!(device.battery_percent(), 100);

        let mut device = SimulatedDevice::new(3, 0);
        device.adjust_battery(-5);
        assert_eq!(device.battery_percent(), 0);
    }

    #[test]
    fn test_unread_never_underflows() {
        let mut device = SimulatedDevice::new(50, 1);
        device.decrement_unread();
        device.decrement_unread();
        assert_eq!(device.unread_count(), 0);
        device.increment_unread();
        assert_eq!(device.unread_count(), 1);
    }
}

//! Application-wide constants and the joystick configuration.
//!
//! All protocol constants, capacity limits and USB identity parameters
//! live here so they can be tuned in one place.

// HID layout

/// Highest number of axes a joystick can expose.
///
/// Axes 0-5 map to Generic Desktop X/Y/Z/Rx/Ry/Rz, axes 6-8 to the
/// Simulation Controls Slider/Dial/Wheel usages.
pub const MAX_AXES: usize = 9;

/// Highest number of buttons a joystick can expose.
pub const MAX_BUTTONS: usize = 128;

/// Report ID prefixed to every input report.
pub const REPORT_ID: u8 = 0x03;

/// Generic Desktop usage of the application collection (Joystick).
pub const JOYSTICK_USAGE: u8 = 0x04;

/// Initial logical range of every axis until configured otherwise.
pub const DEFAULT_AXIS_MIN: i32 = -1028;
pub const DEFAULT_AXIS_MAX: i32 = 1028;

/// Logical range the host sees for every axis.
pub const AXIS_LOGICAL_MIN: u16 = 0;
pub const AXIS_LOGICAL_MAX: u16 = u16::MAX;

/// Bytes needed for the largest button bitmap.
pub const MAX_BUTTON_BYTES: usize = MAX_BUTTONS.div_ceil(8);

/// Largest input report: report ID + button bitmap + 16-bit axes.
pub const MAX_REPORT_LEN: usize = 1 + MAX_BUTTON_BYTES + 2 * MAX_AXES;

/// Capacity of the generated report descriptor (largest config is 79 bytes).
pub const MAX_DESCRIPTOR_LEN: usize = 100;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "joystick-hid";
pub const USB_PRODUCT: &str = "USB HID Joystick";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms). 1 ms = 1000 Hz for lowest latency.
pub const USB_HID_POLL_MS: u8 = 1;

/// Interrupt IN endpoint packet size. Must hold `MAX_REPORT_LEN`.
pub const USB_HID_PACKET_SIZE: usize = 64;

/// Depth of the queue between report encoding and the USB endpoint.
pub const REPORT_QUEUE_DEPTH: usize = 8;

// Joystick configuration

/// Logical input range of a single axis.
///
/// `min > max` declares an inverted axis: the lowest input maps to the
/// top of the host range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Lower bound regardless of orientation.
    pub fn low(&self) -> i32 {
        self.min.min(self.max)
    }

    /// Upper bound regardless of orientation.
    pub fn high(&self) -> i32 {
        self.min.max(self.max)
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::new(DEFAULT_AXIS_MIN, DEFAULT_AXIS_MAX)
    }
}

/// Shape of a joystick, fixed for the lifetime of the device.
///
/// The report descriptor and the report layout are both derived from the
/// axis and button counts, so changing them means building a new device.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickConfig {
    axis_count: usize,
    button_count: usize,
    auto_send: bool,
    axis_ranges: [AxisRange; MAX_AXES],
}

impl JoystickConfig {
    /// Counts are clamped to `1..=MAX_AXES` and `1..=MAX_BUTTONS`.
    pub fn new(axis_count: usize, button_count: usize) -> Self {
        Self {
            axis_count: axis_count.clamp(1, MAX_AXES),
            button_count: button_count.clamp(1, MAX_BUTTONS),
            auto_send: true,
            axis_ranges: [AxisRange::default(); MAX_AXES],
        }
    }

    /// When enabled, every accepted setter call transmits one report.
    pub fn with_auto_send(mut self, auto_send: bool) -> Self {
        self.auto_send = auto_send;
        self
    }

    /// Set the logical range of one axis. Indices past `axis_count` are ignored.
    pub fn with_axis_range(mut self, index: usize, min: i32, max: i32) -> Self {
        if index < self.axis_count {
            if let Some(range) = self.axis_ranges.get_mut(index) {
                *range = AxisRange::new(min, max);
            }
        }
        self
    }

    pub fn axis_count(&self) -> usize {
        self.axis_count
    }

    pub fn button_count(&self) -> usize {
        self.button_count
    }

    pub fn auto_send(&self) -> bool {
        self.auto_send
    }

    /// Ranges of the configured axes, in axis-index order.
    pub fn axis_ranges(&self) -> &[AxisRange] {
        &self.axis_ranges[..self.axis_count]
    }

    /// Bytes occupied by the button bitmap, padding included.
    pub fn button_bytes(&self) -> usize {
        self.button_count.div_ceil(8)
    }

    /// Zero bits appended to the last button byte.
    pub fn button_padding_bits(&self) -> usize {
        self.button_bytes() * 8 - self.button_count
    }

    /// Total input report length in bytes, report ID included.
    pub fn report_len(&self) -> usize {
        1 + self.button_bytes() + 2 * self.axis_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_clamped() {
        let cfg = JoystickConfig::new(0, 0);
        assert_eq!(cfg.axis_count(), 1);
        assert_eq!(cfg.button_count(), 1);

        let cfg = JoystickConfig::new(40, 500);
        assert_eq!(cfg.axis_count(), MAX_AXES);
        assert_eq!(cfg.button_count(), MAX_BUTTONS);
    }

    #[test]
    fn derived_sizes() {
        let cfg = JoystickConfig::new(6, 8);
        assert_eq!(cfg.button_bytes(), 1);
        assert_eq!(cfg.button_padding_bits(), 0);
        assert_eq!(cfg.report_len(), 14);

        let cfg = JoystickConfig::new(2, 10);
        assert_eq!(cfg.button_bytes(), 2);
        assert_eq!(cfg.button_padding_bits(), 6);
        assert_eq!(cfg.report_len(), 7);

        let cfg = JoystickConfig::new(MAX_AXES, MAX_BUTTONS);
        assert_eq!(cfg.report_len(), MAX_REPORT_LEN);
    }

    #[test]
    fn axis_range_defaults_and_overrides() {
        let cfg = JoystickConfig::new(3, 4)
            .with_axis_range(1, 1024, 0)
            .with_axis_range(5, 0, 10); // beyond axis_count
        assert_eq!(cfg.axis_ranges().len(), 3);
        assert_eq!(cfg.axis_ranges()[0], AxisRange::new(-1028, 1028));
        assert!(cfg.axis_ranges()[1].is_inverted());
        assert_eq!(cfg.axis_ranges()[1].low(), 0);
        assert_eq!(cfg.axis_ranges()[1].high(), 1024);
    }

    #[test]
    fn auto_send_defaults_on() {
        assert!(JoystickConfig::new(1, 1).auto_send());
        assert!(!JoystickConfig::new(1, 1).with_auto_send(false).auto_send());
    }
}

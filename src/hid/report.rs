//! Joystick input report encoding.
//!
//! Layout (`1 + ceil(buttons / 8) + 2 * axes` bytes):
//! ```text
//! Byte 0:      Report ID (0x03)
//! Bytes 1..=B: Button bitmap, bit i = button i, LSB first
//! Then:        One u16 LE per axis in index order, scaled to 0..=65535
//! ```
//!
//! This layout must stay in lockstep with `descriptor::build_descriptor`.

use super::axes::AxisBank;
use super::buttons::ButtonBank;
use super::scaler;
use crate::config::{AXIS_LOGICAL_MAX, AXIS_LOGICAL_MIN, MAX_REPORT_LEN, REPORT_ID};
use heapless::Vec;

/// One encoded input report, report ID included.
pub type Report = Vec<u8, MAX_REPORT_LEN>;

/// Bytes `encode_into` will write for these banks.
pub fn report_len(buttons: &ButtonBank, axes: &AxisBank) -> usize {
    1 + buttons.as_bytes().len() + scaler::SCALED_VALUE_SIZE * axes.len()
}

/// Serialise the current state into `buf`.
///
/// Returns the number of bytes written, or 0 if `buf` is too small.
pub fn encode_into(buttons: &ButtonBank, axes: &AxisBank, buf: &mut [u8]) -> usize {
    let len = report_len(buttons, axes);
    if buf.len() < len {
        return 0;
    }

    let bitmap = buttons.as_bytes();
    buf[0] = REPORT_ID;
    buf[1..1 + bitmap.len()].copy_from_slice(bitmap);

    let mut index = 1 + bitmap.len();
    for axis in axes.iter() {
        index += scaler::write_scaled(
            axis.value,
            axis.range,
            AXIS_LOGICAL_MIN,
            AXIS_LOGICAL_MAX,
            buf,
            index,
        );
    }
    index
}

/// Encode the current state into a fresh report.
pub fn encode(buttons: &ButtonBank, axes: &AxisBank) -> Report {
    let mut buf = [0u8; MAX_REPORT_LEN];
    let len = encode_into(buttons, axes, &mut buf);
    buf.iter().take(len).copied().collect()
}

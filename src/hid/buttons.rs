//! Packed button state.
//!
//! Layout:
//! ```text
//! Byte n: buttons 8n .. 8n+7, LSB = lowest index
//!         unused high bits of the last byte stay 0 (padding)
//! ```

use crate::config::MAX_BUTTON_BYTES;
use heapless::Vec;

/// Bitmap of `count` binary buttons, all released at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonBank {
    count: usize,
    bits: Vec<u8, MAX_BUTTON_BYTES>,
}

impl ButtonBank {
    /// `count` is expected to be clamped already (see `JoystickConfig`).
    pub fn new(count: usize) -> Self {
        let count = count.min(MAX_BUTTON_BYTES * 8);
        let bits = core::iter::repeat(0u8).take(count.div_ceil(8)).collect();
        Self { count, bits }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Button bitmap exactly as it appears in the report.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Press one button. Returns `false` (and changes nothing) if out of range.
    pub fn press(&mut self, index: usize) -> bool {
        match self.locate(index) {
            Some((byte, mask)) => {
                *byte |= mask;
                true
            }
            None => false,
        }
    }

    /// Release one button. Returns `false` (and changes nothing) if out of range.
    pub fn release(&mut self, index: usize) -> bool {
        match self.locate(index) {
            Some((byte, mask)) => {
                *byte &= !mask;
                true
            }
            None => false,
        }
    }

    /// Any non-zero `value` presses; zero releases.
    pub fn set(&mut self, index: usize, value: u8) -> bool {
        if value == 0 {
            self.release(index)
        } else {
            self.press(index)
        }
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.bits
            .get(index / 8)
            .is_some_and(|byte| byte & (1 << (index % 8)) != 0)
    }

    fn locate(&mut self, index: usize) -> Option<(&mut u8, u8)> {
        if index >= self.count {
            return None;
        }
        let mask = 1u8 << (index % 8);
        self.bits.get_mut(index / 8).map(|byte| (byte, mask))
    }
}

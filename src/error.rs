//! Unified error type for joystick-hid.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the crate.
///
/// Out-of-range indices and values are never errors: indices are ignored
/// and values are clamped. Only transmission and buffer sizing can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Transport
    /// The USB stack failed to accept the report.
    Usb,

    /// The outgoing report queue is full; the report was dropped.
    QueueFull,

    /// A report transmission is already in flight on this joystick.
    Busy,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

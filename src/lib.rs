//! USB HID joystick: report descriptor generation and input report encoding.
//!
//! Everything except the `usb` module is pure logic that builds and runs
//! on the host, so it can be tested without hardware:
//!
//! Usage: `cargo test`
//!
//! The embedded binary (`src/main.rs`, feature `embedded`) wires a
//! [`Joystick`] to the nRF52840 USB peripheral through `embassy-usb`.
//!
//! ```ignore
//! let config = JoystickConfig::new(6, 8);
//! let mut joystick = Joystick::<NoopRawMutex, _>::new(config, sink);
//! let descriptor = joystick.descriptor(); // hand to the USB stack once
//! joystick.press_button(0)?;              // sends [0x03, 0x01, ...]
//! joystick.set_axis(0, 512)?;
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod hid;
pub mod joystick;
pub mod transport;

#[cfg(feature = "embedded")]
pub mod usb;

pub use config::{AxisRange, JoystickConfig};
pub use error::Error;
pub use joystick::Joystick;
pub use transport::ReportSink;

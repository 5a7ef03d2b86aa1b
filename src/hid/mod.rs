//! HID joystick report types and descriptor generation.
//!
//! ```text
//! AxisBank ──┐
//!            ├─▶ report::encode ──▶ [id][buttons][axes...]
//! ButtonBank ┘
//! JoystickConfig ─▶ descriptor::build_descriptor ──▶ report descriptor
//! ```

pub mod axes;
pub mod buttons;
pub mod descriptor;
pub mod report;
pub mod report_protocol;
pub mod scaler;

#[cfg(test)]
mod tests;

pub use axes::{AxisBank, AxisState};
pub use buttons::ButtonBank;
pub use descriptor::{build_descriptor, write_descriptor, Item, ReportDescriptor};
pub use report::Report;
pub use report_protocol::ReportLayout;

//! Report transport seam.
//!
//! The joystick hands each finished report to a `ReportSink`. On target
//! this is a queue drained by the USB HID writer task; in tests it records
//! the reports.

use crate::error::Error;

/// Synchronous consumer of encoded input reports.
///
/// `send` either accepts the whole report or fails; a failed report is
/// considered lost, never partially applied.
pub trait ReportSink {
    fn send(&mut self, report: &[u8]) -> Result<(), Error>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn send(&mut self, report: &[u8]) -> Result<(), Error> {
        (**self).send(report)
    }
}

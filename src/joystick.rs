//! Joystick device state and report transmission.
//!
//! Owns the axis and button banks for one configured joystick and sends
//! the encoded report through a `ReportSink`. Transmission runs inside a
//! closure-scoped lock, so only one report is in flight per joystick and
//! the lock is released on every path, failures included.
//!
//! With auto-send on (the default) every accepted setter call transmits
//! one report reflecting the state at that moment. To update several
//! fields atomically, turn auto-send off and call `send_state` once after
//! the batch.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::config::{AxisRange, JoystickConfig};
use crate::error::Error;
use crate::hid::descriptor::{build_descriptor, ReportDescriptor};
use crate::hid::report::{self, Report};
use crate::hid::{AxisBank, ButtonBank};
use crate::transport::ReportSink;

pub struct Joystick<M: RawMutex, S: ReportSink> {
    config: JoystickConfig,
    axes: AxisBank,
    buttons: ButtonBank,
    sink: Mutex<M, RefCell<S>>,
}

impl<M: RawMutex, S: ReportSink> Joystick<M, S> {
    /// Build a joystick. Nothing is transmitted until the first setter
    /// (auto-send) or `send_state` call.
    ///
    /// Call `send_state` once the transport is up so the host sees the
    /// initial centred state before any input changes.
    pub fn new(config: JoystickConfig, sink: S) -> Self {
        let axes = AxisBank::new(config.axis_ranges());
        let buttons = ButtonBank::new(config.button_count());
        Self {
            config,
            axes,
            buttons,
            sink: Mutex::new(RefCell::new(sink)),
        }
    }

    pub fn config(&self) -> &JoystickConfig {
        &self.config
    }

    /// Report descriptor matching `report()`, for the USB stack.
    pub fn descriptor(&self) -> ReportDescriptor {
        build_descriptor(&self.config)
    }

    /// Store a raw axis value. Out-of-range indices are ignored and do not
    /// transmit; values are clamped at encode time.
    pub fn set_axis(&mut self, index: usize, value: i32) -> Result<(), Error> {
        let accepted = self.axes.set(index, value);
        if !accepted {
            debug!("set_axis: index {} out of range", index);
        }
        self.auto_send(accepted)
    }

    pub fn axis_value(&self, index: usize) -> Option<i32> {
        self.axes.value(index)
    }

    pub fn axis_range(&self, index: usize) -> Option<AxisRange> {
        self.axes.range(index)
    }

    /// Any non-zero `value` presses the button, zero releases it.
    pub fn set_button(&mut self, index: usize, value: u8) -> Result<(), Error> {
        if value == 0 {
            self.release_button(index)
        } else {
            self.press_button(index)
        }
    }

    pub fn press_button(&mut self, index: usize) -> Result<(), Error> {
        let accepted = self.buttons.press(index);
        if !accepted {
            debug!("press_button: index {} out of range", index);
        }
        self.auto_send(accepted)
    }

    pub fn release_button(&mut self, index: usize) -> Result<(), Error> {
        let accepted = self.buttons.release(index);
        if !accepted {
            debug!("release_button: index {} out of range", index);
        }
        self.auto_send(accepted)
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.buttons.is_pressed(index)
    }

    /// Encode the current state without sending it.
    pub fn report(&self) -> Report {
        report::encode(&self.buttons, &self.axes)
    }

    /// Encode the current state and make exactly one transmission attempt.
    ///
    /// Failures are returned, not retried; the banks keep the new state
    /// either way.
    pub fn send_state(&self) -> Result<(), Error> {
        self.sink.lock(|cell| {
            let report = self.report();
            let mut sink = cell.try_borrow_mut().map_err(|_| Error::Busy)?;
            sink.send(&report).inspect_err(|e| {
                warn!("report transmission failed: {}", e);
            })
        })
    }

    /// Give back the sink, consuming the joystick.
    pub fn into_sink(self) -> S {
        self.sink.into_inner().into_inner()
    }

    fn auto_send(&self, accepted: bool) -> Result<(), Error> {
        if accepted && self.config.auto_send() {
            self.send_state()
        } else {
            Ok(())
        }
    }
}

//! USB Device subsystem - presents the joystick to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. The device exposes a single HID interface whose report
//! descriptor is generated from the `JoystickConfig`.
//!
//! Reports flow from the `Joystick` into a bounded channel through
//! `ChannelSink`; the HID writer task drains the channel into the
//! interrupt IN endpoint.

pub mod hid_device;

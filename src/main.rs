//! USB HID joystick firmware for the nRF52840.
//!
//! Presents a 6-axis, 8-button joystick to the host and runs a demo
//! pattern: buttons 0, 3 and 4 held, axis 0 sweeping up while axis 1
//! sweeps down.

#![no_std]
#![no_main]

use defmt::{debug, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::config::{Config as NrfConfig, HfclkSource};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
use embassy_sync::channel::{Channel, Receiver};
use embassy_time::Timer;
use embassy_usb::UsbDevice;
use joystick_hid::config::REPORT_QUEUE_DEPTH;
use joystick_hid::hid::Report;
use joystick_hid::usb::hid_device::{self, ChannelSink, JoystickWriter, ReportChannel, UsbDriver};
use joystick_hid::{Error, Joystick, JoystickConfig};
use {defmt_rtt as _, panic_probe as _};

/// Demo layout.
const AXES: usize = 6;
const BUTTONS: usize = 8;
const HELD_BUTTONS: [usize; 3] = [0, 3, 4];
const SWEEP_END: i32 = 1028;

static REPORTS: ReportChannel = Channel::new();

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn writer_task(
    writer: JoystickWriter,
    report_rx: Receiver<'static, CriticalSectionRawMutex, Report, REPORT_QUEUE_DEPTH>,
) -> ! {
    hid_device::hid_writer_task(writer, report_rx).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // USB needs the external crystal.
    let mut nrf_config = NrfConfig::default();
    nrf_config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(nrf_config);

    info!("joystick-hid starting");

    // Batch mode: each demo step updates several fields, then sends once.
    let config = JoystickConfig::new(AXES, BUTTONS).with_auto_send(false);

    let usb = hid_device::init(p.USBD, &config);
    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(writer_task(usb.writer, REPORTS.receiver())));

    let mut joystick: Joystick<NoopRawMutex, _> = Joystick::new(config, ChannelSink::new(&REPORTS));
    log_send(joystick.send_state());

    for button in HELD_BUTTONS {
        log_send(joystick.press_button(button));
    }

    loop {
        for step in 0..SWEEP_END {
            log_send(joystick.set_axis(0, step));
            log_send(joystick.set_axis(1, -step));
            log_send(joystick.send_state());
            Timer::after_millis(1).await;
        }
        Timer::after_millis(100).await;
    }
}

fn log_send(result: Result<(), Error>) {
    match result {
        Ok(()) => {}
        // Expected while the host is not polling the endpoint.
        Err(Error::QueueFull) => debug!("report queue full, report dropped"),
        Err(e) => warn!("report send failed: {}", e),
    }
}

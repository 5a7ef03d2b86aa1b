//! USB HID joystick device.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one HID IN endpoint carrying joystick reports.

use crate::config::{self, JoystickConfig, REPORT_QUEUE_DEPTH, USB_HID_PACKET_SIZE};
use crate::error::Error;
use crate::hid::descriptor::{build_descriptor, ReportDescriptor};
use crate::hid::report::Report;
use crate::transport::ReportSink;
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

/// USB driver for the nRF52840 with hardware VBUS detection.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Writer for the joystick's interrupt IN endpoint.
pub type JoystickWriter = HidWriter<'static, UsbDriver, USB_HID_PACKET_SIZE>;

/// Queue between report encoding and the USB endpoint.
pub type ReportChannel = Channel<CriticalSectionRawMutex, Report, REPORT_QUEUE_DEPTH>;

static HID_STATE: StaticCell<State> = StaticCell::new();
static REPORT_DESCRIPTOR: StaticCell<ReportDescriptor> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Hands reports to the USB writer task without blocking.
///
/// A full queue drops the report and returns `Error::QueueFull`.
pub struct ChannelSink {
    tx: Sender<'static, CriticalSectionRawMutex, Report, REPORT_QUEUE_DEPTH>,
}

impl ChannelSink {
    pub fn new(channel: &'static ReportChannel) -> Self {
        Self {
            tx: channel.sender(),
        }
    }
}

impl ReportSink for ChannelSink {
    fn send(&mut self, report: &[u8]) -> Result<(), Error> {
        let report = Report::from_slice(report).map_err(|_| Error::BufferOverflow)?;
        self.tx.try_send(report).map_err(|_| Error::QueueFull)
    }
}

/// Build result containing the USB device runner and the HID writer.
pub struct UsbJoystickDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub writer: JoystickWriter,
}

/// Initialise the USB stack and register the joystick HID interface.
///
/// The report descriptor is generated once from `joystick` and kept for
/// the lifetime of the device. Must be called exactly once.
pub fn init(usbd: peripherals::USBD, joystick: &JoystickConfig) -> UsbJoystickDevice {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let report_descriptor: &'static ReportDescriptor =
        REPORT_DESCRIPTOR.init(build_descriptor(joystick));
    let state = HID_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor: report_descriptor.as_slice(),
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: USB_HID_PACKET_SIZE as u16,
    };
    let writer = HidWriter::new(&mut builder, state, hid_config);

    let device = builder.build();

    info!(
        "USB HID joystick initialised ({} axes, {} buttons, {} byte descriptor)",
        joystick.axis_count(),
        joystick.button_count(),
        report_descriptor.len()
    );

    UsbJoystickDevice { device, writer }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// HID report forwarding task - reads from the report channel and writes
/// each report to the joystick endpoint, in order.
pub async fn hid_writer_task(
    mut writer: JoystickWriter,
    report_rx: Receiver<'static, CriticalSectionRawMutex, Report, REPORT_QUEUE_DEPTH>,
) -> ! {
    info!("HID writer task started - waiting for reports");

    loop {
        let report = report_rx.receive().await;
        if let Err(_e) = writer.write(&report).await {
            warn!("USB joystick write failed");
        }
    }
}

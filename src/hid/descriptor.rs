//! HID report descriptor generation.
//!
//! The descriptor is assembled from typed short items rather than patched
//! into a byte template, so adding or removing a field cannot shift a
//! hard-coded offset. It is a pure function of the axis and button counts
//! and describes exactly the layout produced by `report::encode`.
//!
//! ## Short item encoding
//!
//! ```text
//! prefix = tag << 4 | type << 2 | size_code
//!   type:      0 = Main, 1 = Global, 2 = Local
//!   size_code: 0, 1, 2, 3 (= 4 bytes)
//! data   = little-endian, `size` bytes
//! ```

use crate::config::{
    JoystickConfig, AXIS_LOGICAL_MAX, AXIS_LOGICAL_MIN, JOYSTICK_USAGE, MAX_DESCRIPTOR_LEN,
    REPORT_ID,
};
use crate::error::Error;
use heapless::Vec;

/// Owned report descriptor bytes.
pub type ReportDescriptor = Vec<u8, MAX_DESCRIPTOR_LEN>;

/// Usage pages used by the joystick.
pub mod usage_page {
    pub const GENERIC_DESKTOP: u16 = 0x01;
    pub const SIMULATION: u16 = 0x02;
    pub const BUTTON: u16 = 0x09;
}

/// Generic Desktop axis usages, in report order.
pub static DESKTOP_AXIS_USAGES: [u16; 6] = [
    0x30, // X
    0x31, // Y
    0x32, // Z
    0x33, // Rx
    0x34, // Ry
    0x35, // Rz
];

/// Simulation Controls axis usages for axes past the sixth.
pub static SIMULATION_AXIS_USAGES: [u16; 3] = [
    0x36, // Slider
    0x37, // Dial
    0x38, // Wheel
];

/// Input/Output/Feature main item flags (bit 0: Constant, bit 1: Variable,
/// bit 2: Relative).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MainFlags(pub u8);

impl MainFlags {
    pub const DATA_VAR_ABS: Self = Self(0x02);
    pub const CONST_VAR_ABS: Self = Self(0x03);

    pub fn is_constant(self) -> bool {
        self.0 & 0x01 != 0
    }
}

/// Collection kinds.
pub const COLLECTION_APPLICATION: u8 = 0x01;

/// One short item of a report descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Item {
    // Main
    Input(MainFlags),
    Collection(u8),
    EndCollection,
    // Global
    UsagePage(u16),
    LogicalMinimum(i32),
    LogicalMaximum(i32),
    ReportSize(u32),
    ReportId(u8),
    ReportCount(u32),
    // Local
    Usage(u16),
    UsageMinimum(u16),
    UsageMaximum(u16),
}

const TYPE_MAIN: u8 = 0;
const TYPE_GLOBAL: u8 = 1;
const TYPE_LOCAL: u8 = 2;

enum Data {
    None,
    Unsigned(u32),
    Signed(i32),
}

impl Item {
    fn parts(self) -> (u8, u8, Data) {
        match self {
            Item::Input(flags) => (TYPE_MAIN, 0x8, Data::Unsigned(u32::from(flags.0))),
            Item::Collection(kind) => (TYPE_MAIN, 0xA, Data::Unsigned(u32::from(kind))),
            Item::EndCollection => (TYPE_MAIN, 0xC, Data::None),
            Item::UsagePage(page) => (TYPE_GLOBAL, 0x0, Data::Unsigned(u32::from(page))),
            Item::LogicalMinimum(v) => (TYPE_GLOBAL, 0x1, Data::Signed(v)),
            Item::LogicalMaximum(v) => (TYPE_GLOBAL, 0x2, Data::Signed(v)),
            Item::ReportSize(bits) => (TYPE_GLOBAL, 0x7, Data::Unsigned(bits)),
            Item::ReportId(id) => (TYPE_GLOBAL, 0x8, Data::Unsigned(u32::from(id))),
            Item::ReportCount(n) => (TYPE_GLOBAL, 0x9, Data::Unsigned(n)),
            Item::Usage(u) => (TYPE_LOCAL, 0x0, Data::Unsigned(u32::from(u))),
            Item::UsageMinimum(u) => (TYPE_LOCAL, 0x1, Data::Unsigned(u32::from(u))),
            Item::UsageMaximum(u) => (TYPE_LOCAL, 0x2, Data::Unsigned(u32::from(u))),
        }
    }

    /// Encode into `out`, using the shortest data field that preserves the
    /// value (signed items keep their sign bit). Returns bytes written or 0
    /// if `out` is too small.
    pub fn encode(self, out: &mut [u8]) -> usize {
        let (item_type, tag, data) = self.parts();
        let (size, raw) = match data {
            Data::None => (0, 0u32),
            Data::Unsigned(v) if v <= 0xFF => (1, v),
            Data::Unsigned(v) if v <= 0xFFFF => (2, v),
            Data::Unsigned(v) => (4, v),
            Data::Signed(v) if i8::try_from(v).is_ok() => (1, v as u32),
            Data::Signed(v) if i16::try_from(v).is_ok() => (2, v as u32),
            Data::Signed(v) => (4, v as u32),
        };
        let size_code = if size == 4 { 3 } else { size as u8 };

        let Some(slot) = out.get_mut(..1 + size) else {
            return 0;
        };
        slot[0] = tag << 4 | item_type << 2 | size_code;
        slot[1..].copy_from_slice(&raw.to_le_bytes()[..size]);
        1 + size
    }
}

/// Appends items to a caller-supplied buffer.
pub struct DescriptorWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
    overflowed: bool,
}

impl<'a> DescriptorWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            len: 0,
            overflowed: false,
        }
    }

    pub fn item(&mut self, item: Item) -> &mut Self {
        if !self.overflowed {
            let rest = self.buf.get_mut(self.len..).unwrap_or_default();
            match item.encode(rest) {
                0 => self.overflowed = true,
                n => self.len += n,
            }
        }
        self
    }

    pub fn items(&mut self, items: impl IntoIterator<Item = Item>) -> &mut Self {
        for item in items {
            self.item(item);
        }
        self
    }

    /// Bytes written, or `BufferOverflow` if any item did not fit.
    pub fn finish(&self) -> Result<usize, Error> {
        if self.overflowed {
            Err(Error::BufferOverflow)
        } else {
            Ok(self.len)
        }
    }
}

/// Items describing `config`, in emission order.
///
/// 1. Generic Desktop / Joystick application collection with the report ID.
/// 2. Button bitmap plus constant padding up to the next byte boundary.
/// 3. Up to six Generic Desktop axes (X, Y, Z, Rx, Ry, Rz).
/// 4. Up to three Simulation Controls axes (Slider, Dial, Wheel).
pub fn descriptor_items(config: &JoystickConfig) -> impl Iterator<Item = Item> {
    let buttons = config.button_count();
    let padding = config.button_padding_bits();
    let desktop_axes = config.axis_count().min(DESKTOP_AXIS_USAGES.len());
    let simulation_axes = config
        .axis_count()
        .saturating_sub(DESKTOP_AXIS_USAGES.len())
        .min(SIMULATION_AXIS_USAGES.len());

    let header = [
        Item::UsagePage(usage_page::GENERIC_DESKTOP),
        Item::Usage(u16::from(JOYSTICK_USAGE)),
        Item::Collection(COLLECTION_APPLICATION),
        Item::ReportId(REPORT_ID),
    ];

    let button_block = (buttons > 0)
        .then(|| {
            [
                Item::UsagePage(usage_page::BUTTON),
                Item::UsageMinimum(1),
                Item::UsageMaximum(buttons as u16),
                Item::LogicalMinimum(0),
                Item::LogicalMaximum(1),
                Item::ReportCount(buttons as u32),
                Item::ReportSize(1),
                Item::Input(MainFlags::DATA_VAR_ABS),
            ]
        })
        .into_iter()
        .flatten();

    let padding_block = (buttons > 0 && padding > 0)
        .then(|| {
            [
                Item::ReportSize(1),
                Item::ReportCount(padding as u32),
                Item::Input(MainFlags::CONST_VAR_ABS),
            ]
        })
        .into_iter()
        .flatten();

    header
        .into_iter()
        .chain(button_block)
        .chain(padding_block)
        .chain(axis_block(
            usage_page::GENERIC_DESKTOP,
            &DESKTOP_AXIS_USAGES[..desktop_axes],
        ))
        .chain(axis_block(
            usage_page::SIMULATION,
            &SIMULATION_AXIS_USAGES[..simulation_axes],
        ))
        .chain(core::iter::once(Item::EndCollection))
}

/// One 16-bit axis group on `page`; empty when `usages` is empty.
fn axis_block(page: u16, usages: &'static [u16]) -> impl Iterator<Item = Item> {
    let count = usages.len();
    let head = (count > 0).then_some(Item::UsagePage(page));
    let tail = (count > 0)
        .then(|| {
            [
                Item::LogicalMinimum(i32::from(AXIS_LOGICAL_MIN)),
                Item::LogicalMaximum(i32::from(AXIS_LOGICAL_MAX)),
                Item::ReportSize(16),
                Item::ReportCount(count as u32),
                Item::Input(MainFlags::DATA_VAR_ABS),
            ]
        })
        .into_iter()
        .flatten();

    head.into_iter()
        .chain(usages.iter().map(|&usage| Item::Usage(usage)))
        .chain(tail)
}

/// Write the descriptor for `config` into a caller-supplied buffer.
pub fn write_descriptor(config: &JoystickConfig, buf: &mut [u8]) -> Result<usize, Error> {
    let mut writer = DescriptorWriter::new(buf);
    writer.items(descriptor_items(config));
    writer.finish()
}

/// Build the descriptor for `config` as an owned value.
pub fn build_descriptor(config: &JoystickConfig) -> ReportDescriptor {
    let mut buf = [0u8; MAX_DESCRIPTOR_LEN];
    // Every config fits: the largest one needs 79 bytes.
    let len = write_descriptor(config, &mut buf).unwrap_or(0);
    debug!(
        "report descriptor: {} axes, {} buttons, {} bytes",
        config.axis_count(),
        config.button_count(),
        len
    );
    buf.iter().take(len).copied().collect()
}

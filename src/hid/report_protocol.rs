//! HID Report Descriptor parser.
//!
//! Walks a report descriptor and recovers the Input report layout it
//! declares: field order, bit widths, usages and logical ranges. The
//! joystick uses it to check that a generated descriptor agrees with the
//! bytes `report::encode` produces; it is equally usable on descriptors
//! read back from a device.
//!
//! ## Limitations
//!
//! This implementation handles common cases but not the full HID spec:
//! - Nested collections are flattened
//! - Push/Pop state is not supported
//! - Long items and Delimiter tags are skipped
//! - Only the first Report ID seen is tracked

use super::descriptor::MainFlags;
use heapless::Vec;

/// Maximum number of Input fields tracked per descriptor.
pub const MAX_FIELDS: usize = 16;

/// Maximum number of explicit Usage items tracked per field.
pub const MAX_USAGES: usize = 16;

/// Usage page codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsagePage {
    /// Generic Desktop (joystick axes).
    GenericDesktop,
    /// Simulation Controls (extra axes).
    Simulation,
    /// Button.
    Button,
    /// Unknown/unsupported.
    Unknown(u16),
}

impl From<u16> for UsagePage {
    fn from(code: u16) -> Self {
        match code {
            0x01 => UsagePage::GenericDesktop,
            0x02 => UsagePage::Simulation,
            0x09 => UsagePage::Button,
            other => UsagePage::Unknown(other),
        }
    }
}

/// Axis usage codes from the Generic Desktop and Simulation pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisUsage {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Slider,
    Dial,
    Wheel,
    Unknown(u16),
}

impl From<u16> for AxisUsage {
    fn from(code: u16) -> Self {
        match code {
            0x30 => AxisUsage::X,
            0x31 => AxisUsage::Y,
            0x32 => AxisUsage::Z,
            0x33 => AxisUsage::Rx,
            0x34 => AxisUsage::Ry,
            0x35 => AxisUsage::Rz,
            0x36 => AxisUsage::Slider,
            0x37 => AxisUsage::Dial,
            0x38 => AxisUsage::Wheel,
            other => AxisUsage::Unknown(other),
        }
    }
}

/// One Input main item together with the state it was declared under.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputField {
    pub usage_page: UsagePage,
    /// Explicit Usage items, in declaration order.
    pub usages: Vec<u16, MAX_USAGES>,
    /// Usage Minimum/Maximum, when declared.
    pub usage_range: Option<(u16, u16)>,
    pub logical_min: i32,
    pub logical_max: i32,
    /// Bits per element.
    pub report_size: u32,
    /// Number of elements.
    pub report_count: u32,
    /// Constant (padding) field.
    pub constant: bool,
}

impl InputField {
    pub fn bits(&self) -> u32 {
        self.report_size.saturating_mul(self.report_count)
    }
}

/// Input report layout declared by a descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportLayout {
    /// Top-level application collection usage (page, usage).
    pub application: Option<(UsagePage, u16)>,
    /// Report ID, when the descriptor declares one.
    pub report_id: Option<u8>,
    pub fields: Vec<InputField, MAX_FIELDS>,
}

impl ReportLayout {
    /// Sum of the bit widths of every Input field, padding included.
    pub fn input_bits(&self) -> u32 {
        self.fields
            .iter()
            .map(InputField::bits)
            .fold(0, u32::saturating_add)
    }

    /// Input payload length in whole bytes (report ID excluded).
    pub fn payload_len(&self) -> usize {
        (self.input_bits() as usize).div_ceil(8)
    }

    /// Full report length on the wire, report ID included.
    pub fn report_len(&self) -> usize {
        self.payload_len() + usize::from(self.report_id.is_some())
    }

    /// Data (non-constant) fields only.
    pub fn data_fields(&self) -> impl Iterator<Item = &InputField> {
        self.fields.iter().filter(|f| !f.constant)
    }

    /// Axis usages of every 16-bit data field, in report order.
    pub fn axis_usages(&self) -> impl Iterator<Item = AxisUsage> + '_ {
        self.data_fields()
            .filter(|f| f.report_size == 16)
            .flat_map(|f| f.usages.iter().map(|&u| AxisUsage::from(u)))
    }

    /// Parse a HID Report Descriptor.
    ///
    /// Returns `None` if the descriptor declares no Input field or more
    /// fields than `MAX_FIELDS`.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut layout = ReportLayout {
            application: None,
            report_id: None,
            fields: Vec::new(),
        };

        // Global state.
        let mut usage_page: u16 = 0;
        let mut logical_min: i32 = 0;
        let mut logical_max: i32 = 0;
        let mut report_size: u32 = 0;
        let mut report_count: u32 = 0;

        // Local state, cleared after every main item.
        let mut usages: Vec<u16, MAX_USAGES> = Vec::new();
        let mut usage_min: Option<u16> = None;
        let mut usage_max: Option<u16> = None;

        let mut i = 0;
        while i < data.len() {
            let prefix = data[i];

            // Long item: 0xFE, size, long tag, data.
            if prefix == 0xFE {
                let Some(&len) = data.get(i + 1) else {
                    break;
                };
                i += 3 + usize::from(len);
                continue;
            }

            let tag = (prefix >> 4) & 0x0F;
            let item_type = (prefix >> 2) & 0x03;
            let size = match prefix & 0x03 {
                0 => 0,
                1 => 1,
                2 => 2,
                _ => 4,
            };

            let Some(bytes) = data.get(i + 1..i + 1 + size) else {
                debug!("HID descriptor truncated at offset {}", i);
                break;
            };

            let mut raw = [0u8; 4];
            raw[..size].copy_from_slice(bytes);
            let unsigned = u32::from_le_bytes(raw);
            let signed = match size {
                1 => i32::from(bytes[0] as i8),
                2 => i32::from(i16::from_le_bytes([bytes[0], bytes[1]])),
                _ => unsigned as i32,
            };

            match item_type {
                // Main items
                0 => {
                    match tag {
                        // Input
                        0x08 => {
                            let field = InputField {
                                usage_page: UsagePage::from(usage_page),
                                usages: usages.clone(),
                                usage_range: usage_min.zip(usage_max),
                                logical_min,
                                logical_max,
                                report_size,
                                report_count,
                                constant: MainFlags(unsigned as u8).is_constant(),
                            };
                            if layout.fields.push(field).is_err() {
                                debug!("HID descriptor: more than {} input fields", MAX_FIELDS);
                                return None;
                            }
                        }
                        // Collection
                        0x0A => {
                            if layout.application.is_none() && unsigned == 0x01 {
                                let usage = usages.first().copied().unwrap_or(0);
                                layout.application = Some((UsagePage::from(usage_page), usage));
                            }
                        }
                        // Output, Feature, End Collection
                        _ => {}
                    }
                    usages.clear();
                    usage_min = None;
                    usage_max = None;
                }
                // Global items
                1 => match tag {
                    0x00 => usage_page = unsigned as u16,
                    0x01 => logical_min = signed,
                    // Logical Maximum is read unsigned when the minimum is
                    // non-negative, so 0x26 0xFF 0x00 and 0x25 0xFF differ.
                    0x02 => logical_max = if logical_min >= 0 { unsigned as i32 } else { signed },
                    0x07 => report_size = unsigned,
                    0x08 => {
                        if layout.report_id.is_none() {
                            layout.report_id = Some(unsigned as u8);
                        }
                    }
                    0x09 => report_count = unsigned,
                    _ => {}
                },
                // Local items
                2 => match tag {
                    0x00 => {
                        // Extra usages past MAX_USAGES are dropped.
                        let _ = usages.push(unsigned as u16);
                    }
                    0x01 => usage_min = Some(unsigned as u16),
                    0x02 => usage_max = Some(unsigned as u16),
                    _ => {}
                },
                _ => {}
            }

            i += 1 + size;
        }

        if layout.fields.is_empty() {
            debug!("HID descriptor: no input fields found");
            None
        } else {
            Some(layout)
        }
    }
}

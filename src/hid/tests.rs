//! Cross-module tests: the generated descriptor against the encoder.
//!
//! These tests run on the host (not embedded) and check that the layout
//! the descriptor declares is the layout `report::encode` writes.

use super::descriptor::build_descriptor;
use super::report::encode;
use super::report_protocol::{AxisUsage, ReportLayout, UsagePage};
use super::{AxisBank, ButtonBank};
use crate::config::{JoystickConfig, MAX_AXES, MAX_BUTTONS, REPORT_ID};

fn banks(config: &JoystickConfig) -> (ButtonBank, AxisBank) {
    (
        ButtonBank::new(config.button_count()),
        AxisBank::new(config.axis_ranges()),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Descriptor ↔ encoder agreement
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn declared_bits_match_encoded_bytes_for_every_config() {
    for axes in 1..=MAX_AXES {
        for buttons in 1..=MAX_BUTTONS {
            let config = JoystickConfig::new(axes, buttons);
            let layout = ReportLayout::parse(&build_descriptor(&config)).unwrap();

            let expected_bits = 8 * buttons.div_ceil(8) + 16 * axes;
            assert_eq!(
                layout.input_bits() as usize,
                expected_bits,
                "axes={axes} buttons={buttons}"
            );

            let (button_bank, axis_bank) = banks(&config);
            let report = encode(&button_bank, &axis_bank);
            assert_eq!(8 * (report.len() - 1), expected_bits);
            assert_eq!(layout.report_len(), report.len());
            assert_eq!(config.report_len(), report.len());
        }
    }
}

#[test]
fn descriptor_declares_report_id_and_joystick() {
    let layout = ReportLayout::parse(&build_descriptor(&JoystickConfig::new(3, 5))).unwrap();
    assert_eq!(layout.report_id, Some(REPORT_ID));
    assert_eq!(layout.application, Some((UsagePage::GenericDesktop, 0x04)));
}

#[test]
fn button_field_covers_every_button() {
    let layout = ReportLayout::parse(&build_descriptor(&JoystickConfig::new(1, 10))).unwrap();
    let buttons = &layout.fields[0];
    assert_eq!(buttons.usage_page, UsagePage::Button);
    assert_eq!(buttons.usage_range, Some((1, 10)));
    assert_eq!((buttons.logical_min, buttons.logical_max), (0, 1));
    assert_eq!(buttons.bits(), 10);

    let padding = &layout.fields[1];
    assert!(padding.constant);
    assert_eq!(padding.bits(), 6);
}

#[test]
fn no_padding_on_byte_boundary() {
    for buttons in [8, 16, 64, 128] {
        let layout =
            ReportLayout::parse(&build_descriptor(&JoystickConfig::new(1, buttons))).unwrap();
        assert!(layout.fields.iter().all(|f| !f.constant), "buttons={buttons}");
    }
}

#[test]
fn axis_usages_follow_fixed_order() {
    let layout = ReportLayout::parse(&build_descriptor(&JoystickConfig::new(9, 1))).unwrap();
    let usages: heapless::Vec<AxisUsage, 9> = layout.axis_usages().collect();
    assert_eq!(
        usages.as_slice(),
        &[
            AxisUsage::X,
            AxisUsage::Y,
            AxisUsage::Z,
            AxisUsage::Rx,
            AxisUsage::Ry,
            AxisUsage::Rz,
            AxisUsage::Slider,
            AxisUsage::Dial,
            AxisUsage::Wheel,
        ]
    );

    let pages: heapless::Vec<UsagePage, 4> = layout
        .data_fields()
        .filter(|f| f.report_size == 16)
        .map(|f| f.usage_page)
        .collect();
    assert_eq!(pages.as_slice(), &[UsagePage::GenericDesktop, UsagePage::Simulation]);
}

#[test]
fn every_axis_field_spans_full_u16() {
    for axes in 1..=MAX_AXES {
        let layout =
            ReportLayout::parse(&build_descriptor(&JoystickConfig::new(axes, 4))).unwrap();
        let mut declared = 0;
        for field in layout.data_fields().filter(|f| f.report_size == 16) {
            assert_eq!((field.logical_min, field.logical_max), (0, 65535));
            assert_eq!(field.usages.len() as u32, field.report_count);
            declared += field.report_count;
        }
        assert_eq!(declared as usize, axes);
    }
}

#[test]
fn minimum_config_is_well_formed() {
    let config = JoystickConfig::new(0, 0);
    let desc = build_descriptor(&config);
    assert!(!desc.is_empty());
    assert_eq!(desc.last(), Some(&0xC0));

    let layout = ReportLayout::parse(&desc).unwrap();
    // 1 button + 7 padding bits + one 16-bit X axis.
    assert_eq!(layout.input_bits(), 24);
    assert_eq!(layout.axis_usages().next(), Some(AxisUsage::X));
}

// ═══════════════════════════════════════════════════════════════════════════
// Encoded values
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn centered_axis_encodes_midpoint() {
    let config = JoystickConfig::new(6, 8);
    let (buttons, axes) = banks(&config);
    let report = encode(&buttons, &axes);
    // 65535 * 1028 / 2056 = 32767
    assert_eq!(&report[2..4], &[0xFF, 0x7F]);
}

#[test]
fn pressed_buttons_pack_lsb_first() {
    let config = JoystickConfig::new(6, 8);
    let (mut buttons, axes) = banks(&config);
    for i in [0, 3, 4] {
        buttons.press(i);
    }
    let report = encode(&buttons, &axes);
    assert_eq!(report[0], REPORT_ID);
    assert_eq!(report[1], 0x19);
}

#[test]
fn inverted_axis_range_flows_into_report() {
    let config = JoystickConfig::new(1, 1).with_axis_range(0, 1024, 0);
    let (buttons, mut axes) = banks(&config);
    axes.set(0, 0);
    assert_eq!(&encode(&buttons, &axes)[2..4], &[0xFF, 0xFF]);
    axes.set(0, 1024);
    assert_eq!(&encode(&buttons, &axes)[2..4], &[0x00, 0x00]);
}

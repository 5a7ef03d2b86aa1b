//! Axis value scaling.
//!
//! Maps a signed logical value from an arbitrary (possibly inverted)
//! source range onto an unsigned 16-bit target range and writes it as
//! little-endian bytes.
//!
//! ```text
//! value ──clamp──▶ [lo, hi] ──reflect if inverted──▶ interpolate ──▶ u16 LE
//! ```

use crate::config::AxisRange;

/// Bytes occupied by one scaled value.
pub const SCALED_VALUE_SIZE: usize = 2;

/// Scale `value` from `src` into `[dst_min, dst_max]`.
///
/// Out-of-range input is clamped, never rejected. An inverted source range
/// (`src.min > src.max`) reflects the value inside its own range before
/// interpolating. A degenerate source range returns `dst_min`.
///
/// Interpolation truncates toward zero, as `dst_min + offset * dst_span / span`.
pub fn scale(value: i32, src: AxisRange, dst_min: u16, dst_max: u16) -> u16 {
    let lo = src.low();
    let hi = src.high();
    if lo == hi {
        return dst_min;
    }

    let mut value = value.clamp(lo, hi);
    if src.is_inverted() {
        // Reflect inside [lo, hi]; widen first since hi + lo can overflow i32.
        value = (i64::from(hi) - i64::from(value) + i64::from(lo)) as i32;
    }

    let offset = i64::from(value) - i64::from(lo);
    let span = i64::from(hi) - i64::from(lo);
    let dst_span = i64::from(dst_max) - i64::from(dst_min);
    let scaled = i64::from(dst_min) + offset * dst_span / span;

    let (out_lo, out_hi) = if dst_min <= dst_max {
        (dst_min, dst_max)
    } else {
        (dst_max, dst_min)
    };
    scaled.clamp(i64::from(out_lo), i64::from(out_hi)) as u16
}

/// Scale `value` and write it little-endian at `out[offset..offset + 2]`.
///
/// Returns the number of bytes written (always 2), or 0 if `out` cannot
/// hold the value at that offset.
pub fn write_scaled(
    value: i32,
    src: AxisRange,
    dst_min: u16,
    dst_max: u16,
    out: &mut [u8],
    offset: usize,
) -> usize {
    let Some(end) = offset.checked_add(SCALED_VALUE_SIZE) else {
        return 0;
    };
    let Some(slot) = out.get_mut(offset..end) else {
        return 0;
    };
    slot.copy_from_slice(&scale(value, src, dst_min, dst_max).to_le_bytes());
    SCALED_VALUE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: (u16, u16) = (0, u16::MAX);

    fn full(value: i32, min: i32, max: i32) -> u16 {
        scale(value, AxisRange::new(min, max), FULL.0, FULL.1)
    }

    #[test]
    fn endpoints_map_to_full_range() {
        assert_eq!(full(-1028, -1028, 1028), 0);
        assert_eq!(full(1028, -1028, 1028), u16::MAX);
    }

    #[test]
    fn midpoint_truncates() {
        // 65535 * 1028 / 2056 = 32767.5
        assert_eq!(full(0, -1028, 1028), 0x7FFF);
    }

    #[test]
    fn matches_truncating_interpolation() {
        for v in -1028..=1028 {
            let expected = (i64::from(v) + 1028) * 65535 / 2056;
            assert_eq!(i64::from(full(v, -1028, 1028)), expected, "value {v}");
        }
        assert_eq!(full(-1027, -1028, 1028), 31);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(full(-5000, -1028, 1028), 0);
        assert_eq!(full(5000, -1028, 1028), u16::MAX);
        assert_eq!(full(i32::MIN, -1028, 1028), 0);
        assert_eq!(full(i32::MAX, -1028, 1028), u16::MAX);
    }

    #[test]
    fn inverted_range_reflects() {
        assert_eq!(full(1024, 1024, 0), 0);
        assert_eq!(full(0, 1024, 0), u16::MAX);
        assert_eq!(full(256, 1024, 0), full(768, 0, 1024));
    }

    #[test]
    fn degenerate_range_returns_dst_min() {
        assert_eq!(full(7, 5, 5), 0);
        assert_eq!(scale(-3, AxisRange::new(5, 5), 100, 200), 100);
    }

    #[test]
    fn extreme_source_range_does_not_overflow() {
        assert_eq!(full(i32::MIN, i32::MIN, i32::MAX), 0);
        assert_eq!(full(i32::MAX, i32::MIN, i32::MAX), u16::MAX);
        assert_eq!(full(i32::MAX, i32::MAX, i32::MIN), 0);
    }

    #[test]
    fn narrower_target_range() {
        let r = AxisRange::new(0, 100);
        assert_eq!(scale(0, r, 1000, 2000), 1000);
        assert_eq!(scale(50, r, 1000, 2000), 1500);
        assert_eq!(scale(100, r, 1000, 2000), 2000);
        // Descending target.
        assert_eq!(scale(0, r, 2000, 1000), 2000);
        assert_eq!(scale(100, r, 2000, 1000), 1000);
    }

    #[test]
    fn monotonic_over_whole_source_range() {
        let mut prev = 0;
        for v in -1028..=1028 {
            let cur = full(v, -1028, 1028);
            assert!(cur >= prev, "not monotonic at {v}");
            prev = cur;
        }

        let mut prev = u16::MAX;
        for v in -1028..=1028 {
            let cur = full(v, 1028, -1028);
            assert!(cur <= prev, "not decreasing at {v}");
            prev = cur;
        }
    }

    #[test]
    fn reclamping_is_idempotent() {
        let r = AxisRange::new(-300, 900);
        for v in (-2000..2000).step_by(7) {
            let clamped = v.clamp(r.low(), r.high());
            assert_eq!(scale(v, r, 0, u16::MAX), scale(clamped, r, 0, u16::MAX));
        }
    }

    #[test]
    fn write_scaled_little_endian() {
        let mut buf = [0xAAu8; 4];
        let n = write_scaled(0, AxisRange::new(-1028, 1028), 0, u16::MAX, &mut buf, 1);
        assert_eq!(n, 2);
        assert_eq!(buf, [0xAA, 0xFF, 0x7F, 0xAA]);
    }

    #[test]
    fn write_scaled_buffer_too_small() {
        let mut buf = [0u8; 2];
        assert_eq!(write_scaled(0, AxisRange::default(), 0, u16::MAX, &mut buf, 1), 0);
        assert_eq!(buf, [0, 0]);
    }
}

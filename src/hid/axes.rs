//! Axis state storage.

use crate::config::{AxisRange, MAX_AXES};
use heapless::Vec;

/// Current value and logical range of one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisState {
    pub value: i32,
    pub range: AxisRange,
}

/// Fixed set of axes indexed `0..len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisBank {
    axes: Vec<AxisState, MAX_AXES>,
}

impl AxisBank {
    /// One axis per range, value 0. Ranges beyond `MAX_AXES` are dropped.
    pub fn new(ranges: &[AxisRange]) -> Self {
        let axes = ranges
            .iter()
            .take(MAX_AXES)
            .map(|&range| AxisState { value: 0, range })
            .collect();
        Self { axes }
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Store a raw logical value. Returns `false` if `index` is out of range.
    pub fn set(&mut self, index: usize, value: i32) -> bool {
        match self.axes.get_mut(index) {
            Some(axis) => {
                axis.value = value;
                true
            }
            None => false,
        }
    }

    pub fn value(&self, index: usize) -> Option<i32> {
        self.axes.get(index).map(|axis| axis.value)
    }

    pub fn range(&self, index: usize) -> Option<AxisRange> {
        self.axes.get(index).map(|axis| axis.range)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AxisState> {
        self.axes.iter()
    }
}

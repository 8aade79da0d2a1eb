use alloc::string::{String, ToString};
use core::fmt;

/// Three-character seven-segment style readout used by the mine counter and the timer.
///
/// Values are clamped to `-99..=999`; negatives are shown as a minus sign followed
/// by two digits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CounterDisplay(pub i32);

impl CounterDisplay {
    pub const MIN: i32 = -99;
    pub const MAX: i32 = 999;
}

impl fmt::Display for CounterDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0.clamp(Self::MIN, Self::MAX);
        if value < 0 {
            write!(f, "-{:02}", -value)
        } else {
            write!(f, "{:03}", value)
        }
    }
}

pub fn format_counter(value: i32) -> String {
    CounterDisplay(value).to_string()
}

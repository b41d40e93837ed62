//! Rendering durations as text.
//!
//! Consumers plug their own rendering in through [`DurationFormatter`]. The
//! crate only ships [`ClockFormatter`], which produces `HH:MM:SS.NNNNNNNNN`.

use std::fmt;

use crate::Duration;

/// Capability that turns a [`Duration`] into a string.
///
/// Implemented for any `Fn(&Duration) -> String`, so a closure can be passed
/// wherever a formatter is expected.
pub trait DurationFormatter {
    fn format(&self, duration: &Duration) -> String;
}

impl<F> DurationFormatter for F
where
    F: Fn(&Duration) -> String,
{
    fn format(&self, duration: &Duration) -> String {
        self(duration)
    }
}

/// The built-in `HH:MM:SS.NNNNNNNNN` layout.
///
/// Hours, minutes and seconds are zero-padded to two digits, nanoseconds to
/// nine. Hours are not capped and widen past two digits for long spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockFormatter;

impl DurationFormatter for ClockFormatter {
    fn format(&self, duration: &Duration) -> String {
        duration.clock_parts().to_string()
    }
}

/// A duration decomposed for clock display. See [`Duration::clock_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub nanoseconds: u32,
}

impl fmt::Display for ClockParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rendered first so width and fill flags apply to the whole clock.
        f.pad(&format!(
            "{:02}:{:02}:{:02}.{:09}",
            self.hours, self.minutes, self.seconds, self.nanoseconds
        ))
    }
}

//! Elapsed-time value type for telemetry events.
//!
//! A [`Duration`] is a whole-seconds count plus a sub-second nanosecond
//! remainder, the same split high-resolution monotonic clocks report. Values
//! are validated once at construction and never change afterwards.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{ClockFormatter, ClockParts, DurationFormatter};

/// Which component of a [`Duration`] a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationField {
    Seconds,
    Nanoseconds,
}

impl DurationField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DurationField::Seconds => "seconds",
            DurationField::Nanoseconds => "nanoseconds",
        }
    }
}

impl fmt::Display for DurationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid argument passed to a [`Duration`] constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("value for {field} must not be negative")]
    Negative { field: DurationField },
    #[error("value for {field} must not be greater than {limit}")]
    TooLarge { field: DurationField, limit: u32 },
}

impl DurationError {
    #[must_use]
    pub const fn field(self) -> DurationField {
        match self {
            DurationError::Negative { field } | DurationError::TooLarge { field, .. } => field,
        }
    }
}

/// Failure to read a [`Duration`] back from its `HH:MM:SS.NNNNNNNNN` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDurationError {
    #[error("malformed duration {input:?}: expected HH:MM:SS.NNNNNNNNN")]
    Malformed { input: String },
    #[error("{component} component {value} exceeds 60")]
    ComponentOutOfRange { component: &'static str, value: u64 },
    #[error("duration {input:?} overflows the seconds counter")]
    Overflow { input: String },
}

/// Elapsed time with nanosecond precision.
///
/// # Invariants
///
/// - `nanoseconds` is in `0..=999_999_999`
/// - Both components are fixed once the value exists
///
/// Fields are private, so a `Duration` can only come out of a validating
/// constructor:
///
/// ```compile_fail
/// use tempo_types::Duration;
///
/// let invalid = Duration { seconds: 1, nanoseconds: 1_000_000_000 };
/// ```
///
/// ```compile_fail
/// use tempo_types::Duration;
///
/// let mut elapsed = Duration::ZERO;
/// elapsed.nanoseconds = 5;
/// ```
///
/// # Ordering
///
/// Seconds are compared first, nanoseconds only break ties. The derived `Ord`
/// relies on the field declaration order below.
///
/// # Serde
///
/// Serializes as the default `HH:MM:SS.NNNNNNNNN` string. Deserialization
/// parses that form and fails on anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Duration {
    seconds: u64,
    nanoseconds: u32,
}

impl Duration {
    pub const MAX_NANOSECONDS: u32 = 999_999_999;

    pub const ZERO: Duration = Duration {
        seconds: 0,
        nanoseconds: 0,
    };

    /// Build a duration from signed components supplied by the event pipeline.
    ///
    /// Checks run in order (seconds sign, nanoseconds sign, nanoseconds upper
    /// bound) and only the first failure is reported.
    pub fn from_seconds_and_nanoseconds(
        seconds: i64,
        nanoseconds: i64,
    ) -> Result<Self, DurationError> {
        let seconds = ensure_not_negative(seconds, DurationField::Seconds)?;
        let nanoseconds = ensure_not_negative(nanoseconds, DurationField::Nanoseconds)?;
        let nanoseconds =
            ensure_not_greater_than(Self::MAX_NANOSECONDS, nanoseconds, DurationField::Nanoseconds)?;
        Ok(Self {
            seconds,
            nanoseconds,
        })
    }

    pub fn new(seconds: u64, nanoseconds: u32) -> Result<Self, DurationError> {
        let nanoseconds = ensure_not_greater_than(
            Self::MAX_NANOSECONDS,
            u64::from(nanoseconds),
            DurationField::Nanoseconds,
        )?;
        Ok(Self {
            seconds,
            nanoseconds,
        })
    }

    #[must_use]
    pub const fn from_secs(seconds: u64) -> Self {
        Self {
            seconds,
            nanoseconds: 0,
        }
    }

    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    #[must_use]
    pub const fn nanoseconds(&self) -> u32 {
        self.nanoseconds
    }

    #[must_use]
    pub fn is_less_than(&self, other: &Duration) -> bool {
        self < other
    }

    #[must_use]
    pub fn is_greater_than(&self, other: &Duration) -> bool {
        self > other
    }

    /// Split into hours, minutes, seconds and nanoseconds for clock display.
    ///
    /// Units are only promoted when the count is strictly greater than the
    /// unit size: exactly 3600 seconds stays as 60 minutes, and exactly 60
    /// seconds stays as 60 seconds.
    #[must_use]
    pub const fn clock_parts(&self) -> ClockParts {
        let mut remaining = self.seconds;
        let mut hours = 0;
        let mut minutes = 0;

        if remaining > SECONDS_PER_HOUR {
            hours = remaining / SECONDS_PER_HOUR;
            remaining -= hours * SECONDS_PER_HOUR;
        }

        if remaining > SECONDS_PER_MINUTE {
            minutes = remaining / SECONDS_PER_MINUTE;
            remaining -= minutes * SECONDS_PER_MINUTE;
        }

        ClockParts {
            hours,
            minutes,
            seconds: remaining,
            nanoseconds: self.nanoseconds,
        }
    }

    /// Render with `formatter`, or with the built-in clock layout when `None`.
    #[must_use]
    pub fn as_string(&self, formatter: Option<&dyn DurationFormatter>) -> String {
        formatter.unwrap_or(&ClockFormatter).format(self)
    }
}

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

fn ensure_not_negative(value: i64, field: DurationField) -> Result<u64, DurationError> {
    u64::try_from(value).map_err(|_| {
        tracing::debug!(field = field.as_str(), value, "rejected negative duration component");
        DurationError::Negative { field }
    })
}

fn ensure_not_greater_than(
    limit: u32,
    value: u64,
    field: DurationField,
) -> Result<u32, DurationError> {
    if value > u64::from(limit) {
        tracing::debug!(
            field = field.as_str(),
            value,
            limit,
            "rejected oversized duration component"
        );
        return Err(DurationError::TooLarge { field, limit });
    }
    Ok(value as u32)
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.clock_parts(), f)
    }
}

impl FromStr for Duration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let result = parse_clock(s);
        if let Err(err) = &result {
            tracing::debug!(input = s, error = %err, "rejected duration string");
        }
        result
    }
}

fn parse_clock(s: &str) -> Result<Duration, ParseDurationError> {
    let malformed = || ParseDurationError::Malformed {
        input: s.to_string(),
    };

    let (clock, fraction) = s.split_once('.').ok_or_else(malformed)?;
    let mut parts = clock.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    if hours.len() < 2 || minutes.len() != 2 || seconds.len() != 2 || fraction.len() != 9 {
        return Err(malformed());
    }

    if !is_digits(hours) {
        return Err(malformed());
    }
    let hours = hours.parse::<u64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => ParseDurationError::Overflow {
            input: s.to_string(),
        },
        _ => malformed(),
    })?;
    let minutes = parse_digits(minutes).ok_or_else(malformed)?;
    let seconds = parse_digits(seconds).ok_or_else(malformed)?;
    let nanoseconds = parse_digits(fraction).ok_or_else(malformed)?;

    if minutes > SECONDS_PER_MINUTE {
        return Err(ParseDurationError::ComponentOutOfRange {
            component: "minutes",
            value: minutes,
        });
    }
    if seconds > SECONDS_PER_MINUTE {
        return Err(ParseDurationError::ComponentOutOfRange {
            component: "seconds",
            value: seconds,
        });
    }

    let total = hours
        .checked_mul(SECONDS_PER_HOUR)
        .and_then(|h| h.checked_add(minutes * SECONDS_PER_MINUTE))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| ParseDurationError::Overflow {
            input: s.to_string(),
        })?;

    // Nine digits cannot exceed 999_999_999.
    Ok(Duration {
        seconds: total,
        nanoseconds: nanoseconds as u32,
    })
}

fn is_digits(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(raw: &str) -> Option<u64> {
    if !is_digits(raw) {
        return None;
    }
    raw.parse().ok()
}

impl TryFrom<String> for Duration {
    type Error = ParseDurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Duration {
    type Error = ParseDurationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Duration> for String {
    fn from(value: Duration) -> Self {
        value.to_string()
    }
}

impl From<StdDuration> for Duration {
    fn from(value: StdDuration) -> Self {
        Self {
            seconds: value.as_secs(),
            nanoseconds: value.subsec_nanos(),
        }
    }
}

impl From<Duration> for StdDuration {
    fn from(value: Duration) -> Self {
        StdDuration::new(value.seconds, value.nanoseconds)
    }
}

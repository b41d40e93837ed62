//! Telemetry duration types for Tempo.
//!
//! This crate contains pure value types with no IO, no async, and minimal dependencies.
//! Event producers hand in seconds/nanoseconds pairs read from their own monotonic
//! clocks; nothing here samples a clock.

mod duration;
mod format;

pub use duration::{Duration, DurationError, DurationField, ParseDurationError};
pub use format::{ClockFormatter, ClockParts, DurationFormatter};

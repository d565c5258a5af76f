//! Time value - a non-negative `H:MM:SS` duration
//!
//! Holds the zero-point, alarm threshold and current reading of the timer.
//! Arithmetic keeps minutes and seconds normalised in `0..=59`; hours are
//! unbounded (saturating at the largest value whose total still fits in `u64`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Largest hour count whose total seconds still fit in a `u64`
pub const MAX_HOURS: u64 = (u64::MAX - 3599) / SECONDS_PER_HOUR;

/// Errors raised by time value operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The input did not match `H:MM:SS`
    #[error("not a valid H:MM:SS time: {input:?}")]
    ParseFailure { input: String },
    /// A field or total was assigned a negative or out-of-range value
    #[error("invalid {field} value: {value}")]
    InvalidValue { field: &'static str, value: i64 },
    /// Decrementing would take the value below `0:00:00`
    #[error("cannot subtract {delta}s from {total}s")]
    Underflow { total: u64, delta: u64 },
}

/// A duration split into hours, minutes and seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeValue {
    // Field order gives lexicographic ordering == ordering by total seconds
    hours: u64,
    minutes: u8,
    seconds: u8,
}

impl TimeValue {
    pub const ZERO: TimeValue = TimeValue {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Largest representable value, `MAX_HOURS:59:59`
    pub const MAX: TimeValue = TimeValue {
        hours: MAX_HOURS,
        minutes: 59,
        seconds: 59,
    };

    /// Build a value from already-split fields
    pub fn new(hours: u64, minutes: u8, seconds: u8) -> Result<Self, TimeError> {
        let mut value = Self::ZERO;
        value.set_hours(i64::try_from(hours).unwrap_or(i64::MAX))?;
        value.set_minutes(minutes.into())?;
        value.set_seconds(seconds.into())?;
        Ok(value)
    }

    /// Build a value from a flat count of seconds, clamped to [`TimeValue::MAX`]
    pub fn from_total_seconds(total: u64) -> Self {
        if total > Self::MAX.total_seconds() {
            return Self::MAX;
        }
        Self {
            hours: total / SECONDS_PER_HOUR,
            minutes: ((total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
            seconds: (total % SECONDS_PER_MINUTE) as u8,
        }
    }

    /// Parse an `H:MM:SS` string, ignoring surrounding whitespace
    pub fn parse(input: &str) -> Result<Self, TimeError> {
        let failure = || TimeError::ParseFailure {
            input: input.to_string(),
        };

        let mut parts = input.trim().split(':');
        let (Some(hours), Some(minutes), Some(seconds), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(failure());
        };

        if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
            return Err(failure());
        }
        let hours: u64 = hours.parse().map_err(|_| failure())?;
        if hours > MAX_HOURS {
            return Err(failure());
        }
        let minutes = parse_sexagesimal(minutes).ok_or_else(failure)?;
        let seconds = parse_sexagesimal(seconds).ok_or_else(failure)?;

        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Replace this value with a parsed one; on failure the value is untouched
    pub fn set_from_str(&mut self, input: &str) -> Result<(), TimeError> {
        *self = Self::parse(input)?;
        Ok(())
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn set_hours(&mut self, value: i64) -> Result<(), TimeError> {
        match u64::try_from(value) {
            Ok(hours) if hours <= MAX_HOURS => {
                self.hours = hours;
                Ok(())
            }
            _ => Err(TimeError::InvalidValue {
                field: "hours",
                value,
            }),
        }
    }

    pub fn set_minutes(&mut self, value: i64) -> Result<(), TimeError> {
        self.minutes = sexagesimal_field("minutes", value)?;
        Ok(())
    }

    pub fn set_seconds(&mut self, value: i64) -> Result<(), TimeError> {
        self.seconds = sexagesimal_field("seconds", value)?;
        Ok(())
    }

    /// Total number of seconds represented
    pub fn total_seconds(&self) -> u64 {
        self.hours * SECONDS_PER_HOUR
            + u64::from(self.minutes) * SECONDS_PER_MINUTE
            + u64::from(self.seconds)
    }

    /// Set the value from a flat count of seconds; negative counts are rejected
    pub fn set_from_total_seconds(&mut self, total: i64) -> Result<(), TimeError> {
        let total = u64::try_from(total).map_err(|_| TimeError::InvalidValue {
            field: "total seconds",
            value: total,
        })?;
        *self = Self::from_total_seconds(total);
        Ok(())
    }

    /// Add `delta` seconds, carrying into minutes and hours.
    ///
    /// Saturates at `MAX_HOURS:59:59`; the total never decreases.
    pub fn increment(&mut self, delta: u64) {
        let seconds = u64::from(self.seconds).saturating_add(delta);
        let minutes = u64::from(self.minutes) + seconds / SECONDS_PER_MINUTE;
        let hours = self.hours.saturating_add(minutes / SECONDS_PER_MINUTE);

        if hours > MAX_HOURS {
            *self = Self::MAX;
            return;
        }

        self.seconds = (seconds % SECONDS_PER_MINUTE) as u8;
        self.minutes = (minutes % SECONDS_PER_MINUTE) as u8;
        self.hours = hours;
    }

    /// Subtract `delta` seconds, borrowing from minutes and hours.
    ///
    /// Fails with [`TimeError::Underflow`] instead of going below `0:00:00`;
    /// the value is left untouched in that case.
    pub fn decrement(&mut self, delta: u64) -> Result<(), TimeError> {
        let total = self.total_seconds();
        if delta > total {
            return Err(TimeError::Underflow { total, delta });
        }

        // Borrow with floored division so every field lands back in range
        let seconds = i128::from(self.seconds) - i128::from(delta);
        let minutes = i128::from(self.minutes) + seconds.div_euclid(60);
        let hours = i128::from(self.hours) + minutes.div_euclid(60);

        self.seconds = seconds.rem_euclid(60) as u8;
        self.minutes = minutes.rem_euclid(60) as u8;
        self.hours = hours as u64;
        Ok(())
    }

    /// The three texts shown by the readout: `H`, `MM`, `SS`
    pub fn display_fields(&self) -> (String, String, String) {
        (
            self.hours.to_string(),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        )
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl FromStr for TimeValue {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Two ASCII digits in `00..=59`
fn parse_sexagesimal(field: &str) -> Option<u8> {
    match field.as_bytes() {
        [tens @ b'0'..=b'5', units @ b'0'..=b'9'] => Some((tens - b'0') * 10 + (units - b'0')),
        _ => None,
    }
}

fn sexagesimal_field(field: &'static str, value: i64) -> Result<u8, TimeError> {
    match u8::try_from(value) {
        Ok(v) if v < 60 => Ok(v),
        _ => Err(TimeError::InvalidValue { field, value }),
    }
}

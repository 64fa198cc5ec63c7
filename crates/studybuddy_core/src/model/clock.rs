//! Minute-granularity wall clock time.
//!
//! # Invariants
//! - Text form is always zero-padded 24-hour `HH:MM`.
//! - `Ord` follows chronological order within one day.

use crate::model::validation::ValidationError;
use chrono::Timelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static CLOCK_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("valid time regex"));

/// Reminder time used by fresh and reset documents.
pub const DEFAULT_REMINDER_TIME: ClockTime = ClockTime { hour: 9, minute: 0 };

/// Time of day with minute precision, serialized as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Returns `None` when `hour > 23` or `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Truncates any chrono time-like value to its hour and minute.
    pub fn of<T: Timelike>(value: &T) -> Self {
        // chrono guarantees hour < 24 and minute < 60.
        Self {
            hour: value.hour() as u8,
            minute: value.minute() as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let caps = CLOCK_TIME_RE
            .captures(value)
            .ok_or_else(|| ValidationError::InvalidTime(value.to_string()))?;
        let hour = caps[1]
            .parse()
            .map_err(|_| ValidationError::InvalidTime(value.to_string()))?;
        let minute = caps[2]
            .parse()
            .map_err(|_| ValidationError::InvalidTime(value.to_string()))?;
        Ok(Self { hour, minute })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::ClockTime;
    use chrono::NaiveTime;

    #[test]
    fn parses_and_formats_zero_padded_values() {
        let time: ClockTime = "09:05".parse().expect("09:05 should parse");
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 5);
        assert_eq!(time.to_string(), "09:05");
    }

    #[test]
    fn rejects_out_of_range_and_unpadded_text() {
        for text in ["24:00", "9:00", "12:60", "12-30", "", " 09:00", "09:00 "] {
            assert!(text.parse::<ClockTime>().is_err(), "`{text}` must be rejected");
        }
    }

    #[test]
    fn ordering_is_chronological() {
        let early = ClockTime::new(9, 59).unwrap();
        let late = ClockTime::new(10, 0).unwrap();
        assert!(early < late);
    }

    #[test]
    fn of_truncates_seconds() {
        let time = NaiveTime::from_hms_opt(14, 7, 59).unwrap();
        assert_eq!(ClockTime::of(&time), ClockTime::new(14, 7).unwrap());
    }

    #[test]
    fn serde_uses_text_form() {
        let time = ClockTime::new(7, 30).unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"07:30\"");
        let parsed: ClockTime = serde_json::from_str("\"07:30\"").unwrap();
        assert_eq!(parsed, time);
        assert!(serde_json::from_str::<ClockTime>("\"7:30\"").is_err());
    }
}

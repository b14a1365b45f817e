//! Comparable bound values for `min`/`max` constraints.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2})(?::([0-9]{2}))?$").expect("time pattern is a valid regex")
});

/// A measured quantity that bound constraints compare against.
///
/// Each schema kind measures its values in one unit: strings and arrays by
/// length, numbers by magnitude, dates by instant, files by byte size and
/// times by seconds since midnight. Bounds of different units never compare.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    /// Character count or element count.
    Length(usize),
    /// Numeric magnitude.
    Number(f64),
    /// A point in time.
    Date(DateTime<Utc>),
    /// Byte size.
    Size(u64),
    /// Time of day.
    Time(TimeOfDay),
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Bound::Length(a), Bound::Length(b)) => a.partial_cmp(b),
            (Bound::Number(a), Bound::Number(b)) => a.partial_cmp(b),
            (Bound::Date(a), Bound::Date(b)) => a.partial_cmp(b),
            (Bound::Size(a), Bound::Size(b)) => a.partial_cmp(b),
            (Bound::Time(a), Bound::Time(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Length(n) => write!(f, "{}", n),
            Bound::Number(n) => write!(f, "{}", n),
            Bound::Date(d) if d.num_seconds_from_midnight() == 0 && d.nanosecond() == 0 => {
                write!(f, "{}", d.format("%Y-%m-%d"))
            }
            Bound::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Bound::Size(n) => write!(f, "{}", n),
            Bound::Time(t) => write!(f, "{}", t),
        }
    }
}

impl From<usize> for Bound {
    fn from(n: usize) -> Self {
        Bound::Length(n)
    }
}

impl From<f64> for Bound {
    fn from(n: f64) -> Self {
        Bound::Number(n)
    }
}

impl From<DateTime<Utc>> for Bound {
    fn from(d: DateTime<Utc>) -> Self {
        Bound::Date(d)
    }
}

impl From<u64> for Bound {
    fn from(n: u64) -> Self {
        Bound::Size(n)
    }
}

impl From<TimeOfDay> for Bound {
    fn from(t: TimeOfDay) -> Self {
        Bound::Time(t)
    }
}

/// Errors raised when a time literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    /// The string is not `HH:MM` or `HH:MM:SS`.
    #[error("'{0}' is not a HH:MM or HH:MM:SS time")]
    Format(String),
    /// Hours, minutes or seconds are outside 0-23 / 0-59.
    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

/// A time of day with second precision.
///
/// # Example
///
/// ```rust
/// use yop::TimeOfDay;
///
/// let t: TimeOfDay = "08:30".parse().unwrap();
/// assert_eq!(t.seconds_since_midnight(), 8 * 3600 + 30 * 60);
/// assert!("24:00".parse::<TimeOfDay>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    seconds: u32,
}

impl TimeOfDay {
    /// Creates a time from its components, or `None` if any is out of range.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }
        Some(Self {
            seconds: hours * 3600 + minutes * 60 + seconds,
        })
    }

    /// Parses `HH:MM` or `HH:MM:SS`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeParseError::Format`] for strings of the wrong shape and
    /// [`TimeParseError::OutOfRange`] for impossible components.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let captures = TIME_PATTERN
            .captures(input)
            .ok_or_else(|| TimeParseError::Format(input.to_string()))?;

        let component = |i: usize| -> Result<u32, TimeParseError> {
            match captures.get(i) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| TimeParseError::Format(input.to_string())),
                None => Ok(0),
            }
        };

        Self::new(component(1)?, component(2)?, component(3)?)
            .ok_or_else(|| TimeParseError::OutOfRange(input.to_string()))
    }

    /// Returns the number of seconds elapsed since midnight.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.seconds
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = (self.seconds / 3600, self.seconds / 60 % 60, self.seconds % 60);
        if s == 0 {
            write!(f, "{:02}:{:02}", h, m)
        } else {
            write!(f, "{:02}:{:02}:{:02}", h, m, s)
        }
    }
}

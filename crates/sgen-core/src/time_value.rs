//! Points on the audio timeline.
//!
//! Offsets are exchanged as extended ISO 8601 durations that carry
//! milliseconds as a decimal fraction of the seconds field, e.g. `PT12.5S`
//! or `PT1M33S`.

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Pre-compiled grammar for `P[nY][nM][nD][T[nH][nM][n[.f]S]]`.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^P(?:(?<years>[0-9]+)Y)?(?:(?<months>[0-9]+)M)?(?:(?<days>[0-9]+)D)?(?<time>T(?:(?<hours>[0-9]+)H)?(?:(?<minutes>[0-9]+)M)?(?:(?<seconds>[0-9]+)(?:\.(?<fraction>[0-9]+))?S)?)?$",
    )
    .unwrap()
});

/// Errors produced while parsing a time value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseTimeValueError {
    /// The input was empty.
    #[error("time value cannot be empty")]
    Empty,

    /// The input does not follow the duration grammar.
    #[error("invalid time value '{value}', expected an ISO 8601 duration such as PT1M2.5S")]
    Malformed { value: String },

    /// More than three fractional digits were given for the seconds.
    #[error("time value '{value}' has more than millisecond precision")]
    FractionTooLong { value: String },

    /// Years and months have no fixed length in milliseconds.
    #[error("time value '{value}' uses years or months, which have no fixed length")]
    CalendarUnit { value: String },

    /// The value does not fit in the millisecond range.
    #[error("time value '{value}' is out of range")]
    Overflow { value: String },
}

/// An absolute point on the timeline, in milliseconds since the start of the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeValue(i64);

impl TimeValue {
    /// The start of the source.
    pub const ZERO: Self = Self(0);

    /// Creates a time value from milliseconds.
    ///
    /// Callers are expected to pass non-negative values; negative values only
    /// arise from inputs that already violate the silence ordering contract.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl Sub for TimeValue {
    type Output = i64;

    /// Difference in milliseconds. May be negative.
    fn sub(self, rhs: Self) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        let millis = self.0.unsigned_abs();
        let unit = |per: i64| per.unsigned_abs();

        let days = millis / unit(MS_PER_DAY);
        let hours = millis % unit(MS_PER_DAY) / unit(MS_PER_HOUR);
        let minutes = millis % unit(MS_PER_HOUR) / unit(MS_PER_MINUTE);
        let seconds = millis % unit(MS_PER_MINUTE) / unit(MS_PER_SECOND);
        let fraction = millis % unit(MS_PER_SECOND);

        f.write_str("P")?;
        if days > 0 {
            write!(f, "{days}D")?;
        }
        f.write_str("T")?;
        if hours > 0 {
            write!(f, "{hours}H")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}M")?;
        }
        if seconds > 0 || fraction > 0 {
            write!(f, "{seconds}")?;
            if fraction > 0 {
                let digits = format!("{fraction:03}");
                write!(f, ".{}", digits.trim_end_matches('0'))?;
            }
            f.write_str("S")?;
        } else if hours == 0 && minutes == 0 {
            f.write_str("0S")?;
        }
        Ok(())
    }
}

impl FromStr for TimeValue {
    type Err = ParseTimeValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ParseTimeValueError::Empty);
        }

        let malformed = || ParseTimeValueError::Malformed {
            value: value.to_string(),
        };
        let overflow = || ParseTimeValueError::Overflow {
            value: value.to_string(),
        };

        let caps = DURATION_RE.captures(value).ok_or_else(malformed)?;

        let has_date = ["years", "months", "days"]
            .iter()
            .any(|name| caps.name(name).is_some());
        let has_time = ["hours", "minutes", "seconds"]
            .iter()
            .any(|name| caps.name(name).is_some());
        // "P", "PT" and "P1DT" carry no usable component.
        if (!has_date && !has_time) || (caps.name("time").is_some() && !has_time) {
            return Err(malformed());
        }

        let number = |name: &str| -> Result<i64, ParseTimeValueError> {
            caps.name(name)
                .map_or(Ok(0), |m| m.as_str().parse::<i64>().map_err(|_| overflow()))
        };

        if number("years")? != 0 || number("months")? != 0 {
            return Err(ParseTimeValueError::CalendarUnit {
                value: value.to_string(),
            });
        }

        let fraction = match caps.name("fraction") {
            Some(m) if m.as_str().len() > 3 => {
                return Err(ParseTimeValueError::FractionTooLong {
                    value: value.to_string(),
                });
            }
            // ".5" is half a second, ".05" is fifty milliseconds.
            Some(m) => format!("{:0<3}", m.as_str())
                .parse::<i64>()
                .map_err(|_| malformed())?,
            None => 0,
        };

        let total = [
            (number("days")?, MS_PER_DAY),
            (number("hours")?, MS_PER_HOUR),
            (number("minutes")?, MS_PER_MINUTE),
            (number("seconds")?, MS_PER_SECOND),
        ]
        .into_iter()
        .try_fold(fraction, |acc, (amount, per)| {
            amount.checked_mul(per).and_then(|ms| acc.checked_add(ms))
        })
        .ok_or_else(overflow)?;

        Ok(Self(total))
    }
}

impl TryFrom<&str> for TimeValue {
    type Error = ParseTimeValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for TimeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

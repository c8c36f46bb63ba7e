//! Units a measured span can be reported in.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Granularity of a duration query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    #[default]
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Nanoseconds,
        TimeUnit::Microseconds,
        TimeUnit::Milliseconds,
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
    ];

    /// Number of whole units in `span`, truncated toward zero.
    ///
    /// ```
    /// use std::time::Duration;
    /// use lapse_lib::unit::TimeUnit;
    ///
    /// assert_eq!(TimeUnit::Hours.count(Duration::from_secs(90 * 60)), 1);
    /// ```
    pub fn count(self, span: Duration) -> u128 {
        match self {
            Self::Nanoseconds => span.as_nanos(),
            Self::Microseconds => span.as_micros(),
            Self::Milliseconds => span.as_millis(),
            Self::Seconds => u128::from(span.as_secs()),
            Self::Minutes => u128::from(span.as_secs() / 60),
            Self::Hours => u128::from(span.as_secs() / 3_600),
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "µs",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Returned when a string does not name a [`TimeUnit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUnitError {
    input: String,
}

impl ParseUnitError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for ParseUnitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown time unit '{}' (expected one of ns, us, ms, s, min, h)",
            self.input
        )
    }
}

impl std::error::Error for ParseUnitError {}

impl FromStr for TimeUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_lowercase().as_str() {
            "ns" | "nanos" | "nanoseconds" => Self::Nanoseconds,
            "us" | "µs" | "micros" | "microseconds" => Self::Microseconds,
            "ms" | "millis" | "milliseconds" => Self::Milliseconds,
            "s" | "sec" | "secs" | "seconds" => Self::Seconds,
            "m" | "min" | "mins" | "minutes" => Self::Minutes,
            "h" | "hr" | "hrs" | "hours" => Self::Hours,
            _ => {
                return Err(ParseUnitError {
                    input: s.to_string(),
                })
            }
        };
        Ok(unit)
    }
}

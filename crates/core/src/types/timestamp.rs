//! Order timestamps.
//!
//! The canonical wire form is a JSON number of seconds since the Unix epoch.
//! Anything else (ISO strings, `null`, out-of-range numbers) is kept as
//! [`OrderTimestamp::Invalid`] so one malformed order never hides the rest of
//! the list; it renders as [`INVALID_DATE`].

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder rendered for timestamps that cannot be formatted.
pub const INVALID_DATE: &str = "Invalid date";

/// Display format, e.g. `Jan 1, 1970 12:00 AM`.
const DISPLAY_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// When an order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderTimestamp {
    /// Whole seconds since the Unix epoch.
    Seconds(i64),
    /// Fractional seconds since the Unix epoch.
    Fractional(f64),
    /// Any value that is not a number.
    Invalid(serde_json::Value),
}

impl OrderTimestamp {
    /// Create a timestamp from a UTC date/time.
    #[must_use]
    pub fn from_datetime(at: &DateTime<Utc>) -> Self {
        Self::Seconds(at.timestamp())
    }

    /// Resolve to a UTC instant, if the value is in range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Seconds(secs) => DateTime::from_timestamp(*secs, 0),
            Self::Fractional(secs) => {
                if !secs.is_finite() {
                    return None;
                }
                let millis = (secs * 1000.0).round();
                // Outside i64 range the cast saturates; chrono rejects it below.
                #[allow(clippy::cast_possible_truncation)]
                let millis = millis as i64;
                DateTime::from_timestamp_millis(millis)
            }
            Self::Invalid(_) => None,
        }
    }

    /// Format in the server's local time zone.
    #[must_use]
    pub fn format_local(&self) -> String {
        self.format_in(&Local)
    }

    /// Format in the given time zone, or [`INVALID_DATE`].
    #[must_use]
    pub fn format_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: core::fmt::Display,
    {
        self.to_datetime().map_or_else(
            || INVALID_DATE.to_owned(),
            |at| at.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        )
    }
}

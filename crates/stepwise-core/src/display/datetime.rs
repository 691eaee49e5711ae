//! Date and time display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// Formats a UTC timestamp in the system timezone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Formats an optional start date, `unscheduled` when absent.
pub struct StartDate<'a>(pub &'a Option<Date>);

impl<'a> fmt::Display for StartDate<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.strftime("%Y-%m-%d")),
            None => write!(f, "unscheduled"),
        }
    }
}

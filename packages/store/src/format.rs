//! Display formatting for capsule timestamps.
//!
//! Cards use the short form (`Jan 5, 2025, 03:04 PM`), the detail modal the
//! long form (`January 5, 2025 at 03:04 PM`). Both render in the viewer's
//! local time zone. A value that is not RFC 3339 is returned unchanged.

use chrono::{DateTime, Local, TimeZone};

const SHORT: &str = "%b %-d, %Y, %I:%M %p";
const LONG: &str = "%B %-d, %Y at %I:%M %p";

/// Short date used on capsule cards, in local time.
pub fn format_short(raw: &str) -> String {
    format_in(raw, &Local, SHORT)
}

/// Long date used in the detail modal, in local time.
pub fn format_long(raw: &str) -> String {
    format_in(raw, &Local, LONG)
}

/// Short date rendered in an explicit time zone.
pub fn format_short_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_in(raw, tz, SHORT)
}

/// Long date rendered in an explicit time zone.
pub fn format_long_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_in(raw, tz, LONG)
}

fn format_in<Tz: TimeZone>(raw: &str, tz: &Tz, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(parsed) => parsed.with_timezone(tz).format(pattern).to_string(),
        Err(_) => raw.to_string(),
    }
}

// Utility functions
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

/// How hour:minute values are rendered for display. Set from config in
/// place of the host locale, so output is the same on every machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ClockStyle {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

/// Parses an ISO-8601 timestamp into the wall-clock time it names.
/// Offsets, when present, are kept as written and not converted.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Formats the time of day of `value`, `None` when it cannot be parsed.
pub fn format_clock(value: &str, style: ClockStyle) -> Option<String> {
    let at = parse_timestamp(value)?;
    let pattern = match style {
        ClockStyle::TwentyFourHour => "%H:%M",
        ClockStyle::TwelveHour => "%-I:%M %p",
    };
    Some(at.format(pattern).to_string())
}

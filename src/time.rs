//! Timestamps as field workers see them: India Standard Time.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

// Asia/Kolkata has observed a fixed +05:30 with no DST since 1945.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

pub fn kolkata() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is within bounds")
}

/// Parses a submitted test time. Zoned RFC 3339 strings are taken as-is;
/// naive timestamps (what a datetime-local input posts) are read as IST.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(raw, fmt).ok()?;
        kolkata()
            .from_local_datetime(&naive)
            .single()
            .map(|t| t.with_timezone(&Utc))
    })
}

/// Formats a timestamp for alert messages, e.g. `Mon, 14 Oct 2024, 10:30 AM`.
pub fn format_local(t: DateTime<Utc>) -> String {
    t.with_timezone(&kolkata())
        .format("%a, %d %b %Y, %I:%M %p")
        .to_string()
}

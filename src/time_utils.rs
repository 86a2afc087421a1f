// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as ISO-8601 with millisecond precision and a `Z` suffix.
///
/// This is the textual form stored for every persisted timestamp,
/// e.g. `2024-03-01T09:30:00.000Z`.
pub fn format_utc_iso_millis(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp back into a UTC instant.
///
/// Accepts any RFC 3339 offset, not just `Z`.
pub fn parse_iso_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter storing `DateTime<Utc>` in the millisecond ISO form.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_utc_iso_millis(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_iso_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// Build a fixed offset from minutes east of UTC.
///
/// Returns `None` for offsets outside a real-world range (±18h).
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    if minutes.abs() > 18 * 60 {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

/// First day of the given month, or `None` for an invalid month.
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last day of the given month, or `None` for an invalid month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first = first_day_of_month(year, month)?;
    let (next_year, next_month) = if first.month() == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

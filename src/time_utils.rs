// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Layout used when records are flattened to maps.
const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a UTC timestamp as `YYYY-MM-DD HH:MM:SS` (second precision).
pub fn format_record_timestamp(date: DateTime<Utc>) -> String {
    date.format(RECORD_TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp, either `YYYY-MM-DD HH:MM:SS` (UTC) or RFC3339.
pub fn parse_record_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, RECORD_TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

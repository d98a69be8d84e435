//! Timer phases and lenient duration parsing

use serde::{Deserialize, Serialize};

/// One timed segment of a countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub duration_seconds: u64,
    pub label: String,
}

impl Phase {
    pub fn new(duration_seconds: u64, label: impl Into<String>) -> Self {
        Self {
            duration_seconds,
            label: label.into(),
        }
    }
}

/// Parse a numeric input field the way a browser `parseInt(v, 10) || 0` would,
/// then clamp negatives to zero.
///
/// Leading whitespace is skipped, an optional sign and the leading run of
/// digits are read and anything after them is ignored. Input without leading
/// digits yields 0.
pub fn parse_duration_field(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];

    if negative || digits.is_empty() {
        return 0;
    }

    // Overlong digit runs saturate.
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Combine a minute/second field pair into total seconds
pub fn minutes_seconds(minutes: &str, seconds: &str) -> u64 {
    parse_duration_field(minutes)
        .saturating_mul(60)
        .saturating_add(parse_duration_field(seconds))
}

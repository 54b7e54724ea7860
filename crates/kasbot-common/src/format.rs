//! Pure display-formatting functions used by the command replies.
//!
//! No I/O, no shared state; everything here is a plain value-to-string
//! transformation.

use chrono::{DateTime, Utc};

/// Hashrate units from base H/s up to EH/s, stepped by powers of 1000.
const HASHRATE_UNITS: [&str; 7] = ["H/s", "KH/s", "MH/s", "GH/s", "TH/s", "PH/s", "EH/s"];
const HASHRATE_THRESHOLDS: [f64; 7] = [1.0, 1e3, 1e6, 1e9, 1e12, 1e15, 1e18];

/// Abbreviate a magnitude with an M/B/T suffix.
///
/// There is intentionally no K tier; values below a million keep two decimal
/// places unscaled. Zero and NaN render as `"0"`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() || value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    const MILLION: f64 = 1_000_000.0;
    const BILLION: f64 = 1_000_000_000.0;
    const TRILLION: f64 = 1_000_000_000_000.0;

    if magnitude >= TRILLION {
        format!("{:.2}T", value / TRILLION)
    } else if magnitude >= BILLION {
        format!("{:.2}B", value / BILLION)
    } else if magnitude >= MILLION {
        format!("{:.2}M", value / MILLION)
    } else {
        format!("{value:.2}")
    }
}

/// Scale a network hashrate given in TH/s to the largest fitting unit.
///
/// The value is normalized to H/s first, then divided down by the largest
/// unit threshold it meets. Precision is two decimals, dropping to one when
/// the scaled value sits in [10, 100) at a non-base unit.
pub fn format_hashrate(terahashes_per_sec: f64) -> String {
    let mut hashrate = terahashes_per_sec * 1e12;

    let mut unit_index = 0;
    while unit_index + 1 < HASHRATE_UNITS.len() && hashrate >= HASHRATE_THRESHOLDS[unit_index + 1]
    {
        unit_index += 1;
    }

    hashrate /= HASHRATE_THRESHOLDS[unit_index];

    let decimals: usize = if unit_index == 0 || hashrate >= 100.0 {
        2
    } else if hashrate >= 10.0 {
        1
    } else {
        2
    };

    format!("{:.*} {}", decimals, hashrate, HASHRATE_UNITS[unit_index])
}

/// Insert thousands separators into a decimal digit string.
///
/// The grouping is purely textual so arbitrary-precision integers carried as
/// strings survive without a round-trip through floating point. A fractional
/// part after `.` is passed through untouched; strings whose integer part is
/// not all digits are returned unchanged.
pub fn group_digits(digits: &str) -> String {
    let (int_part, rest) = match digits.find('.') {
        Some(idx) => digits.split_at(idx),
        None => (digits, ""),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(rest);
    grouped
}

/// Format a unix-seconds timestamp as a UTC date line, e.g. `Thu, 01 Jan 2026`.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn format_utc_date(unix_secs: i64) -> Option<String> {
    let datetime: DateTime<Utc> = DateTime::from_timestamp(unix_secs, 0)?;
    Some(datetime.format("%a, %d %b %Y").to_string())
}

/// Format a unix-seconds timestamp as a UTC time line, e.g. `13:37:00 GMT`.
pub fn format_utc_time(unix_secs: i64) -> Option<String> {
    let datetime: DateTime<Utc> = DateTime::from_timestamp(unix_secs, 0)?;
    Some(datetime.format("%H:%M:%S GMT").to_string())
}

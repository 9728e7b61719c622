//! Decoders for the non-trivial TLE field encodings.
//!
//! These work on already-sliced column text and return `None` when the text
//! cannot be decoded; [`crate::tle::layout::Column`] turns that into a
//! [`crate::tle::FormatError`] naming the column.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::str::FromStr;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Two-digit years above this value belong to the 1900s.
pub const EPOCH_PIVOT_YEAR: i32 = 57;

/// Mod-10 checksum over every character of `line` except the last one.
///
/// Digits add their value, `'-'` adds 1 and everything else adds nothing.
pub fn checksum(line: &str) -> u32 {
    let body = match line.char_indices().last() {
        Some((idx, _)) => &line[..idx],
        None => "",
    };
    body.chars()
        .map(|c| match c {
            '-' => 1,
            c => c.to_digit(10).unwrap_or(0),
        })
        .sum::<u32>()
        % 10
}

/// Rebuilds an implied-decimal float stored as `[sign][digits][exponent]`,
/// e.g. `'-'`, `"12345"`, `"-3"` is `-0.12345e-3`.
pub fn reconstruct_scientific(sign: char, digits: &str, exponent: &str) -> Option<f64> {
    let sign = match sign {
        '-' => "-",
        '+' | ' ' => "",
        _ => return None,
    };
    if !is_digits(digits) {
        return None;
    }
    let exponent = exponent.trim();
    let exponent_digits = exponent
        .strip_prefix(['-', '+'])
        .unwrap_or(exponent);
    if !is_digits(exponent_digits) {
        return None;
    }
    format!("{sign}0.{digits}e{exponent}").parse().ok()
}

/// Rebuilds a fraction stored without its leading `"0."`, e.g. `"1234567"`
/// is `0.1234567`.
pub fn reconstruct_fraction(digits: &str) -> Option<f64> {
    if !is_digits(digits) {
        return None;
    }
    format!("0.{digits}").parse().ok()
}

/// Numeric catalog numbers lose their leading zeros; alphanumeric ones are
/// kept as trimmed text.
pub fn catalog_number(field: &str) -> Option<String> {
    match field.chars().next() {
        Some(c) if c.is_ascii_digit() => field.trim().parse::<u32>().ok().map(|n| n.to_string()),
        _ => Some(field.trim().to_string()),
    }
}

/// Expands a two-digit year with the 1957 pivot.
pub fn expand_year(year: i32) -> i32 {
    if year > EPOCH_PIVOT_YEAR {
        1900 + year
    } else {
        2000 + year
    }
}

/// Epoch as January 1st 00:00 UTC of the expanded year plus `day` fractional
/// days, at microsecond resolution.
pub fn epoch(year: &str, day: &str) -> Option<DateTime<Utc>> {
    let year = expand_year(year.trim().parse().ok()?);
    let day: f64 = day.trim().parse().ok()?;

    let micros = (day * MICROS_PER_DAY).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }

    let start = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let naive = start.checked_add_signed(Duration::microseconds(micros as i64))?;
    Some(naive.and_utc())
}

/// Trimmed integer parse.
pub fn integer<T: FromStr>(field: &str) -> Option<T> {
    field.trim().parse().ok()
}

/// Like [`integer`], but a blank field is the type's default.
pub fn optional_integer<T: FromStr + Default>(field: &str) -> Option<T> {
    let field = field.trim();
    if field.is_empty() {
        return Some(T::default());
    }
    field.parse().ok()
}

/// Trimmed decimal parse; a leading `.` or `-.` is accepted.
pub fn float(field: &str) -> Option<f64> {
    field.trim().parse().ok()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

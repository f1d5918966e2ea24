//! Number formatting and lenient numeric parsing for user-entered cells.
//!
//! Parsing follows "leading prefix" rules: leading whitespace is skipped and
//! the longest numeric prefix is used, so `"2020abc"` reads as `2020` while
//! `"abc"` does not parse at all.

use num_format::{Locale, ToFormattedString};

/// Format an integer with `,` thousands separators (`1234567` -> `"1,234,567"`).
pub fn format_number(n: i64) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Strip thousands separators and read the leading integer (`"1,200"` -> `1200`).
pub fn parse_formatted_number(s: &str) -> Option<i64> {
    parse_leading_int(&s.replace(',', ""))
}

/// Optional sign followed by at least one ASCII digit.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse::<i64>().ok()
}

/// Optional sign, digits with an optional fraction, optional exponent.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            digits += 1;
        }
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round half toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
/// Values outside the `i64` range saturate; callers storing user input
/// range-check first.
pub fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

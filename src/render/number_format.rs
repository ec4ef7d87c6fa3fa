//! en-US style number formatting for numeric cells
//!
//! Rounding is half away from zero, matching what browsers show for the same
//! formats.

use crate::core::NumberFormat;

const COMPACT_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// Format a number according to a column's `NumberFormat`
pub fn format_number(value: f64, format: NumberFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    match format {
        NumberFormat::Default => fixed(value, 0, 3),
        NumberFormat::Currency => {
            let body = fixed(value.abs(), 0, 0);
            if value < 0.0 && body != "0" {
                format!("-${body}")
            } else {
                format!("${body}")
            }
        }
        NumberFormat::Percent => format!("{}%", fixed(value * 100.0, 1, 1)),
        NumberFormat::Compact => compact(value),
    }
}

/// Round half away from zero to `decimals` fraction digits
pub fn round_half_away(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // already integral at this magnitude
        return value;
    }
    scaled.round() / factor
}

/// Grouped decimal with between `min_frac` and `max_frac` fraction digits
fn fixed(value: f64, min_frac: usize, max_frac: usize) -> String {
    let rounded = round_half_away(value.abs(), max_frac);
    let text = format!("{rounded:.max_frac$}");
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), ""),
    };

    let mut frac = frac_part.to_string();
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }

    let mut out = String::new();
    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// Insert `,` every three digits from the right
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Abbreviated form: two significant digits below 100 units, whole units above
fn compact(value: f64) -> String {
    let abs = value.abs();
    let mut tier = 0;
    while tier + 1 < COMPACT_SUFFIXES.len() && abs >= 1000f64.powi(tier as i32 + 1) {
        tier += 1;
    }

    loop {
        let scaled = abs / 1000f64.powi(tier as i32);
        let decimals = compact_decimals(scaled);
        let rounded = round_half_away(scaled, decimals);
        // 999_999 rounds to 1000K, which reads as 1M
        if rounded >= 1000.0 && tier + 1 < COMPACT_SUFFIXES.len() {
            tier += 1;
            continue;
        }

        let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
        return format!("{sign}{}{}", fixed(rounded, 0, decimals), COMPACT_SUFFIXES[tier]);
    }
}

fn compact_decimals(scaled: f64) -> usize {
    if scaled == 0.0 || scaled >= 10.0 {
        0
    } else if scaled >= 1.0 {
        1
    } else {
        ((1.0 - scaled.log10().floor()) as usize).min(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_groups_thousands() {
        assert_eq!(format_number(1234567.0, NumberFormat::Default), "1,234,567");
        assert_eq!(format_number(1234.5678, NumberFormat::Default), "1,234.568");
        assert_eq!(format_number(-950.0, NumberFormat::Default), "-950");
        assert_eq!(format_number(0.5, NumberFormat::Default), "0.5");
        assert_eq!(format_number(100.0, NumberFormat::Default), "100");
    }

    #[test]
    fn test_currency_has_no_decimals() {
        assert_eq!(format_number(1234.5, NumberFormat::Currency), "$1,235");
        assert_eq!(format_number(-20.0, NumberFormat::Currency), "-$20");
        assert_eq!(format_number(0.4, NumberFormat::Currency), "$0");
    }

    #[test]
    fn test_percent_of_fraction() {
        assert_eq!(format_number(0.1234, NumberFormat::Percent), "12.3%");
        assert_eq!(format_number(1.0, NumberFormat::Percent), "100.0%");
        assert_eq!(format_number(-0.05, NumberFormat::Percent), "-5.0%");
        assert_eq!(format_number(12.5, NumberFormat::Percent), "1,250.0%");
    }

    #[test]
    fn test_compact_abbreviations() {
        assert_eq!(format_number(999.0, NumberFormat::Compact), "999");
        assert_eq!(format_number(1000.0, NumberFormat::Compact), "1K");
        assert_eq!(format_number(1234.0, NumberFormat::Compact), "1.2K");
        assert_eq!(format_number(12_345.0, NumberFormat::Compact), "12K");
        assert_eq!(format_number(123_456.0, NumberFormat::Compact), "123K");
        assert_eq!(format_number(1_500_000.0, NumberFormat::Compact), "1.5M");
        assert_eq!(format_number(999_999.0, NumberFormat::Compact), "1M");
        assert_eq!(format_number(2_000_000_000.0, NumberFormat::Compact), "2B");
        assert_eq!(format_number(-4_200.0, NumberFormat::Compact), "-4.2K");
        assert_eq!(format_number(0.123, NumberFormat::Compact), "0.12");
        assert_eq!(format_number(0.0, NumberFormat::Compact), "0");
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(round_half_away(2.5, 0), 3.0);
        assert_eq!(round_half_away(-2.5, 0), -3.0);
        assert_eq!(format_number(0.25, NumberFormat::Compact), "0.25");
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        assert_eq!(round_half_away(1e306, 2), 1e306);
        let text = format_number(1e306, NumberFormat::Default);
        assert!(text.starts_with("1,000,000"), "{text}");
        assert!(!text.contains("inf"));
    }
}

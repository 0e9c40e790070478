// Helpers for parsing console input and formatting numbers for display.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse a user-typed number, tolerating whitespace and thousands separators.
///
/// Blank input and anything containing letters give `None`.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    // `YYYY-MM-DD` only.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Split `"40, 30, 30"` style input into numbers. Any bad element fails the
/// whole list.
pub fn parse_f64_list(s: &str) -> Option<Vec<f64>> {
    s.split(|c: char| c == ',' || c == ';' || c == '/')
        .map(|part| parse_f64_safe(Some(part)))
        .collect()
}

pub fn average(v: &[f64]) -> f64 {
    // Returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Fixed decimals with en-IN digit grouping, e.g. `12,34,567.89`.
pub fn format_number(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Past i64 range the digits are shown ungrouped.
    let mut res = match int_part.parse::<i64>() {
        Ok(v) => v.to_formatted_string(&Locale::en_IN),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    // "-0.00" reads badly in a profit column.
    if neg && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en_IN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forgiving_numbers() {
        assert_eq!(parse_f64_safe(Some(" 1,250.5 ")), Some(1250.5));
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(Some("12 katha")), None);
        assert_eq!(parse_f64_safe(None), None);
        assert_eq!(parse_u32_safe(Some("7")), Some(7));
        assert_eq!(parse_u32_safe(Some("-1")), None);
    }

    #[test]
    fn parses_dates_and_lists() {
        assert_eq!(
            parse_date_safe(Some("2025-11-03")),
            NaiveDate::from_ymd_opt(2025, 11, 3)
        );
        assert_eq!(parse_date_safe(Some("03/11/2025")), None);
        assert_eq!(parse_f64_list("40, 30;30"), Some(vec![40.0, 30.0, 30.0]));
        assert_eq!(parse_f64_list("40, x, 30"), None);
    }

    #[test]
    fn formats_with_indian_grouping() {
        assert_eq!(format_number(1234567.891, 2), "12,34,567.89");
        assert_eq!(format_number(-2846.25, 0), "-2,846");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_number(5.0, 1), "5.0");
        assert_eq!(format_int(100000), "1,00,000");
    }

    #[test]
    fn huge_values_are_not_shown_as_zero() {
        assert_eq!(format_number(1e20, 0), "100000000000000000000");
        assert_eq!(format_number(-1e20, 1), "-100000000000000000000.0");
    }
}

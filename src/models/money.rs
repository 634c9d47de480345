//! Fixed-point amounts.
//!
//! Volumes and flat amounts are carried as `i64` cents, and rates and
//! percentages as `i64` hundredths of a percent, so `12.5%` is `1250`.
//! Both use the same two-decimal representation.

/// Parse a decimal with at most two fractional digits into hundredths.
///
/// Thousands separators (`,`) are accepted. Returns `None` for anything
/// else, including negative values and more than two decimals.
pub fn parse_hundredths(raw: &str) -> Option<i64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };

    if fraction.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
        || (whole.is_empty() && fraction.is_empty())
    {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    whole.checked_mul(100)?.checked_add(fraction)
}

/// Render hundredths back into the `1234.50` form used to prefill inputs.
pub fn format_hundredths(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_amounts() {
        assert_eq!(parse_hundredths("12.5"), Some(1250));
        assert_eq!(parse_hundredths("12.05"), Some(1205));
        assert_eq!(parse_hundredths("1,000"), Some(100_000));
        assert_eq!(parse_hundredths(" 0.99 "), Some(99));
        assert_eq!(parse_hundredths(".5"), Some(50));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for raw in ["", "abc", "-1", "1.234", "1.2.3", ".", "1e3"] {
            assert_eq!(parse_hundredths(raw), None, "{raw}");
        }
    }

    #[test]
    fn formats_for_prefill() {
        assert_eq!(format_hundredths(1250), "12.50");
        assert_eq!(format_hundredths(5), "0.05");
        assert_eq!(format_hundredths(-150), "-1.50");
    }
}

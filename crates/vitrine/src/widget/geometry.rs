//! Length parsing for computed-style values.

/// Parse the leading integer of a CSS length the way the browser's
/// `parseInt` does: `"16px"` is 16, `"1.5rem"` is 1, `"normal"` is `None`.
pub fn parse_css_px(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Parsed gap in pixels, `fallback` when unparsable or zero.
pub fn gap_or(value: &str, fallback: f64) -> f64 {
    match parse_css_px(value) {
        Some(0) | None => fallback,
        Some(px) => px as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_css_px() {
        assert_eq!(parse_css_px("16px"), Some(16));
        assert_eq!(parse_css_px("  24px"), Some(24));
        assert_eq!(parse_css_px("1.5rem"), Some(1));
        assert_eq!(parse_css_px("-4px"), Some(-4));
        assert_eq!(parse_css_px("0px"), Some(0));
        assert_eq!(parse_css_px("normal"), None);
        assert_eq!(parse_css_px(""), None);
        assert_eq!(parse_css_px("px"), None);
    }

    #[test]
    fn test_gap_or() {
        assert_eq!(gap_or("12px", 8.0), 12.0);
        assert_eq!(gap_or("0px", 8.0), 8.0);
        assert_eq!(gap_or("normal", 8.0), 8.0);
    }
}

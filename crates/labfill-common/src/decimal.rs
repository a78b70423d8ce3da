//! Decimal parsing for operator input and analyzer exports.
//!
//! Analyzers and operators write decimals with either `.` or `,` as the
//! separator (`5.5` and `5,5` are the same value).

/// Parses a decimal that uses `.` or `,` as separator.
///
/// Returns `None` for empty or unparsable input.
///
/// # Examples
///
/// ```
/// use labfill_common::parse_decimal;
///
/// assert_eq!(parse_decimal("5,5"), Some(5.5));
/// assert_eq!(parse_decimal(" 8.5 "), Some(8.5));
/// assert_eq!(parse_decimal("abc"), None);
/// ```
pub fn parse_decimal(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replacen(',', ".", 1);
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns true if the text is a zero-equivalent decimal (`0`, `0.0`, `0,00`, `00`).
pub fn is_zero_decimal(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed.chars().any(|ch| ch == '0')
        && trimmed.chars().all(|ch| matches!(ch, '0' | '.' | ','))
}

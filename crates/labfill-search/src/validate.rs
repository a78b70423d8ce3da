//! Entry validation, run before a round touches the table.

use std::sync::LazyLock;

use regex::Regex;

use labfill_common::{is_zero_decimal, parse_decimal};

use crate::error::ValidationError;

/// Unsigned decimal with `.` or `,` as separator.
static DECIMAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+([.,]\d+)?$").expect("Invalid decimal regex"));

/// Validates the value typed into `field` for a sequential round.
pub fn validate_entry(field: &str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }
    let malformed = || ValidationError::Malformed {
        field: field.to_string(),
        value: trimmed.to_string(),
    };
    if !DECIMAL_REGEX.is_match(trimmed) {
        return Err(malformed());
    }
    if is_zero_decimal(trimmed) {
        return Err(ValidationError::Zero {
            field: field.to_string(),
        });
    }
    parse_decimal(trimmed).ok_or_else(malformed)
}

/// Validates the identity query for a substring round and uppercases it.
pub fn validate_query(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_point_and_comma() {
        assert_eq!(validate_entry("GLU", "5.5"), Ok(5.5));
        assert_eq!(validate_entry("GLU", "5,5"), Ok(5.5));
        assert_eq!(validate_entry("PLT", " 250 "), Ok(250.0));
    }

    #[test]
    fn rejects_malformed_values() {
        for raw in ["abc", "5.", ",5", "-1", "1e3", "5.5.5", "5 5"] {
            assert!(
                matches!(
                    validate_entry("GLU", raw),
                    Err(ValidationError::Malformed { .. })
                ),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn rejects_zero_equivalents() {
        for raw in ["0", "0.0", "0,00", "00"] {
            assert_eq!(
                validate_entry("GLU", raw),
                Err(ValidationError::Zero {
                    field: "GLU".to_string()
                })
            );
        }
    }

    #[test]
    fn rejects_empty_entry() {
        assert!(matches!(
            validate_entry("GLU", "  "),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn query_is_uppercased() {
        assert_eq!(validate_query("ID", " petr "), Ok("PETR".to_string()));
        assert!(validate_query("ID", "").is_err());
    }
}

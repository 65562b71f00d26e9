//! Field-level payload checks
//!
//! Shape and primitive types are enforced by deserialization; these helpers
//! cover the rules serde cannot express.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::AppError;

/// Longest accepted text field
pub const MAX_TEXT_LEN: usize = 100;

/// Validation error for creation payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} allows at most {scale} decimal places")]
    TooPrecise { field: &'static str, scale: u32 },

    #[error("{field} must be below {limit}")]
    OutOfRange { field: &'static str, limit: Decimal },

    #[error("{field} must be a positive identifier")]
    InvalidId { field: &'static str },

    #[error("{later} must not precede {earlier}")]
    DateOrder {
        earlier: &'static str,
        later: &'static str,
    },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Non-blank text of bounded length
pub fn text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(())
}

/// Text with exactly one `@` separating non-empty parts
pub fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    text(field, value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "not an email address",
        }),
    }
}

pub fn non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

/// Fits a `numeric(precision, scale)` column without rounding.
///
/// Trailing zeros do not count toward the scale.
pub fn decimal(
    field: &'static str,
    value: Decimal,
    precision: u32,
    scale: u32,
) -> Result<(), ValidationError> {
    if value.normalize().scale() > scale {
        return Err(ValidationError::TooPrecise { field, scale });
    }
    let limit = Decimal::from(10_i64.pow(precision - scale));
    if value.abs() >= limit {
        return Err(ValidationError::OutOfRange { field, limit });
    }
    Ok(())
}

pub fn id(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::InvalidId { field });
    }
    Ok(())
}

pub fn optional_id(field: &'static str, value: Option<i32>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| id(field, v))
}

pub fn date_order(
    earlier: (&'static str, NaiveDate),
    later: (&'static str, NaiveDate),
) -> Result<(), ValidationError> {
    if later.1 < earlier.1 {
        return Err(ValidationError::DateOrder {
            earlier: earlier.0,
            later: later.0,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_text_rules() {
        assert!(text("place", "HQ").is_ok());
        assert_eq!(text("place", "   "), Err(ValidationError::Empty { field: "place" }));
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert!(matches!(text("place", &long), Err(ValidationError::TooLong { .. })));
    }

    #[test]
    fn test_email_rules() {
        assert!(email("email", "ana@example.com").is_ok());
        assert!(email("email", "ana.example.com").is_err());
        assert!(email("email", "@example.com").is_err());
        assert!(email("email", "ana@").is_err());
        assert!(email("email", "a@b@c").is_err());
    }

    #[test]
    fn test_amounts_and_ids() {
        assert!(non_negative("salary", Decimal::ZERO).is_ok());
        assert!(non_negative("salary", Decimal::from_str("-0.01").unwrap()).is_err());
        assert!(id("department_id", 0).is_err());
        assert!(optional_id("manager_id", None).is_ok());
        assert!(optional_id("manager_id", Some(-3)).is_err());
    }

    #[test]
    fn test_decimal_scale() {
        let dec = |s: &str| Decimal::from_str(s).unwrap();
        assert!(decimal("salary", dec("48000.50"), 12, 2).is_ok());
        assert!(decimal("salary", dec("48000.500"), 12, 2).is_ok());
        assert_eq!(
            decimal("salary", dec("48000.129"), 12, 2),
            Err(ValidationError::TooPrecise { field: "salary", scale: 2 })
        );
    }

    #[test]
    fn test_decimal_integer_digits() {
        let dec = |s: &str| Decimal::from_str(s).unwrap();
        assert!(decimal("amount", dec("9999999999.99"), 12, 2).is_ok());
        assert!(matches!(
            decimal("amount", dec("10000000000"), 12, 2),
            Err(ValidationError::OutOfRange { field: "amount", .. })
        ));
        assert!(decimal("amount", dec("-10000000000"), 12, 2).is_err());
        assert!(decimal("budget", dec("999999999999.99"), 14, 2).is_ok());
        assert!(decimal("budget", dec("123456789012345.12"), 14, 2).is_err());
        assert_eq!(
            decimal("salary", dec("10000000000"), 12, 2).unwrap_err().to_string(),
            "salary must be below 10000000000"
        );
    }

    #[test]
    fn test_date_order_message() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let err = date_order(("start_date", start), ("end_date", end)).unwrap_err();
        assert_eq!(err.to_string(), "end_date must not precede start_date");
        assert!(date_order(("start_date", start), ("end_date", start)).is_ok());
    }
}

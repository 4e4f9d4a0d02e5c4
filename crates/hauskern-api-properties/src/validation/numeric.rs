//! Numeric input normalization.
//!
//! Unit numerics arrive from forms and from document extraction as JSON
//! numbers, numeric strings, empty strings or null. Each optional numeric
//! attribute is normalized independently before persistence: empty string and
//! null become SQL NULL, everything else must parse to the attribute's target
//! kind. Non-numeric input fails closed with a field-identifying
//! [`ApiPropertiesError::Validation`] — it is never stored as a sentinel.

use crate::error::ApiPropertiesError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// A raw numeric value as found in an incoming snapshot.
///
/// Untagged: `75.5`, `1995`, `"75.5"` and `""` all deserialize successfully;
/// which of them are acceptable is decided during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum NumericInput {
    /// A JSON integer.
    Int(i64),
    /// A JSON float.
    Float(f64),
    /// A string, possibly empty, possibly numeric.
    Text(String),
}

impl NumericInput {
    fn describe(&self) -> String {
        match self {
            NumericInput::Int(i) => i.to_string(),
            NumericInput::Float(f) => f.to_string(),
            NumericInput::Text(s) => s.clone(),
        }
    }
}

fn invalid(field: &'static str, raw: &NumericInput) -> ApiPropertiesError {
    ApiPropertiesError::Validation {
        field,
        value: raw.describe(),
    }
}

/// Normalize an optional decimal attribute (areas, shares, room counts).
///
/// # Errors
///
/// Returns [`ApiPropertiesError::Validation`] for non-numeric text and for
/// non-finite floats.
pub fn optional_decimal(
    field: &'static str,
    raw: Option<&NumericInput>,
) -> Result<Option<Decimal>, ApiPropertiesError> {
    let Some(raw) = raw else { return Ok(None) };
    match raw {
        NumericInput::Int(i) => Ok(Some(Decimal::from(*i))),
        NumericInput::Float(f) => Decimal::from_f64(*f)
            .map(Some)
            .ok_or_else(|| invalid(field, raw)),
        NumericInput::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            Decimal::from_str(trimmed)
                .map(Some)
                .map_err(|_| invalid(field, raw))
        }
    }
}

/// Normalize an optional integer attribute (construction year).
///
/// Accepts JSON integers, integral floats (extraction output frequently
/// carries `1995.0`) and integer strings.
///
/// # Errors
///
/// Returns [`ApiPropertiesError::Validation`] for fractional values,
/// out-of-range values and non-numeric text.
pub fn optional_int(
    field: &'static str,
    raw: Option<&NumericInput>,
) -> Result<Option<i32>, ApiPropertiesError> {
    let Some(raw) = raw else { return Ok(None) };
    match raw {
        NumericInput::Int(i) => i32::try_from(*i).map(Some).map_err(|_| invalid(field, raw)),
        NumericInput::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(f) {
                Ok(Some(*f as i32))
            } else {
                Err(invalid(field, raw))
            }
        }
        NumericInput::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i32>()
                .map(Some)
                .map_err(|_| invalid(field, raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NumericInput {
        NumericInput::Text(s.to_string())
    }

    #[test]
    fn missing_value_is_null() {
        assert_eq!(optional_decimal("sizeSqM", None).unwrap(), None);
        assert_eq!(optional_int("constructionYear", None).unwrap(), None);
    }

    #[test]
    fn empty_string_is_null() {
        assert_eq!(optional_decimal("sizeSqM", Some(&text(""))).unwrap(), None);
        assert_eq!(optional_decimal("sizeSqM", Some(&text("  "))).unwrap(), None);
        assert_eq!(
            optional_int("constructionYear", Some(&text(""))).unwrap(),
            None
        );
    }

    #[test]
    fn decimal_parses_from_string() {
        let parsed = optional_decimal("sizeSqM", Some(&text("75.5"))).unwrap();
        assert_eq!(parsed, Some(Decimal::from_str("75.5").unwrap()));
    }

    #[test]
    fn decimal_parses_from_json_numbers() {
        assert_eq!(
            optional_decimal("rooms", Some(&NumericInput::Float(3.5))).unwrap(),
            Some(Decimal::from_str("3.5").unwrap())
        );
        assert_eq!(
            optional_decimal("rooms", Some(&NumericInput::Int(4))).unwrap(),
            Some(Decimal::from(4))
        );
    }

    #[test]
    fn decimal_rejects_non_numeric_text() {
        let err = optional_decimal("sizeSqM", Some(&text("abc"))).unwrap_err();
        match err {
            ApiPropertiesError::Validation { field, value } => {
                assert_eq!(field, "sizeSqM");
                assert_eq!(value, "abc");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn decimal_rejects_nan() {
        assert!(optional_decimal("sizeSqM", Some(&NumericInput::Float(f64::NAN))).is_err());
    }

    #[test]
    fn int_parses_from_all_shapes() {
        assert_eq!(
            optional_int("constructionYear", Some(&NumericInput::Int(1995))).unwrap(),
            Some(1995)
        );
        assert_eq!(
            optional_int("constructionYear", Some(&NumericInput::Float(1995.0))).unwrap(),
            Some(1995)
        );
        assert_eq!(
            optional_int("constructionYear", Some(&text("1995"))).unwrap(),
            Some(1995)
        );
    }

    #[test]
    fn int_rejects_fractional_and_garbage() {
        assert!(optional_int("constructionYear", Some(&NumericInput::Float(1995.5))).is_err());
        assert!(optional_int("constructionYear", Some(&text("next year"))).is_err());
        assert!(optional_int("constructionYear", Some(&text("1995.5"))).is_err());
    }

    #[test]
    fn int_rejects_out_of_range() {
        assert!(optional_int("constructionYear", Some(&NumericInput::Int(i64::MAX))).is_err());
    }

    #[test]
    fn untagged_deserialization_covers_all_shapes() {
        let int: NumericInput = serde_json::from_str("1995").unwrap();
        assert_eq!(int, NumericInput::Int(1995));
        let float: NumericInput = serde_json::from_str("75.5").unwrap();
        assert_eq!(float, NumericInput::Float(75.5));
        let string: NumericInput = serde_json::from_str("\"75.5\"").unwrap();
        assert_eq!(string, NumericInput::Text("75.5".to_string()));
    }
}

//! Field checks run before anything is persisted.
//!
//! Form and JSON inputs arrive as loose strings or JSON values; these helpers
//! turn them into typed values or a [`ValidationError`].

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use crate::constants::orders::UNKNOWN_PRODUCT;
use crate::domain::ValidationError;
use crate::models::order::OrderItemInput;

/// Present and not blank. Returns the value as given.
pub fn require<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::missing(field)),
    }
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::invalid_date(field))
}

/// `YYYY-MM-DD`, or `DD-MM-YYYY` when the leading segment is not four characters.
pub fn parse_flexible_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    let Some((first, _)) = value.split_once('-') else {
        return Err(ValidationError::invalid_date(field));
    };

    let format = if first.len() == 4 { "%Y-%m-%d" } else { "%d-%m-%Y" };
    NaiveDate::parse_from_str(value, format).map_err(|_| ValidationError::invalid_date(field))
}

/// Strict 24-hour `HH:MM`.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    if value.len() != 5 || value.as_bytes()[2] != b':' {
        return Err(ValidationError::invalid_time(field));
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ValidationError::invalid_time(field))
}

pub fn parse_persons(value: &str) -> Result<i32, ValidationError> {
    let persons: i32 = value.trim().parse().map_err(|_| {
        ValidationError::invalid_number("persons", "Number of persons must be a whole number")
    })?;
    check_persons(persons)
}

/// Like [`parse_persons`] for JSON, where the count may be a number or a string.
pub fn persons_from_json(value: &Value) -> Result<i32, ValidationError> {
    match value {
        Value::Number(n) => {
            let persons = n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| {
                    ValidationError::invalid_number(
                        "persons",
                        "Number of persons must be a whole number",
                    )
                })?;
            check_persons(persons)
        }
        Value::String(s) => parse_persons(s),
        Value::Null => Err(ValidationError::missing("persons")),
        _ => Err(ValidationError::invalid_number(
            "persons",
            "Number of persons must be a whole number",
        )),
    }
}

fn check_persons(persons: i32) -> Result<i32, ValidationError> {
    if persons <= 0 {
        return Err(ValidationError::invalid_number(
            "persons",
            "Number of persons must be greater than 0",
        ));
    }
    Ok(persons)
}

pub fn passwords_match(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::mismatch(
            "confirm_password",
            "Passwords do not match",
        ));
    }
    Ok(())
}

/// JSON scalar as text. Numbers and booleans are stringified; null is absent.
#[must_use]
pub fn json_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Number or numeric string, anything else falls back to `default`.
#[must_use]
pub fn lenient_f64(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(default)
}

/// Integer or integer string, anything else falls back to `default`.
/// Fractional numbers are truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn lenient_i32(value: Option<&Value>, default: i32) -> i32 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < f64::from(i32::MAX))
                    .map(|f| f.trunc() as i32)
            }),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.unwrap_or(default)
}

/// Optional account id: a positive integer or integer string.
#[must_use]
pub fn optional_id(value: Option<&Value>) -> Option<i32> {
    let id = lenient_i32(value, 0);
    (id > 0).then_some(id)
}

/// Unparsable totals count as 0. Negative totals are rejected.
pub fn total_price(value: Option<&Value>) -> Result<f64, ValidationError> {
    let total = lenient_f64(value, 0.0);
    if total < 0.0 {
        return Err(ValidationError::invalid_number(
            "total_price",
            "Total price cannot be negative",
        ));
    }
    Ok(total)
}

/// One coerced line item, or `None` when the entry is not an object.
#[must_use]
pub fn order_item(value: &Value) -> Option<OrderItemInput> {
    let item = value.as_object()?;

    Some(OrderItemInput {
        product_name: json_text(item.get("product_name"))
            .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
        price: lenient_f64(item.get("price"), 0.0),
        quantity: lenient_i32(item.get("quantity"), 1),
    })
}

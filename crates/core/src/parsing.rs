//! Lenient parsing of client-supplied numbers and dates.
//!
//! Form-driven clients send numeric fields either as JSON numbers or as
//! strings (`"12.5"`, `"12,5"`, `""`). [`FlexNumber`] accepts both shapes at
//! deserialization time; the functions below turn it into a typed value and
//! report malformed input as [`CoreError::Validation`]. Whether an absent
//! value defaults or is rejected is left to the caller.

use chrono::{NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// A numeric field as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexNumber {
    Number(f64),
    Text(String),
}

impl FlexNumber {
    /// Interpret the raw value. Blank text yields `Ok(None)`.
    pub fn to_f64(&self) -> Result<Option<f64>, String> {
        let value = match self {
            FlexNumber::Number(n) => *n,
            FlexNumber::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                // Accept a decimal comma when no dot is present ("12,5").
                let normalized = if trimmed.contains('.') {
                    trimmed.to_string()
                } else {
                    trimmed.replace(',', ".")
                };
                normalized
                    .parse::<f64>()
                    .map_err(|_| format!("'{raw}' is not a number"))?
            }
        };
        if value.is_finite() {
            Ok(Some(value))
        } else {
            Err("value must be a finite number".to_string())
        }
    }
}

impl From<f64> for FlexNumber {
    fn from(value: f64) -> Self {
        FlexNumber::Number(value)
    }
}

impl From<&str> for FlexNumber {
    fn from(value: &str) -> Self {
        FlexNumber::Text(value.to_string())
    }
}

/// Parse an optional numeric field. Missing or blank values yield `None`.
pub fn optional_f64(field: &str, raw: Option<&FlexNumber>) -> Result<Option<f64>, CoreError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .to_f64()
            .map_err(|e| CoreError::Validation(format!("{field}: {e}"))),
    }
}

/// Parse a numeric field that must be present.
pub fn required_f64(field: &str, raw: Option<&FlexNumber>) -> Result<f64, CoreError> {
    optional_f64(field, raw)?
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Parse a numeric field, treating a missing or blank value as zero.
pub fn f64_or_zero(field: &str, raw: Option<&FlexNumber>) -> Result<f64, CoreError> {
    Ok(optional_f64(field, raw)?.unwrap_or(0.0))
}

/// Parse a numeric field that must be present and strictly positive.
pub fn positive_f64(field: &str, raw: Option<&FlexNumber>) -> Result<f64, CoreError> {
    let value = required_f64(field, raw)?;
    if value <= 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(value)
}

/// Parse an optional numeric field that must not be negative when present.
pub fn optional_non_negative(
    field: &str,
    raw: Option<&FlexNumber>,
) -> Result<Option<f64>, CoreError> {
    match optional_f64(field, raw)? {
        Some(v) if v < 0.0 => Err(CoreError::Validation(format!(
            "{field} must not be negative"
        ))),
        other => Ok(other),
    }
}

/// Parse an optional reference to another row.
///
/// The value must be a whole, positive number; `"3"` and `3.0` are accepted.
pub fn optional_id(field: &str, raw: Option<&FlexNumber>) -> Result<Option<DbId>, CoreError> {
    match optional_f64(field, raw)? {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 && v >= 1.0 && v <= i64::MAX as f64 => Ok(Some(v as DbId)),
        Some(v) => Err(CoreError::Validation(format!(
            "{field}: {v} is not a valid id"
        ))),
    }
}

/// Parse a reference that must be present.
pub fn required_id(field: &str, raw: Option<&FlexNumber>) -> Result<DbId, CoreError> {
    optional_id(field, raw)?.ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Parse a percentage in the `0..=100` range. Missing means zero.
pub fn percentage(field: &str, raw: Option<&FlexNumber>) -> Result<f64, CoreError> {
    let value = f64_or_zero(field, raw)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{field} must be between 0 and 100"
        )));
    }
    Ok(value)
}

/// Parse an optional date.
///
/// Accepts `YYYY-MM-DD` (interpreted as midnight UTC) or a full RFC 3339
/// timestamp. Blank input yields `None`.
pub fn optional_date(field: &str, raw: Option<&str>) -> Result<Option<Timestamp>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CoreError::Validation(format!("{field}: invalid date '{raw}'")))?;
        return Ok(Some(Utc.from_utc_datetime(&midnight)));
    }

    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| {
            CoreError::Validation(format!(
                "{field}: '{raw}' is not a date (expected YYYY-MM-DD)"
            ))
        })
}

/// Parse an optional date, falling back to `now` when absent.
pub fn date_or_now(field: &str, raw: Option<&str>) -> Result<Timestamp, CoreError> {
    Ok(optional_date(field, raw)?.unwrap_or_else(Utc::now))
}

/// Trim a required text field and reject it when blank.
pub fn required_text(field: &str, raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank becomes `None`.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Datelike;

    fn text(s: &str) -> FlexNumber {
        FlexNumber::Text(s.to_string())
    }

    #[test]
    fn number_passes_through() {
        assert_eq!(
            optional_f64("kilos", Some(&FlexNumber::Number(12.5))).unwrap(),
            Some(12.5)
        );
    }

    #[test]
    fn numeric_text_is_parsed() {
        assert_eq!(optional_f64("kilos", Some(&text(" 42 "))).unwrap(), Some(42.0));
        assert_eq!(optional_f64("kilos", Some(&text("12,5"))).unwrap(), Some(12.5));
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(optional_f64("kilos", Some(&text(""))).unwrap(), None);
        assert_eq!(optional_f64("kilos", None).unwrap(), None);
        assert_eq!(f64_or_zero("kilos", Some(&text("  "))).unwrap(), 0.0);
    }

    #[test]
    fn garbage_is_rejected_with_field_name() {
        let err = optional_f64("monto", Some(&text("mucho"))).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.starts_with("monto"));
    }

    #[test]
    fn required_rejects_missing() {
        assert_matches!(
            required_f64("monto", None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(positive_f64("monto", Some(&FlexNumber::Number(0.0))).is_err());
        assert!(positive_f64("monto", Some(&FlexNumber::Number(-3.0))).is_err());
        assert_eq!(positive_f64("monto", Some(&text("3"))).unwrap(), 3.0);
    }

    #[test]
    fn ids_must_be_whole_positive_numbers() {
        assert_eq!(optional_id("lote_id", Some(&text("7"))).unwrap(), Some(7));
        assert_eq!(optional_id("lote_id", Some(&text(""))).unwrap(), None);
        assert!(optional_id("lote_id", Some(&FlexNumber::Number(1.5))).is_err());
        assert!(optional_id("lote_id", Some(&FlexNumber::Number(0.0))).is_err());
    }

    #[test]
    fn percentage_range_is_enforced() {
        assert_eq!(percentage("porcentaje", Some(&text("30"))).unwrap(), 30.0);
        assert!(percentage("porcentaje", Some(&FlexNumber::Number(130.0))).is_err());
        assert_eq!(percentage("porcentaje", None).unwrap(), 0.0);
    }

    #[test]
    fn plain_date_is_midnight_utc() {
        let ts = optional_date("fecha", Some("2024-03-15")).unwrap().unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 3, 15));
        assert_eq!(ts.timestamp() % 86_400, 0);
    }

    #[test]
    fn rfc3339_date_is_accepted() {
        let ts = optional_date("fecha", Some("2024-03-15T10:30:00-03:00"))
            .unwrap()
            .unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-15T13:30:00+00:00");
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(optional_date("fecha", Some("15/03/2024")).is_err());
        assert_eq!(optional_date("fecha", Some("")).unwrap(), None);
    }

    #[test]
    fn flex_number_deserializes_from_both_shapes() {
        let n: FlexNumber = serde_json::from_str("3.5").unwrap();
        let t: FlexNumber = serde_json::from_str("\"3.5\"").unwrap();
        assert_eq!(n.to_f64().unwrap(), t.to_f64().unwrap());
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("caravana", "  BF-101 ").unwrap(), "BF-101");
        assert!(required_text("caravana", "   ").is_err());
        assert_eq!(optional_text(Some(" ")), None);
    }
}

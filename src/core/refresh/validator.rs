//! Validation and normalization of raw country records
//!
//! Rules run in a fixed order and stop at the first failure:
//!
//! 1. `name` is present, not blank, and a string
//! 2. `population` is present, an integer, and at least 0
//! 3. a non-empty `currencies` list has a string `code` on its first entry

use crate::domain::{CurrencyCode, FieldErrors, NormalizedRecord, RawCountryRecord};
use serde_json::Value;

/// Validate one raw record
///
/// # Errors
///
/// Returns the failing field and its message.
///
/// # Example
///
/// ```
/// use meridian::core::refresh::validator::validate;
/// use meridian::domain::RawCountryRecord;
///
/// let raw: RawCountryRecord = serde_json::from_str(
///     r#"{"name": "Italy", "population": 60000000, "currencies": [{"code": "EUR"}]}"#,
/// ).unwrap();
///
/// let record = validate(&raw).unwrap();
/// assert_eq!(record.currency_code.unwrap().as_str(), "EUR");
/// ```
pub fn validate(raw: &RawCountryRecord) -> Result<NormalizedRecord, FieldErrors> {
    let name = validate_name(&raw.name)?;
    let population = validate_population(&raw.population)?;
    let currency_code = resolve_currency_code(&raw.currencies)?;

    Ok(NormalizedRecord {
        name,
        capital: optional_string(&raw.capital),
        region: optional_string(&raw.region),
        population,
        currency_code,
        flag: optional_string(&raw.flag),
    })
}

/// A value the `required` rule rejects
fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn validate_name(value: &Value) -> Result<String, FieldErrors> {
    if is_missing(value) {
        return Err(FieldErrors::single("name", "The name field is required."));
    }

    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| FieldErrors::single("name", "The name field must be a string."))
}

fn validate_population(value: &Value) -> Result<i64, FieldErrors> {
    if is_missing(value) {
        return Err(FieldErrors::single(
            "population",
            "The population field is required.",
        ));
    }

    let population = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        FieldErrors::single("population", "The population field must be an integer.")
    })?;

    if population < 0 {
        return Err(FieldErrors::single(
            "population",
            "The population field must be at least 0.",
        ));
    }

    Ok(population)
}

/// First listed currency code, if any currencies are listed
fn resolve_currency_code(value: &Value) -> Result<Option<CurrencyCode>, FieldErrors> {
    let first = match value {
        Value::Null => return Ok(None),
        Value::Array(items) => match items.first() {
            None => return Ok(None),
            Some(first) => first,
        },
        Value::Object(map) if map.is_empty() => return Ok(None),
        _ => return Err(FieldErrors::single("currency_code", "is required")),
    };

    // Any string is kept, even a blank one; it simply has no rate
    match first.get("code").and_then(Value::as_str) {
        Some(code) => Ok(Some(CurrencyCode::new(code))),
        None => Err(FieldErrors::single("currency_code", "is required")),
    }
}

fn optional_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn raw(value: Value) -> RawCountryRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_record_is_normalized() {
        let record = validate(&raw(json!({
            "name": "Nigeria",
            "capital": "Abuja",
            "region": "Africa",
            "population": 206139589,
            "flag": "https://flags.example/ng.svg",
            "currencies": [{"code": "NGN"}, {"code": "USD"}]
        })))
        .unwrap();

        assert_eq!(record.name, "Nigeria");
        assert_eq!(record.capital.as_deref(), Some("Abuja"));
        assert_eq!(record.population, 206139589);
        assert_eq!(record.currency_code, Some(CurrencyCode::new("NGN")));
        assert_eq!(record.flag.as_deref(), Some("https://flags.example/ng.svg"));
    }

    #[test_case(json!({"population": 1}), "name", "The name field is required." ; "missing name")]
    #[test_case(json!({"name": "   ", "population": 1}), "name", "The name field is required." ; "blank name")]
    #[test_case(json!({"name": 42, "population": 1}), "name", "The name field must be a string." ; "numeric name")]
    #[test_case(json!({"name": "X"}), "population", "The population field is required." ; "missing population")]
    #[test_case(json!({"name": "X", "population": -1}), "population", "The population field must be at least 0." ; "negative population")]
    #[test_case(json!({"name": "X", "population": 1.5}), "population", "The population field must be an integer." ; "fractional population")]
    #[test_case(json!({"name": "X", "population": "lots"}), "population", "The population field must be an integer." ; "text population")]
    #[test_case(json!({"name": "X", "population": 1, "currencies": [{"name": "Dollar"}]}), "currency_code", "is required" ; "currency without code")]
    #[test_case(json!({"name": "X", "population": 1, "currencies": [{"code": null}]}), "currency_code", "is required" ; "null currency code")]
    fn test_rejected_records(value: Value, field: &str, message: &str) {
        let errors = validate(&raw(value)).unwrap_err();
        assert_eq!(errors.get(field), Some(message));
        assert_eq!(errors.fields().count(), 1);
    }

    #[test]
    fn test_name_checked_before_population() {
        let errors = validate(&raw(json!({"name": null, "population": -5}))).unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("population").is_none());
    }

    #[test_case(json!(null) ; "absent")]
    #[test_case(json!([]) ; "empty list")]
    fn test_no_currencies_normalizes_to_none(currencies: Value) {
        let record = validate(&raw(json!({"name": "Antarctica", "population": 1000, "currencies": currencies})))
            .unwrap();
        assert_eq!(record.currency_code, None);
    }

    #[test_case("" ; "empty code")]
    #[test_case("  " ; "whitespace code")]
    fn test_blank_currency_code_is_kept(code: &str) {
        let record = validate(&raw(json!({
            "name": "Blankland",
            "population": 10,
            "currencies": [{"code": code}]
        })))
        .unwrap();

        assert_eq!(record.currency_code, Some(CurrencyCode::new(code)));
    }

    #[test]
    fn test_population_numeric_string_is_accepted() {
        let record = validate(&raw(json!({"name": "X", "population": "1200"}))).unwrap();
        assert_eq!(record.population, 1200);
    }

    #[test]
    fn test_zero_population_is_valid() {
        let record = validate(&raw(json!({"name": "Bouvet Island", "population": 0}))).unwrap();
        assert_eq!(record.population, 0);
    }

    #[test]
    fn test_non_string_optional_fields_become_none() {
        let record = validate(&raw(json!({
            "name": "X",
            "population": 1,
            "capital": ["A", "B"],
            "region": 7,
            "flag": false
        })))
        .unwrap();

        assert_eq!(record.capital, None);
        assert_eq!(record.region, None);
        assert_eq!(record.flag, None);
    }
}

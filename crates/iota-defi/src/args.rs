//! Argument decoding
//!
//! Agent hosts send list parameters either as JSON arrays or as JSON text
//! (`"[\"IOTA\", \"BTC\"]"`). Everything that arrives loosely typed is turned
//! into typed values here, so the query layer only ever sees typed input.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{DefiError, Result};

/// Decode a list of asset symbols. Absent or `null` decodes to an empty list.
pub fn symbols(value: Option<&Value>, parameter: &'static str) -> Result<Vec<String>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    let decoded = match value {
        Value::String(text) => {
            serde_json::from_str(text).map_err(|_| DefiError::MalformedInput(parameter))?
        }
        other => other.clone(),
    };

    serde_json::from_value::<Option<Vec<String>>>(decoded)
        .map(Option::unwrap_or_default)
        .map_err(|_| DefiError::MalformedInput(parameter))
}

/// Decode an optional number given either as a JSON number or numeric text
pub fn decimal(value: Option<&Value>, parameter: &'static str) -> Result<Option<Decimal>> {
    value
        .map(|v| {
            serde_json::from_value::<Decimal>(v.clone())
                .map_err(|_| DefiError::MalformedInput(parameter))
        })
        .transpose()
}

/// Decode an optional string. Empty text counts as absent.
pub fn text<'a>(value: Option<&'a Value>, parameter: &'static str) -> Result<Option<&'a str>> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(DefiError::MalformedInput(parameter)),
    }
}

//! Request ingest + validation.
//!
//! The payload arrives as loosely-typed JSON. We coerce it into a [`FitRequest`]:
//!
//! - arrays default to empty when missing or `null`
//! - scalars default to `1.0` when missing or `null`
//! - numbers may also arrive as numeric strings (`"2.5"`)
//!
//! Everything else (wrong types, non-finite values, mismatched lengths, fewer than
//! two points) is a [`ValidationError`]. No fit is attempted on invalid input.

use serde_json::{Map, Value};

use crate::domain::{DEFAULT_SCALAR, FitRequest};
use crate::error::ValidationError;

/// Minimum number of points for a two-parameter model.
pub const MIN_POINTS: usize = 2;

/// Parse and validate a raw request body.
pub fn parse_request_bytes(body: &[u8]) -> Result<FitRequest, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;
    parse_request(&value)
}

/// Validate an already-parsed JSON payload.
pub fn parse_request(value: &Value) -> Result<FitRequest, ValidationError> {
    let Some(obj) = value.as_object() else {
        return Err(ValidationError::NotAnObject {
            found: json_type_name(value),
        });
    };

    let request = FitRequest {
        shear_rates: number_array(obj, "shear_rates")?,
        shear_stresses: number_array(obj, "shear_stresses")?,
        flow_rate: scalar(obj, "flow_rate")?,
        diameter: scalar(obj, "diameter")?,
        density: scalar(obj, "density")?,
    };

    check_request(&request)?;
    Ok(request)
}

/// Structural checks shared by JSON ingest and [`FitRequest::new`].
pub fn check_request(request: &FitRequest) -> Result<(), ValidationError> {
    for (field, values) in [
        ("shear_rates", &request.shear_rates),
        ("shear_stresses", &request.shear_stresses),
    ] {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite { field, index });
        }
    }

    for (field, value) in [
        ("flow_rate", request.flow_rate),
        ("diameter", request.diameter),
        ("density", request.density),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteScalar { field, value });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeScalar { field, value });
        }
    }

    let rates = request.shear_rates.len();
    let stresses = request.shear_stresses.len();
    if rates != stresses {
        return Err(ValidationError::LengthMismatch { rates, stresses });
    }
    if rates < MIN_POINTS {
        return Err(ValidationError::TooFewPoints { n: rates });
    }

    Ok(())
}

fn number_array(obj: &Map<String, Value>, field: &'static str) -> Result<Vec<f64>, ValidationError> {
    let items = match obj.get(field) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ValidationError::NotAnArray {
                field,
                found: json_type_name(other),
            });
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            coerce_number(item).ok_or_else(|| ValidationError::NonNumeric {
                field,
                index,
                value: item.to_string(),
            })
        })
        .collect()
}

fn scalar(obj: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(DEFAULT_SCALAR),
        Some(item) => coerce_number(item).ok_or_else(|| ValidationError::NonNumericScalar {
            field,
            value: item.to_string(),
        }),
    }
}

/// JSON number, or a string that parses as one.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

use crate::errors::{Error, Result};
use serde_json::Value;

/// A validated submission: both fields present and numeric-coercible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Submission {
    pub temperature: f64,
    pub humidity: f64,
}

/// Parses an untrusted submission body. Fields may arrive as JSON numbers or
/// as strings holding a number; anything else is rejected before the store is
/// touched. Values are not range-checked: an implausible reading is stored
/// as reported.
pub fn parse_submission(body: &Value) -> Result<Submission> {
    Ok(Submission {
        temperature: numeric_field(body, "temp")?,
        humidity: numeric_field(body, "humidity")?,
    })
}

fn numeric_field(body: &Value, field: &str) -> Result<f64> {
    let value = body
        .get(field)
        .ok_or_else(|| Error::InvalidPayload(format!("missing field `{}`", field)))?;

    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::InvalidPayload(format!("field `{}` is not a number", field))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidPayload(format!("field `{}` is not a number", field))),
        _ => Err(Error::InvalidPayload(format!(
            "field `{}` is not a number",
            field
        ))),
    }
}

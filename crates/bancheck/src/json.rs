//! Entry points for untyped input.
//!
//! Tests and options arrive as [`serde_json::Value`] (decoded from JSON or
//! YAML by the caller). Both must be mappings; anything else is rejected
//! with [`BancheckError::InvalidArgument`] before the snapshot file is
//! touched.

use crate::config::{OptionOverrides, Options};
use crate::format::Value;
use crate::result::{BancheckError, BancheckResult};
use crate::session::{AcceptReport, Runner, Tests, VerifyReport};

/// Convert a JSON object of name -> value into [`Tests`]
pub fn tests_from_json(tests: &serde_json::Value) -> BancheckResult<Tests> {
    let serde_json::Value::Object(map) = tests else {
        return Err(BancheckError::invalid_argument(format!(
            "the passed tests must be an object, got {}",
            json_kind(tests)
        )));
    };
    Ok(map
        .iter()
        .map(|(name, value)| (name.clone(), Value::from(value.clone())))
        .collect())
}

/// Convert optional JSON options into overrides
pub fn overrides_from_json(options: Option<&serde_json::Value>) -> BancheckResult<OptionOverrides> {
    match options {
        None => Ok(OptionOverrides::default()),
        Some(value @ serde_json::Value::Object(_)) => {
            serde_json::from_value(value.clone()).map_err(|e| {
                BancheckError::invalid_argument(format!("the passed options are invalid: {e}"))
            })
        }
        Some(other) => Err(BancheckError::invalid_argument(format!(
            "the passed options must be an object or left out, got {}",
            json_kind(other)
        ))),
    }
}

/// Validate input and resolve the effective options
pub fn prepare(
    tests: &serde_json::Value,
    options: Option<&serde_json::Value>,
) -> BancheckResult<(Tests, Options)> {
    let tests = tests_from_json(tests)?;
    let options = overrides_from_json(options)?.resolve();
    Ok((tests, options))
}

/// [`crate::accept_all`] over untyped input
pub fn accept_all(
    tests: &serde_json::Value,
    options: Option<&serde_json::Value>,
) -> BancheckResult<AcceptReport> {
    let (tests, options) = prepare(tests, options)?;
    Runner::new(options).accept_all(&tests)
}

/// [`crate::verify`] over untyped input
pub fn verify(
    tests: &serde_json::Value,
    options: Option<&serde_json::Value>,
) -> BancheckResult<VerifyReport> {
    let (tests, options) = prepare(tests, options)?;
    Runner::new(options).verify(&tests)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

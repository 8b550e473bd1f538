// txain/src/value.rs

//! The dynamic payload carried between steps.
//!
//! Steps produce and consume lists of [`Value`]s. `Value::Null` doubles as the
//! "absent" sentinel used when a step expects more values than it was given.

pub use serde_json::Value;

/// The list of values one step hands to the next (the error slot is carried separately).
pub type Args = Vec<Value>;

/// Truthiness as the collection folds see it.
///
/// `Null`, `false`, zero (and NaN) and the empty string are falsy. Everything else,
/// including empty arrays and empty objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// Collapses a final value list into the single value a deferred result resolves to:
/// nothing becomes `Null`, one value is returned as is, several become an array.
pub fn collapse(mut values: Args) -> Value {
  match values.len() {
    0 => Value::Null,
    1 => values.pop().unwrap_or(Value::Null),
    _ => Value::Array(values),
  }
}

/// Short type name used in error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

// txain/src/core/arity.rs

//! Fits the values produced by one step to the parameter count of the next.

use crate::value::{Args, Value};

/// Adapts `produced` to exactly `arity` values.
///
/// Extra values are dropped from the end; missing ones are filled with `Value::Null`.
/// `arity` counts positional values only; the continuation is handed over separately.
/// The input is consumed, never shared, so the caller's queue state is untouched.
pub fn adapt(mut produced: Args, arity: usize) -> Args {
  produced.resize(arity, Value::Null);
  produced
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn truncates_extra_values() {
    let out = adapt(vec![json!("a"), json!("b"), json!("c")], 2);
    assert_eq!(out, vec![json!("a"), json!("b")]);
  }

  #[test]
  fn pads_missing_values_with_null() {
    let out = adapt(vec![json!("a")], 3);
    assert_eq!(out, vec![json!("a"), Value::Null, Value::Null]);
  }

  #[test]
  fn zero_arity_receives_nothing() {
    assert!(adapt(vec![json!(1), json!(2)], 0).is_empty());
    assert!(adapt(vec![], 0).is_empty());
  }

  #[test]
  fn output_length_always_matches_arity() {
    for produced in 0..6 {
      for arity in 0..6 {
        let values: Args = (0..produced).map(|i| json!(i)).collect();
        let out = adapt(values, arity);
        assert_eq!(out.len(), arity);
        for (i, v) in out.iter().enumerate() {
          if i < produced {
            assert_eq!(v, &json!(i));
          } else {
            assert_eq!(v, &Value::Null);
          }
        }
      }
    }
  }
}

// txain/src/core/context.rs

//! The per-pipeline key/value store and the `Scope` handle steps use to reach it.

use crate::value::Value;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Handle to one pipeline's context store.
///
/// Every step, worker and the pipeline itself hold clones of the same handle;
/// cloning shares the underlying map. Lock guards are internal to each call, so
/// nothing is ever held across an `.await`.
///
/// Execution inside a pipeline is strictly sequential, which totally orders every
/// write by step order. The lock only makes the handle `Send + Sync`.
#[derive(Debug, Clone, Default)]
pub struct Scope(Arc<RwLock<HashMap<String, Value>>>);

impl Scope {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores `value` under `key`, overwriting any previous entry.
  pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
    self.0.write().insert(key.into(), value.into());
  }

  /// Returns a copy of the value stored under `key`, if any.
  pub fn get(&self, key: &str) -> Option<Value> {
    self.0.read().get(key).cloned()
  }

  pub fn remove(&self, key: &str) -> Option<Value> {
    self.0.write().remove(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.0.read().contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.0.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.read().is_empty()
  }

  /// A copy of every entry. The lock is released before this returns.
  pub fn snapshot(&self) -> HashMap<String, Value> {
    self.0.read().clone()
  }
}

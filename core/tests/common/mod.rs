// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::Level;
use txain::{ChainError, Outcome, Scope};

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("txain engine error: {0}")]
  Chain(String), // Store as String for Eq comparison

  #[error("Test step failed: {0}")]
  Step(String),

  #[error("Test worker failed: {0}")]
  Worker(String),
}

impl From<ChainError> for TestError {
  fn from(ce: ChainError) -> Self {
    TestError::Chain(format!("{:?}", ce))
  }
}

// --- Records which steps / workers ran, in order ---
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
  pub fn record(&self, entry: impl Into<String>) {
    self.0.lock().push(entry.into());
  }

  pub fn entries(&self) -> Vec<String> {
    self.0.lock().clone()
  }

  pub fn len(&self) -> usize {
    self.0.lock().len()
  }
}

// --- Captures the outcome handed to an `end_with` terminal ---
pub fn terminal<E: Send + 'static>() -> (
  impl FnOnce(Scope, Outcome<E>) + Send + 'static,
  oneshot::Receiver<Outcome<E>>,
) {
  let (tx, rx) = oneshot::channel();
  (
    move |_scope: Scope, outcome: Outcome<E>| {
      let _ = tx.send(outcome);
    },
    rx,
  )
}

pub fn str_arg(args: &[Value], idx: usize) -> String {
  args.get(idx).and_then(Value::as_str).unwrap_or_default().to_string()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

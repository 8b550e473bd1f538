// txain/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors raised by the engine itself.
///
/// Failures reported by user steps are never wrapped in this type unless the
/// pipeline's own error type *is* `ChainError`, in which case `anyhow` errors
/// coming out of user code land in `StepFailed`.
#[derive(Debug, Error)]
pub enum ChainError {
  #[error("Step failed. Source: {source}")]
  StepFailed {
    #[source]
    source: AnyhowError,
  },

  #[error("'{kind}' expected a sequence as its input, found {found}")]
  NotASequence { kind: &'static str, found: String },

  #[error("Step #{step_index} dropped its continuation without reporting a result")]
  ContinuationDropped { step_index: usize },

  #[error("'{kind}' worker for item #{item_index} dropped its continuation without reporting a result")]
  WorkerContinuationDropped { kind: &'static str, item_index: usize },

  #[error("Internal txain error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for ChainError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a ChainError that made a round trip through anyhow instead of nesting it.
    match err.downcast::<ChainError>() {
      Ok(chain_err) => chain_err,
      Err(source) => ChainError::StepFailed { source },
    }
  }
}

pub type ChainResult<T, E = ChainError> = std::result::Result<T, E>;

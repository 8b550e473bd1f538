// txain/src/core/task.rs

//! Defines the `StepTask<E>` trait for steps written as types instead of closures.

use super::context::Scope;
use super::control::Outcome;
use crate::value::Args;
use async_trait::async_trait;

/// A step defined as a struct.
///
/// Register one with `Step::task(..)` or `Pipeline::then(Step::task(..))`. The task is
/// consumed by its single run, so it may own whatever resources it needs.
#[async_trait]
pub trait StepTask<E>: Send {
  /// Number of positional values `run` expects. Extra values are dropped, missing ones are `Null`.
  fn arity(&self) -> usize;

  /// Name shown in tracing spans.
  fn label(&self) -> Option<String> {
    None
  }

  async fn run(self: Box<Self>, scope: Scope, args: Args) -> Outcome<E>;
}

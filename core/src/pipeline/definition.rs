// txain/src/pipeline/definition.rs

//! Contains the `Pipeline<Err>` struct definition and methods for its
//! construction, chain building and context access.

use crate::core::context::Scope;
use crate::core::control::{Continuation, Outcome};
use crate::core::step::Step;
use crate::error::ChainError;
use crate::value::{Args, Value};
use std::collections::VecDeque;
use std::fmt::{self, Display};
use std::future::Future;

/// What a pipeline starts from: a first step, or fixed values for the first step to receive.
pub enum Initial<Err> {
  Step(Step<Err>),
  Values(Args),
}

impl<Err> From<Step<Err>> for Initial<Err> {
  fn from(step: Step<Err>) -> Self {
    Initial::Step(step)
  }
}

impl<Err> From<Args> for Initial<Err> {
  fn from(values: Args) -> Self {
    Initial::Values(values)
  }
}

/// An ordered queue of asynchronous steps, their shared context store, and
/// (optionally) the values the first step receives.
///
/// `Err` is the error type steps fail with. It must be constructible `From<ChainError>`
/// so the engine can report its own failures (a non-sequence collection input, a
/// dropped continuation) through the same channel.
///
/// Steps run strictly front to back, each only after the previous one reported.
/// Running consumes the pipeline, so it terminates exactly once.
pub struct Pipeline<Err = ChainError>
where
  Err: From<ChainError> + Display + Send + 'static,
{
  pub(crate) queue: VecDeque<Step<Err>>,
  pub(crate) seed: Option<Args>,
  pub(crate) scope: Scope,
  pub(crate) label: String,
}

impl<Err> Pipeline<Err>
where
  Err: From<ChainError> + Display + Send + 'static,
{
  /// Creates a pipeline from either a first step or a fixed list of initial values.
  pub fn from_initial(initial: impl Into<Initial<Err>>) -> Self {
    let mut pipeline = Self {
      queue: VecDeque::new(),
      seed: None,
      scope: Scope::new(),
      label: "txain".to_string(),
    };
    match initial.into() {
      Initial::Step(step) => pipeline.queue.push_back(step),
      Initial::Values(values) => pipeline.seed = Some(values),
    }
    pipeline
  }

  /// Creates a pipeline whose first step is `step`.
  pub fn new(step: Step<Err>) -> Self {
    Self::from_initial(Initial::Step(step))
  }

  /// Creates an empty pipeline whose first step will receive `values`.
  pub fn seeded(values: Args) -> Self {
    Self::from_initial(Initial::Values(values))
  }

  /// Sets the name recorded on this pipeline's tracing spans.
  pub fn named(mut self, label: impl Into<String>) -> Self {
    self.label = label.into();
    self
  }

  /// Appends `step` to the queue.
  pub fn then(mut self, step: Step<Err>) -> Self {
    self.queue.push_back(step);
    self
  }

  /// Appends a callback-style step receiving exactly `arity` values.
  pub fn then_callback(self, arity: usize, body: impl FnOnce(Scope, Args, Continuation<Err>) + Send + 'static) -> Self {
    self.then(Step::callback(arity, body))
  }

  /// Appends a future-style step receiving exactly `arity` values.
  pub fn then_future<F, Fut>(self, arity: usize, body: F) -> Self
  where
    F: FnOnce(Scope, Args) -> Fut + Send + 'static,
    Fut: Future<Output = Outcome<Err>> + Send + 'static,
  {
    self.then(Step::future(arity, body))
  }

  /// Stores `value` under `key` in this pipeline's context store.
  pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
    self.scope.set(key, value);
  }

  pub fn get(&self, key: &str) -> Option<Value> {
    self.scope.get(key)
  }

  /// A handle to the context store that outlives the run.
  pub fn scope(&self) -> Scope {
    self.scope.clone()
  }

  /// Number of steps still queued.
  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  pub fn label(&self) -> &str {
    &self.label
  }
}

impl<Err> fmt::Debug for Pipeline<Err>
where
  Err: From<ChainError> + Display + Send + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("label", &self.label)
      .field("queue", &self.queue)
      .field("seed", &self.seed)
      .field("scope", &self.scope)
      .finish()
  }
}

/// Starts a pipeline with `step` as its first step.
pub fn chain<Err>(step: Step<Err>) -> Pipeline<Err>
where
  Err: From<ChainError> + Display + Send + 'static,
{
  Pipeline::new(step)
}

/// Starts a pipeline whose first step receives `values`.
pub fn from_values<Err>(values: Args) -> Pipeline<Err>
where
  Err: From<ChainError> + Display + Send + 'static,
{
  Pipeline::seeded(values)
}

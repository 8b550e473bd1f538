// txain/src/core/step.rs

//! Defines the units of work a pipeline runs: [`Step`] for queue entries and
//! [`Worker`] for the per-item body of a collection call.

use super::context::Scope;
use super::control::{Completion, Continuation, Outcome};
use super::task::StepTask;
use crate::value::Args;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Body of a step: gets the context handle, its (adapted) arguments and a continuation.
/// `FnOnce` because a dequeued step is never re-entered.
pub type StepBody<E> = Box<dyn FnOnce(Scope, Args, Continuation<E>) -> Completion<E> + Send>;

/// Body of a collection worker. Called once per item, with `[item, ...extra_args]`.
pub type WorkerBody<E> = Arc<dyn Fn(Scope, Args, Continuation<E>) -> Completion<E> + Send + Sync>;

/// How many positional values a step receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepArity {
  /// Exactly this many values, truncated or padded with `Null`. The continuation is not counted.
  Declared(usize),
  /// Whatever the previous step produced, untouched.
  Exempt,
}

/// One queued unit of asynchronous work.
pub struct Step<E> {
  pub(crate) arity: StepArity,
  pub(crate) label: Option<String>,
  pub(crate) body: StepBody<E>,
}

impl<E: Send + 'static> Step<E> {
  /// General form: the body decides per call whether to use the continuation
  /// (`Completion::Pending`) or hand back a future (`Completion::Deferred`).
  pub fn new(arity: usize, body: impl FnOnce(Scope, Args, Continuation<E>) -> Completion<E> + Send + 'static) -> Self {
    Self {
      arity: StepArity::Declared(arity),
      label: None,
      body: Box::new(body),
    }
  }

  /// Callback-style step: reports by resuming the continuation it is given.
  pub fn callback(arity: usize, body: impl FnOnce(Scope, Args, Continuation<E>) + Send + 'static) -> Self {
    Self::new(arity, move |scope, args, done| {
      body(scope, args, done);
      Completion::Pending
    })
  }

  /// Future-style step: the returned future's output is the step's outcome.
  pub fn future<F, Fut>(arity: usize, body: F) -> Self
  where
    F: FnOnce(Scope, Args) -> Fut + Send + 'static,
    Fut: Future<Output = Outcome<E>> + Send + 'static,
  {
    Self::new(arity, move |scope, args, _done| Completion::deferred(body(scope, args)))
  }

  /// Callback-style step that receives the previous values verbatim.
  pub fn exempt(body: impl FnOnce(Scope, Args, Continuation<E>) + Send + 'static) -> Self {
    Self {
      arity: StepArity::Exempt,
      label: None,
      body: Box::new(move |scope, args, done| {
        body(scope, args, done);
        Completion::Pending
      }),
    }
  }

  /// Step backed by a [`StepTask`] implementor.
  pub fn task<T: StepTask<E> + 'static>(task: T) -> Self {
    let arity = task.arity();
    let label = task.label();
    let boxed: Box<dyn StepTask<E>> = Box::new(task);
    Self {
      arity: StepArity::Declared(arity),
      label,
      body: Box::new(move |scope, args, _done| Completion::Deferred(boxed.run(scope, args))),
    }
  }

  /// Names the step in tracing output.
  pub fn labelled(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  pub fn arity(&self) -> StepArity {
    self.arity
  }
}

impl<E> fmt::Debug for Step<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Step")
      .field("arity", &self.arity)
      .field("label", &self.label)
      .finish_non_exhaustive()
  }
}

/// Per-item body for `each`/`map`/`filter`/`reject`/`detect`/`concat`.
///
/// Only the first produced value of each call is looked at; a call producing
/// nothing counts as having produced `Null`.
pub struct Worker<E> {
  pub(crate) body: WorkerBody<E>,
}

impl<E: Send + 'static> Worker<E> {
  pub fn new(body: impl Fn(Scope, Args, Continuation<E>) -> Completion<E> + Send + Sync + 'static) -> Self {
    Self { body: Arc::new(body) }
  }

  pub fn callback(body: impl Fn(Scope, Args, Continuation<E>) + Send + Sync + 'static) -> Self {
    Self::new(move |scope, args, done| {
      body(scope, args, done);
      Completion::Pending
    })
  }

  pub fn future<F, Fut>(body: F) -> Self
  where
    F: Fn(Scope, Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome<E>> + Send + 'static,
  {
    Self::new(move |scope, args, _done| Completion::deferred(body(scope, args)))
  }
}

impl<E> Clone for Worker<E> {
  fn clone(&self) -> Self {
    Self {
      body: Arc::clone(&self.body),
    }
  }
}

impl<E> fmt::Debug for Worker<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Worker(..)")
  }
}

// txain/src/core/control.rs

//! Completion signalling between a running step and the runner.
//!
//! A step reports exactly one [`Outcome`], either by resuming its [`Continuation`]
//! or by returning [`Completion::Deferred`] with a future that yields it. Both
//! shapes are normalised by [`settle`] into one signal before the runner moves on.

use crate::value::{Args, Value};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::oneshot;

/// What a step reports: the values to pass forward, or the error that ends the pipeline.
pub type Outcome<E> = Result<Args, E>;

/// Boxed future form of a step's outcome.
pub type StepFuture<E> = Pin<Box<dyn Future<Output = Outcome<E>> + Send>>;

/// Returned by every step body.
pub enum Completion<E> {
  /// The step reports through its continuation, now or later.
  Pending,
  /// The step's outcome is the output of this future. Any continuation call is ignored.
  Deferred(StepFuture<E>),
}

impl<E> Completion<E> {
  pub fn deferred<F>(fut: F) -> Self
  where
    F: Future<Output = Outcome<E>> + Send + 'static,
  {
    Completion::Deferred(Box::pin(fut))
  }
}

impl<E> fmt::Debug for Completion<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Completion::Pending => f.write_str("Completion::Pending"),
      Completion::Deferred(_) => f.write_str("Completion::Deferred(..)"),
    }
  }
}

/// One-shot completion callback handed to each step or worker invocation.
///
/// Every reporting method takes `self`, so a continuation can fire at most once.
/// It may be moved into another task or timer and resumed from there.
pub struct Continuation<E> {
  tx: oneshot::Sender<Outcome<E>>,
}

impl<E> Continuation<E> {
  /// Reports `outcome`. `Ok` carries the produced values, `Err` short-circuits the pipeline.
  pub fn resume(self, outcome: Outcome<E>) {
    // The runner stops listening once a deferred future has taken over; that send is moot.
    let _ = self.tx.send(outcome);
  }

  pub fn succeed(self, values: Args) {
    self.resume(Ok(values))
  }

  /// Reports a single produced value.
  pub fn succeed_with(self, value: impl Into<Value>) {
    self.resume(Ok(vec![value.into()]))
  }

  /// Reports success without any produced values.
  pub fn done(self) {
    self.resume(Ok(Vec::new()))
  }

  pub fn fail(self, err: impl Into<E>) {
    self.resume(Err(err.into()))
  }
}

impl<E> fmt::Debug for Continuation<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Continuation")
      .field("runner_listening", &!self.tx.is_closed())
      .finish()
  }
}

/// Receiving half of a continuation.
pub(crate) struct Signal<E>(oneshot::Receiver<Outcome<E>>);

pub(crate) fn continuation<E>() -> (Continuation<E>, Signal<E>) {
  let (tx, rx) = oneshot::channel();
  (Continuation { tx }, Signal(rx))
}

/// The continuation was dropped without being resumed and no future was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Dropped;

/// Waits for whichever completion path the step chose.
pub(crate) async fn settle<E>(completion: Completion<E>, signal: Signal<E>) -> Result<Outcome<E>, Dropped> {
  match completion {
    Completion::Deferred(fut) => {
      drop(signal);
      Ok(fut.await)
    }
    Completion::Pending => signal.0.await.map_err(|_| Dropped),
  }
}

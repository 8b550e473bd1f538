// txain/src/pipeline/combinators.rs

//! Chain-building calls that append collection steps, plus the `inspect` diagnostic step.
//!
//! Every collection call appends exactly one step to the queue. That step takes the
//! first value it receives as its sequence, runs the worker over the items in order,
//! and reports one folded result (or the first worker failure) back to the runner.
//! `extra_args` are passed to every worker call after the item.

use crate::collection::engine::run_collection;
use crate::collection::fold::FoldKind;
use crate::core::control::Completion;
use crate::core::step::{Step, Worker};
use crate::error::ChainError;
use crate::pipeline::definition::Pipeline;
use crate::value::Args;
use std::fmt::Display;
use tracing::{event, Level};

impl<Err> Pipeline<Err>
where
  Err: From<ChainError> + Display + Send + 'static,
{
  fn collection(self, kind: FoldKind, worker: Worker<Err>, extra_args: Args) -> Self {
    let step = Step::new(1, move |scope, input, _done| {
      Completion::deferred(run_collection(kind, worker, extra_args, scope, input))
    })
    .labelled(kind.name());
    event!(Level::TRACE, %kind, "Collection step queued.");
    self.then(step)
  }

  /// Runs `worker` for each item for its side effects. Passes nothing forward.
  pub fn each(self, worker: Worker<Err>, extra_args: Args) -> Self {
    self.collection(FoldKind::Each, worker, extra_args)
  }

  /// Passes forward an array of each item's produced value, in item order.
  pub fn map(self, worker: Worker<Err>, extra_args: Args) -> Self {
    self.collection(FoldKind::Map, worker, extra_args)
  }

  /// Passes forward the items whose produced value is truthy.
  pub fn filter(self, worker: Worker<Err>, extra_args: Args) -> Self {
    self.collection(FoldKind::Filter, worker, extra_args)
  }

  /// Passes forward the items whose produced value is falsy.
  pub fn reject(self, worker: Worker<Err>, extra_args: Args) -> Self {
    self.collection(FoldKind::Reject, worker, extra_args)
  }

  /// Passes forward the first item whose produced value is truthy, or `Null`.
  /// The worker is not called for any item after the match.
  pub fn detect(self, worker: Worker<Err>, extra_args: Args) -> Self {
    self.collection(FoldKind::Detect, worker, extra_args)
  }

  /// Passes forward one array built by concatenating every produced value.
  pub fn concat(self, worker: Worker<Err>, extra_args: Args) -> Self {
    self.collection(FoldKind::Concat, worker, extra_args)
  }

  /// Logs every value it receives and passes them all on unchanged.
  pub fn inspect(self, label: impl Into<String>) -> Self {
    let label = label.into();
    let step = Step::exempt(move |_scope, args, done| {
      event!(Level::INFO, label = %label, values = ?args, "inspect");
      done.succeed(args);
    })
    .labelled("inspect");
    self.then(step)
  }
}

// txain/src/collection/engine.rs

//! Drives one collection step: runs the worker over every item, one at a time,
//! and folds the results.

use super::fold::{Fold, FoldKind};
use crate::core::context::Scope;
use crate::core::control::{continuation, settle, Outcome};
use crate::core::step::Worker;
use crate::error::ChainError;
use crate::value::{kind_of, Args, Value};
use std::fmt::Display;
use tracing::{event, Instrument, Level};

/// Turns the collection step's input into its item list.
///
/// The first received value is the sequence. A missing or `Null` input is an empty
/// sequence; any other non-array value is an error.
fn items_of(kind: FoldKind, input: Args) -> Result<Vec<Value>, ChainError> {
  match input.into_iter().next() {
    None | Some(Value::Null) => Ok(Vec::new()),
    Some(Value::Array(items)) => Ok(items),
    Some(other) => Err(ChainError::NotASequence {
      kind: kind.name(),
      found: kind_of(&other).to_string(),
    }),
  }
}

/// Runs `worker` over the items in `input` and reports the folded result.
///
/// Each iteration awaits the previous item's completion before starting the next,
/// so stack depth stays flat however long the sequence is. The first worker failure
/// aborts the loop and is returned as is; anything accumulated so far is dropped.
pub(crate) async fn run_collection<E>(
  kind: FoldKind,
  worker: Worker<E>,
  extra_args: Args,
  scope: Scope,
  input: Args,
) -> Outcome<E>
where
  E: From<ChainError> + Display + Send + 'static,
{
  let items = match items_of(kind, input) {
    Ok(items) => items,
    Err(e) => {
      event!(Level::DEBUG, error = %e, "Collection input is not a sequence.");
      return Err(E::from(e));
    }
  };

  let span = tracing::info_span!("collection_execution", kind = %kind, num_items = items.len());
  async move {
    let mut fold = Fold::new(kind);

    for (item_index, item) in items.into_iter().enumerate() {
      event!(Level::TRACE, item_index, "Invoking worker.");

      let mut args = Vec::with_capacity(1 + extra_args.len());
      args.push(item.clone());
      args.extend(extra_args.iter().cloned());

      let (done, signal) = continuation::<E>();
      let completion = (worker.body)(scope.clone(), args, done);

      let produced = match settle(completion, signal).await {
        Ok(Ok(values)) => values.into_iter().next().unwrap_or(Value::Null),
        Ok(Err(e)) => {
          event!(Level::DEBUG, item_index, error = %e, "Worker failed, aborting collection.");
          return Err(e);
        }
        Err(_) => {
          event!(Level::DEBUG, item_index, "Worker dropped its continuation.");
          return Err(E::from(ChainError::WorkerContinuationDropped {
            kind: kind.name(),
            item_index,
          }));
        }
      };

      if fold.collect(item, produced).is_break() {
        event!(Level::DEBUG, item_index, "Collection stopped early.");
        break;
      }
    }

    event!(Level::DEBUG, "Collection finished.");
    Ok(fold.finish())
  }
  .instrument(span)
  .await
}

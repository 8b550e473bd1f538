// txain/src/pipeline/execution.rs

//! Contains the runner that drains a `Pipeline<Err>` queue, and the two ways of
//! finishing a chain: awaiting its result or handing it to a terminal callback.

use crate::core::arity::adapt;
use crate::core::context::Scope;
use crate::core::control::{continuation, settle, Outcome};
use crate::core::step::StepArity;
use crate::error::ChainError;
use crate::pipeline::definition::Pipeline;
use crate::value::{collapse, Value};
use std::fmt::Display;
use tracing::{event, instrument, Instrument, Level};

impl<Err> Pipeline<Err>
where
  Err: From<ChainError> + Display + Send + 'static,
{
  /// Runs every queued step in order and returns the terminal outcome.
  ///
  /// Each step gets the previous step's values (or the seed, for the first one)
  /// adapted to its declared arity, plus a fresh continuation. The next step is
  /// only dequeued once the current one has reported. The first `Err` skips the
  /// rest of the queue and is returned unchanged.
  ///
  /// A step that keeps its continuation forever and returns no future suspends the
  /// run indefinitely; one that drops its continuation fails the run with
  /// `ChainError::ContinuationDropped`.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            pipeline = %self.label,
            pipeline_error_type = %std::any::type_name::<Err>(),
            num_steps = self.queue.len(),
            seeded = self.seed.is_some(),
        ),
        err(Display)
    )]
  pub async fn run(self) -> Outcome<Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    let Pipeline {
      mut queue, seed, scope, ..
    } = self;
    let mut incoming: Outcome<Err> = Ok(seed.unwrap_or_default());
    let mut step_index = 0usize;

    loop {
      let Some(step) = queue.pop_front() else {
        event!(Level::DEBUG, steps_run = step_index, "Queue drained, pipeline completed.");
        return incoming;
      };

      let values = match incoming {
        Ok(values) => values,
        Err(e) => {
          event!(
            Level::DEBUG,
            error = %e,
            skipped_steps = queue.len() + 1,
            "Step failed, short-circuiting to the terminal."
          );
          return Err(e);
        }
      };

      let step_span = tracing::info_span!(
        "pipeline_step_execution",
        step_index,
        step_label = step.label.as_deref().unwrap_or("-"),
        arity = ?step.arity,
      );

      let args = match step.arity {
        StepArity::Declared(arity) => adapt(values, arity),
        StepArity::Exempt => values,
      };

      let (done, signal) = continuation::<Err>();
      let completion = step_span.in_scope(|| {
        event!(Level::TRACE, num_args = args.len(), "Invoking step.");
        (step.body)(scope.clone(), args, done)
      });

      incoming = match settle(completion, signal).instrument(step_span.clone()).await {
        Ok(outcome) => outcome,
        Err(_) => {
          step_span.in_scope(|| event!(Level::DEBUG, "Step dropped its continuation."));
          Err(Err::from(ChainError::ContinuationDropped { step_index }))
        }
      };

      step_span.in_scope(|| event!(Level::DEBUG, success = incoming.is_ok(), "Step reported."));
      step_index += 1;
    }
  }

  /// Runs the pipeline and resolves to its final values collapsed into one `Value`:
  /// `Null` for none, the value itself for one, an array for several.
  pub async fn end(self) -> Result<Value, Err> {
    self.run().await.map(collapse)
  }

  /// Runs the pipeline on the current tokio runtime and calls `terminal` exactly once
  /// with the pipeline's context store and the outcome. Returns immediately.
  ///
  /// Must be called from within a tokio runtime.
  pub fn end_with(self, terminal: impl FnOnce(Scope, Outcome<Err>) + Send + 'static) {
    let label = self.label.clone();
    let scope = self.scope.clone();
    tokio::spawn(async move {
      let outcome = self.run().await;
      event!(Level::TRACE, pipeline = %label, "Invoking terminal handler.");
      terminal(scope, outcome);
    });
  }
}

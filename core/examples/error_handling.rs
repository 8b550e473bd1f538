// txain/examples/error_handling.rs

use serde_json::json;
use tracing::{error, info};
use txain::{ChainError, Step, Worker};

#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("Engine error: {0}")]
  Chain(#[from] ChainError),

  #[error("Lookup failed for '{0}'")]
  Lookup(String),
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Error Handling Example ---");

  // A worker failure aborts the collection and skips every later step.
  let result = txain::from_values::<ExampleAppError>(vec![json!(["home", "missing", "about"])])
    .map(
      Worker::future(|_scope, args| async move {
        let page = args[0].as_str().unwrap_or_default().to_string();
        if page == "missing" {
          return Err(ExampleAppError::Lookup(page));
        }
        Ok(vec![json!(format!("/{}", page))])
      }),
      vec![],
    )
    .then_callback(1, |_scope, _args, done| {
      error!("This step should never run");
      done.done();
    })
    .end()
    .await;

  match result {
    Err(ExampleAppError::Lookup(page)) => info!("Pipeline failed as expected on '{}'", page),
    other => error!("Unexpected outcome: {:?}", other),
  }

  // Engine errors arrive through the same channel, converted with From<ChainError>.
  let (tx, rx) = tokio::sync::oneshot::channel();
  txain::chain::<ExampleAppError>(Step::callback(0, |_scope, _args, done| {
    done.succeed_with("not a list");
  }))
  .each(Worker::callback(|_scope, _args, done| done.done()), vec![])
  .end_with(move |_scope, outcome| {
    let _ = tx.send(outcome);
  });

  match rx.await {
    Ok(Err(ExampleAppError::Chain(e))) => info!("Engine error reported to the terminal: {}", e),
    other => error!("Unexpected outcome: {:?}", other),
  }

  info!("--- Error Handling Example Finished ---");
}

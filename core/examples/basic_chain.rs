// txain/examples/basic_chain.rs

use serde_json::json;
use std::time::Duration;
use tracing::info;
use txain::{ChainError, Step};

#[tokio::main]
async fn main() -> Result<(), ChainError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Chain Example ---");

  // 1. The first step reports three values through its continuation, a little later.
  let pipeline = txain::chain::<ChainError>(Step::callback(0, |_scope, _args, done| {
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(10)).await;
      done.succeed(vec![json!("alpha"), json!("beta"), json!("gamma")]);
    });
  }))
  .named("basic_chain")
  // 2. Takes two values: the third one is dropped.
  .then_callback(2, |scope, args, done| {
    info!("second step got {:?}", args);
    scope.set("joined", format!("{}+{}", args[0].as_str().unwrap_or(""), args[1].as_str().unwrap_or("")));
    done.succeed_with(args.len() as u64);
  })
  // 3. A future-style step declaring two values: the missing one arrives as null.
  .then_future(2, |scope, args| async move {
    info!("third step got {:?}", args);
    let joined = scope.get("joined").unwrap_or_default();
    Ok(vec![joined, args[0].clone()])
  })
  .inspect("before end");

  let scope = pipeline.scope();

  // 4. Awaiting `end` gives the final values, collapsed into one value.
  let result = pipeline.end().await?;
  info!("Pipeline finished with {}", result);
  assert_eq!(result, json!(["alpha+beta", 2]));
  assert_eq!(scope.get("joined"), Some(json!("alpha+beta")));

  info!("--- Basic Chain Example Finished ---");
  Ok(())
}

// txain/examples/collections.rs

use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;
use txain::{ChainError, Worker};

#[tokio::main]
async fn main() -> Result<(), ChainError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Collections Example ---");

  let words = json!(["apple", "kiwi", "banana", "fig", "cherry"]);

  // Workers run one item at a time, in order, however long each one takes.
  let lengths = txain::from_values::<ChainError>(vec![words.clone()])
    .map(
      Worker::future(|_scope, args| async move {
        let word = args[0].as_str().unwrap_or_default().to_string();
        tokio::time::sleep(Duration::from_millis(word.len() as u64)).await;
        Ok(vec![json!(word.len())])
      }),
      vec![],
    )
    .end()
    .await?;
  info!("lengths: {}", lengths);

  // Extra arguments follow the item on every worker call.
  let long_words = txain::from_values::<ChainError>(vec![words.clone()])
    .filter(
      Worker::callback(|_scope, args, done| {
        let min = args[1].as_u64().unwrap_or(0) as usize;
        done.succeed_with(args[0].as_str().map_or(false, |w| w.len() >= min));
      }),
      vec![json!(5)],
    )
    .end()
    .await?;
  info!("words with at least five letters: {}", long_words);

  // detect stops calling the worker at the first match.
  let first_with_i = txain::from_values::<ChainError>(vec![words.clone()])
    .detect(
      Worker::callback(|_scope, args, done| {
        done.succeed_with(args[0].as_str().map_or(false, |w| w.contains('i')));
      }),
      vec![],
    )
    .end()
    .await?;
  info!("first word containing 'i': {}", first_with_i);

  // Counting through the shared scope with each, then reading it back.
  let pipeline = txain::from_values::<ChainError>(vec![words.clone()])
    .each(
      Worker::callback(|scope, args, done| {
        let letters = args[0].as_str().map_or(0, str::len) as u64;
        let total = scope.get("letters").and_then(|v| v.as_u64()).unwrap_or(0);
        scope.set("letters", total + letters);
        done.done();
      }),
      vec![],
    )
    .concat(
      // each passes nothing forward, so this concat sees an empty sequence.
      Worker::callback(|_scope, args, done| done.succeed(args)),
      vec![],
    );
  let scope = pipeline.scope();
  let nothing = pipeline.end().await?;
  info!("concat after each: {}, letters counted: {:?}", nothing, scope.get("letters"));
  assert_eq!(nothing, Value::Array(vec![]));

  info!("--- Collections Example Finished ---");
  Ok(())
}

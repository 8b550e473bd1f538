// tests/error_handling_tests.rs
mod common;

use common::*;
use serde_json::json;
use serial_test::serial;
use std::time::Duration;
use txain::{ChainError, Step, Worker};

#[tokio::test]
#[serial]
async fn test_error_jumps_straight_to_end() {
  setup_tracing();
  let log = CallLog::default();
  let l = log.clone();

  let result = txain::chain::<TestError>(Step::callback(0, |_scope, _args, done| {
    done.fail(TestError::Step("some error".to_string()));
  }))
  .then_callback(2, move |_scope, _args, done| {
    l.record("must not run");
    done.done();
  })
  .end()
  .await;

  assert_eq!(result, Err(TestError::Step("some error".to_string())));
  assert!(log.entries().is_empty());
}

#[tokio::test]
#[serial]
async fn test_no_step_after_failure_runs() {
  setup_tracing();
  let log = CallLog::default();
  let (l1, l2, l3, l4) = (log.clone(), log.clone(), log.clone(), log.clone());

  let outcome = txain::chain::<TestError>(Step::callback(0, move |_scope, _args, done| {
    l1.record("good");
    done.succeed_with(json!(["x", "y"]));
  }))
  .then_callback(1, move |_scope, _args, done| {
    l2.record("bad");
    done.fail(TestError::Step("I am a bad step!".to_string()));
  })
  .map(
    Worker::callback(move |_scope, args, done| {
      l3.record("worker");
      done.succeed(args);
    }),
    vec![],
  )
  .then_callback(0, move |_scope, _args, done| {
    l4.record("after");
    done.done();
  })
  .run()
  .await;

  assert_eq!(outcome, Err(TestError::Step("I am a bad step!".to_string())));
  assert_eq!(log.entries(), vec!["good", "bad"]);
}

#[tokio::test]
#[serial]
async fn test_rejected_future_reaches_terminal() {
  setup_tracing();
  let log = CallLog::default();
  let l = log.clone();

  let result = txain::chain::<TestError>(Step::future(0, |_scope, _args| async {
    tokio::time::sleep(Duration::from_millis(2)).await;
    Err(TestError::Step("E".to_string()))
  }))
  .then_callback(0, move |_scope, _args, done| {
    l.record("after");
    done.done();
  })
  .end()
  .await;

  assert_eq!(result, Err(TestError::Step("E".to_string())));
  assert_eq!(log.len(), 0);
}

#[tokio::test]
#[serial]
async fn test_dropped_continuation_fails_instead_of_hanging() {
  setup_tracing();
  let result = txain::chain::<TestError>(Step::callback(0, |_scope, _args, done| {
    done.done();
  }))
  .then_callback(0, |_scope, _args, done| {
    drop(done);
  })
  .end()
  .await;

  match result {
    Err(TestError::Chain(s)) => {
      assert!(s.contains("ContinuationDropped"));
      assert!(s.contains("step_index: 1"));
    }
    other => panic!("Expected TestError::Chain(ContinuationDropped), got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_anyhow_errors_with_default_error_type() {
  setup_tracing();
  let result = txain::chain::<ChainError>(Step::future(0, |_scope, _args| async {
    let parsed: Result<u32, _> = "not a number".parse::<u32>();
    let n = parsed.map_err(|e| anyhow::anyhow!("parse failed: {}", e))?;
    Ok::<_, ChainError>(vec![json!(n)])
  }))
  .end()
  .await;

  match result {
    Err(ChainError::StepFailed { source }) => assert!(source.to_string().starts_with("parse failed")),
    other => panic!("Expected ChainError::StepFailed, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_collection_on_non_sequence_fails() {
  setup_tracing();
  let result = txain::from_values::<TestError>(vec![json!({"not": "an array"})])
    .filter(Worker::callback(|_scope, _args, done| done.succeed_with(true)), vec![])
    .end()
    .await;

  match result {
    Err(TestError::Chain(s)) => {
      assert!(s.contains("NotASequence"));
      assert!(s.contains("filter"));
      assert!(s.contains("object"));
    }
    other => panic!("Expected TestError::Chain(NotASequence), got {:?}", other),
  }
}

// --- Counts ERROR events emitted while a pipeline runs ---
mod error_events {
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;
  use tracing::{Event, Level, Subscriber};
  use tracing_subscriber::layer::{Context, Layer};

  #[derive(Clone, Default)]
  pub struct ErrorCounter(pub Arc<AtomicUsize>);

  impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
      if *event.metadata().level() == Level::ERROR {
        self.0.fetch_add(1, Ordering::SeqCst);
      }
    }
  }
}

#[test]
#[serial]
fn test_worker_failure_is_logged_once_at_error() {
  use std::sync::atomic::Ordering;
  use tracing_subscriber::layer::SubscriberExt;

  let counter = error_events::ErrorCounter::default();
  let subscriber = tracing_subscriber::registry().with(counter.clone());

  let result = tracing::subscriber::with_default(subscriber, || {
    let rt = tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .expect("failed to build runtime");
    rt.block_on(
      txain::from_values::<TestError>(vec![json!([1, 2, 3])])
        .map(
          Worker::callback(|_scope, args, done| {
            if args[0] == json!(2) {
              done.fail(TestError::Worker("two".to_string()));
            } else {
              done.succeed(args);
            }
          }),
          vec![],
        )
        .then_callback(1, |_scope, args, done| done.succeed(args))
        .end(),
    )
  });

  assert_eq!(result, Err(TestError::Worker("two".to_string())));
  assert_eq!(counter.0.load(Ordering::SeqCst), 1);
}

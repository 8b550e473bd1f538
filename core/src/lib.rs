// txain/src/lib.rs

//! txain: a sequencing engine for asynchronous steps.
//!
//! A pipeline is a queue of steps run strictly one after another:
//!  - Steps are callback-style (they resume a [`Continuation`]) or future-style
//!    (they return a future); both report one `Result<Args, E>`.
//!  - Each step declares how many values it takes. What the previous step produced
//!    is truncated or padded with `Null` to fit.
//!  - The first failure skips every remaining step and goes straight to the end.
//!  - `each`/`map`/`filter`/`reject`/`detect`/`concat` iterate a sequence with an
//!    asynchronous worker, one item at a time, as a single step.
//!  - Every step can read and write a per-pipeline key/value store through its [`Scope`].
//!
//! ```no_run
//! use serde_json::json;
//! use txain::{ChainError, Step, Worker};
//!
//! # async fn demo() -> Result<(), ChainError> {
//! let result = txain::chain::<ChainError>(Step::callback(0, |_scope, _args, done| {
//!     done.succeed_with(json!(["a", "b", "c"]));
//!   }))
//!   .map(
//!     Worker::future(|_scope, args| async move { Ok(vec![json!(format!("#{}", args[0].as_str().unwrap_or("")))]) }),
//!     vec![],
//!   )
//!   .end()
//!   .await?;
//! assert_eq!(result, json!(["#a", "#b", "#c"]));
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod value;

// --- Re-exports for the Public API ---

pub use crate::core::arity::adapt;
pub use crate::core::context::Scope;
pub use crate::core::control::{Completion, Continuation, Outcome, StepFuture};
pub use crate::core::step::{Step, StepArity, Worker};
pub use crate::core::task::StepTask;

pub use crate::collection::FoldKind;

pub use crate::pipeline::{chain, from_values, Initial, Pipeline};

pub use crate::error::{ChainError, ChainResult};

pub use crate::value::{collapse, is_truthy, Args, Value};

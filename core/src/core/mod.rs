pub mod arity;
pub mod context;
pub mod control;
pub mod step;
pub mod task;

// Re-export key types for easier access from other modules (and lib.rs)
pub use arity::adapt;
pub use context::Scope;
pub use control::{Completion, Continuation, Outcome, StepFuture};
pub use step::{Step, StepArity, Worker};
pub use task::StepTask;

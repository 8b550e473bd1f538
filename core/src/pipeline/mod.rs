// txain/src/pipeline/mod.rs

//! Defines the `Pipeline<Err>` struct, its chain-building calls and its runner.

pub mod combinators;
pub mod definition;
pub mod execution;

// Re-export the main Pipeline struct
pub use definition::{chain, from_values, Initial, Pipeline};

// txain/src/collection/mod.rs

//! The collection combinator: one queue step that iterates a sequence with a
//! per-item worker and folds the results.

pub mod engine;
pub mod fold;

pub use fold::FoldKind;

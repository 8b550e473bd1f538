// txain/src/collection/fold.rs

//! Collector and finisher for each collection kind.

use crate::value::{is_truthy, Args, Value};
use std::fmt;
use std::ops::ControlFlow;

/// Which fold a collection step performs over its per-item results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldKind {
  /// Side effects only; passes nothing forward.
  Each,
  /// Collects every produced value, in item order.
  Map,
  /// Keeps items whose produced value is truthy.
  Filter,
  /// Keeps items whose produced value is falsy.
  Reject,
  /// Stops at the first item whose produced value is truthy and passes that item.
  Detect,
  /// Flattens produced sequences one level into a single array.
  Concat,
}

impl FoldKind {
  pub fn name(self) -> &'static str {
    match self {
      FoldKind::Each => "each",
      FoldKind::Map => "map",
      FoldKind::Filter => "filter",
      FoldKind::Reject => "reject",
      FoldKind::Detect => "detect",
      FoldKind::Concat => "concat",
    }
  }
}

impl fmt::Display for FoldKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Accumulated state of one collection run.
#[derive(Debug)]
pub(crate) struct Fold {
  kind: FoldKind,
  acc: Vec<Value>,
  found: Option<Value>,
}

impl Fold {
  pub(crate) fn new(kind: FoldKind) -> Self {
    Self {
      kind,
      acc: Vec::new(),
      found: None,
    }
  }

  /// Folds one item's produced value in. `Break` means no further items should run.
  pub(crate) fn collect(&mut self, item: Value, produced: Value) -> ControlFlow<()> {
    match self.kind {
      FoldKind::Each => {}
      FoldKind::Map => self.acc.push(produced),
      FoldKind::Filter => {
        if is_truthy(&produced) {
          self.acc.push(item);
        }
      }
      FoldKind::Reject => {
        if !is_truthy(&produced) {
          self.acc.push(item);
        }
      }
      FoldKind::Detect => {
        if is_truthy(&produced) {
          self.found = Some(item);
          return ControlFlow::Break(());
        }
      }
      FoldKind::Concat => match produced {
        Value::Array(inner) => self.acc.extend(inner),
        other => self.acc.push(other),
      },
    }
    ControlFlow::Continue(())
  }

  /// The values the collection step reports on success.
  pub(crate) fn finish(self) -> Args {
    match self.kind {
      FoldKind::Each => Vec::new(),
      FoldKind::Detect => vec![self.found.unwrap_or(Value::Null)],
      FoldKind::Map | FoldKind::Filter | FoldKind::Reject | FoldKind::Concat => vec![Value::Array(self.acc)],
    }
  }
}

//! Error types for the navigation core.
//!
//! [NavigationError] is the only error a user program can trigger; it is scoped to one action
//! and converted into a [crate::types::Verdict] by the harness. The remaining errors are
//! precondition violations in exercise configuration or input files.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::Operation;

/// Why an action faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
  OutOfBounds,
  Wall,
  Pit,
  NothingToCollect,
  TooManyCollections,
  NoContainers,
  AllFull,
  NothingToPutDown,
}

impl FailureKind {
  /// Stable identifier used in logs and serialized records.
  pub fn as_str(self) -> &'static str {
    match self {
      FailureKind::OutOfBounds => "outOfBounds",
      FailureKind::Wall => "wall",
      FailureKind::Pit => "pit",
      FailureKind::NothingToCollect => "nothingToCollect",
      FailureKind::TooManyCollections => "tooManyCollections",
      FailureKind::NoContainers => "noContainers",
      FailureKind::AllFull => "allFull",
      FailureKind::NothingToPutDown => "nothingToPutDown",
    }
  }
}

impl fmt::Display for FailureKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let msg = match self {
      FailureKind::OutOfBounds => "Out of bounds!",
      FailureKind::Wall => "Hit wall!",
      FailureKind::Pit => "Fell in pit!",
      FailureKind::NothingToCollect => "No collectibles here!",
      FailureKind::TooManyCollections => "Already collected everything here!",
      FailureKind::NoContainers => "No containers here!",
      FailureKind::AllFull => "Already filled everything here!",
      FailureKind::NothingToPutDown => "Nothing to put down!",
    };
    f.write_str(msg)
  }
}

/// A faulted action, carrying the operation log accumulated up to and including the fault.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct NavigationError {
  pub kind: FailureKind,
  pub operations: Vec<Operation>,
}

impl NavigationError {
  pub fn new(kind: FailureKind, operations: &[Operation]) -> Self {
    Self {
      kind,
      operations: operations.to_vec(),
    }
  }
}

/// Malformed exercise map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
  #[error("map has no rows")]
  EmptyMap,
  #[error("map row {0} has no tiles")]
  EmptyRow(usize),
  #[error("map row {0} differs in length from the first row")]
  RaggedRow(usize),
  #[error("unknown tile code '{code}' at ({row}, {col})")]
  UnknownTile { code: String, row: usize, col: usize },
  #[error("unknown tile code '{0}'")]
  UnknownCode(String),
  #[error("map has no robot start tile")]
  MissingRobot,
}

/// The block tree cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
  #[error("no live '{0}' entry block in the workspace")]
  MissingEntryBlock(String),
}

/// Exercise configuration or event stream could not be loaded.
#[derive(Debug, Error)]
pub enum ExerciseError {
  #[error("unknown exercise '{0}'")]
  UnknownExercise(String),
  #[error("exercise '{url}' has an invalid map: {source}")]
  InvalidMap {
    url: String,
    #[source]
    source: GridError,
  },
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error("invalid JSON: {0}")]
  Json(#[from] serde_json::Error),
}

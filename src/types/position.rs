//! Grid coordinates.

use serde::{Deserialize, Serialize};

use super::Direction;

/// A cell on the grid as (row, column). Candidate positions may be negative or past the
/// grid edge until bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
  pub row: i32,
  pub col: i32,
}

impl Position {
  pub fn new(row: i32, col: i32) -> Self {
    Self { row, col }
  }

  /// Position reached after `steps` moves along `dir` (negative steps move backwards).
  pub fn step(self, dir: Direction, steps: i32) -> Position {
    Position {
      row: self.row + dir.d_row * steps,
      col: self.col + dir.d_col * steps,
    }
  }
}

//! Robot heading on the grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way to rotate the robot by 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Turn {
  Left,
  Right,
}

/// Unit vector for one of the four cardinal headings.
///
/// `d_row` is the vertical component (negative is up), `d_col` the horizontal one
/// (negative is left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Direction {
  pub d_row: i32,
  pub d_col: i32,
}

impl Direction {
  pub const DOWN: Direction = Direction { d_row: 1, d_col: 0 };
  pub const RIGHT: Direction = Direction { d_row: 0, d_col: 1 };
  pub const UP: Direction = Direction { d_row: -1, d_col: 0 };
  pub const LEFT: Direction = Direction { d_row: 0, d_col: -1 };

  /// All four headings, in start-tile code order (`3`..`6`).
  pub const ALL: [Direction; 4] = [
    Direction::DOWN,
    Direction::RIGHT,
    Direction::UP,
    Direction::LEFT,
  ];

  /// Rotates the vector 90°.
  ///
  /// Left maps `(dRow, dCol)` to `(-dCol, dRow)`, right maps it to `(dCol, -dRow)`.
  pub fn rotate(self, turn: Turn) -> Direction {
    match turn {
      Turn::Left => Direction {
        d_row: -self.d_col,
        d_col: self.d_row,
      },
      Turn::Right => Direction {
        d_row: self.d_col,
        d_col: -self.d_row,
      },
    }
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Direction::DOWN => write!(f, "down"),
      Direction::RIGHT => write!(f, "right"),
      Direction::UP => write!(f, "up"),
      Direction::LEFT => write!(f, "left"),
      Direction { d_row, d_col } => write!(f, "({}, {})", d_row, d_col),
    }
  }
}

//! Tests for `Direction`.

use proptest::prelude::*;

use super::{Direction, Turn};

fn cardinal() -> impl Strategy<Value = Direction> {
  prop::sample::select(Direction::ALL.to_vec())
}

#[test]
fn rotate_left_from_right_faces_up() {
  assert_eq!(Direction::RIGHT.rotate(Turn::Left), Direction::UP);
  assert_eq!(Direction::UP.rotate(Turn::Left), Direction::LEFT);
}

#[test]
fn rotate_right_from_right_faces_down() {
  assert_eq!(Direction::RIGHT.rotate(Turn::Right), Direction::DOWN);
  assert_eq!(Direction::DOWN.rotate(Turn::Right), Direction::LEFT);
}

#[test]
fn display_names_cardinals() {
  assert_eq!(Direction::DOWN.to_string(), "down");
  assert_eq!(Direction::LEFT.to_string(), "left");
}

proptest! {
  #[test]
  fn left_then_right_is_identity(v in cardinal()) {
    prop_assert_eq!(v.rotate(Turn::Left).rotate(Turn::Right), v);
  }

  #[test]
  fn four_left_turns_return_to_start(v in cardinal()) {
    let mut d = v;
    for _ in 0..4 {
      d = d.rotate(Turn::Left);
    }
    prop_assert_eq!(d, v);
  }

  #[test]
  fn rotation_keeps_unit_length(v in cardinal(), left in any::<bool>()) {
    let turn = if left { Turn::Left } else { Turn::Right };
    let r = v.rotate(turn);
    prop_assert_eq!(r.d_row.abs() + r.d_col.abs(), 1);
  }
}

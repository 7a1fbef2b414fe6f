//! Block vocabulary of the navigation exercises.

/// Field holding the literal iteration count of a `repeat` block.
pub const REPEAT_TIMES_FIELD: &str = "TIMES";

/// Known block types. Anything else is carried as [BlockKind::Other].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
  /// Program entry block.
  Start,
  Forward,
  Backward,
  JumpForward,
  TurnLeft,
  TurnRight,
  Repeat,
  PickCollectible,
  PutDownCollectible,
  Other,
}

impl BlockKind {
  pub fn from_type(block_type: &str) -> Self {
    match block_type {
      "start" => BlockKind::Start,
      "forward" => BlockKind::Forward,
      "backward" => BlockKind::Backward,
      "jump_forward" => BlockKind::JumpForward,
      "turn_left" => BlockKind::TurnLeft,
      "turn_right" => BlockKind::TurnRight,
      "repeat" => BlockKind::Repeat,
      "pick_collectible" => BlockKind::PickCollectible,
      "put_down_collectible" => BlockKind::PutDownCollectible,
      _ => BlockKind::Other,
    }
  }

  /// Abbreviation used in structural fingerprints.
  ///
  /// `start` and `backward` share `b`; `start` only ever appears first.
  pub fn short_name(self) -> Option<&'static str> {
    Some(match self {
      BlockKind::Start => "b",
      BlockKind::Forward => "f",
      BlockKind::Backward => "b",
      BlockKind::JumpForward => "j",
      BlockKind::TurnLeft => "t(l)",
      BlockKind::TurnRight => "t(r)",
      BlockKind::Repeat => "r",
      BlockKind::PickCollectible => "c",
      BlockKind::PutDownCollectible => "h",
      BlockKind::Other => return None,
    })
  }
}

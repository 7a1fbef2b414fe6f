//! Compiled program: an ordered, possibly nested list of opcodes.

use serde::{Deserialize, Serialize};

use super::{MoveAction, Turn};

/// One robot instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Opcode {
  Forward,
  Backward,
  JumpForward,
  TurnLeft,
  TurnRight,
  Pick,
  PutDown,
  Repeat { count: u32, body: ActionScript },
}

impl Opcode {
  /// The move this opcode performs, if it is a movement or rotation.
  pub fn move_action(&self) -> Option<MoveAction> {
    match self {
      Opcode::Forward => Some(MoveAction::Forward),
      Opcode::Backward => Some(MoveAction::Backward),
      Opcode::JumpForward => Some(MoveAction::JumpForward),
      Opcode::TurnLeft => Some(MoveAction::TurnLeft),
      Opcode::TurnRight => Some(MoveAction::TurnRight),
      _ => None,
    }
  }
}

impl MoveAction {
  /// Cells travelled along the heading (negative is backwards); zero for rotations.
  pub fn stride(self) -> i32 {
    match self {
      MoveAction::Forward => 1,
      MoveAction::Backward => -1,
      MoveAction::JumpForward => 2,
      MoveAction::TurnLeft | MoveAction::TurnRight => 0,
    }
  }

  pub fn turn(self) -> Option<Turn> {
    match self {
      MoveAction::TurnLeft => Some(Turn::Left),
      MoveAction::TurnRight => Some(Turn::Right),
      _ => None,
    }
  }
}

/// An opcode tagged with the block that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
  pub block_id: String,
  #[serde(flatten)]
  pub op: Opcode,
}

impl Instruction {
  pub fn new(op: Opcode, block_id: impl Into<String>) -> Self {
    Self {
      block_id: block_id.into(),
      op,
    }
  }
}

/// Ordered instruction list. Produced fresh for every execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionScript {
  pub instructions: Vec<Instruction>,
}

impl ActionScript {
  pub fn new(instructions: Vec<Instruction>) -> Self {
    Self { instructions }
  }

  pub fn is_empty(&self) -> bool {
    self.instructions.is_empty()
  }

  pub fn len(&self) -> usize {
    self.instructions.len()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
    self.instructions.iter()
  }
}

impl<'a> IntoIterator for &'a ActionScript {
  type Item = &'a Instruction;
  type IntoIter = std::slice::Iter<'a, Instruction>;

  fn into_iter(self) -> Self::IntoIter {
    self.instructions.iter()
  }
}

impl FromIterator<Instruction> for ActionScript {
  fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

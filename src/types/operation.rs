//! Operation log entries produced by the evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A movement or rotation of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveAction {
  Forward,
  Backward,
  JumpForward,
  TurnLeft,
  TurnRight,
}

impl MoveAction {
  /// Short code used in the operation log.
  pub fn code(self) -> &'static str {
    match self {
      MoveAction::Forward => "f",
      MoveAction::Backward => "b",
      MoveAction::JumpForward => "jf",
      MoveAction::TurnLeft => "tl",
      MoveAction::TurnRight => "tr",
    }
  }

  fn from_code(code: &str) -> Option<Self> {
    Some(match code {
      "f" => MoveAction::Forward,
      "b" => MoveAction::Backward,
      "jf" => MoveAction::JumpForward,
      "tl" => MoveAction::TurnLeft,
      "tr" => MoveAction::TurnRight,
      _ => return None,
    })
  }
}

/// What a single operation log entry records.
///
/// Serialized as the short code: `f`, `jf`, ... for moves, the move code suffixed with `X`
/// for a wall bump, `fallPit`, `p` (pick) and `v` (put down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OperationAction {
  Move(MoveAction),
  Blocked(MoveAction),
  FallPit,
  Pick,
  PutDown,
}

impl fmt::Display for OperationAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OperationAction::Move(m) => f.write_str(m.code()),
      OperationAction::Blocked(m) => write!(f, "{}X", m.code()),
      OperationAction::FallPit => f.write_str("fallPit"),
      OperationAction::Pick => f.write_str("p"),
      OperationAction::PutDown => f.write_str("v"),
    }
  }
}

impl FromStr for OperationAction {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "fallPit" => return Ok(OperationAction::FallPit),
      "p" => return Ok(OperationAction::Pick),
      "v" => return Ok(OperationAction::PutDown),
      _ => {}
    }
    if let Some(m) = MoveAction::from_code(s) {
      return Ok(OperationAction::Move(m));
    }
    s.strip_suffix('X')
      .and_then(MoveAction::from_code)
      .map(OperationAction::Blocked)
      .ok_or_else(|| format!("unknown operation action '{}'", s))
  }
}

impl TryFrom<String> for OperationAction {
  type Error = String;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    s.parse()
  }
}

impl From<OperationAction> for String {
  fn from(a: OperationAction) -> Self {
    a.to_string()
  }
}

/// One entry of the append-only operation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  pub action: OperationAction,
  /// Block that issued the action.
  pub block_id: String,
}

impl Operation {
  pub fn new(action: OperationAction, block_id: impl Into<String>) -> Self {
    Self {
      action,
      block_id: block_id.into(),
    }
  }
}

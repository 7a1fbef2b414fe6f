//! Tests for `Operation` and its short codes.

use super::{MoveAction, Operation, OperationAction};

#[test]
fn move_codes_match_log_format() {
  assert_eq!(OperationAction::Move(MoveAction::Forward).to_string(), "f");
  assert_eq!(OperationAction::Move(MoveAction::JumpForward).to_string(), "jf");
  assert_eq!(OperationAction::Move(MoveAction::TurnRight).to_string(), "tr");
}

#[test]
fn blocked_move_gets_x_suffix() {
  assert_eq!(OperationAction::Blocked(MoveAction::Backward).to_string(), "bX");
  assert_eq!(
    "jfX".parse::<OperationAction>().unwrap(),
    OperationAction::Blocked(MoveAction::JumpForward)
  );
}

#[test]
fn terminal_and_item_codes_parse() {
  assert_eq!("fallPit".parse::<OperationAction>().unwrap(), OperationAction::FallPit);
  assert_eq!("p".parse::<OperationAction>().unwrap(), OperationAction::Pick);
  assert_eq!("v".parse::<OperationAction>().unwrap(), OperationAction::PutDown);
}

#[test]
fn unknown_code_is_rejected() {
  assert!("zz".parse::<OperationAction>().is_err());
  assert!("X".parse::<OperationAction>().is_err());
}

#[test]
fn operation_serializes_with_block_id() {
  let op = Operation::new(OperationAction::Blocked(MoveAction::Forward), "blk1");
  let json = serde_json::to_value(&op).unwrap();
  assert_eq!(json["action"], "fX");
  assert_eq!(json["blockId"], "blk1");
  let back: Operation = serde_json::from_value(json).unwrap();
  assert_eq!(back, op);
}

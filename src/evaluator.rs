//! Action rules: apply one robot action to a [GridState].
//!
//! Every rule mutates the state in place, appends to the operation log and returns whether
//! the action completed the exercise. A fault returns a [NavigationError] carrying the log
//! up to and including the fault.
//!
//! Ordering: the bounds check precedes any mutation, wall/pit detection precedes goal
//! detection, and intermediate goals are cleared as soon as they are entered.

use tracing::{debug, instrument};

use crate::error::{FailureKind, NavigationError};
use crate::types::{GridState, MoveAction, Operation, OperationAction, Robot, Tile};

fn fault(kind: FailureKind, block_id: &str, log: &[Operation]) -> NavigationError {
  debug!(kind = kind.as_str(), block_id, ops = log.len(), "action faulted");
  NavigationError::new(kind, log)
}

/// Moves or rotates the robot.
///
/// Returns `Ok(true)` when the robot lands on the main goal with every intermediate goal
/// cleared and the collectible ledger depleted. Touching the goal early is not an error.
#[instrument(level = "trace", skip(state, log))]
pub fn move_robot(
  action: MoveAction,
  block_id: &str,
  state: &mut GridState,
  log: &mut Vec<Operation>,
) -> Result<bool, NavigationError> {
  let robot = state.robot;
  let candidate = match action.turn() {
    Some(turn) => Robot {
      pos: robot.pos,
      dir: robot.dir.rotate(turn),
    },
    None => Robot {
      pos: robot.pos.step(robot.dir, action.stride()),
      dir: robot.dir,
    },
  };

  let Some(tile) = state.tile_at(candidate.pos) else {
    log.push(Operation::new(OperationAction::Move(action), block_id));
    log.push(Operation::new(OperationAction::FallPit, block_id));
    return Err(fault(FailureKind::OutOfBounds, block_id, log));
  };

  state.robot = candidate;

  let mut success = false;
  match tile {
    Tile::Wall => {
      log.push(Operation::new(OperationAction::Blocked(action), block_id));
      return Err(fault(FailureKind::Wall, block_id, log));
    }
    Tile::Pit => {
      log.push(Operation::new(OperationAction::Move(action), block_id));
      log.push(Operation::new(OperationAction::FallPit, block_id));
      return Err(fault(FailureKind::Pit, block_id, log));
    }
    Tile::Goal => success = state.goal_requirements_met(),
    Tile::IntermediateGoal => state.set_tile(candidate.pos, Tile::Path),
    _ => {}
  }

  log.push(Operation::new(OperationAction::Move(action), block_id));
  Ok(success)
}

/// Picks one collectible from the robot's cell. Never completes the exercise on its own.
#[instrument(level = "trace", skip(state, log))]
pub fn pick(
  block_id: &str,
  state: &mut GridState,
  log: &mut Vec<Operation>,
) -> Result<bool, NavigationError> {
  let pos = state.robot.pos;
  let Some(remaining) = state.collect.collectibles.get_mut(&pos) else {
    return Err(fault(FailureKind::NothingToCollect, block_id, log));
  };
  if *remaining == 0 {
    return Err(fault(FailureKind::TooManyCollections, block_id, log));
  }

  *remaining -= 1;
  state.collect.progress.collected += 1;
  log.push(Operation::new(OperationAction::Pick, block_id));
  Ok(false)
}

/// Puts one carried collectible into the container on the robot's cell.
///
/// Returns `Ok(true)` once the number put down equals the exercise's collectible total.
#[instrument(level = "trace", skip(state, log))]
pub fn put(
  block_id: &str,
  state: &mut GridState,
  log: &mut Vec<Operation>,
) -> Result<bool, NavigationError> {
  let pos = state.robot.pos;
  let Some(capacity) = state.collect.containers.get_mut(&pos) else {
    return Err(fault(FailureKind::NoContainers, block_id, log));
  };
  if *capacity == 0 {
    return Err(fault(FailureKind::AllFull, block_id, log));
  }
  if state.collect.progress.collected == 0 {
    return Err(fault(FailureKind::NothingToPutDown, block_id, log));
  }

  *capacity -= 1;
  state.collect.progress.collected -= 1;
  state.collect.progress.put_down += 1;
  log.push(Operation::new(OperationAction::PutDown, block_id));
  Ok(state.collect.progress.put_down == state.collect.totals.num)
}

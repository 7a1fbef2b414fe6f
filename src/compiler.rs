//! Compile the mirrored block tree into an [ActionScript].
//!
//! The walk starts at the entry block and follows `NEXT` links depth-first. A block is
//! emitted only when its parent chain leads back to the entry block through live blocks;
//! detached blocks produce nothing. `repeat` compiles its `DO` chain into a nested body and
//! takes its literal count from the `TIMES` field (0 when missing or not a number).

use std::collections::HashSet;
use tracing::{info, instrument, warn};

use crate::error::CompileError;
use crate::telemetry::BlockArena;
use crate::types::{
  ActionScript, BlockKind, BlockNode, Instruction, Opcode, REPEAT_TIMES_FIELD, Slot,
};

/// Block type of the program entry.
pub const ENTRY_BLOCK_TYPE: &str = "start";

/// Compiles every live entry block's program, in mirror order.
#[instrument(level = "trace", skip(arena))]
pub fn compile_program(arena: &BlockArena) -> Result<ActionScript, CompileError> {
  let entries: Vec<&BlockNode> = arena.entry_blocks().collect();
  if entries.is_empty() {
    return Err(CompileError::MissingEntryBlock(ENTRY_BLOCK_TYPE.to_string()));
  }

  let mut visited = HashSet::new();
  let mut script = ActionScript::default();
  for entry in entries {
    visited.insert(entry.id.as_str());
    let chain = compile_chain(arena, entry.child(&Slot::Next), &mut visited);
    script.instructions.extend(chain.instructions);
  }
  info!(instructions = script.len(), "program compiled");
  Ok(script)
}

/// Compiles a `NEXT`-linked chain starting at `first`.
fn compile_chain<'a>(
  arena: &'a BlockArena,
  first: Option<&'a str>,
  visited: &mut HashSet<&'a str>,
) -> ActionScript {
  let mut script = ActionScript::default();
  let mut cur = first;
  while let Some(id) = cur {
    let Some(node) = arena.live(id) else {
      break;
    };
    if !visited.insert(node.id.as_str()) {
      warn!(block_id = id, "block reached twice; chain truncated");
      break;
    }
    if arena.is_connected_to_entry(id) {
      if let Some(ins) = compile_block(arena, node, visited) {
        script.instructions.push(ins);
      }
    }
    cur = node.child(&Slot::Next);
  }
  script
}

fn compile_block<'a>(
  arena: &'a BlockArena,
  node: &'a BlockNode,
  visited: &mut HashSet<&'a str>,
) -> Option<Instruction> {
  let op = match node.kind() {
    BlockKind::Forward => Opcode::Forward,
    BlockKind::Backward => Opcode::Backward,
    BlockKind::JumpForward => Opcode::JumpForward,
    BlockKind::TurnLeft => Opcode::TurnLeft,
    BlockKind::TurnRight => Opcode::TurnRight,
    BlockKind::PickCollectible => Opcode::Pick,
    BlockKind::PutDownCollectible => Opcode::PutDown,
    BlockKind::Repeat => Opcode::Repeat {
      count: repeat_count(node),
      body: compile_chain(arena, node.child(&Slot::Do), visited),
    },
    BlockKind::Start | BlockKind::Other => {
      warn!(block_id = %node.id, block_type = %node.block_type, "block type not executable; skipped");
      return None;
    }
  };
  Some(Instruction::new(op, node.id.clone()))
}

/// Literal iteration count of a `repeat` block.
pub(crate) fn repeat_count(node: &BlockNode) -> u32 {
  node
    .field(REPEAT_TIMES_FIELD)
    .and_then(|v| v.trim().parse().ok())
    .unwrap_or(0)
}

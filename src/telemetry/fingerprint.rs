//! Program shape reconstruction and its string fingerprint.

use std::collections::HashSet;
use tracing::instrument;

use super::BlockArena;
use crate::types::{
  BlockKind, BlockNode, CodeChild, CodeStructure, ProgramStructure, REPEAT_TIMES_FIELD, Slot,
};

/// Rebuilds the live tree rooted at `id`. `None` when the block is unknown or deleted.
///
/// `NEXT` chains are walked iteratively; only nested slots recurse.
pub fn code_structure(arena: &BlockArena, id: &str) -> Option<CodeStructure> {
  let mut seen = HashSet::new();
  build_chain(arena, id, &mut seen)
}

fn build_chain<'a>(
  arena: &'a BlockArena,
  first: &'a str,
  seen: &mut HashSet<&'a str>,
) -> Option<CodeStructure> {
  let mut chain = Vec::new();
  let mut cur = Some(first);
  while let Some(id) = cur {
    let Some(node) = arena.live(id) else {
      break;
    };
    if !seen.insert(node.id.as_str()) {
      break;
    }
    chain.push(build_block(arena, node, seen));
    cur = node.child(&Slot::Next);
  }

  let mut next: Option<CodeStructure> = None;
  while let Some(mut block) = chain.pop() {
    if let Some(tail) = next.take() {
      let at = block.children.partition_point(|c| c.nested < Slot::Next);
      block.children.insert(
        at,
        CodeChild {
          nested: Slot::Next,
          block: tail,
        },
      );
    }
    next = Some(block);
  }
  next
}

/// One block with every slot except `NEXT`.
fn build_block<'a>(
  arena: &'a BlockArena,
  node: &'a BlockNode,
  seen: &mut HashSet<&'a str>,
) -> CodeStructure {
  let kind = node.kind();
  let block_type = kind
    .short_name()
    .map(String::from)
    .unwrap_or_else(|| node.block_type.clone());
  let name = if kind == BlockKind::Repeat {
    format!("{}({})", block_type, node.field(REPEAT_TIMES_FIELD).unwrap_or("0"))
  } else {
    block_type.clone()
  };
  let children = node
    .children
    .iter()
    .filter(|(slot, _)| **slot != Slot::Next)
    .filter_map(|(slot, child)| {
      build_chain(arena, child, seen).map(|block| CodeChild {
        nested: slot.clone(),
        block,
      })
    })
    .collect();
  CodeStructure {
    block_type,
    name,
    children,
  }
}

/// Renders a structure as its fingerprint string.
///
/// The block name is followed by its loop body in `{}`, alternate branch in `else{}`,
/// inline expression in `()`, the next block appended directly, and stack body in `{}`.
/// Other slots are not rendered.
#[instrument(level = "trace", skip(block))]
pub fn code_structure_to_string(block: &CodeStructure) -> String {
  let mut out = String::new();
  // Stack bodies close after the rest of the chain, innermost first.
  let mut stacks = Vec::new();
  let mut cur = Some(block);
  while let Some(b) = cur {
    out.push_str(&b.name);
    if let Some(body) = b.child(&Slot::Do) {
      out.push('{');
      out.push_str(&code_structure_to_string(body));
      out.push('}');
    }
    if let Some(alt) = b.child(&Slot::Else) {
      out.push_str("else{");
      out.push_str(&code_structure_to_string(alt));
      out.push('}');
    }
    if let Some(inline) = b.child(&Slot::Inline) {
      out.push('(');
      out.push_str(&code_structure_to_string(inline));
      out.push(')');
    }
    if let Some(stack) = b.child(&Slot::Stack) {
      stacks.push(format!("{{{}}}", code_structure_to_string(stack)));
    }
    cur = b.child(&Slot::Next);
  }
  while let Some(stack) = stacks.pop() {
    out.push_str(&stack);
  }
  out
}

/// Whole-workspace shape: the first live entry block plus loose top-level blocks.
pub fn program_structure(arena: &BlockArena) -> ProgramStructure {
  ProgramStructure {
    main: arena
      .entry_blocks()
      .next()
      .and_then(|entry| code_structure(arena, &entry.id)),
    others: arena
      .loose_top_blocks()
      .filter_map(|n| code_structure(arena, &n.id))
      .collect(),
  }
}

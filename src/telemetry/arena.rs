//! Arena of mirrored editor blocks, keyed by block id.
//!
//! Edges are stored as id references on both ends (`parent` and the parent's `children`
//! slot). Deleted blocks are tombstoned, never removed. Every traversal carries a visited
//! set, so a malformed event stream that introduces a cycle cannot loop forever.

use std::collections::{HashMap, HashSet};
use tracing::{instrument, trace, warn};

use crate::types::{BlockKind, BlockNode, BlockSpec, Slot};

#[derive(Debug, Clone, Default)]
pub struct BlockArena {
  nodes: HashMap<String, BlockNode>,
  /// Insertion order, for deterministic iteration.
  order: Vec<String>,
}

impl BlockArena {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, id: &str) -> Option<&BlockNode> {
    self.nodes.get(id)
  }

  pub fn contains(&self, id: &str) -> bool {
    self.nodes.contains_key(id)
  }

  /// Live (not deleted) block with this id.
  pub fn live(&self, id: &str) -> Option<&BlockNode> {
    self.nodes.get(id).filter(|n| !n.deleted)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// All nodes, tombstones included, in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = &BlockNode> {
    self.order.iter().filter_map(|id| self.nodes.get(id))
  }

  /// Mirrors `spec` and its subtree. When `parent` is given the root is attached to that
  /// parent's slot. Re-creating a known id (e.g. undoing a delete) revives it in place.
  #[instrument(level = "trace", skip(self, spec), fields(id = %spec.id))]
  pub fn insert(&mut self, spec: &BlockSpec, parent: Option<(&str, Slot)>) {
    match parent {
      Some((parent_id, slot)) if self.contains(parent_id) => {
        self.insert_subtree(spec, Some(parent_id));
        self.link(parent_id, slot, &spec.id);
      }
      Some((parent_id, _)) => {
        warn!(parent_id, block_id = %spec.id, "create references unknown parent; mirroring as top-level");
        self.insert_subtree(spec, None);
      }
      None => self.insert_subtree(spec, None),
    }
  }

  fn insert_subtree(&mut self, spec: &BlockSpec, parent: Option<&str>) {
    let mut node = BlockNode::new(spec.id.clone(), spec.block_type.clone());
    node.fields = spec.fields.clone();
    node.parent = parent.map(String::from);
    node.top = parent.is_none();
    for child in &spec.children {
      node.children.insert(child.slot.clone(), child.block.id.clone());
    }
    if self.nodes.insert(spec.id.clone(), node).is_none() {
      self.order.push(spec.id.clone());
    }
    for child in &spec.children {
      self.insert_subtree(&child.block, Some(&spec.id));
    }
  }

  fn link(&mut self, parent_id: &str, slot: Slot, child_id: &str) {
    if let Some(parent) = self.nodes.get_mut(parent_id) {
      parent.children.insert(slot, child_id.to_string());
    }
    if let Some(child) = self.nodes.get_mut(child_id) {
      child.parent = Some(parent_id.to_string());
      child.top = false;
    }
  }

  /// Sets (or clears, when `value` is `None`) a field. Returns false for unknown blocks.
  pub fn set_field(&mut self, id: &str, name: &str, value: Option<&str>) -> bool {
    let Some(node) = self.nodes.get_mut(id) else {
      return false;
    };
    match value {
      Some(v) => {
        node.fields.insert(name.to_string(), v.to_string());
      }
      None => {
        node.fields.remove(name);
      }
    }
    true
  }

  /// Applies a move: detaches `id` from the old parent's slot and attaches it to the new
  /// parent's slot (`NEXT` when no slot is named), recomputing the top-level flag.
  #[instrument(level = "trace", skip(self))]
  pub fn reparent(
    &mut self,
    id: &str,
    old_parent: Option<&str>,
    old_slot: Option<&Slot>,
    new_parent: Option<&str>,
    new_slot: Option<&Slot>,
  ) -> bool {
    if !self.contains(id) {
      warn!(block_id = id, "move for unknown block ignored");
      return false;
    }

    if let Some(old_id) = old_parent {
      let slot = old_slot.cloned().unwrap_or(Slot::Next);
      if let Some(old) = self.nodes.get_mut(old_id) {
        if old.child(&slot) == Some(id) {
          old.children.remove(&slot);
        }
      }
      if let Some(node) = self.nodes.get_mut(id) {
        node.parent = None;
        node.top = true;
      }
    }

    if let Some(new_id) = new_parent {
      if !self.contains(new_id) {
        warn!(block_id = id, parent_id = new_id, "move onto unknown parent; block stays top-level");
        return true;
      }
      if self.is_ancestor_or_self(id, new_id) {
        warn!(block_id = id, parent_id = new_id, "move would create a cycle; ignored");
        return true;
      }
      let slot = new_slot.cloned().unwrap_or(Slot::Next);
      self.link(new_id, slot, id);
    }
    true
  }

  /// True when `ancestor` is `id` itself or one of its ancestors along parent links.
  fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
    let mut seen = HashSet::new();
    let mut cur = Some(id);
    while let Some(c) = cur {
      if c == ancestor {
        return true;
      }
      if !seen.insert(c) {
        return false;
      }
      cur = self.nodes.get(c).and_then(|n| n.parent.as_deref());
    }
    false
  }

  /// Flags `id` and every mirrored descendant as deleted. Returns the number of nodes
  /// newly flagged.
  #[instrument(level = "trace", skip(self))]
  pub fn tombstone(&mut self, id: &str) -> usize {
    let mut seen = HashSet::new();
    let mut stack = vec![id.to_string()];
    let mut flagged = 0;
    while let Some(cur) = stack.pop() {
      if !seen.insert(cur.clone()) {
        continue;
      }
      let Some(node) = self.nodes.get_mut(&cur) else {
        continue;
      };
      if !node.deleted {
        node.deleted = true;
        flagged += 1;
      }
      stack.extend(node.children.values().cloned());
    }
    trace!(block_id = id, flagged, "tombstoned subtree");
    flagged
  }

  /// Ids of the live subtree rooted at `id`, the root included (empty when `id` is
  /// unknown or deleted). Pre-order, children in slot precedence.
  pub fn descendants(&self, id: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![id];
    while let Some(cur) = stack.pop() {
      if !seen.insert(cur) {
        continue;
      }
      let Some(node) = self.live(cur) else {
        continue;
      };
      out.push(node.id.as_str());
      stack.extend(node.children.values().rev().map(String::as_str));
    }
    out
  }

  /// Live program entry blocks.
  pub fn entry_blocks(&self) -> impl Iterator<Item = &BlockNode> {
    self
      .iter()
      .filter(|n| !n.deleted && n.kind() == BlockKind::Start)
  }

  /// Live top-level blocks that are not program entries.
  pub fn loose_top_blocks(&self) -> impl Iterator<Item = &BlockNode> {
    self
      .iter()
      .filter(|n| !n.deleted && n.top && n.kind() != BlockKind::Start)
  }

  /// Size of the connected subtree under every live entry block, summed.
  pub fn used_block_count(&self) -> usize {
    self
      .entry_blocks()
      .map(|entry| self.descendants(&entry.id).len())
      .sum()
  }

  /// True when walking parent links from `id` reaches a live entry block through live
  /// ancestors only.
  pub fn is_connected_to_entry(&self, id: &str) -> bool {
    let mut seen = HashSet::new();
    let mut cur = self.live(id);
    while let Some(node) = cur {
      if node.kind() == BlockKind::Start {
        return true;
      }
      if !seen.insert(node.id.as_str()) {
        return false;
      }
      cur = node.parent.as_deref().and_then(|p| self.live(p));
    }
    false
  }

  /// Slot of `parent_id` that currently holds `child_id`.
  pub fn slot_of(&self, parent_id: &str, child_id: &str) -> Option<&Slot> {
    self
      .get(parent_id)?
      .children
      .iter()
      .find(|(_, c)| c.as_str() == child_id)
      .map(|(slot, _)| slot)
  }
}

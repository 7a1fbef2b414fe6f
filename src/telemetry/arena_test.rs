//! Tests for the block arena.

use crate::telemetry::BlockArena;
use crate::types::{BlockSpec, Slot};

fn block(id: &str, block_type: &str) -> BlockSpec {
  BlockSpec::new(id, block_type)
}

/// start → a → r{DO: b → c} → d
fn sample() -> BlockArena {
  let body = BlockSpec::chain(block("b", "forward"), vec![block("c", "turn_left")]);
  let rep = block("r", "repeat")
    .with_field("TIMES", "2")
    .with_child(Slot::Do, body);
  let mut arena = BlockArena::new();
  arena.insert(
    &BlockSpec::chain(block("start", "start"), vec![block("a", "forward"), rep, block("d", "backward")]),
    None,
  );
  arena
}

#[test]
fn insert_mirrors_whole_subtree() {
  let arena = sample();
  assert_eq!(arena.len(), 6);
  let r = arena.get("r").unwrap();
  assert_eq!(r.child(&Slot::Do), Some("b"));
  assert_eq!(r.child(&Slot::Next), Some("d"));
  assert_eq!(r.parent.as_deref(), Some("a"));
  assert!(!r.top);
  assert!(arena.get("start").unwrap().top);
}

#[test]
fn insert_under_known_parent_links_both_ends() {
  let mut arena = BlockArena::new();
  arena.insert(&block("start", "start"), None);
  arena.insert(&block("x", "forward"), Some(("start", Slot::Next)));
  assert_eq!(arena.get("start").unwrap().child(&Slot::Next), Some("x"));
  assert_eq!(arena.get("x").unwrap().parent.as_deref(), Some("start"));
  assert_eq!(arena.used_block_count(), 2);
}

#[test]
fn insert_under_unknown_parent_is_top_level() {
  let mut arena = BlockArena::new();
  arena.insert(&block("x", "forward"), Some(("ghost", Slot::Next)));
  let x = arena.get("x").unwrap();
  assert!(x.top);
  assert!(x.parent.is_none());
}

#[test]
fn descendants_are_preorder_and_include_root() {
  let arena = sample();
  assert_eq!(arena.descendants("a"), vec!["a", "r", "b", "c", "d"]);
  assert!(arena.descendants("missing").is_empty());
}

#[test]
fn used_block_count_covers_entry_subtree() {
  let mut arena = sample();
  arena.insert(&block("loose", "forward"), None);
  assert_eq!(arena.used_block_count(), 6);
}

#[test]
fn tombstone_cascades_and_keeps_nodes() {
  let mut arena = sample();
  let flagged = arena.tombstone("r");
  assert_eq!(flagged, 4);
  for id in ["r", "b", "c", "d"] {
    assert!(arena.get(id).unwrap().deleted, "{id}");
    assert!(arena.live(id).is_none(), "{id}");
  }
  assert_eq!(arena.len(), 6);
  assert_eq!(arena.used_block_count(), 2);
  assert_eq!(arena.used_block_count(), arena.descendants("start").len());
  assert_eq!(arena.tombstone("r"), 0);
}

#[test]
fn deleting_entry_block_zeroes_used_count() {
  let mut arena = sample();
  arena.tombstone("start");
  assert_eq!(arena.used_block_count(), 0);
  assert_eq!(arena.entry_blocks().count(), 0);
}

#[test]
fn reparent_detaches_and_attaches_symmetrically() {
  let mut arena = sample();
  let slot = Slot::Next;
  assert!(arena.reparent("d", Some("r"), Some(&slot), Some("start"), None));
  assert_eq!(arena.get("r").unwrap().child(&Slot::Next), None);
  assert_eq!(arena.get("d").unwrap().parent.as_deref(), Some("start"));
  assert_eq!(arena.slot_of("start", "d"), Some(&Slot::Next));
}

#[test]
fn reparent_to_nothing_makes_block_top_level() {
  let mut arena = sample();
  let slot = Slot::Do;
  arena.reparent("b", Some("r"), Some(&slot), None, None);
  let b = arena.get("b").unwrap();
  assert!(b.top);
  assert!(b.parent.is_none());
  assert!(!arena.is_connected_to_entry("b"));
  assert!(!arena.is_connected_to_entry("c"));
  assert_eq!(arena.used_block_count(), 4);
  assert_eq!(arena.loose_top_blocks().map(|n| n.id.as_str()).collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn reparent_leaves_slot_alone_when_it_holds_another_block() {
  let mut arena = sample();
  let slot = Slot::Next;
  // "a" does not sit in start's DO slot; start keeps its NEXT child.
  arena.reparent("a", Some("start"), Some(&Slot::Do), None, None);
  assert_eq!(arena.get("start").unwrap().child(&slot), Some("a"));
}

#[test]
fn reparent_refuses_cycles() {
  let mut arena = sample();
  let slot = Slot::Next;
  arena.reparent("a", Some("start"), Some(&slot), Some("c"), None);
  let a = arena.get("a").unwrap();
  assert!(a.top);
  assert!(a.parent.is_none());
  assert_eq!(arena.get("c").unwrap().child(&Slot::Next), None);
  // Traversals still terminate.
  assert_eq!(arena.descendants("a").len(), 5);
}

#[test]
fn reparent_unknown_block_is_ignored() {
  let mut arena = sample();
  assert!(!arena.reparent("ghost", None, None, Some("start"), None));
}

#[test]
fn set_field_updates_and_clears() {
  let mut arena = sample();
  assert!(arena.set_field("r", "TIMES", Some("9")));
  assert_eq!(arena.get("r").unwrap().field("TIMES"), Some("9"));
  assert!(arena.set_field("r", "TIMES", None));
  assert_eq!(arena.get("r").unwrap().field("TIMES"), None);
  assert!(!arena.set_field("ghost", "TIMES", Some("1")));
}

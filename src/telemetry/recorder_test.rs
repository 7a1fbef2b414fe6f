//! Tests for the interaction recorder.

use chrono::{DateTime, Utc};

use crate::telemetry::Recorder;
use crate::types::{
  BlockSpec, DragOutcome, DragRecord, EditorEvent, EventSource, InteractionAction, Slot, SurfacePoint,
};

fn t(ms: i64) -> DateTime<Utc> {
  DateTime::from_timestamp_millis(1_700_000_000_000 + ms).unwrap()
}

fn block(id: &str, block_type: &str) -> BlockSpec {
  BlockSpec::new(id, block_type)
}

fn seeded() -> Recorder {
  let mut rec = Recorder::new(5);
  rec.seed(&block("start", "start"));
  rec.start(t(0));
  rec
}

fn create(block: BlockSpec, parent: Option<&str>) -> EditorEvent {
  EditorEvent::Create {
    block,
    parent_id: parent.map(String::from),
    input_name: parent.map(|_| Slot::Next),
    source: EventSource::Workspace,
  }
}

fn drag(id: &str, start: bool, x: f64, y: f64) -> EditorEvent {
  EditorEvent::Drag {
    block_id: id.to_string(),
    is_drag_start: start,
    position: SurfacePoint::new(x, y),
    group_size: 1,
    parent_id: None,
    input_name: None,
    source: EventSource::Workspace,
  }
}

/// Drag end that names the parent the block was dropped onto.
fn drop_onto(id: &str, x: f64, y: f64, parent: &str, slot: Slot) -> EditorEvent {
  EditorEvent::Drag {
    block_id: id.to_string(),
    is_drag_start: false,
    position: SurfacePoint::new(x, y),
    group_size: 1,
    parent_id: Some(parent.to_string()),
    input_name: Some(slot),
    source: EventSource::Workspace,
  }
}

fn move_to(id: &str, old: Option<&str>, new: Option<&str>) -> EditorEvent {
  EditorEvent::Move {
    block_id: id.to_string(),
    old_parent_id: old.map(String::from),
    old_input_name: old.map(|_| Slot::Next),
    new_parent_id: new.map(String::from),
    new_input_name: new.map(|_| Slot::Next),
    source: EventSource::Workspace,
  }
}

fn delete(id: &str, x: f64, y: f64) -> EditorEvent {
  EditorEvent::Delete {
    block_id: id.to_string(),
    block_type: None,
    position: SurfacePoint::new(x, y),
    group_size: 1,
  }
}

fn last_drag(rec: &Recorder) -> &DragRecord {
  match rec.record().actions.last() {
    Some(InteractionAction::Drag(d)) => d,
    other => panic!("expected drag record, got {other:?}"),
  }
}

#[test]
fn seed_mirrors_without_logging() {
  let mut rec = Recorder::new(3);
  rec.seed(&BlockSpec::chain(block("start", "start"), vec![block("a", "forward")]));
  assert!(rec.record().actions.is_empty());
  assert_eq!(rec.record().used_block_count, 2);
  assert!(rec.record().execution_start.is_none());
}

#[test]
fn create_is_logged_and_counted() {
  let mut rec = seeded();
  rec.handle_event(&create(block("a", "forward"), Some("start")), t(100));
  assert_eq!(rec.record().used_block_count, 2);
  assert_eq!(rec.record().execution_start, Some(t(100)));
  match &rec.record().actions[0] {
    InteractionAction::Create {
      block_id,
      block_type,
      code_structure,
      at,
    } => {
      assert_eq!(block_id, "a");
      assert_eq!(block_type, "forward");
      assert!(code_structure.is_none());
      assert_eq!(*at, t(100));
    }
    other => panic!("unexpected {other:?}"),
  }
}

#[test]
fn creating_entry_block_is_not_logged() {
  let mut rec = Recorder::new(1);
  rec.handle_event(&create(block("start", "start"), None), t(5));
  assert!(rec.record().actions.is_empty());
  assert_eq!(rec.record().used_block_count, 1);
}

#[test]
fn toolbox_create_is_ignored() {
  let mut rec = seeded();
  let event = EditorEvent::Create {
    block: block("tb", "forward"),
    parent_id: None,
    input_name: None,
    source: EventSource::Toolbox,
  };
  rec.handle_event(&event, t(10));
  assert!(rec.arena().get("tb").is_none());
  assert!(rec.record().actions.is_empty());
  assert!(rec.record().execution_start.is_none());
}

#[test]
fn create_with_children_embeds_structure() {
  let mut rec = seeded();
  let rep = block("r", "repeat")
    .with_field("TIMES", "4")
    .with_child(Slot::Do, block("f", "forward"));
  rec.handle_event(&create(rep, None), t(10));
  let InteractionAction::Create { code_structure, .. } = &rec.record().actions[0] else {
    panic!("create expected");
  };
  let fp = code_structure.as_ref().unwrap();
  assert_eq!(fp.str, "r(4){f}");
  assert_eq!(fp.tree.name, "r(4)");
  assert_eq!(rec.record().used_block_count, 1);
}

#[test]
fn field_change_updates_mirror_and_log() {
  let mut rec = seeded();
  rec.handle_event(&create(block("r", "repeat"), Some("start")), t(10));
  let event = EditorEvent::FieldChange {
    block_id: "r".to_string(),
    block_type: None,
    name: "TIMES".to_string(),
    old_value: Some("1".to_string()),
    new_value: Some("3".to_string()),
    source: EventSource::Workspace,
  };
  rec.handle_event(&event, t(20));
  assert_eq!(rec.arena().get("r").unwrap().field("TIMES"), Some("3"));
  assert_eq!(rec.fingerprint(), "br(3)");
  let InteractionAction::Field {
    block_type,
    from_toolbox,
    new_value,
    ..
  } = &rec.record().actions[1]
  else {
    panic!("field expected");
  };
  assert_eq!(block_type.as_deref(), Some("repeat"));
  assert!(!from_toolbox);
  assert_eq!(new_value.as_deref(), Some("3"));
}

#[test]
fn toolbox_field_change_is_logged_but_not_mirrored() {
  let mut rec = seeded();
  rec.handle_event(&create(block("r", "repeat"), Some("start")), t(10));
  let event = EditorEvent::FieldChange {
    block_id: "r".to_string(),
    block_type: Some("repeat".to_string()),
    name: "TIMES".to_string(),
    old_value: None,
    new_value: Some("8".to_string()),
    source: EventSource::Toolbox,
  };
  rec.handle_event(&event, t(20));
  assert_eq!(rec.arena().get("r").unwrap().field("TIMES"), None);
  assert!(matches!(
    rec.record().actions[1],
    InteractionAction::Field { from_toolbox: true, .. }
  ));
}

#[test]
fn drag_onto_program_is_connected() {
  let mut rec = seeded();
  rec.handle_event(&create(block("x", "forward"), None), t(0));
  rec.handle_event(&drag("x", true, 0.0, 0.0), t(100));
  assert!(rec.pending_drag("x").is_some());
  rec.handle_event(&move_to("x", None, Some("start")), t(550));
  rec.handle_event(&drag("x", false, 3.0, 4.0), t(600));
  assert!(rec.pending_drag("x").is_none());

  let d = last_drag(&rec);
  assert_eq!(d.outcome, DragOutcome::Connected);
  assert_eq!(d.duration_ms, 500);
  assert_eq!(d.distance, 5.0);
  assert_eq!(d.connected_to.as_deref(), Some("start"));
  assert_eq!(d.slot, Some(Slot::Next));
  assert!(d.prior_parent.is_none());
  assert!(!d.disconnected);
  assert_eq!(rec.record().used_block_count, 2);
}

#[test]
fn drag_end_before_connecting_move_uses_event_parent() {
  let mut rec = seeded();
  rec.handle_event(&create(block("f1", "forward"), None), t(0));
  rec.handle_event(&drag("f1", true, 10.0, 10.0), t(100));
  rec.handle_event(&drop_onto("f1", 50.0, 10.0, "start", Slot::Next), t(200));
  rec.handle_event(&move_to("f1", None, Some("start")), t(201));

  let d = last_drag(&rec);
  assert_eq!(d.outcome, DragOutcome::Connected);
  assert_eq!(d.connected_to.as_deref(), Some("start"));
  assert_eq!(d.slot, Some(Slot::Next));
  assert_eq!(rec.record().used_block_count, 2);
}

#[test]
fn drag_end_without_parent_falls_back_to_mirror() {
  let mut rec = seeded();
  rec.handle_event(&create(block("r", "repeat"), Some("start")), t(0));
  rec.handle_event(&create(block("x", "forward"), None), t(1));
  rec.handle_event(&drag("x", true, 0.0, 0.0), t(2));
  let event = EditorEvent::Move {
    block_id: "x".to_string(),
    old_parent_id: None,
    old_input_name: None,
    new_parent_id: Some("r".to_string()),
    new_input_name: Some(Slot::Do),
    source: EventSource::Workspace,
  };
  rec.handle_event(&event, t(3));
  rec.handle_event(&drag("x", false, 30.0, 40.0), t(4));

  let d = last_drag(&rec);
  assert_eq!(d.outcome, DragOutcome::Connected);
  assert_eq!(d.connected_to.as_deref(), Some("r"));
  assert_eq!(d.slot, Some(Slot::Do));
}

#[test]
fn drag_off_program_is_disconnected() {
  let mut rec = seeded();
  rec.handle_event(&create(block("a", "forward"), Some("start")), t(0));
  rec.handle_event(&drag("a", true, 10.0, 10.0), t(100));
  rec.handle_event(&move_to("a", Some("start"), None), t(150));
  rec.handle_event(&drag("a", false, 200.0, 10.0), t(300));
  let d = last_drag(&rec);
  assert_eq!(d.outcome, DragOutcome::Disconnected);
  assert_eq!(d.prior_parent.as_deref(), Some("start"));
  assert!(d.connected_to.is_none());
  assert!(d.disconnected);
  assert_eq!(rec.record().used_block_count, 1);
}

#[test]
fn drag_back_to_same_parent_is_reconnected() {
  let mut rec = seeded();
  rec.handle_event(&create(block("a", "forward"), Some("start")), t(0));
  rec.handle_event(&drag("a", true, 10.0, 10.0), t(100));
  rec.handle_event(&move_to("a", Some("start"), None), t(150));
  rec.handle_event(&move_to("a", None, Some("start")), t(250));
  rec.handle_event(&drag("a", false, 12.0, 10.0), t(300));
  assert_eq!(last_drag(&rec).outcome, DragOutcome::Reconnected);
}

#[test]
fn drag_ending_where_it_started_stays_pending() {
  let mut rec = seeded();
  rec.handle_event(&create(block("x", "forward"), None), t(0));
  rec.handle_event(&drag("x", true, 5.0, 5.0), t(100));
  rec.handle_event(&drag("x", false, 5.0, 5.0), t(120));
  assert!(rec.pending_drag("x").is_some());
  assert_eq!(rec.record().actions.len(), 1);
}

#[test]
fn delete_during_drag_closes_it_as_deleted() {
  let mut rec = seeded();
  let chain = BlockSpec::chain(block("a", "forward"), vec![block("b", "backward")]);
  rec.handle_event(&create(chain, Some("start")), t(0));
  assert_eq!(rec.record().used_block_count, 3);
  rec.handle_event(&drag("a", true, 10.0, 10.0), t(100));
  rec.handle_event(&delete("a", 40.0, 50.0), t(400));

  let d = last_drag(&rec);
  assert_eq!(d.outcome, DragOutcome::Deleted);
  assert_eq!(d.prior_parent.as_deref(), Some("start"));
  assert!(d.disconnected);
  assert_eq!(d.distance, 50.0);
  assert!(rec.pending_drag("a").is_none());
  assert!(rec.arena().get("b").unwrap().deleted);
  assert_eq!(rec.record().used_block_count, 1);
}

#[test]
fn deleting_top_level_block_mid_drag_is_not_disconnected() {
  let mut rec = seeded();
  rec.handle_event(&create(block("x", "forward"), None), t(0));
  rec.handle_event(&drag("x", true, 10.0, 10.0), t(100));
  rec.handle_event(&delete("x", 90.0, 10.0), t(200));
  let d = last_drag(&rec);
  assert_eq!(d.outcome, DragOutcome::Deleted);
  assert!(!d.disconnected);
}

#[test]
fn delete_at_drag_start_position_still_closes_the_drag() {
  let mut rec = seeded();
  rec.handle_event(&create(block("a", "forward"), Some("start")), t(0));
  rec.handle_event(&drag("a", true, 10.0, 10.0), t(100));
  rec.handle_event(&delete("a", 10.0, 10.0), t(150));

  let d = last_drag(&rec);
  assert_eq!(d.outcome, DragOutcome::Deleted);
  assert_eq!(d.distance, 0.0);
  assert_eq!(d.duration_ms, 50);
  assert!(rec.pending_drag("a").is_none());
  assert!(
    !rec
      .record()
      .actions
      .iter()
      .any(|a| matches!(a, InteractionAction::BlockDeleteNoDrag { .. }))
  );
  assert!(rec.arena().get("a").unwrap().deleted);
}

#[test]
fn delete_without_drag_cascades_and_recounts() {
  let mut rec = seeded();
  let body = BlockSpec::chain(block("f", "forward"), vec![block("l", "turn_left")]);
  let rep = block("r", "repeat")
    .with_field("TIMES", "2")
    .with_child(Slot::Do, body);
  let program = BlockSpec::chain(rep, vec![block("z", "forward")]);
  rec.handle_event(&create(program, Some("start")), t(0));
  assert_eq!(rec.record().used_block_count, 5);

  rec.handle_event(&delete("r", 0.0, 0.0), t(50));
  for id in ["r", "f", "l", "z"] {
    assert!(rec.arena().get(id).unwrap().deleted, "{id}");
  }
  assert_eq!(rec.record().used_block_count, 1);
  assert_eq!(
    rec.record().used_block_count,
    rec.arena().descendants("start").len()
  );
  assert!(matches!(
    rec.record().actions.last(),
    Some(InteractionAction::BlockDeleteNoDrag { block_type: Some(ty), .. }) if ty == "repeat"
  ));
  assert_eq!(rec.fingerprint(), "b");
}

#[test]
fn record_execution_books_attempts() {
  let mut rec = seeded();
  rec.handle_event(&create(block("a", "forward"), Some("start")), t(10));
  rec.click_execute(t(20));

  assert_eq!(rec.record_execution(false, t(20)), 2);
  assert_eq!(rec.record().num_of_failures, 1);
  assert!(!rec.record().success);
  assert_eq!(rec.record().attempt_action_counts.get(&1), Some(&2));

  rec.handle_event(&create(block("b", "forward"), Some("a")), t(30));
  assert_eq!(rec.record_execution(true, t(40)), 3);
  assert!(rec.record().success);
  assert_eq!(rec.record().num_of_failures, 1);
  assert_eq!(rec.record().attempt_action_counts.get(&2), Some(&4));

  let snaps = &rec.record().code_snapshots;
  assert_eq!(snaps.len(), 2);
  assert!(!snaps[0].success);
  assert!(snaps[1].success);
  assert!(matches!(
    rec.record().actions.last(),
    Some(InteractionAction::Execute { success: true, .. })
  ));
}

#[test]
fn timing_marks_are_set_once() {
  let mut rec = Recorder::new(2);
  rec.start(t(0));
  rec.start(t(50));
  rec.click_execute(t(1_000));
  rec.handle_event(&create(block("a", "forward"), None), t(2_000));
  let record = rec.end(t(4_000));
  assert_eq!(record.planning_start, Some(t(0)));
  assert_eq!(record.planning_ms(), 1_000);
  assert_eq!(record.execution_ms(), 3_000);
}

#[test]
fn snapshot_captures_loose_blocks() {
  let mut rec = seeded();
  rec.handle_event(&create(block("a", "forward"), Some("start")), t(0));
  rec.handle_event(&create(block("x", "turn_left"), None), t(1));
  rec.record_execution(false, t(2));
  let code = &rec.record().code_snapshots[0].code;
  assert_eq!(code.others.len(), 1);
  assert_eq!(code.others[0].name, "t(l)");
  assert_eq!(rec.current_program().others.len(), 1);
}

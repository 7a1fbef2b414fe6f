//! Interaction recorder: keeps the block mirror in sync with editor events and maintains
//! the session record (timing, interaction log, attempts, code snapshots).

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info, instrument, trace};

use super::fingerprint::{code_structure, code_structure_to_string, program_structure};
use super::BlockArena;
use crate::types::{
  BlockKind, BlockSpec, CodeFingerprint, CodeSnapshot, DragOutcome, DragRecord, EditorEvent,
  EventSource, InteractionAction, PendingDrag, ProgramStructure, SessionRecord, Slot,
  SurfacePoint,
};

/// Owns the block mirror and the session record for one exercise load.
#[derive(Debug, Clone)]
pub struct Recorder {
  arena: BlockArena,
  record: SessionRecord,
  pending_drags: HashMap<String, PendingDrag>,
}

impl Recorder {
  pub fn new(ideal_block_count: u32) -> Self {
    Self {
      arena: BlockArena::new(),
      record: SessionRecord::new(ideal_block_count),
      pending_drags: HashMap::new(),
    }
  }

  pub fn arena(&self) -> &BlockArena {
    &self.arena
  }

  pub fn record(&self) -> &SessionRecord {
    &self.record
  }

  /// Pending (unfinished) drag for `block_id`.
  pub fn pending_drag(&self, block_id: &str) -> Option<&PendingDrag> {
    self.pending_drags.get(block_id)
  }

  /// Mirrors a preloaded program without logging it as a user interaction.
  pub fn seed(&mut self, program: &BlockSpec) {
    self.arena.insert(program, None);
    self.refresh_used_blocks();
  }

  /// Marks the beginning of planning. Only the first call counts.
  pub fn start(&mut self, at: DateTime<Utc>) {
    self.record.planning_start.get_or_insert(at);
  }

  /// Marks the first interaction with the program (or the first execute click).
  pub fn click_execute(&mut self, at: DateTime<Utc>) {
    self.mark_execution_start(at);
  }

  /// Stamps the end of the exercise and returns the final record.
  pub fn end(&mut self, at: DateTime<Utc>) -> &SessionRecord {
    self.record.execution_end = Some(at);
    &self.record
  }

  fn mark_execution_start(&mut self, at: DateTime<Utc>) {
    self.record.execution_start.get_or_insert(at);
  }

  fn refresh_used_blocks(&mut self) {
    self.record.used_block_count = self.arena.used_block_count();
  }

  /// Applies one editor event to the mirror and the interaction log.
  #[instrument(level = "trace", skip(self, event))]
  pub fn handle_event(&mut self, event: &EditorEvent, at: DateTime<Utc>) {
    match event {
      EditorEvent::Create {
        block,
        parent_id,
        input_name,
        source,
      } => {
        if *source == EventSource::Toolbox {
          trace!(block_id = %block.id, "toolbox create ignored");
          return;
        }
        self.mark_execution_start(at);
        self.handle_create(block, parent_id.as_deref(), input_name.clone(), at);
      }
      EditorEvent::FieldChange {
        block_id,
        block_type,
        name,
        old_value,
        new_value,
        source,
      } => {
        self.mark_execution_start(at);
        let from_toolbox = *source == EventSource::Toolbox;
        if !from_toolbox && !self.arena.set_field(block_id, name, new_value.as_deref()) {
          debug!(block_id = %block_id, "field change for unmirrored block");
        }
        let block_type = self.block_type_of(block_id).or_else(|| block_type.clone());
        self.record.actions.push(InteractionAction::Field {
          block_id: block_id.clone(),
          block_type,
          from_toolbox,
          name: name.clone(),
          old_value: old_value.clone(),
          new_value: new_value.clone(),
          at,
        });
      }
      EditorEvent::Drag {
        block_id,
        is_drag_start,
        position,
        group_size,
        parent_id,
        input_name,
        ..
      } => {
        self.mark_execution_start(at);
        if *is_drag_start {
          self.open_drag(block_id, *position, *group_size, at);
        } else {
          self.close_drag(block_id, *position, parent_id.as_deref(), input_name.as_ref(), at);
        }
      }
      EditorEvent::Delete {
        block_id,
        block_type,
        position,
        group_size,
      } => {
        self.handle_delete(block_id, block_type.clone(), *position, *group_size, at);
        self.refresh_used_blocks();
      }
      EditorEvent::Move {
        block_id,
        old_parent_id,
        old_input_name,
        new_parent_id,
        new_input_name,
        source,
      } => {
        if *source == EventSource::Toolbox {
          return;
        }
        self.arena.reparent(
          block_id,
          old_parent_id.as_deref(),
          old_input_name.as_ref(),
          new_parent_id.as_deref(),
          new_input_name.as_ref(),
        );
        self.refresh_used_blocks();
      }
      EditorEvent::LoadFinished => trace!("editor finished loading"),
    }
  }

  fn block_type_of(&self, id: &str) -> Option<String> {
    self.arena.get(id).map(|n| n.block_type.clone())
  }

  fn handle_create(
    &mut self,
    block: &BlockSpec,
    parent_id: Option<&str>,
    input_name: Option<Slot>,
    at: DateTime<Utc>,
  ) {
    let parent = parent_id.map(|p| (p, input_name.unwrap_or(Slot::Next)));
    self.arena.insert(block, parent);
    self.refresh_used_blocks();

    if BlockKind::from_type(&block.block_type) == BlockKind::Start {
      return;
    }
    let code_structure = if block.children.is_empty() {
      None
    } else {
      code_structure(&self.arena, &block.id).map(|tree| CodeFingerprint {
        str: code_structure_to_string(&tree),
        tree,
      })
    };
    self.record.actions.push(InteractionAction::Create {
      block_id: block.id.clone(),
      block_type: block.block_type.clone(),
      at,
      code_structure,
    });
  }

  fn open_drag(&mut self, block_id: &str, start: SurfacePoint, group_size: usize, at: DateTime<Utc>) {
    let node = self.arena.get(block_id);
    let prior_parent = node
      .and_then(|n| n.parent.as_deref())
      .filter(|p| self.arena.contains(p))
      .map(String::from);
    let pending = PendingDrag {
      block_id: block_id.to_string(),
      block_type: node.map(|n| n.block_type.clone()),
      group_size,
      start,
      started_at: at,
      prior_parent,
    };
    self.pending_drags.insert(block_id.to_string(), pending);
  }

  /// Closes a pending drag. The drop target comes from the event when it names one, and
  /// from the mirror otherwise.
  fn close_drag(
    &mut self,
    block_id: &str,
    end: SurfacePoint,
    dropped_on: Option<&str>,
    dropped_slot: Option<&Slot>,
    at: DateTime<Utc>,
  ) {
    let Some(pending) = self.pending_drags.get(block_id) else {
      debug!(block_id, "drag end without a pending drag");
      return;
    };
    if pending.start == end {
      trace!(block_id, "drag ended where it started; still pending");
      return;
    }
    let Some(pending) = self.pending_drags.remove(block_id) else {
      return;
    };

    let (new_parent, slot) = match dropped_on {
      Some(parent) => (
        Some(parent.to_string()),
        Some(dropped_slot.cloned().unwrap_or(Slot::Next)),
      ),
      None => {
        let parent = self
          .arena
          .get(block_id)
          .and_then(|n| n.parent.clone())
          .filter(|p| self.arena.contains(p));
        let slot = parent
          .as_deref()
          .map(|p| self.arena.slot_of(p, block_id).cloned().unwrap_or(Slot::Next));
        (parent, slot)
      }
    };
    let outcome = DragOutcome::classify(pending.prior_parent.as_deref(), new_parent.as_deref());
    let rec = DragRecord::close(pending, end, at, new_parent, slot, outcome);
    trace!(block_id, ?outcome, distance = rec.distance, "drag closed");
    self.record.actions.push(InteractionAction::Drag(rec));
  }

  fn handle_delete(
    &mut self,
    block_id: &str,
    block_type: Option<String>,
    position: SurfacePoint,
    group_size: usize,
    at: DateTime<Utc>,
  ) {
    let block_type = self.block_type_of(block_id).or(block_type);
    match self.pending_drags.remove(block_id) {
      Some(pending) => {
        let rec = DragRecord::close(pending, position, at, None, None, DragOutcome::Deleted);
        self.record.actions.push(InteractionAction::Drag(rec));
      }
      None => {
        self.record.actions.push(InteractionAction::BlockDeleteNoDrag {
          block_id: block_id.to_string(),
          block_type,
          group_size,
          at,
        });
      }
    }
    self.arena.tombstone(block_id);
  }

  /// Current program shape.
  pub fn current_program(&self) -> ProgramStructure {
    program_structure(&self.arena)
  }

  /// Fingerprint of the entry block's program (empty when there is none).
  pub fn fingerprint(&self) -> String {
    self
      .current_program()
      .main
      .as_ref()
      .map(code_structure_to_string)
      .unwrap_or_default()
  }

  /// Books one execution attempt and returns the number of the next attempt.
  #[instrument(level = "trace", skip(self))]
  pub fn record_execution(&mut self, success: bool, at: DateTime<Utc>) -> u32 {
    self
      .record
      .actions
      .push(InteractionAction::Execute { at, success });
    let attempt = self.record.attempt;
    self
      .record
      .attempt_action_counts
      .insert(attempt, self.record.actions.len());
    self.record.attempt += 1;
    if success {
      self.record.success = true;
    } else {
      self.record.num_of_failures += 1;
    }
    let code = self.current_program();
    self.record.code_snapshots.push(CodeSnapshot { code, success });
    info!(
      attempt,
      success,
      failures = self.record.num_of_failures,
      "execution attempt recorded"
    );
    self.record.attempt
  }
}

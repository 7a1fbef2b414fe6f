//! Interaction records appended to the session's action log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CodeFingerprint, Slot, SurfacePoint};

/// How a finished drag changed the block's connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragOutcome {
  /// Dropped back onto the parent it was dragged from.
  Reconnected,
  /// Dropped onto a different parent.
  Reparented,
  /// A top-level block dropped onto a parent.
  Connected,
  /// Pulled off its parent and left top-level.
  Disconnected,
  /// Top-level before and after.
  Moved,
  /// Deleted while the drag was pending.
  Deleted,
}

impl DragOutcome {
  /// Classifies a drop from the parent before the drag and the parent after it.
  pub fn classify(prior_parent: Option<&str>, new_parent: Option<&str>) -> Self {
    match (prior_parent, new_parent) {
      (Some(old), Some(new)) if old == new => DragOutcome::Reconnected,
      (Some(_), Some(_)) => DragOutcome::Reparented,
      (None, Some(_)) => DragOutcome::Connected,
      (Some(_), None) => DragOutcome::Disconnected,
      (None, None) => DragOutcome::Moved,
    }
  }
}

/// A drag opened by a drag-start event and not yet closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDrag {
  pub block_id: String,
  pub block_type: Option<String>,
  pub group_size: usize,
  pub start: SurfacePoint,
  pub started_at: DateTime<Utc>,
  pub prior_parent: Option<String>,
}

/// A completed drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragRecord {
  pub block_id: String,
  pub block_type: Option<String>,
  pub group_size: usize,
  pub start: SurfacePoint,
  pub end: SurfacePoint,
  pub started_at: DateTime<Utc>,
  pub ended_at: DateTime<Utc>,
  pub duration_ms: i64,
  /// Straight-line pixel distance, rounded to three decimals.
  pub distance: f64,
  pub prior_parent: Option<String>,
  pub connected_to: Option<String>,
  pub slot: Option<Slot>,
  pub outcome: DragOutcome,
  /// The block left its prior parent: a `disconnected` drop, or a deletion of a block that
  /// had a parent when the drag started.
  pub disconnected: bool,
}

impl DragRecord {
  /// Closes `pending` at `end`/`ended_at`.
  pub fn close(
    pending: PendingDrag,
    end: SurfacePoint,
    ended_at: DateTime<Utc>,
    connected_to: Option<String>,
    slot: Option<Slot>,
    outcome: DragOutcome,
  ) -> Self {
    let disconnected = match outcome {
      DragOutcome::Disconnected => true,
      DragOutcome::Deleted => pending.prior_parent.is_some(),
      _ => false,
    };
    Self {
      duration_ms: (ended_at - pending.started_at).num_milliseconds(),
      distance: pending.start.distance_to(end),
      block_id: pending.block_id,
      block_type: pending.block_type,
      group_size: pending.group_size,
      start: pending.start,
      end,
      started_at: pending.started_at,
      ended_at,
      prior_parent: pending.prior_parent,
      connected_to,
      slot,
      outcome,
      disconnected,
    }
  }
}

/// One entry in the session's interaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InteractionAction {
  Create {
    block_id: String,
    block_type: String,
    at: DateTime<Utc>,
    /// Present when the created block arrived with children.
    code_structure: Option<CodeFingerprint>,
  },
  Field {
    block_id: String,
    block_type: Option<String>,
    from_toolbox: bool,
    name: String,
    old_value: Option<String>,
    new_value: Option<String>,
    at: DateTime<Utc>,
  },
  Drag(DragRecord),
  BlockDeleteNoDrag {
    block_id: String,
    block_type: Option<String>,
    group_size: usize,
    at: DateTime<Utc>,
  },
  Execute {
    at: DateTime<Utc>,
    success: bool,
  },
}

//! Events emitted by the external block editor, consumed one at a time by the recorder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Slot;

/// Which editor surface emitted the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventSource {
  /// The program workspace.
  #[default]
  Workspace,
  /// The block palette. Its blocks are never mirrored.
  Toolbox,
}

/// Pixel position of a block on the editor surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
  pub x: f64,
  pub y: f64,
}

impl SurfacePoint {
  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// Straight-line distance rounded to three decimals.
  pub fn distance_to(self, other: SurfacePoint) -> f64 {
    let d = ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt();
    (d * 1000.0).round() / 1000.0
  }
}

/// A block and its already-connected subtree, as carried by a create event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSpec {
  pub id: String,
  #[serde(rename = "type")]
  pub block_type: String,
  #[serde(default)]
  pub fields: BTreeMap<String, String>,
  #[serde(default)]
  pub children: Vec<ChildSpec>,
}

impl BlockSpec {
  pub fn new(id: impl Into<String>, block_type: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      block_type: block_type.into(),
      fields: BTreeMap::new(),
      children: Vec::new(),
    }
  }

  pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.fields.insert(name.into(), value.into());
    self
  }

  pub fn with_child(mut self, slot: impl Into<Slot>, block: BlockSpec) -> Self {
    self.children.push(ChildSpec {
      slot: slot.into(),
      block,
    });
    self
  }

  /// Builds a `NEXT`-linked chain under `head` from `blocks`, in order.
  pub fn chain(head: BlockSpec, blocks: Vec<BlockSpec>) -> BlockSpec {
    let tail = blocks
      .into_iter()
      .rev()
      .reduce(|next, prev| prev.with_child(Slot::Next, next));
    match tail {
      Some(t) => head.with_child(Slot::Next, t),
      None => head,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSpec {
  pub slot: Slot,
  pub block: BlockSpec,
}

/// One editor event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
  tag = "type",
  rename_all = "kebab-case",
  rename_all_fields = "camelCase"
)]
pub enum EditorEvent {
  Create {
    block: BlockSpec,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    input_name: Option<Slot>,
    #[serde(default)]
    source: EventSource,
  },
  FieldChange {
    block_id: String,
    #[serde(default)]
    block_type: Option<String>,
    name: String,
    #[serde(default)]
    old_value: Option<String>,
    #[serde(default)]
    new_value: Option<String>,
    #[serde(default)]
    source: EventSource,
  },
  /// Drag start (`is_drag_start`) or drag end, with the block's position at that moment.
  ///
  /// On a drag end, `parent_id`/`input_name` name the block's parent after the drop. The
  /// editor emits the drag end before the move that connects the block.
  Drag {
    block_id: String,
    is_drag_start: bool,
    position: SurfacePoint,
    #[serde(default = "one")]
    group_size: usize,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    input_name: Option<Slot>,
    #[serde(default)]
    source: EventSource,
  },
  Delete {
    block_id: String,
    #[serde(default)]
    block_type: Option<String>,
    /// Last known position of the deleted block.
    #[serde(default)]
    position: SurfacePoint,
    #[serde(default = "one")]
    group_size: usize,
  },
  Move {
    block_id: String,
    #[serde(default)]
    old_parent_id: Option<String>,
    #[serde(default)]
    old_input_name: Option<Slot>,
    #[serde(default)]
    new_parent_id: Option<String>,
    #[serde(default)]
    new_input_name: Option<Slot>,
    #[serde(default)]
    source: EventSource,
  },
  LoadFinished,
}

fn one() -> usize {
  1
}

/// An event stamped with the time the editor emitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
  pub at: DateTime<Utc>,
  #[serde(flatten)]
  pub event: EditorEvent,
}

//! Shadow copy of one editor block, owned by the recorder's arena.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::BlockKind;

/// Named connection on a block.
///
/// Variant order is the rendering precedence of structural fingerprints: loop body,
/// alternate branch, inline expression, next in sequence, stack body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Slot {
  Do,
  Else,
  Inline,
  Next,
  Stack,
  Named(String),
}

impl Slot {
  pub fn as_str(&self) -> &str {
    match self {
      Slot::Do => "DO",
      Slot::Else => "ELSE",
      Slot::Inline => "INLINE",
      Slot::Next => "NEXT",
      Slot::Stack => "STACK",
      Slot::Named(name) => name,
    }
  }
}

impl From<&str> for Slot {
  fn from(name: &str) -> Self {
    match name {
      "DO" => Slot::Do,
      "ELSE" => Slot::Else,
      "INLINE" => Slot::Inline,
      "NEXT" => Slot::Next,
      "STACK" => Slot::Stack,
      other => Slot::Named(other.to_string()),
    }
  }
}

impl From<String> for Slot {
  fn from(name: String) -> Self {
    Slot::from(name.as_str())
  }
}

impl From<Slot> for String {
  fn from(slot: Slot) -> Self {
    slot.as_str().to_string()
  }
}

impl fmt::Display for Slot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A mirrored block. Edges are identifier references into the arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNode {
  pub id: String,
  #[serde(rename = "type")]
  pub block_type: String,
  pub children: BTreeMap<Slot, String>,
  pub fields: BTreeMap<String, String>,
  pub parent: Option<String>,
  pub top: bool,
  /// Tombstone; deleted nodes stay in the arena.
  pub deleted: bool,
}

impl BlockNode {
  pub fn new(id: impl Into<String>, block_type: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      block_type: block_type.into(),
      children: BTreeMap::new(),
      fields: BTreeMap::new(),
      parent: None,
      top: true,
      deleted: false,
    }
  }

  pub fn kind(&self) -> BlockKind {
    BlockKind::from_type(&self.block_type)
  }

  pub fn child(&self, slot: &Slot) -> Option<&str> {
    self.children.get(slot).map(String::as_str)
  }

  pub fn field(&self, name: &str) -> Option<&str> {
    self.fields.get(name).map(String::as_str)
  }
}

//! Serializable reconstruction of a program's block tree.

use serde::{Deserialize, Serialize};

use super::Slot;

/// One block of a reconstructed program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStructure {
  /// Abbreviated block type (`f`, `t(l)`, ...), or the raw type when unknown.
  #[serde(rename = "type")]
  pub block_type: String,
  /// Abbreviation plus inline parameters, e.g. `r(3)`.
  pub name: String,
  pub children: Vec<CodeChild>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeChild {
  pub nested: Slot,
  pub block: CodeStructure,
}

impl CodeStructure {
  pub fn child(&self, slot: &Slot) -> Option<&CodeStructure> {
    self
      .children
      .iter()
      .find(|c| &c.nested == slot)
      .map(|c| &c.block)
  }
}

impl Drop for CodeStructure {
  /// Long `NEXT` chains nest deeply; unlink them iteratively.
  fn drop(&mut self) {
    let mut pending: Vec<CodeStructure> = self.children.drain(..).map(|c| c.block).collect();
    while let Some(mut block) = pending.pop() {
      pending.extend(block.children.drain(..).map(|c| c.block));
    }
  }
}

/// Fingerprint string plus tree, attached to create records of compound blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFingerprint {
  pub str: String,
  #[serde(rename = "bl")]
  pub tree: CodeStructure,
}

/// Whole-workspace program shape: the entry block's tree plus loose top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStructure {
  pub main: Option<CodeStructure>,
  pub others: Vec<CodeStructure>,
}

/// Program shape captured at one execution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnapshot {
  pub code: ProgramStructure,
  pub success: bool,
}

//! Per-exercise attempt and timing record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CodeSnapshot, InteractionAction};

/// Session record, reset on every exercise load and read at exercise end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
  pub planning_start: Option<DateTime<Utc>>,
  pub execution_start: Option<DateTime<Utc>>,
  pub execution_end: Option<DateTime<Utc>>,
  pub actions: Vec<InteractionAction>,
  /// Length of `actions` at the end of each attempt, keyed by attempt number.
  pub attempt_action_counts: BTreeMap<u32, usize>,
  /// Number of the next attempt (starts at 1).
  pub attempt: u32,
  pub success: bool,
  pub num_of_failures: u32,
  pub used_block_count: usize,
  pub ideal_block_count: u32,
  pub code_snapshots: Vec<CodeSnapshot>,
}

impl SessionRecord {
  pub fn new(ideal_block_count: u32) -> Self {
    Self {
      planning_start: None,
      execution_start: None,
      execution_end: None,
      actions: Vec::new(),
      attempt_action_counts: BTreeMap::new(),
      attempt: 1,
      success: false,
      num_of_failures: 0,
      used_block_count: 0,
      ideal_block_count,
      code_snapshots: Vec::new(),
    }
  }

  /// Planning time in milliseconds (0 until both ends are known).
  pub fn planning_ms(&self) -> i64 {
    match (self.planning_start, self.execution_start) {
      (Some(s), Some(e)) => (e - s).num_milliseconds(),
      _ => 0,
    }
  }

  /// Execution time in milliseconds (0 until both ends are known).
  pub fn execution_ms(&self) -> i64 {
    match (self.execution_start, self.execution_end) {
      (Some(s), Some(e)) => (e - s).num_milliseconds(),
      _ => 0,
    }
  }
}

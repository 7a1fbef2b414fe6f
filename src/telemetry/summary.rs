//! End-of-exercise summary derived from the session record.

use serde::Serialize;
use std::fmt;

use super::fingerprint::code_structure_to_string;
use crate::types::SessionRecord;

/// Figures reported when an exercise is solved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
  /// Planning plus execution time.
  pub total_time_ms: i64,
  /// Failed attempts plus the final one.
  pub attempts: u32,
  pub used_blocks: usize,
  pub ideal_blocks: u32,
  /// Fingerprint of the program at the last attempt.
  pub last_program: String,
}

impl SessionSummary {
  pub fn from_record(record: &SessionRecord) -> Self {
    let last_program = record
      .code_snapshots
      .last()
      .and_then(|s| s.code.main.as_ref())
      .map(code_structure_to_string)
      .unwrap_or_default();
    Self {
      total_time_ms: record.planning_ms() + record.execution_ms(),
      attempts: record.num_of_failures + 1,
      used_blocks: record.used_block_count,
      ideal_blocks: record.ideal_block_count,
      last_program,
    }
  }
}

impl fmt::Display for SessionSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "***** Console feedback ******")?;
    writeln!(f, "User total time was {}ms", self.total_time_ms)?;
    writeln!(f, "User took {} attempts", self.attempts)?;
    writeln!(f, "User used {}/{} blocks", self.used_blocks, self.ideal_blocks)?;
    write!(f, "Last program: {}", self.last_program)
  }
}

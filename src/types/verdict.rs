//! Attempt-level verdict.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FailureKind;

/// How one execution attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "kind", rename_all = "camelCase")]
pub enum Verdict {
  /// The goal was reached.
  Success,
  /// The script ran to completion without reaching the goal.
  Incomplete,
  /// An action faulted and aborted the script.
  Fault(FailureKind),
  /// The step ceiling was hit before the script finished.
  StepLimitExceeded,
}

impl Verdict {
  pub fn is_success(self) -> bool {
    self == Verdict::Success
  }

  pub fn failure_kind(self) -> Option<FailureKind> {
    match self {
      Verdict::Fault(kind) => Some(kind),
      _ => None,
    }
  }
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Verdict::Success => write!(f, "success"),
      Verdict::Incomplete => write!(f, "incomplete"),
      Verdict::Fault(kind) => write!(f, "fault ({})", kind.as_str()),
      Verdict::StepLimitExceeded => write!(f, "step limit exceeded"),
    }
  }
}

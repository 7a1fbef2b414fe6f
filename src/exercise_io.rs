//! Exercise, editor-event and session-record files (JSON).

use crate::error::ExerciseError;
use crate::types::{Exercise, SessionRecord, TimedEvent};
use std::path::Path;
use tracing::instrument;

/// Loads one exercise definition from `path`.
#[instrument(level = "trace", skip(path))]
pub fn load_exercise(path: &Path) -> Result<Exercise, ExerciseError> {
  let bytes = std::fs::read(path)?;
  Ok(serde_json::from_slice(&bytes)?)
}

/// Loads a recorded editor event stream (a JSON array of timed events).
#[instrument(level = "trace", skip(path))]
pub fn load_events(path: &Path) -> Result<Vec<TimedEvent>, ExerciseError> {
  let bytes = std::fs::read(path)?;
  Ok(serde_json::from_slice(&bytes)?)
}

/// Writes a session record to `path` as pretty JSON, creating the parent directory.
#[instrument(level = "trace", skip(path, record))]
pub fn save_record(path: &Path, record: &SessionRecord) -> Result<(), ExerciseError> {
  let json = serde_json::to_string_pretty(record)?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)?;
  Ok(())
}

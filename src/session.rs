//! Per-exercise session: the context object handed to every operation of one exercise load.
//!
//! Holds the exercise, its pristine initial grid, the interaction recorder and the run
//! options. Loading a new exercise means building a new session; nothing is global.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::compiler::{ENTRY_BLOCK_TYPE, compile_program};
use crate::error::ExerciseError;
use crate::runner::{ExecutionResult, RunOptions, run_script};
use crate::telemetry::{Recorder, SessionSummary};
use crate::types::{BlockSpec, EditorEvent, Exercise, GridState, SessionRecord, TimedEvent, Verdict};

/// Id given to the entry block when an exercise has no default program.
pub const ENTRY_BLOCK_ID: &str = "start";

/// User-facing feedback for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Feedback {
  Success,
  /// `attempt` is the number of the attempt that just failed.
  Failure { attempt: u32, verdict: Verdict },
}

/// Everything one execute click produced.
#[derive(Debug, Clone)]
pub struct AttemptReport {
  /// Number of the attempt that was executed.
  pub attempt: u32,
  pub result: ExecutionResult,
  pub feedback: Feedback,
  /// Program fingerprint at the time of the attempt.
  pub fingerprint: String,
}

#[derive(Debug, Clone)]
pub struct ExerciseSession {
  exercise: Exercise,
  initial: GridState,
  recorder: Recorder,
  options: RunOptions,
}

impl ExerciseSession {
  /// Loads `exercise`: validates its map, resets the record and seeds the workspace with
  /// the default program (or a bare entry block).
  pub fn load(exercise: Exercise, options: RunOptions, at: DateTime<Utc>) -> Result<Self, ExerciseError> {
    let initial = exercise.initial_state()?;
    let mut recorder = Recorder::new(exercise.ideal_blocks);
    let program = exercise
      .default_program
      .clone()
      .unwrap_or_else(|| BlockSpec::new(ENTRY_BLOCK_ID, ENTRY_BLOCK_TYPE));
    recorder.seed(&program);
    recorder.start(at);
    info!(url = %exercise.url, ideal_blocks = exercise.ideal_blocks, "exercise loaded");
    Ok(Self {
      exercise,
      initial,
      recorder,
      options,
    })
  }

  pub fn exercise(&self) -> &Exercise {
    &self.exercise
  }

  pub fn initial_state(&self) -> &GridState {
    &self.initial
  }

  pub fn recorder(&self) -> &Recorder {
    &self.recorder
  }

  pub fn record(&self) -> &SessionRecord {
    self.recorder.record()
  }

  pub fn options(&self) -> &RunOptions {
    &self.options
  }

  /// Forwards one editor event to the recorder.
  pub fn handle_event(&mut self, event: &EditorEvent, at: DateTime<Utc>) {
    self.recorder.handle_event(event, at);
  }

  pub fn handle_timed(&mut self, event: &TimedEvent) {
    self.recorder.handle_event(&event.event, event.at);
  }

  /// One execute click: compile the current program, run it on a fresh copy of the
  /// initial grid and book the attempt.
  pub fn execute(&mut self, at: DateTime<Utc>) -> AttemptReport {
    self.recorder.click_execute(at);
    let fingerprint = self.recorder.fingerprint();

    let result = match compile_program(self.recorder.arena()) {
      Ok(script) => run_script(&script, self.initial.clone(), &self.options),
      Err(err) => {
        warn!(error = %err, "nothing to execute");
        ExecutionResult::not_run(self.initial.clone())
      }
    };

    let success = result.success();
    let next = self.recorder.record_execution(success, at);
    let attempt = next - 1;
    let feedback = if success {
      Feedback::Success
    } else {
      Feedback::Failure {
        attempt,
        verdict: result.verdict,
      }
    };
    AttemptReport {
      attempt,
      result,
      feedback,
      fingerprint,
    }
  }

  /// Ends the exercise: stamps the end time and returns the record with its summary.
  pub fn finish(&mut self, at: DateTime<Utc>) -> (SessionRecord, SessionSummary) {
    let record = self.recorder.end(at).clone();
    let summary = SessionSummary::from_record(&record);
    (record, summary)
  }
}

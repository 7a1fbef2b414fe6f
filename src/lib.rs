//! # robot-navigation
//!
//! Simulation engine behind a visual block-programming robot puzzle.
//!
//! ## Architecture
//!
//! - [types]: grid state, tiles, operations, action scripts, editor events and records.
//! - [evaluator]: the move/pick/put rules that mutate a [GridState] and append to the
//!   operation log.
//! - [compiler]: turns the mirrored block tree into an [ActionScript].
//! - [runner]: executes an [ActionScript] against a fresh grid and produces a [Verdict].
//! - [telemetry]: block mirror, structural fingerprints and the per-exercise session record.
//! - [session]: one loaded exercise tying the above together.

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod exercise_io;
pub mod exercises;
pub mod runner;
pub mod session;
pub mod telemetry;
pub mod types;

pub use compiler::compile_program;
pub use error::{CompileError, ExerciseError, FailureKind, GridError, NavigationError};
pub use evaluator::{move_robot, pick, put};
pub use exercises::{builtin_exercises, find_exercise};
pub use runner::{DEFAULT_MAX_STEPS, ExecutionResult, RunOptions, run_program, run_script};
pub use session::{AttemptReport, ExerciseSession, Feedback};
pub use telemetry::{BlockArena, Recorder, SessionSummary};
pub use types::{ActionScript, Exercise, GridState, Operation, Verdict};

//! Execution harness: interpret a compiled [ActionScript] against a live [GridState].
//!
//! - [run_script]: execute opcodes in order, unrolling `repeat`; the first fault aborts the
//!   whole script.
//! - [run_program]: compile the mirrored block tree, then [run_script] on a fresh state.

use tracing::{debug, info, instrument};

use crate::compiler::compile_program;
use crate::error::{CompileError, NavigationError};
use crate::evaluator::{move_robot, pick, put};
use crate::telemetry::BlockArena;
use crate::types::{ActionScript, GridState, Opcode, Operation, Verdict};

/// Default ceiling on executed steps per attempt.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Options for [run_script].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
  /// Every executed action and every `repeat` iteration counts one step. Reaching the
  /// ceiling aborts the attempt with [Verdict::StepLimitExceeded].
  pub max_steps: usize,
}

impl Default for RunOptions {
  fn default() -> Self {
    Self {
      max_steps: DEFAULT_MAX_STEPS,
    }
  }
}

/// Outcome of one attempt.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
  pub final_state: GridState,
  pub operations: Vec<Operation>,
  pub verdict: Verdict,
  /// The fault that aborted the script, if any.
  pub error: Option<NavigationError>,
  /// Steps consumed against [RunOptions::max_steps].
  pub steps: usize,
}

impl ExecutionResult {
  pub fn success(&self) -> bool {
    self.verdict.is_success()
  }

  /// Result of an attempt that never ran (nothing to execute).
  pub fn not_run(state: GridState) -> Self {
    Self {
      final_state: state,
      operations: Vec::new(),
      verdict: Verdict::Incomplete,
      error: None,
      steps: 0,
    }
  }
}

/// Why interpretation stopped early.
enum Halt {
  Fault(NavigationError),
  StepLimit,
}

struct Interpreter {
  state: GridState,
  log: Vec<Operation>,
  /// Goal flag as returned by the most recent action.
  success: bool,
  steps: usize,
  max_steps: usize,
}

impl Interpreter {
  fn tick(&mut self) -> Result<(), Halt> {
    if self.steps >= self.max_steps {
      return Err(Halt::StepLimit);
    }
    self.steps += 1;
    Ok(())
  }

  fn exec(&mut self, script: &ActionScript) -> Result<(), Halt> {
    for ins in script {
      let block_id = ins.block_id.as_str();
      let reached = match &ins.op {
        Opcode::Repeat { count, body } => {
          for _ in 0..*count {
            self.tick()?;
            self.exec(body)?;
          }
          continue;
        }
        Opcode::Pick => {
          self.tick()?;
          pick(block_id, &mut self.state, &mut self.log)
        }
        Opcode::PutDown => {
          self.tick()?;
          put(block_id, &mut self.state, &mut self.log)
        }
        op => {
          let Some(action) = op.move_action() else {
            continue;
          };
          self.tick()?;
          move_robot(action, block_id, &mut self.state, &mut self.log)
        }
      };
      self.success = reached.map_err(Halt::Fault)?;
    }
    Ok(())
  }
}

/// Runs `script` against `state` and returns the attempt's verdict.
///
/// A script that finishes without fault succeeds only if the last executed action reported
/// the goal as reached; otherwise it is [Verdict::Incomplete].
#[instrument(level = "trace", skip(script, state))]
pub fn run_script(script: &ActionScript, state: GridState, options: &RunOptions) -> ExecutionResult {
  let mut interp = Interpreter {
    state,
    log: Vec::new(),
    success: false,
    steps: 0,
    max_steps: options.max_steps,
  };

  let (verdict, error) = match interp.exec(script) {
    Ok(()) if interp.success => (Verdict::Success, None),
    Ok(()) => (Verdict::Incomplete, None),
    Err(Halt::Fault(err)) => {
      debug!(kind = err.kind.as_str(), "script aborted by fault");
      (Verdict::Fault(err.kind), Some(err))
    }
    Err(Halt::StepLimit) => (Verdict::StepLimitExceeded, None),
  };

  info!(
    %verdict,
    operations = interp.log.len(),
    steps = interp.steps,
    "attempt finished"
  );
  ExecutionResult {
    final_state: interp.state,
    operations: interp.log,
    verdict,
    error,
    steps: interp.steps,
  }
}

/// Compiles the mirrored program and runs it on `initial`.
pub fn run_program(
  arena: &BlockArena,
  initial: GridState,
  options: &RunOptions,
) -> Result<ExecutionResult, CompileError> {
  let script = compile_program(arena)?;
  Ok(run_script(&script, initial, options))
}

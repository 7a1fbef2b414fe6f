//! Built-in exercise catalog (`blockly2d:0` to `blockly2d:5`).
//!
//! Tile codes: `0` wall, `1` path, `2` goal, `3`..`6` robot start facing down, right, up and
//! left, `7` intermediate goal.

use crate::error::ExerciseError;
use crate::session::ENTRY_BLOCK_ID;
use crate::types::{BlockSpec, Exercise};

const BASIC_BLOCKS: &[&str] = &["forward", "backward", "turn_left", "turn_right"];
const LOOP_BLOCKS: &[&str] = &["forward", "backward", "turn_left", "turn_right", "repeat"];

fn exercise(
  url: &str,
  instructions: &[&str],
  rows: &[&str],
  html_instr: &str,
  ideal_blocks: u32,
) -> Exercise {
  Exercise {
    url: url.to_string(),
    instructions: instructions.iter().map(|s| s.to_string()).collect(),
    map: rows
      .iter()
      .map(|row| row.chars().map(String::from).collect())
      .collect(),
    html_instr: Some(html_instr.to_string()),
    ideal_blocks,
    default_program: None,
  }
}

/// Preloaded (buggy) program of the debugging exercise.
fn debug_program() -> BlockSpec {
  let steps = [
    "forward",
    "forward",
    "turn_left",
    "forward",
    "forward",
    "turn_right",
    "forward",
  ];
  BlockSpec::chain(
    BlockSpec::new(ENTRY_BLOCK_ID, "start"),
    steps
      .iter()
      .enumerate()
      .map(|(i, t)| BlockSpec::new(format!("default-{}", i + 1), *t))
      .collect(),
  )
}

/// All built-in exercises, in curriculum order.
pub fn builtin_exercises() -> Vec<Exercise> {
  let mut debug = exercise(
    "blockly2d:3",
    BASIC_BLOCKS,
    &[
      "00000000", "00000000", "00210000", "00010000", "00011600", "00000000", "00000000",
      "00000000",
    ],
    "simpleDebug",
    8,
  );
  debug.default_program = Some(debug_program());

  vec![
    exercise(
      "blockly2d:0",
      BASIC_BLOCKS,
      &[
        "00000000", "00000000", "00020000", "00010000", "00010000", "00010000", "00050000",
        "00000000",
      ],
      "simpleNavigation",
      5,
    ),
    exercise(
      "blockly2d:1",
      BASIC_BLOCKS,
      &[
        "00000000", "00000000", "00000000", "00000300", "00000100", "00000100", "00000200",
        "00000000",
      ],
      "simpleNavigation",
      4,
    ),
    exercise(
      "blockly2d:2",
      BASIC_BLOCKS,
      &[
        "00000000", "00000000", "00002000", "00001000", "00411000", "00000000", "00000000",
        "00000000",
      ],
      "simpleNavigation",
      6,
    ),
    debug,
    exercise(
      "blockly2d:4",
      LOOP_BLOCKS,
      &[
        "00000000", "04111110", "00000020", "00000000", "00000000", "00000000", "00000000",
        "00000000",
      ],
      "simpleNavigation",
      5,
    ),
    exercise(
      "blockly2d:5",
      LOOP_BLOCKS,
      &[
        "00000000", "04111170", "01000010", "01000010", "01000010", "01000010", "02111170",
        "00000000",
      ],
      "navigationMiddleGoal",
      5,
    ),
  ]
}

/// Looks up a built-in exercise by url.
pub fn find_exercise(url: &str) -> Result<Exercise, ExerciseError> {
  builtin_exercises()
    .into_iter()
    .find(|e| e.url == url)
    .ok_or_else(|| ExerciseError::UnknownExercise(url.to_string()))
}

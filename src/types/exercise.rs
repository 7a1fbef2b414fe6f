//! Exercise configuration.

use serde::{Deserialize, Serialize};

use super::{BlockSpec, GridState};
use crate::error::ExerciseError;

/// One puzzle as configured by the exercise author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
  /// Unique key, e.g. `blockly2d:4`.
  pub url: String,
  /// Block types offered in the toolbox.
  pub instructions: Vec<String>,
  /// Raw tile codes, row by row.
  pub map: Vec<Vec<String>>,
  /// Key of the instruction text shown to the user.
  #[serde(default)]
  pub html_instr: Option<String>,
  /// Block count of an optimal solution.
  pub ideal_blocks: u32,
  /// Program preloaded into the workspace instead of a bare entry block.
  #[serde(default)]
  pub default_program: Option<BlockSpec>,
}

impl Exercise {
  /// Fresh world state built from the pristine map.
  pub fn initial_state(&self) -> Result<GridState, ExerciseError> {
    GridState::from_map(&self.map).map_err(|source| ExerciseError::InvalidMap {
      url: self.url.clone(),
      source,
    })
  }
}

//! The puzzle world: map tiles, robot pose and the collectible/container ledger.

use std::collections::BTreeMap;
use tracing::{instrument, trace};

use super::{Direction, Position, Tile};
use crate::error::GridError;

/// Robot pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robot {
  pub pos: Position,
  pub dir: Direction,
}

/// Totals derived once from the initial map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectTotals {
  /// Collectibles on the map.
  pub num: u32,
  /// Container capacity on the map.
  pub containers: u32,
}

/// Running counters. `put_down` never exceeds the number of items ever collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectProgress {
  /// Items currently carried by the robot.
  pub collected: u32,
  pub put_down: u32,
}

/// Collectible/container bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectLedger {
  pub totals: CollectTotals,
  pub progress: CollectProgress,
  /// Remaining collectibles per tile.
  pub collectibles: BTreeMap<Position, u32>,
  /// Remaining container capacity per tile.
  pub containers: BTreeMap<Position, u32>,
}

impl CollectLedger {
  /// True once every collectible has been picked and every container filled.
  pub fn is_depleted(&self) -> bool {
    self.collectibles.values().all(|v| *v == 0) && self.containers.values().all(|v| *v == 0)
  }
}

/// Mutable world state for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
  pub map: Vec<Vec<Tile>>,
  pub robot: Robot,
  pub collect: CollectLedger,
}

impl GridState {
  /// Parses raw tile codes and builds the state.
  pub fn from_map<S: AsRef<str>>(codes: &[Vec<S>]) -> Result<Self, GridError> {
    let mut tiles = Vec::with_capacity(codes.len());
    for (row, line) in codes.iter().enumerate() {
      let mut parsed = Vec::with_capacity(line.len());
      for (col, code) in line.iter().enumerate() {
        let code = code.as_ref();
        let tile = code.parse::<Tile>().map_err(|_| GridError::UnknownTile {
          code: code.to_string(),
          row,
          col,
        })?;
        parsed.push(tile);
      }
      tiles.push(parsed);
    }
    Self::from_tiles(tiles)
  }

  /// Scans every cell once: extracts the robot pose and fills the ledger.
  #[instrument(level = "trace", skip(map))]
  pub fn from_tiles(map: Vec<Vec<Tile>>) -> Result<Self, GridError> {
    if map.is_empty() {
      return Err(GridError::EmptyMap);
    }
    let mut robot = None;
    let mut collect = CollectLedger::default();

    let width = map[0].len();
    for (i, line) in map.iter().enumerate() {
      if line.is_empty() {
        return Err(GridError::EmptyRow(i));
      }
      if line.len() != width {
        return Err(GridError::RaggedRow(i));
      }
      for (j, tile) in line.iter().enumerate() {
        let pos = Position::new(i as i32, j as i32);
        match *tile {
          Tile::Start(dir) => robot = Some(Robot { pos, dir }),
          Tile::Collectible(n) => {
            collect.totals.num += n;
            collect.collectibles.entry(pos).or_insert(n);
          }
          Tile::Container(n) => {
            collect.totals.containers += n;
            collect.containers.entry(pos).or_insert(n);
          }
          _ => {}
        }
      }
    }

    let robot = robot.ok_or(GridError::MissingRobot)?;
    trace!(
      row = robot.pos.row,
      col = robot.pos.col,
      dir = %robot.dir,
      collectibles = collect.totals.num,
      containers = collect.totals.containers,
      "grid state built"
    );
    Ok(Self { map, robot, collect })
  }

  /// Tile at `pos`, or `None` when `pos` is outside the grid.
  pub fn tile_at(&self, pos: Position) -> Option<Tile> {
    let row = usize::try_from(pos.row).ok()?;
    let col = usize::try_from(pos.col).ok()?;
    self.map.get(row)?.get(col).copied()
  }

  pub fn in_bounds(&self, pos: Position) -> bool {
    self.tile_at(pos).is_some()
  }

  /// Overwrites the tile at `pos`; out-of-bounds positions are ignored.
  pub fn set_tile(&mut self, pos: Position, tile: Tile) {
    let (Ok(row), Ok(col)) = (usize::try_from(pos.row), usize::try_from(pos.col)) else {
      return;
    };
    if let Some(cell) = self.map.get_mut(row).and_then(|r| r.get_mut(col)) {
      *cell = tile;
    }
  }

  pub fn intermediate_goals_cleared(&self) -> bool {
    self
      .map
      .iter()
      .flatten()
      .all(|t| *t != Tile::IntermediateGoal)
  }

  /// The main goal counts only once both of these hold.
  pub fn goal_requirements_met(&self) -> bool {
    self.intermediate_goals_cleared() && self.collect.is_depleted()
  }
}

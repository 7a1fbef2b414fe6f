//! Map tile codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Direction;
use crate::error::GridError;

/// Largest count a single collectible or container tile can hold.
pub const MAX_TILE_COUNT: u32 = 6;

/// One grid cell, parsed from its map code.
///
/// `0` wall, `1` path, `2` goal, `3..6` robot start facing down/right/up/left,
/// `7` intermediate goal, `1X`/`2X` collectible/container count X, `30` pit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tile {
  Wall,
  Path,
  Goal,
  Start(Direction),
  IntermediateGoal,
  Collectible(u32),
  Container(u32),
  Pit,
}

impl Tile {
  /// Map code for this tile.
  pub fn code(self) -> String {
    match self {
      Tile::Wall => "0".to_string(),
      Tile::Path => "1".to_string(),
      Tile::Goal => "2".to_string(),
      Tile::Start(dir) => {
        let idx = Direction::ALL.iter().position(|d| *d == dir).unwrap_or(0);
        (3 + idx).to_string()
      }
      Tile::IntermediateGoal => "7".to_string(),
      Tile::Collectible(n) => format!("1{}", n),
      Tile::Container(n) => format!("2{}", n),
      Tile::Pit => "30".to_string(),
    }
  }
}

impl FromStr for Tile {
  type Err = GridError;

  fn from_str(code: &str) -> Result<Self, Self::Err> {
    let tile = match code {
      "0" => Tile::Wall,
      "1" => Tile::Path,
      "2" => Tile::Goal,
      "3" => Tile::Start(Direction::DOWN),
      "4" => Tile::Start(Direction::RIGHT),
      "5" => Tile::Start(Direction::UP),
      "6" => Tile::Start(Direction::LEFT),
      "7" => Tile::IntermediateGoal,
      "30" => Tile::Pit,
      _ => {
        let unknown = || GridError::UnknownCode(code.to_string());
        let (kind, rest) = code.split_at_checked(1).ok_or_else(unknown)?;
        let count = rest
          .parse::<u32>()
          .ok()
          .filter(|n| (1..=MAX_TILE_COUNT).contains(n));
        match (kind, count) {
          ("1", Some(n)) => Tile::Collectible(n),
          ("2", Some(n)) => Tile::Container(n),
          _ => return Err(unknown()),
        }
      }
    };
    Ok(tile)
  }
}

impl TryFrom<String> for Tile {
  type Error = GridError;

  fn try_from(code: String) -> Result<Self, Self::Error> {
    code.parse()
  }
}

impl From<Tile> for String {
  fn from(tile: Tile) -> Self {
    tile.code()
  }
}

impl fmt::Display for Tile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.code())
  }
}

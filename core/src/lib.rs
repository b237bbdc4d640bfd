use serde::{Deserialize, Serialize};

pub use board::*;
pub use cheat::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod cheat;
mod difficulty;
mod engine;
mod error;
mod events;
mod generator;
mod tile;
mod types;

/// Board size and mine count for one session. Settings surfaces resolve a
/// difficulty tier to a mine count before building one of these; the engine
/// itself only ever sees the resolved pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validating constructor: both dimensions at least 1, and at least one
    /// tile left free of mines.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validate()
    }

    /// Parses the `"RxC"` dimension format used by settings payloads, e.g.
    /// `"8x8"`.
    pub fn from_dimension(dimension: &str, mines: CellCount) -> Result<Self> {
        Self::new(parse_dimension(dimension)?, mines)
    }

    pub fn validate(self) -> Result<Self> {
        let (rows, columns) = self.size;
        if rows < 1 || columns < 1 {
            return Err(GameError::MalformedDimension);
        }
        if self.mines >= mult(rows, columns) {
            return Err(GameError::TooManyMines);
        }
        Ok(self)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    /// The classic 8x8 board with 10 mines.
    fn default() -> Self {
        Self::new_unchecked((8, 8), 10)
    }
}

/// Splits an `"RxC"` dimension string like `"8x8"` into `(rows, columns)`.
pub fn parse_dimension(dimension: &str) -> Result<Coord2> {
    let (rows, columns) = dimension
        .split_once('x')
        .ok_or(GameError::MalformedDimension)?;
    let rows = rows.trim().parse().map_err(|_| GameError::MalformedDimension)?;
    let columns = columns
        .trim()
        .parse()
        .map_err(|_| GameError::MalformedDimension)?;
    Ok((rows, columns))
}

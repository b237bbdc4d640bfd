use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::GameConfig;
use crate::error::{GameError, Result};
use crate::tile::Tile;
use crate::types::{CellCount, Coord, Coord2, NeighborIter, ToNdIndex};

/// Neighbor list clipped at board edges, at most 8 entries.
pub type Neighbors = SmallVec<[Coord2; 8]>;

/// Rectangular grid of tiles plus the cached positions of every mine, in
/// placement order. Adjacent-mine counts are written once, while mines are
/// placed, and never recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Array2<Tile>,
    mines: Vec<Coord2>,
}

impl Board {
    /// Blank grid for `config`; no mines placed yet.
    pub fn blank(config: GameConfig) -> Self {
        Self {
            grid: Array2::default(config.size.to_nd_index()),
            mines: Vec::with_capacity(config.mines.into()),
        }
    }

    /// Board with mines at the given positions, counts computed on the way.
    /// Duplicate positions are placed once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mines: CellCount = mine_coords.len().try_into().unwrap_or(CellCount::MAX);
        let mut board = Self::blank(GameConfig::new_unchecked(size, mines));

        for &coords in mine_coords {
            board.validate_coords(coords)?;
            if !board[coords].mine {
                board.place_mine(coords);
            }
        }

        Ok(board)
    }

    /// Marks the tile mined and increments the count on each neighbor that
    /// does not itself hold a mine yet. A mined tile's own count stays zero;
    /// it is never consulted.
    pub(crate) fn place_mine(&mut self, coords: Coord2) {
        let tile = &mut self.grid[coords.to_nd_index()];
        debug_assert!(!tile.mine, "mine placed twice at {coords:?}");
        tile.mine = true;
        tile.adjacent = 0;

        let neighbors: Neighbors = self.iter_neighbors(coords).collect();
        for pos in neighbors {
            let neighbor = &mut self.grid[pos.to_nd_index()];
            if !neighbor.mine {
                neighbor.adjacent += 1;
            }
        }

        self.mines.push(coords);
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.grid.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn total_tiles(&self) -> CellCount {
        self.grid.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles() - self.mine_count()
    }

    /// Every mined position, in placement order.
    pub fn mine_positions(&self) -> &[Coord2] {
        &self.mines
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.grid[coords.to_nd_index()]
    }

    pub(crate) fn tile_mut(&mut self, coords: Coord2) -> &mut Tile {
        &mut self.grid[coords.to_nd_index()]
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// In-bounds neighbors of `coords` in row-major order.
    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Collected neighbor list; each qualifying neighbor appears exactly once.
    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        self.iter_neighbors(coords).collect()
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.grid[coords.to_nd_index()]
    }
}

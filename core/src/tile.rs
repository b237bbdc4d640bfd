use serde::{Deserialize, Serialize};

/// One cell of the board grid. Identity is the `(row, column)` index into the
/// grid that owns it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) mine: bool,
    pub(crate) adjacent: u8,
    pub(crate) revealed: bool,
}

impl Tile {
    /// Whether this tile secretly holds a mine.
    pub const fn has_mine(self) -> bool {
        self.mine
    }

    /// Number of mines among the adjacent tiles. Meaningless for a mined
    /// tile, whose own count is never consulted by reveal logic.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent
    }

    /// Monotonic: flips false to true once, reset only by rebuilding the board.
    pub const fn is_revealed(self) -> bool {
        self.revealed
    }
}

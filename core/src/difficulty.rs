use serde::{Deserialize, Serialize};

use crate::GameConfig;
use crate::error::Result;
use crate::types::{CellCount, Coord2, mult};

/// Named difficulty tiers, each a mine-per-tile ratio. On the classic 8x8
/// board these come out to 5, 10, 20, and 30 mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Insane,
}

impl Difficulty {
    /// Fraction of tiles that hold a mine.
    pub const fn mine_ratio(self) -> f64 {
        match self {
            Self::Easy => 0.078125,
            Self::Medium => 0.15625,
            Self::Hard => 0.3125,
            Self::Insane => 0.46875,
        }
    }

    /// Mine count for a board of `size`, rounded down, capped so at least one
    /// tile stays free.
    pub fn mine_count(self, size: Coord2) -> CellCount {
        let total = mult(size.0, size.1);
        let mines = (self.mine_ratio() * f64::from(total)) as CellCount;
        mines.min(total.saturating_sub(1))
    }

    /// Resolved config for a board of `size` at this tier.
    pub fn config(self, size: Coord2) -> Result<GameConfig> {
        GameConfig::new(size, self.mine_count(size))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

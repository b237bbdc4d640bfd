use serde::{Deserialize, Serialize};

use crate::types::Coord2;

/// Outcome of revealing a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealOutcome {
    /// The tile was already revealed; nothing happened.
    NoChange,
    /// Safe tile carrying its adjacent-mine count, 0 through 8.
    Safe(u8),
    Mine,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// How revealed mines are presented at the end of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MineRevealMode {
    /// Victory: the mines were located, not set off.
    Found,
    Exploded,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Victory,
    Defeat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatReason {
    /// A mine was revealed.
    Mine,
    /// Victory was declared while safe tiles remained unrevealed.
    Validation,
}

/// Plain values emitted by the engine for the presentation layer to render.
/// The engine holds no reference to any view object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// One tile flipped open; emitted in reveal order during flood fill.
    /// The outcome here is never `NoChange`.
    TileRevealed {
        position: Coord2,
        outcome: RevealOutcome,
    },
    /// Full-board end-of-game mine reveal.
    MinesRevealed {
        positions: Vec<Coord2>,
        mode: MineRevealMode,
    },
    /// Terminal transition; nothing follows this within a session.
    GameEnded {
        result: GameResult,
        reason: Option<DefeatReason>,
    },
}

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::GameConfig;
use crate::board::Board;
use crate::error::{GameError, Result};
use crate::events::{DefeatReason, GameResult, MineRevealMode, RevealOutcome, SessionEvent};
use crate::generator::MineGenerator;
use crate::types::{CellCount, Coord2};

/// Session status; terminal once Victory or Defeat, reset only by `restart`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Victory,
    Defeat(DefeatReason),
}

impl SessionStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat(_))
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// What a reveal request did: the outcome for the requested tile plus the
/// events the presentation layer renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    pub events: Vec<SessionEvent>,
}

/// Result of a player-triggered status check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub status: SessionStatus,
    pub events: Vec<SessionEvent>,
}

/// One playthrough from board creation to a terminal status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    revealed_count: CellCount,
    status: SessionStatus,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// Validates `config`, generates a mined board, and opens the session.
    pub fn start(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        let config = config.validate()?;
        log::debug!(
            "starting session: {}x{} with {} mines",
            config.size.0,
            config.size.1,
            config.mines
        );
        Ok(Self::with_board(generator.generate(config)))
    }

    /// Session over a prebuilt board whose mines are already placed.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            revealed_count: 0,
            status: SessionStatus::default(),
            triggered_mine: None,
        }
    }

    /// Discards the board and all session state, starting fresh.
    pub fn restart(&mut self, config: GameConfig, generator: impl MineGenerator) -> Result<()> {
        *self = Self::start(config, generator)?;
        Ok(())
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    /// Safe tiles revealed so far; grows monotonically within a session.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// The mine that ended a lost session, if any.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Caller-side guard for the reveal contract: callers check this before
    /// requesting a reveal of the same tile again.
    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.board[coords].is_revealed()
    }

    /// Reveals a tile. A mine ends the session in defeat on the spot; a safe
    /// tile with no adjacent mines expands through its whole zero-count
    /// region and the numbered tiles bordering it.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.board.validate_coords(coords)?;
        self.check_in_progress()?;

        if self.board[coords].is_revealed() {
            return Ok(RevealReport {
                outcome: RevealOutcome::NoChange,
                events: Vec::new(),
            });
        }

        let mut events = Vec::new();
        let outcome = self.reveal_tile(coords, &mut events);

        match outcome {
            RevealOutcome::Mine => {
                self.triggered_mine = Some(coords);
                self.end_game(Some(DefeatReason::Mine), &mut events);
            }
            RevealOutcome::Safe(0) => self.flood_fill(coords, &mut events),
            _ => {}
        }

        Ok(RevealReport { outcome, events })
    }

    /// Player-triggered check: every safe tile revealed is a win; declaring
    /// done early loses the game.
    pub fn check_status(&mut self) -> Result<StatusReport> {
        self.check_in_progress()?;

        let mut events = Vec::new();
        if self.revealed_count == self.board.safe_tile_count() {
            self.end_game(None, &mut events);
        } else {
            self.end_game(Some(DefeatReason::Validation), &mut events);
        }

        Ok(StatusReport {
            status: self.status,
            events,
        })
    }

    /// Flips one unrevealed tile and emits its event. No expansion here.
    fn reveal_tile(&mut self, coords: Coord2, events: &mut Vec<SessionEvent>) -> RevealOutcome {
        let tile = self.board.tile_mut(coords);
        debug_assert!(!tile.revealed, "tile at {coords:?} revealed twice");
        tile.revealed = true;

        let outcome = if tile.mine {
            RevealOutcome::Mine
        } else {
            self.revealed_count += 1;
            RevealOutcome::Safe(tile.adjacent)
        };

        log::trace!("revealed {coords:?}: {outcome:?}");
        events.push(SessionEvent::TileRevealed {
            position: coords,
            outcome,
        });
        outcome
    }

    /// Worklist expansion from a zero-count tile. The `revealed` flag doubles
    /// as the visited marker, so each tile is revealed at most once and the
    /// frontier cannot cycle. Neighbors of a zero-count tile are never mines.
    fn flood_fill(&mut self, origin: Coord2, events: &mut Vec<SessionEvent>) {
        let mut to_visit: VecDeque<Coord2> = self
            .board
            .iter_neighbors(origin)
            .filter(|&pos| !self.board[pos].is_revealed())
            .collect();
        log::debug!("flood fill from {origin:?}, {} tiles queued", to_visit.len());

        while let Some(coords) = to_visit.pop_front() {
            if self.board[coords].is_revealed() {
                continue;
            }

            if let RevealOutcome::Safe(0) = self.reveal_tile(coords, events) {
                to_visit.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|&pos| !self.board[pos].is_revealed()),
                );
            }
        }
    }

    /// Terminal transition: reveals every mine, emits the end-of-game events,
    /// and locks the board. `None` means victory.
    fn end_game(&mut self, defeat: Option<DefeatReason>, events: &mut Vec<SessionEvent>) {
        debug_assert!(!self.status.is_terminal());

        let (status, result, mode) = match defeat {
            None => (
                SessionStatus::Victory,
                GameResult::Victory,
                MineRevealMode::Found,
            ),
            Some(reason) => (
                SessionStatus::Defeat(reason),
                GameResult::Defeat,
                MineRevealMode::Exploded,
            ),
        };

        let positions = self.reveal_mines();
        events.push(SessionEvent::MinesRevealed { positions, mode });
        events.push(SessionEvent::GameEnded {
            result,
            reason: defeat,
        });

        log::debug!("session ended: {status:?}");
        self.status = status;
    }

    /// Marks every mined tile revealed for end-of-game presentation.
    fn reveal_mines(&mut self) -> Vec<Coord2> {
        let positions = self.board.mine_positions().to_vec();
        for &coords in &positions {
            self.board.tile_mut(coords).revealed = true;
        }
        positions
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_terminal() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::PoolGenerator;
    use std::collections::HashSet;

    fn session(size: Coord2, mines: &[Coord2]) -> GameSession {
        GameSession::with_board(Board::from_mine_coords(size, mines).unwrap())
    }

    fn revealed_positions(events: &[SessionEvent]) -> Vec<Coord2> {
        events
            .iter()
            .filter_map(|event| match event {
                SessionEvent::TileRevealed { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn revealing_a_mine_defeats_the_session() {
        let mut game = session((2, 2), &[(0, 0)]);

        let report = game.reveal((0, 0)).unwrap();

        assert_eq!(report.outcome, RevealOutcome::Mine);
        assert_eq!(game.status(), SessionStatus::Defeat(DefeatReason::Mine));
        assert_eq!(game.triggered_mine(), Some((0, 0)));
        assert_eq!(
            report.events.last(),
            Some(&SessionEvent::GameEnded {
                result: GameResult::Defeat,
                reason: Some(DefeatReason::Mine),
            })
        );
    }

    #[test]
    fn mine_reveal_never_recurses_into_neighbors() {
        let mut game = session((3, 3), &[(1, 1)]);

        game.reveal((1, 1)).unwrap();

        // Only the mine itself was touched; its neighbors stay concealed.
        assert_eq!(game.revealed_count(), 0);
        assert!(!game.is_revealed((0, 0)));
        assert!(!game.is_revealed((2, 2)));
    }

    #[test]
    fn defeat_reveals_all_mines_exploded() {
        let mut game = session((3, 3), &[(0, 0), (2, 2)]);

        let report = game.reveal((0, 0)).unwrap();

        assert!(report.events.contains(&SessionEvent::MinesRevealed {
            positions: vec![(0, 0), (2, 2)],
            mode: MineRevealMode::Exploded,
        }));
        assert!(game.is_revealed((2, 2)));
    }

    #[test]
    fn numbered_tile_reveals_only_itself() {
        let mut game = session((3, 3), &[(2, 2)]);

        let report = game.reveal((1, 1)).unwrap();

        assert_eq!(report.outcome, RevealOutcome::Safe(1));
        assert_eq!(revealed_positions(&report.events), vec![(1, 1)]);
        assert_eq!(game.revealed_count(), 1);
        assert_eq!(game.status(), SessionStatus::InProgress);
    }

    #[test]
    fn flood_fill_opens_the_zero_region_and_its_border() {
        let mut game = session((3, 3), &[(2, 2)]);

        let report = game.reveal((0, 0)).unwrap();

        assert_eq!(report.outcome, RevealOutcome::Safe(0));
        // Every safe tile opens; the mine stays hidden.
        assert_eq!(game.revealed_count(), 8);
        assert!(!game.is_revealed((2, 2)));
        assert_eq!(game.board().tile_at((1, 1)).adjacent_mines(), 1);
        assert!(game.is_revealed((1, 1)));
    }

    #[test]
    fn flood_fill_reveals_each_tile_exactly_once() {
        let mut game = session((4, 4), &[(3, 3)]);

        let report = game.reveal((0, 0)).unwrap();

        let positions = revealed_positions(&report.events);
        let distinct: HashSet<_> = positions.iter().collect();
        assert_eq!(positions.len(), distinct.len());
        assert_eq!(positions.len(), 15);
    }

    #[test]
    fn flood_fill_stops_at_the_numbered_border() {
        // Mine column on the right; a zero region on the left must not leak
        // past the numbered tiles next to it.
        let mut game = session((3, 4), &[(0, 3), (1, 3), (2, 3)]);

        let report = game.reveal((0, 0)).unwrap();

        let positions = revealed_positions(&report.events);
        assert!(positions.contains(&(1, 2)));
        assert!(!positions.contains(&(1, 3)));
        assert_eq!(game.revealed_count(), 9);
    }

    #[test]
    fn win_is_confirmed_by_the_status_check() {
        let mut game = session((1, 2), &[(0, 0)]);

        assert_eq!(game.reveal((0, 1)).unwrap().outcome, RevealOutcome::Safe(1));
        assert_eq!(game.status(), SessionStatus::InProgress);

        let report = game.check_status().unwrap();

        assert_eq!(report.status, SessionStatus::Victory);
        assert_eq!(
            report.events,
            vec![
                SessionEvent::MinesRevealed {
                    positions: vec![(0, 0)],
                    mode: MineRevealMode::Found,
                },
                SessionEvent::GameEnded {
                    result: GameResult::Victory,
                    reason: None,
                },
            ]
        );
        assert!(game.is_revealed((0, 0)));
    }

    #[test]
    fn premature_status_check_loses_by_validation() {
        let mut game = session((2, 2), &[(0, 0)]);

        game.reveal((1, 1)).unwrap();
        let report = game.check_status().unwrap();

        assert_eq!(
            report.status,
            SessionStatus::Defeat(DefeatReason::Validation)
        );
        assert!(report.events.contains(&SessionEvent::MinesRevealed {
            positions: vec![(0, 0)],
            mode: MineRevealMode::Exploded,
        }));
    }

    #[test]
    fn terminal_session_rejects_further_moves() {
        let mut game = session((2, 2), &[(0, 0)]);

        game.reveal((0, 0)).unwrap();

        assert_eq!(game.reveal((1, 1)), Err(GameError::GameOver));
        assert_eq!(game.check_status().unwrap_err(), GameError::GameOver);
    }

    #[test]
    fn reveal_out_of_bounds_is_rejected() {
        let mut game = session((2, 2), &[(0, 0)]);

        assert_eq!(game.reveal((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(game.reveal((0, 2)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn revealing_an_already_revealed_tile_is_a_no_op() {
        let mut game = session((2, 2), &[(0, 0)]);

        game.reveal((1, 1)).unwrap();
        let report = game.reveal((1, 1)).unwrap();

        assert_eq!(report.outcome, RevealOutcome::NoChange);
        assert!(report.events.is_empty());
        assert_eq!(game.revealed_count(), 1);
    }

    #[test]
    fn single_free_tile_board_wins_immediately() {
        let mut game = GameSession::start(
            GameConfig::new((1, 1), 0).unwrap(),
            PoolGenerator::new(11),
        )
        .unwrap();

        assert_eq!(game.reveal((0, 0)).unwrap().outcome, RevealOutcome::Safe(0));
        assert_eq!(game.check_status().unwrap().status, SessionStatus::Victory);
    }

    #[test]
    fn flood_fill_terminates_on_a_large_empty_board() {
        let mut game = session((50, 50), &[]);

        let report = game.reveal((0, 0)).unwrap();

        assert_eq!(game.revealed_count(), 2500);
        assert_eq!(revealed_positions(&report.events).len(), 2500);
        assert_eq!(game.check_status().unwrap().status, SessionStatus::Victory);
    }

    #[test]
    fn start_rejects_a_board_without_a_free_tile() {
        let config = GameConfig::new_unchecked((8, 8), 64);

        assert_eq!(
            GameSession::start(config, PoolGenerator::new(1)),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn start_accepts_the_default_sized_game() {
        let config = GameConfig::new((8, 8), 10).unwrap();
        let game = GameSession::start(config, PoolGenerator::new(1)).unwrap();

        assert_eq!(game.board().mine_count(), 10);
        assert_eq!(game.status(), SessionStatus::InProgress);
    }

    #[test]
    fn restart_discards_all_session_state() {
        let mut game = session((2, 2), &[(0, 0)]);
        game.reveal((0, 0)).unwrap();
        assert!(game.is_finished());

        game.restart(GameConfig::new((4, 4), 3).unwrap(), PoolGenerator::new(2))
            .unwrap();

        assert_eq!(game.status(), SessionStatus::InProgress);
        assert_eq!(game.revealed_count(), 0);
        assert_eq!(game.triggered_mine(), None);
        assert_eq!(game.size(), (4, 4));
    }
}

use crate::GameConfig;
use crate::board::Board;

pub use random::*;

mod random;

/// Strategy that turns a validated config into a fully mined board.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Board;
}

use super::*;
use crate::types::Coord2;

/// Draws mine positions uniformly at random, without replacement, from a
/// shrinking pool of candidate tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PoolGenerator {
    seed: u64,
}

impl PoolGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for PoolGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let mut board = Board::blank(config);
        let (rows, columns) = config.size;

        // Candidate pool holds every tile position, row-major.
        let mut pool: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (row, column)))
            .collect();

        let mut mines = usize::from(config.mines);
        if mines > pool.len() {
            log::warn!(
                "unchecked config requested {} mines but only {} tiles fit",
                config.mines,
                pool.len()
            );
            mines = pool.len();
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for _ in 0..mines {
            let drawn = rng.random_range(0..pool.len());
            // the pool shrinks each draw, so no tile can be drawn twice
            let coords = pool.swap_remove(drawn);
            board.place_mine(coords);
        }

        log::debug!(
            "generated {}x{} board with {} mines (seed {})",
            rows,
            columns,
            board.mine_count(),
            self.seed
        );
        board
    }
}

/// Key-code sequence that unlocks the reveal-all-mines overlay:
/// up up down down left right left right B A enter.
pub const CHEAT_SEQUENCE: [u16; 11] = [38, 38, 40, 40, 37, 39, 37, 39, 66, 65, 13];

/// Tracks keystrokes toward [`CHEAT_SEQUENCE`]. Any key that breaks the
/// expected order discards all progress, including that key. The overlay
/// itself belongs to the presentation layer, which reads
/// [`Board::mine_positions`](crate::Board::mine_positions) once unlocked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheatCode {
    progress: usize,
}

impl CheatCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one key code; returns true exactly when the sequence completes.
    pub fn observe(&mut self, key: u16) -> bool {
        if key != CHEAT_SEQUENCE[self.progress] {
            self.progress = 0;
            return false;
        }

        self.progress += 1;
        if self.progress == CHEAT_SEQUENCE.len() {
            self.progress = 0;
            return true;
        }
        false
    }

    /// Discards any partial progress, e.g. when a new game starts.
    pub fn reset(&mut self) {
        self.progress = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sequence_completes_once() {
        let mut code = CheatCode::new();

        let (last, prefix) = CHEAT_SEQUENCE.split_last().unwrap();
        for &key in prefix {
            assert!(!code.observe(key));
        }
        assert!(code.observe(*last));

        // Progress restarts after completion.
        assert!(!code.observe(*last));
    }

    #[test]
    fn wrong_key_discards_progress() {
        let mut code = CheatCode::new();

        assert!(!code.observe(38));
        assert!(!code.observe(38));
        // Expected 40 here; a third 38 resets and does not count as a start.
        assert!(!code.observe(38));

        for &key in &CHEAT_SEQUENCE[..CHEAT_SEQUENCE.len() - 1] {
            assert!(!code.observe(key));
        }
        assert!(code.observe(13));
    }

    #[test]
    fn reset_clears_partial_progress() {
        let mut code = CheatCode::new();

        code.observe(38);
        code.observe(38);
        code.reset();

        assert_eq!(code, CheatCode::new());
    }
}

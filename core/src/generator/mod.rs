use crate::*;
pub use random::*;

mod random;

/// Mine placement policy. Implementations own their randomness source, so a
/// fixed seed gives a reproducible board.
pub trait MineFieldGenerator {
    fn generate(self, difficulty: &Difficulty) -> Result<MineField>;
}

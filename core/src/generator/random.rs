use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform placement by rejection sampling: pick a random cell, retry while it
/// already holds a mine. The first reveal gets no protection, so it can hit a
/// mine straight away.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMineFieldGenerator {
    seed: u64,
}

impl RandomMineFieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineFieldGenerator for RandomMineFieldGenerator {
    fn generate(self, difficulty: &Difficulty) -> Result<MineField> {
        if difficulty.rows == 0 || difficulty.cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        // at least one safe cell, otherwise the sampling loop cannot finish
        if difficulty.mines == 0 || difficulty.mines >= difficulty.total_cells() {
            return Err(GameError::InvalidMineCount);
        }

        let mut mask: Array2<bool> = Array2::default(difficulty.size().to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;

        while placed < difficulty.mines {
            let row = rng.random_range(0..difficulty.rows);
            let col = rng.random_range(0..difficulty.cols);

            let cell = &mut mask[(row, col).to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        log::debug!(
            "placed {placed} mines on a {}x{} board (seed {})",
            difficulty.rows,
            difficulty.cols,
            self.seed
        );
        Ok(MineField::from_mask(mask))
    }
}

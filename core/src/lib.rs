use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use scoreboard::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod scoreboard;
mod session;
mod snapshot;
mod types;

/// Named board preset: dimensions, mine count, and the key best times are
/// stored under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    key: Cow<'static, str>,
}

impl Difficulty {
    pub const EASY: Difficulty = Self::new_unchecked(8, 8, 10, "easy_scores");
    pub const NORMAL: Difficulty = Self::new_unchecked(16, 16, 40, "normal_scores");
    pub const EXPERT: Difficulty = Self::new_unchecked(16, 30, 99, "expert_scores");

    const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount, key: &'static str) -> Self {
        Self {
            rows,
            cols,
            mines,
            key: Cow::Borrowed(key),
        }
    }

    /// Custom difficulty; the key identifies its score ledger.
    pub fn new(
        rows: Coord,
        cols: Coord,
        mines: CellCount,
        key: impl Into<Cow<'static, str>>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if mines == 0 || mines >= mult(rows, cols) {
            return Err(GameError::InvalidMineCount);
        }
        Ok(Self {
            rows,
            cols,
            mines,
            key: key.into(),
        })
    }

    pub fn score_key(&self) -> &str {
        &self.key
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Safe cells that must all be revealed to win.
    pub const fn target_reveal_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Mine placement over a board, kept apart from the player-visible grid so
/// adjacency queries never touch reveal/flag state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineField {
    pub fn from_mask(mask: Array2<bool>) -> Self {
        let mine_count = mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self { mask, mine_count }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mask(mask))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.mask.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count()
            .try_into()
            .unwrap()
    }
}

impl Index<Coord2> for MineField {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mask[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for MineField {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.mask[(row as usize, col as usize)]
    }
}

/// Outcome of a reveal request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

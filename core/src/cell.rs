use serde::{Deserialize, Serialize};

/// Player-visible state of a single board cell.
///
/// A cell is never revealed and flagged at the same time; the enum makes that
/// unrepresentable. The adjacency count travels with `Revealed`, so it exists
/// exactly for the cells that display it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardCell {
    Hidden,
    Revealed(u8),
    Flagged,
    /// A mine uncovered when the game is lost. Display only, never counted
    /// toward the reveal target.
    Mine,
}

impl BoardCell {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Mine)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::Hidden
    }
}

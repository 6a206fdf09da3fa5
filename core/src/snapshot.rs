use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only capture of a session for renderers: per-cell display state plus
/// the header values. Rebuilt after every mutation, so it carries no handles
/// back into the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub state: SessionState,
    pub mines_remaining: CellCount,
    /// Adjacency count per revealed cell, `None` while covered.
    pub revealed: Array2<Option<u8>>,
    pub flags: Array2<bool>,
    /// Mines uncovered by a loss. Empty until the game is lost.
    pub mines: Array2<bool>,
    pub triggered_mine: Option<Coord2>,
}

impl BoardView {
    pub fn from_session(session: &Session) -> Self {
        let size = session.size();
        let mut revealed = Array2::from_elem(size.to_nd_index(), None);
        let mut flags = Array2::from_elem(size.to_nd_index(), false);
        let mut mines = Array2::from_elem(size.to_nd_index(), false);

        let (rows, cols) = size;
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                match session.board()[coords] {
                    BoardCell::Hidden => {}
                    BoardCell::Revealed(count) => revealed[coords.to_nd_index()] = Some(count),
                    BoardCell::Flagged => flags[coords.to_nd_index()] = true,
                    BoardCell::Mine => mines[coords.to_nd_index()] = true,
                }
            }
        }

        Self {
            size,
            state: session.state(),
            mines_remaining: session.mines_remaining(),
            revealed,
            flags,
            mines,
            triggered_mine: session.triggered_mine(),
        }
    }
}

impl From<&Session> for BoardView {
    fn from(session: &Session) -> Self {
        Self::from_session(session)
    }
}

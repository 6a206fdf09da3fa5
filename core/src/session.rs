use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::*;

/// Lifecycle of one game. Terminal states absorb further input: reveal and
/// flag requests on a finished session are no-ops.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Playing
    }
}

/// One game instance: a grid, a mine placement, and the reveal/flag
/// bookkeeping between them. Discarded wholesale on a new game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    difficulty: Difficulty,
    minefield: MineField,
    grid: Grid,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: SessionState,
    triggered_mine: Option<Coord2>,
}

impl Session {
    /// Starts a game, placing mines with the given generator.
    pub fn new(difficulty: Difficulty, generator: impl MineFieldGenerator) -> Result<Self> {
        let minefield = generator.generate(&difficulty)?;
        Self::from_minefield(difficulty, minefield)
    }

    /// Starts a game over a prepared mine placement. The placement is
    /// authoritative for the win target and the flag budget.
    pub fn from_minefield(difficulty: Difficulty, minefield: MineField) -> Result<Self> {
        if minefield.size() != difficulty.size() {
            return Err(GameError::InvalidDimensions);
        }
        let grid = Grid::generate(difficulty.rows, difficulty.cols)?;
        Ok(Self {
            difficulty,
            minefield,
            grid,
            revealed_count: 0,
            flagged_count: 0,
            state: SessionState::default(),
            triggered_mine: None,
        })
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    /// Mine counter shown next to the board: mines minus placed flags. The
    /// flag budget keeps it from going negative.
    pub fn mines_remaining(&self) -> CellCount {
        self.minefield.mine_count() - self.flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Safe cells that must all be revealed to win.
    pub fn target_reveal_count(&self) -> CellCount {
        self.minefield.safe_cell_count()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<BoardCell> {
        self.grid.cell_at(coords)
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub(crate) fn board(&self) -> &Grid {
        &self.grid
    }

    /// Reveals a hidden cell. Revealing a mine loses the game and uncovers
    /// every mine; revealing a zero-adjacency cell cascades through the
    /// connected zero region. Flagged and already-revealed cells are no-ops.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        match self.grid[coords] {
            BoardCell::Hidden => Ok(self.reveal_hidden(coords)),
            _ => Ok(RevealOutcome::NoChange),
        }
    }

    /// Places or removes a flag. Revealed cells and finished sessions are
    /// no-ops; placing is refused once the flag budget is spent.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        Ok(match self.grid[coords] {
            BoardCell::Flagged => {
                self.grid[coords] = BoardCell::Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Changed
            }
            BoardCell::Hidden if self.mines_remaining() > 0 => {
                self.grid[coords] = BoardCell::Flagged;
                self.flagged_count += 1;
                FlagOutcome::Changed
            }
            _ => FlagOutcome::NoChange,
        })
    }

    fn reveal_hidden(&mut self, coords: Coord2) -> RevealOutcome {
        if self.minefield.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.state = SessionState::Lost;
            self.uncover_mines();
            return RevealOutcome::HitMine;
        }

        let count = self.reveal_counted(coords);
        if count == 0 {
            self.flood_fill(coords);
        }

        if self.revealed_count == self.target_reveal_count() {
            self.state = SessionState::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Work-list expansion of a zero region: bounded by the cell count, never
    /// re-enters a revealed cell, never opens a flag.
    fn flood_fill(&mut self, start: Coord2) {
        let mut visited = HashSet::from([start]);
        let mut pending: VecDeque<_> = self
            .grid
            .iter_neighbors(start)
            .filter(|&pos| self.grid[pos] == BoardCell::Hidden)
            .collect();
        log::trace!(
            "flood fill from {start:?}, {} initial neighbors",
            pending.len()
        );

        while let Some(coords) = pending.pop_front() {
            if !visited.insert(coords) {
                continue;
            }
            if self.grid[coords] != BoardCell::Hidden {
                continue;
            }

            let count = self.reveal_counted(coords);
            if count == 0 {
                pending.extend(
                    self.grid
                        .iter_neighbors(coords)
                        .filter(|&pos| self.grid[pos] == BoardCell::Hidden)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn reveal_counted(&mut self, coords: Coord2) -> u8 {
        let count = self.minefield.adjacent_mine_count(coords);
        self.grid[coords] = BoardCell::Revealed(count);
        self.revealed_count += 1;
        log::trace!("revealed {coords:?}, {count} adjacent mines");
        count
    }

    /// Loss display: every mine comes up, flagged or not. Does not touch the
    /// reveal counter.
    fn uncover_mines(&mut self) {
        let (rows, cols) = self.grid.size();
        for row in 0..rows {
            for col in 0..cols {
                if self.minefield.contains_mine((row, col)) {
                    self.grid[(row, col)] = BoardCell::Mine;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        let difficulty = Difficulty {
            rows: size.0,
            cols: size.1,
            mines: mines.len() as CellCount,
            key: "test_scores".into(),
        };
        let minefield = MineField::from_mine_coords(size, mines).unwrap();
        Session::from_minefield(difficulty, minefield).unwrap()
    }

    #[test]
    fn revealing_a_mine_loses_and_uncovers_all_mines() {
        let mut session = session((2, 2), &[(0, 0), (1, 1)]);

        let outcome = session.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(session.triggered_mine(), Some((0, 0)));
        assert_eq!(session.cell_at((0, 0)), Ok(BoardCell::Mine));
        assert_eq!(session.cell_at((1, 1)), Ok(BoardCell::Mine));
        // display-only reveal, the win counter is untouched
        assert_eq!(session.revealed_count(), 0);
    }

    #[test]
    fn losing_uncovers_flagged_mines_too() {
        let mut session = session((2, 2), &[(0, 0), (1, 1)]);

        session.toggle_flag((1, 1)).unwrap();
        session.reveal((0, 0)).unwrap();

        assert_eq!(session.cell_at((1, 1)), Ok(BoardCell::Mine));
    }

    #[test]
    fn zero_reveal_cascades_through_the_safe_region() {
        let mut session = session((3, 3), &[(2, 2)]);

        let outcome = session.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.revealed_count(), 8);
        assert_eq!(session.cell_at((0, 0)), Ok(BoardCell::Revealed(0)));
        assert_eq!(session.cell_at((1, 1)), Ok(BoardCell::Revealed(1)));
        // the mine stays hidden on a win
        assert_eq!(session.cell_at((2, 2)), Ok(BoardCell::Hidden));
    }

    #[test]
    fn cascade_skips_flagged_cells_and_stops_behind_them() {
        let mut session = session((3, 3), &[(2, 2)]);

        session.toggle_flag((0, 1)).unwrap();
        let outcome = session.reveal((0, 0)).unwrap();

        // the flag cuts off the only zero path to the right column
        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(session.revealed_count(), 5);
        assert_eq!(session.cell_at((0, 1)), Ok(BoardCell::Flagged));
        assert_eq!(session.cell_at((0, 2)), Ok(BoardCell::Hidden));
        assert_eq!(session.cell_at((1, 2)), Ok(BoardCell::Hidden));
        assert_eq!(session.cell_at((2, 0)), Ok(BoardCell::Revealed(0)));

        // unflagging and revealing there finishes the board
        session.toggle_flag((0, 1)).unwrap();
        assert_eq!(session.reveal((0, 1)).unwrap(), RevealOutcome::Won);
    }

    #[test]
    fn whole_board_as_one_zero_region_wins_in_a_single_reveal() {
        let difficulty = Difficulty {
            rows: 4,
            cols: 4,
            mines: 0,
            key: "test_scores".into(),
        };
        let minefield = MineField::from_mine_coords((4, 4), &[]).unwrap();
        let mut session = Session::from_minefield(difficulty, minefield).unwrap();

        assert_eq!(session.reveal((1, 2)).unwrap(), RevealOutcome::Won);
        assert_eq!(session.revealed_count(), 16);
    }

    #[test]
    fn revealing_the_last_safe_cell_is_the_only_win_path() {
        let mut session = session((2, 1), &[(0, 0)]);

        let outcome = session.reveal((1, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(session.cell_at((1, 0)), Ok(BoardCell::Revealed(1)));
    }

    #[test]
    fn revealing_a_flagged_or_open_cell_is_a_noop() {
        let mut session = session((3, 3), &[(0, 0)]);

        session.toggle_flag((0, 1)).unwrap();
        assert_eq!(session.reveal((0, 1)).unwrap(), RevealOutcome::NoChange);

        session.reveal((1, 1)).unwrap();
        assert_eq!(session.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn flag_budget_is_capped_at_the_mine_count() {
        let mut session = session((2, 2), &[(0, 0)]);

        assert_eq!(session.toggle_flag((0, 1)).unwrap(), FlagOutcome::Changed);
        assert_eq!(session.mines_remaining(), 0);

        // budget spent, further flags are refused
        assert_eq!(session.toggle_flag((1, 0)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(session.cell_at((1, 0)), Ok(BoardCell::Hidden));

        // unflagging always refunds
        assert_eq!(session.toggle_flag((0, 1)).unwrap(), FlagOutcome::Changed);
        assert_eq!(session.mines_remaining(), 1);
    }

    #[test]
    fn flagging_a_revealed_cell_is_a_noop() {
        let mut session = session((3, 3), &[(0, 0), (2, 2)]);

        session.reveal((0, 2)).unwrap();
        assert!(!session.is_finished());
        assert_eq!(session.toggle_flag((0, 2)).unwrap(), FlagOutcome::NoChange);
        assert!(session.cell_at((0, 2)).unwrap().is_revealed());
    }

    #[test]
    fn finished_session_absorbs_further_input() {
        let mut session = session((2, 2), &[(0, 0)]);

        session.reveal((0, 0)).unwrap();
        assert!(session.is_finished());

        assert_eq!(session.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(session.toggle_flag((1, 1)).unwrap(), FlagOutcome::NoChange);
    }

    #[test]
    fn out_of_bounds_requests_fail_fast() {
        let mut session = session((2, 2), &[(0, 0)]);

        assert_eq!(session.reveal((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(session.toggle_flag((0, 2)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn classic_board_cascade_reveals_an_exact_region() {
        // 8x8 with ten mines walling off rows 0..2: row 1 is fully mined,
        // row 0 keeps its corners. Everything from row 2 down is safe, and
        // rows 3..8 form one zero region fenced by the counts in row 2.
        let mut mines: Vec<Coord2> = (0..8).map(|col| (1, col)).collect();
        mines.push((0, 0));
        mines.push((0, 7));
        let mut session = session((8, 8), &mines);

        let outcome = session.reveal((5, 3)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        // rows 2..8 inclusive: 6 rows of 8 cells
        assert_eq!(session.revealed_count(), 48);
        for row in 2..8 {
            for col in 0..8 {
                assert!(session.cell_at((row, col)).unwrap().is_revealed());
            }
        }
        // the enclosed safe pocket in row 0 stays hidden
        for col in 1..7 {
            assert_eq!(session.cell_at((0, col)), Ok(BoardCell::Hidden));
        }
        assert_eq!(session.cell_at((2, 0)), Ok(BoardCell::Revealed(2)));
        assert_eq!(session.cell_at((2, 3)), Ok(BoardCell::Revealed(3)));
        assert_eq!(session.cell_at((4, 4)), Ok(BoardCell::Revealed(0)));
    }

    #[test]
    fn seeded_generator_yields_a_playable_session() {
        let session = Session::new(Difficulty::EASY, RandomMineFieldGenerator::new(1)).unwrap();

        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.total_mines(), 10);
        assert_eq!(session.target_reveal_count(), 54);
        assert_eq!(session.mines_remaining(), 10);
    }
}

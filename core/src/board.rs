use alloc::collections::VecDeque;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from generation to win or loss. The caller owns it and starts over by
/// replacing it with a freshly generated board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    cleared_count: CellCount,
    state: BoardState,
    detonated: Option<Coord2>,
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct BoardRepr {
    cells: Array2<Cell>,
    mine_count: CellCount,
    cleared_count: CellCount,
    state: BoardState,
    detonated: Option<Coord2>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    /// Only square grids whose counters agree with their cells are accepted.
    fn try_from(repr: BoardRepr) -> Result<Self> {
        let (rows, cols) = repr.cells.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        let size: Coord = rows.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        GameConfig::new(size, repr.mine_count)?;

        let mines = repr.cells.iter().filter(|cell| cell.is_mine()).count();
        let cleared = repr
            .cells
            .iter()
            .filter(|cell| cell.is_cleared() && !cell.is_mine())
            .count();
        if mines != usize::from(repr.mine_count) || cleared != usize::from(repr.cleared_count) {
            return Err(GameError::CountMismatch);
        }
        if let Some(coords) = repr.detonated {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
        }

        Ok(Self {
            cells: repr.cells,
            mine_count: repr.mine_count,
            cleared_count: repr.cleared_count,
            state: repr.state,
            detonated: repr.detonated,
        })
    }
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        let cells = Array2::from_shape_fn((size, size).to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::new(
                mine_layout.contains_mine(coords),
                mine_layout.adjacent_mine_count(coords),
            )
        });

        Self {
            cells,
            mine_count: mine_layout.mine_count(),
            cleared_count: 0,
            state: BoardState::Playing,
            detonated: None,
        }
    }

    /// Fails with the same errors as [`GameConfig::new`] when `config` is invalid.
    pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        crate::generator::place_mines(config, rng).map(Self::new)
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn won(&self) -> bool {
        matches!(self.state, BoardState::Won)
    }

    pub fn size(&self) -> Coord {
        // square and never larger than Coord::MAX, see MineLayout
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Non-mine cells cleared so far.
    pub fn cleared_count(&self) -> CellCount {
        self.cleared_count
    }

    pub fn flag_count(&self) -> CellCount {
        // bounded by total_cells
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    /// Mines minus placed flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count() as isize)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// The mine whose clearing lost the game.
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    /// Player-visible state of a cell. Mines show up only once cleared or after the game ended.
    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let cell = self.cell_at(coords)?;

        Ok(match (cell.is_cleared(), cell.is_mine()) {
            (true, true) => CellView::Detonated,
            (true, false) => CellView::Cleared(cell.adjacent_mines()),
            (false, true) if self.game_over() => CellView::Mine,
            (false, _) if cell.is_flagged() => CellView::Flagged,
            (false, _) => CellView::Hidden,
        })
    }

    /// Row-major iteration over every cell with its position.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    /// Flips the flag on a covered cell. Cleared cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        self.warn_if_finished("flag", coords);

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_cleared() {
            return Ok(MarkOutcome::NoChange);
        }
        cell.flip_flag();
        Ok(MarkOutcome::Changed)
    }

    /// Clears a cell, flood-filling outward from cells with no adjacent mines.
    ///
    /// Flags never block a clear: a flagged cell reached directly or by the flood fill loses
    /// its flag and is cleared. Once the game is over its result is latched, later calls still
    /// update cells but can no longer flip a loss into a win or the other way around.
    pub fn clear(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.cells[coords.to_nd_index()].is_cleared() {
            return Ok(RevealOutcome::NoChange);
        }
        self.warn_if_finished("clear", coords);

        let was_finished = self.game_over();
        let mut to_visit = VecDeque::from([coords]);
        let mut cleared_here: usize = 0;

        while let Some(visit) = to_visit.pop_front() {
            let cell = &mut self.cells[visit.to_nd_index()];
            if cell.is_cleared() {
                continue;
            }
            cell.mark_cleared();
            let cell = *cell;

            if cell.is_mine() {
                // only reachable for the clicked cell, neighbours of a zero cell are safe
                if !self.game_over() {
                    self.detonated = Some(visit);
                }
                self.end_game(false);
                break;
            }

            self.cleared_count += 1;
            cleared_here += 1;
            if self.total_cells() - self.cleared_count == self.mine_count {
                self.end_game(true);
            }

            if cell.adjacent_mines() == 0 {
                to_visit.extend(
                    self.iter_neighbors(visit)
                        .filter(|&pos| !self.cells[pos.to_nd_index()].is_cleared()),
                );
            }
        }

        log::trace!("Clear at {coords:?} revealed {cleared_here} safe cells");

        Ok(match self.state {
            BoardState::Lost if !was_finished => RevealOutcome::HitMine,
            BoardState::Won if !was_finished => RevealOutcome::Won,
            _ => RevealOutcome::Revealed,
        })
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            BoardState::Won
        } else {
            BoardState::Lost
        };
        log::debug!(
            "Game over, {} with {}/{} safe cells cleared",
            if won { "won" } else { "lost" },
            self.cleared_count,
            self.total_cells() - self.mine_count
        );
    }

    fn warn_if_finished(&self, action: &str, coords: Coord2) {
        if self.game_over() {
            log::warn!("{action} at {coords:?} after the game ended");
        }
    }
}

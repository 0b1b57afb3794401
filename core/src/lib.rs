#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Cells per side of the default board.
pub const DEFAULT_SIZE: Coord = 10;

/// Mines on the default board.
pub const DEFAULT_MINES: CellCount = 15;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Rejects boards without cells, without mines, or without a single safe cell.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            Err(GameError::EmptyBoard)
        } else if self.mines == 0 {
            Err(GameError::NoMines)
        } else if self.mines >= self.total_cells() {
            Err(GameError::TooManyMines)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, DEFAULT_MINES)
    }
}

/// Where the mines are, fixed for the lifetime of a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout from a square mask; the mine count is whatever the mask holds and must
    /// satisfy the same rules as [`GameConfig::new`].
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        let size: Coord = rows.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .map_err(|_| GameError::TooManyMines)?;
        GameConfig::new(size, mine_count)?;

        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord {
        // the constructors only accept square masks that fit in a Coord
        self.mine_mask.nrows() as Coord
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    pub const fn ends_game(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

/// Validates `size` and `mines`, then generates a fresh board from `rng`.
pub fn new_game<R: Rng + ?Sized>(size: Coord, mines: CellCount, rng: &mut R) -> Result<Board> {
    Board::generate(GameConfig::new_unchecked(size, mines), rng)
}

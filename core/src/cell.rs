use serde::{Deserialize, Serialize};

/// Full engine-side state of one board position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    cleared: bool,
    flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn new(mine: bool, adjacent_mines: u8) -> Self {
        Self {
            mine,
            cleared: false,
            flagged: false,
            adjacent_mines,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_cleared(self) -> bool {
        self.cleared
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Mines among the up-to-8 neighbours, between 0 and 8.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Clearing always drops the flag, a cleared cell is never flagged.
    pub(crate) fn mark_cleared(&mut self) {
        self.flagged = false;
        self.cleared = true;
    }

    pub(crate) fn flip_flag(&mut self) {
        self.flagged = !self.flagged;
    }
}

/// What a player is allowed to see of a cell.
///
/// Mines stay hidden unless the cell was cleared or the game is over.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Cleared(u8),
    /// A cleared mine. The one that lost the game, unless it was cleared after a win.
    Detonated,
    /// Any other mine, shown once the game is over.
    Mine,
}

impl CellView {
    /// Whether the player can still act on this cell.
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn shows_mine(self) -> bool {
        matches!(self, Self::Detonated | Self::Mine)
    }
}

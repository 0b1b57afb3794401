use std::fmt;

use minesweeper_core::{Board, BoardState, CellView};

pub fn glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '.',
        CellView::Flagged => 'F',
        CellView::Cleared(0) => ' ',
        CellView::Cleared(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Detonated => 'X',
        CellView::Mine => '*',
    }
}

/// Text grid with row and column numbers along the edges.
pub struct BoardDisplay<'a>(pub &'a Board);

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let size = board.size();
        let width = size.saturating_sub(1).to_string().len();

        write!(f, "{:>width$}", "")?;
        for col in 0..size {
            write!(f, " {col:>width$}")?;
        }
        writeln!(f)?;

        for row in 0..size {
            write!(f, "{row:>width$}")?;
            for col in 0..size {
                let view = board.view_at((row, col)).map_err(|_| fmt::Error)?;
                write!(f, " {:>width$}", glyph(view))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn prompt(board: &Board) -> &'static str {
    match board.state() {
        BoardState::Playing => "Clear a cell, or flag it",
        BoardState::Won => "You won!",
        BoardState::Lost => "Game over",
    }
}

pub fn status_line(board: &Board) -> String {
    if board.game_over() {
        format!("{} (type `r` to play again)", prompt(board))
    } else {
        format!("{} ({} mines left)", prompt(board), board.mines_left())
    }
}

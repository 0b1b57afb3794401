use std::io::{self, BufRead, Write};

use minesweeper_core::{Board, GameConfig, GameError, Result};
use rand::Rng;

use crate::{
    command::{Command, HELP},
    render::{BoardDisplay, status_line},
};

/// What became of a command, for the front-end to report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Updated,
    Unchanged,
    /// Clear and flag are refused once the game has ended.
    Finished,
    Rejected(GameError),
    Help,
    Quit,
}

/// Interactive play on one board at a time; `reset` swaps in a fresh board.
pub struct Session<R> {
    config: GameConfig,
    rng: R,
    board: Board,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self> {
        let board = Board::generate(config, &mut rng)?;
        log::info!(
            "New {}x{} game with {} mines",
            config.size,
            config.size,
            config.mines
        );
        Ok(Self { config, rng, board })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn reset(&mut self) -> Result<()> {
        self.board = Board::generate(self.config, &mut self.rng)?;
        log::info!("Board reset");
        Ok(())
    }

    pub fn apply(&mut self, command: Command) -> Reply {
        let reply = match command {
            Command::Quit => Reply::Quit,
            Command::Help => Reply::Help,
            Command::Reset => to_reply(self.reset().map(|()| true)),
            Command::Clear(_) | Command::Flag(_) if self.board.game_over() => Reply::Finished,
            Command::Clear(coords) => to_reply(self.board.clear(coords).map(|o| o.has_update())),
            Command::Flag(coords) => {
                to_reply(self.board.toggle_flag(coords).map(|o| o.has_update()))
            }
        };
        log::debug!("{command:?} -> {reply:?}");
        reply
    }

    /// Reads commands line by line until `quit` or end of input, redrawing after each change.
    pub fn run<I: BufRead, W: Write>(&mut self, mut input: I, out: &mut W) -> io::Result<()> {
        self.show(out)?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            };

            match self.apply(command) {
                Reply::Updated => self.show(out)?,
                Reply::Unchanged => writeln!(out, "Nothing changed")?,
                Reply::Finished => writeln!(out, "The game is over, type `r` to play again")?,
                Reply::Rejected(err) => writeln!(out, "{err}")?,
                Reply::Help => writeln!(out, "{HELP}")?,
                Reply::Quit => return Ok(()),
            }
        }
    }

    fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", BoardDisplay(&self.board))?;
        writeln!(out, "{}", status_line(&self.board))
    }
}

fn to_reply(result: Result<bool>) -> Reply {
    match result {
        Ok(true) => Reply::Updated,
        Ok(false) => Reply::Unchanged,
        Err(err) => Reply::Rejected(err),
    }
}

#[cfg(test)]
mod tests {
    use minesweeper_core::{BoardState, MineLayout, seeded_rng};
    use rand::rngs::SmallRng;

    use super::*;

    fn session(size: u8, mines: &[(u8, u8)]) -> Session<SmallRng> {
        // known board, resets reuse its size and mine count
        let board = Board::new(MineLayout::from_mine_coords(size, mines).unwrap());
        Session {
            config: board.game_config(),
            rng: seeded_rng(5),
            board,
        }
    }

    fn play(session: &mut Session<SmallRng>, input: &str) -> String {
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn clearing_last_safe_cell_wins() {
        let mut session = session(2, &[(0, 0), (0, 1), (1, 0)]);

        let out = play(&mut session, "c 1 1\nq\n");

        assert!(out.contains("You won!"));
        assert!(session.board().won());
    }

    #[test]
    fn input_is_ignored_after_loss() {
        let mut session = session(3, &[(0, 0)]);

        let out = play(&mut session, "c 0 0\nf 1 1\nc 2 2\nq\n");

        assert!(out.contains("Game over"));
        assert_eq!(out.matches("The game is over").count(), 2);
        assert!(!session.board().cell_at((1, 1)).unwrap().is_flagged());
        assert_eq!(session.board().cleared_count(), 0);
    }

    #[test]
    fn reset_replaces_the_board() {
        let mut session = session(3, &[(0, 0)]);
        assert_eq!(session.apply(Command::Clear((0, 0))), Reply::Updated);
        assert_eq!(session.board().state(), BoardState::Lost);

        assert_eq!(session.apply(Command::Reset), Reply::Updated);

        let board = session.board();
        assert_eq!(board.state(), BoardState::Playing);
        assert_eq!(board.size(), 3);
        assert_eq!(board.mine_count(), 1);
        assert!(board.iter_cells().all(|(_, cell)| !cell.is_cleared()));
    }

    #[test]
    fn flag_toggles_and_reports_no_change_on_cleared_cells() {
        let mut session = session(3, &[(0, 0)]);

        assert_eq!(session.apply(Command::Flag((2, 2))), Reply::Updated);
        assert_eq!(session.apply(Command::Clear((1, 1))), Reply::Updated);
        assert_eq!(session.apply(Command::Flag((1, 1))), Reply::Unchanged);
        assert_eq!(session.apply(Command::Clear((1, 1))), Reply::Unchanged);
    }

    #[test]
    fn bad_input_is_reported_and_play_continues() {
        let mut session = session(3, &[(0, 0)]);

        let out = play(&mut session, "dig\nc 5 5\n\nh\nf 2 2\n");

        assert!(out.contains("Unknown command `dig`"));
        assert!(out.contains("Invalid coordinates"));
        assert!(out.contains("Commands:"));
        assert!(session.board().cell_at((2, 2)).unwrap().is_flagged());
    }

    #[test]
    fn new_session_generates_from_config() {
        let config = GameConfig::new(6, 7).unwrap();
        let session = Session::new(config, seeded_rng(1)).unwrap();

        assert_eq!(session.board().game_config(), config);
        let mines = session
            .board()
            .iter_cells()
            .filter(|(_, cell)| cell.is_mine())
            .count();
        assert_eq!(mines, 7);
    }

    #[test]
    fn new_session_rejects_unchecked_config() {
        let err = |size, mines| {
            Session::new(GameConfig::new_unchecked(size, mines), seeded_rng(1)).err()
        };

        assert_eq!(err(2, 10), Some(GameError::TooManyMines));
        assert_eq!(err(0, 1), Some(GameError::EmptyBoard));
    }
}

use std::collections::BTreeSet;

use minesweeper_core::*;

fn generated(size: Coord, mines: CellCount, seed: u64) -> Board {
    Board::generate(GameConfig::new(size, mines).unwrap(), &mut seeded_rng(seed)).unwrap()
}

#[test]
fn generated_boards_have_exact_mines_and_true_counts() {
    for seed in 0..50 {
        let board = generated(10, 15, seed);

        let mines = board.iter_cells().filter(|(_, cell)| cell.is_mine()).count();
        assert_eq!(mines, 15, "seed {seed}");

        for (pos, cell) in board.iter_cells() {
            let expected = Neighbors::new(pos, 10)
                .filter(|&n| board.cell_at(n).unwrap().is_mine())
                .count();
            assert_eq!(cell.adjacent_mines() as usize, expected, "seed {seed} at {pos:?}");
            assert!(!cell.is_cleared() && !cell.is_flagged());
        }
        assert_eq!(board.state(), BoardState::Playing);
    }
}

#[test]
fn flood_fill_clears_exactly_the_zero_region_and_its_border() {
    for seed in 0..50 {
        let mut board = generated(12, 20, seed);
        let Some((start, _)) = board
            .iter_cells()
            .find(|(_, cell)| !cell.is_mine() && cell.adjacent_mines() == 0)
        else {
            continue;
        };

        let mut expected = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            if board.cell_at(pos).unwrap().adjacent_mines() != 0 {
                continue;
            }
            for next in Neighbors::new(pos, 12) {
                if expected.insert(next) {
                    stack.push(next);
                }
            }
        }

        board.clear(start).unwrap();

        let cleared: BTreeSet<_> = board
            .iter_cells()
            .filter(|(_, cell)| cell.is_cleared())
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(cleared, expected, "seed {seed}");
        assert!(board.iter_cells().all(|(_, c)| !(c.is_mine() && c.is_cleared())));
        assert!(!board.game_over() || board.won());
    }
}

#[test]
fn win_only_after_last_safe_cell_in_any_order() {
    for seed in 0..100 {
        let mut board = generated(3, 1, seed);
        let mut order: Vec<Coord2> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.is_mine())
            .map(|(pos, _)| pos)
            .collect();
        shuffle_in_place(&mut order, &mut seeded_rng(seed + 1000));

        for pos in order {
            board.clear(pos).unwrap();
            let all_cleared = board.cleared_count() == 8;
            assert_eq!(board.won(), all_cleared, "seed {seed}");
            assert_eq!(board.game_over(), all_cleared, "seed {seed}");
        }
        assert!(board.won());
    }
}

#[test]
fn hitting_a_mine_loses_without_counting() {
    for seed in 0..20 {
        let mut board = generated(5, 5, seed);
        let (mine, _) = board.iter_cells().find(|(_, cell)| cell.is_mine()).unwrap();
        let before = board.cleared_count();

        assert_eq!(board.clear(mine).unwrap(), RevealOutcome::HitMine);

        assert!(board.game_over());
        assert!(!board.won());
        assert_eq!(board.cleared_count(), before);
        assert_eq!(board.detonated(), Some(mine));
    }
}

#[test]
fn clearing_twice_matches_clearing_once() {
    for seed in 0..20 {
        let mut board = generated(8, 10, seed);
        board.clear((4, 4)).unwrap();
        let once = board.clone();

        board.clear((4, 4)).unwrap();

        assert_eq!(board, once);
    }
}

#[test]
fn two_by_two_with_three_mines() {
    assert_eq!(new_game(2, 0, &mut seeded_rng(0)).err(), Some(GameError::NoMines));

    for seed in 0..10 {
        let mut board = new_game(2, 3, &mut seeded_rng(seed)).unwrap();
        let (safe, cell) = board.iter_cells().find(|(_, cell)| !cell.is_mine()).unwrap();
        assert_eq!(cell.adjacent_mines(), 3);

        assert_eq!(board.clear(safe).unwrap(), RevealOutcome::Won);
        assert!(board.won());
    }
}

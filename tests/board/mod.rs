use std::collections::hash_map::RandomState;
use std::collections::HashSet;
use std::iter::FromIterator;

use internal_iterator::InternalIterator;

use gomoku::board::{Board, BoardMoves, Outcome, PlayError, Player};
use gomoku::games::gomoku::{GomokuBoard, Move};
use gomoku::util::board_gen::board_with_moves;
use gomoku::util::consistent_rng;
use gomoku::util::game_stats::all_possible_boards;

/// Check the invariants any reachable board has to uphold:
/// the stones and the empty cells partition the board, the generated moves
/// match `is_available_move`, and playing then undoing any move is a no-op.
pub fn board_test_main(board: &GomokuBoard) {
    println!("Currently testing board\n{:?}\n{}", board, board);

    if board.is_done() {
        test_done_board_errors(board);
    } else {
        test_available_partition(board);
        test_play_undo_roundtrip(board);
    }
}

fn test_done_board_errors(board: &GomokuBoard) {
    assert!(board.is_done(), "bug in test implementation, expected done board");
    assert!(board.outcome().is_some());

    for mv in 0..board.size() {
        assert_eq!(board.clone().try_play(mv), Err(PlayError::BoardDone));
    }
    // out-of-range moves also report the done state first
    assert_eq!(board.clone().try_play(board.size()), Err(PlayError::BoardDone));
}

fn test_available_partition(board: &GomokuBoard) {
    let available: Vec<Move> = board.available_moves().collect();
    let stones: Vec<Move> = board.stones().map(|(mv, _)| mv).collect();

    assert_eq!(
        available.len(),
        board.available_moves().count(),
        "available_moves count mismatch"
    );
    assert!(
        !available.is_empty(),
        "must have at least one available move for non-done board"
    );
    assert_eq!(board.stone_count() as usize, stones.len());

    // every generated move is indeed available, every occupied cell is not
    for &mv in &available {
        assert!(board.is_available_move(mv), "generated move {:?} is not available", mv);
    }
    for &mv in &stones {
        assert!(!board.is_available_move(mv), "occupied cell {:?} reported available", mv);
    }

    // together the stones and the empty cells cover the board exactly once
    let mut all: Vec<Move> = available.iter().chain(stones.iter()).copied().collect();
    all.sort_unstable();
    let expected: Vec<Move> = (0..board.size()).collect();
    assert_eq!(all, expected, "stones and available moves do not partition the board");

    assert_eq!(
        available.len(),
        HashSet::<_, RandomState>::from_iter(&available).len(),
        "Found duplicate move"
    );

    // the random move picker only returns available moves
    let mut rng = consistent_rng();
    for _ in 0..20 {
        let mv = board.random_available_move(&mut rng);
        assert!(board.is_available_move(mv));
    }
}

fn test_play_undo_roundtrip(board: &GomokuBoard) {
    let available: Vec<Move> = board.available_moves().collect();

    for &mv in &available {
        let mut curr = board.clone();
        curr.try_play(mv).unwrap();

        assert_eq!(curr.tile(mv), Some(board.next_player()));
        assert_eq!(curr.next_player(), board.next_player().other());
        assert_eq!(curr.last_move(), Some(mv));
        assert!(curr.can_undo());

        curr.undo();

        assert_eq!(&curr, board, "undo did not restore the position after {:?}", mv);
        assert_eq!(curr.last_move(), board.last_move());
        assert_eq!(curr.outcome(), board.outcome());
        assert!(!curr.can_undo());

        // a second undo must be a no-op, the slot is only one deep
        curr.undo();
        assert_eq!(&curr, board);
    }
}

/// Play the given `(row, col)` locations in order, alternating players.
fn play_locations(mut board: GomokuBoard, locations: &[(u8, u8)]) -> GomokuBoard {
    for &(row, col) in locations {
        let mv = board.location_to_move(row, col).unwrap();
        board.play(mv);
    }
    board
}

#[test]
fn empty_boards() {
    board_test_main(&GomokuBoard::new(5, 5, 4));
    board_test_main(&GomokuBoard::new(8, 8, 5));
    board_test_main(&GomokuBoard::new(3, 3, 3));
    board_test_main(&GomokuBoard::new(1, 1, 1));
}

#[test]
fn random_games() {
    let mut rng = consistent_rng();

    for _ in 0..5 {
        let mut board = GomokuBoard::new(5, 5, 4);
        board_test_main(&board);

        while !board.is_done() {
            board.play(board.random_available_move(&mut rng));
            board_test_main(&board);
        }
    }
}

#[test]
fn all_reachable_boards_uphold_invariants() {
    let boards = all_possible_boards(&GomokuBoard::new(3, 3, 3), true);
    // the distinct 3x3 positions, transpositions deduplicated
    assert!(boards.len() > 5000, "only found {} boards", boards.len());

    for board in &boards {
        board_test_main(board);
    }
}

#[test]
#[should_panic]
fn board_too_small() {
    GomokuBoard::new(3, 3, 4);
}

#[test]
#[should_panic]
fn zero_in_row() {
    GomokuBoard::new(3, 3, 0);
}

#[test]
fn location_mapping() {
    let board = GomokuBoard::new(5, 4, 3);

    for mv in 0..board.size() {
        let (row, col) = board.move_to_location(mv);
        assert!(row < 4 && col < 5);
        assert_eq!(board.location_to_move(row, col), Some(mv));
    }

    assert_eq!(board.location_to_move(0, 0), Some(0));
    assert_eq!(board.location_to_move(1, 2), Some(7));
    assert_eq!(board.location_to_move(4, 0), None);
    assert_eq!(board.location_to_move(0, 5), None);
}

#[test]
fn play_errors_leave_board_untouched() {
    let mut board = play_locations(GomokuBoard::new(5, 5, 4), &[(2, 2), (1, 1)]);
    let before = board.clone();

    // occupied cell
    let mv = board.location_to_move(2, 2).unwrap();
    assert_eq!(board.try_play(mv), Err(PlayError::UnavailableMove));
    assert_eq!(board, before);
    assert_eq!(board.last_move(), before.last_move());

    // outside the board
    assert_eq!(board.try_play(board.size()), Err(PlayError::UnavailableMove));
    assert_eq!(board, before);
}

#[test]
fn undo_on_fresh_board_is_noop() {
    let mut board = GomokuBoard::new(5, 5, 4);
    assert!(!board.can_undo());
    board.undo();
    assert_eq!(board, GomokuBoard::new(5, 5, 4));
}

#[test]
fn undo_single_slot() {
    let mut board = GomokuBoard::new(5, 5, 4);
    let first = board.location_to_move(0, 0).unwrap();
    let second = board.location_to_move(1, 1).unwrap();

    board.play(first);
    let after_first = board.clone();
    board.play(second);

    // only the most recent move can be reverted
    board.undo();
    assert_eq!(board, after_first);
    assert_eq!(board.last_move(), Some(first));

    board.undo();
    assert_eq!(board, after_first, "second undo must not revert anything");
    assert_eq!(board.last_move(), Some(first));
}

#[test]
fn undo_reverts_win() {
    let board = play_locations(
        GomokuBoard::new(5, 5, 4),
        &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)],
    );
    let before = board.clone();

    let mut curr = board;
    let winning = curr.location_to_move(0, 3).unwrap();
    curr.play(winning);
    assert_eq!(curr.outcome(), Some(Outcome::WonBy(Player::A)));

    curr.undo();
    assert_eq!(curr, before);
    assert_eq!(curr.outcome(), None);
}

#[test]
fn win_horizontal() {
    let board = play_locations(
        GomokuBoard::new(5, 5, 4),
        &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2), (0, 3)],
    );
    assert_eq!(board.outcome(), Some(Outcome::WonBy(Player::A)));
    board_test_main(&board);
}

#[test]
fn win_vertical() {
    let board = play_locations(
        GomokuBoard::new(5, 5, 4),
        &[
            (0, 0),
            (1, 4),
            (0, 1),
            (2, 4),
            (0, 2),
            (3, 4),
            (4, 0),
            (4, 4),
        ],
    );
    assert_eq!(board.outcome(), Some(Outcome::WonBy(Player::B)));
    board_test_main(&board);
}

#[test]
fn win_diagonal() {
    let board = play_locations(
        GomokuBoard::new(5, 5, 4),
        &[(0, 0), (0, 4), (1, 1), (1, 4), (2, 2), (2, 4), (3, 3)],
    );
    assert_eq!(board.outcome(), Some(Outcome::WonBy(Player::A)));
    board_test_main(&board);
}

#[test]
fn win_anti_diagonal() {
    let board = play_locations(
        GomokuBoard::new(5, 5, 4),
        &[(0, 3), (4, 4), (1, 2), (4, 3), (2, 1), (4, 2), (3, 0)],
    );
    assert_eq!(board.outcome(), Some(Outcome::WonBy(Player::A)));
    board_test_main(&board);
}

#[test]
fn open_line_is_not_done_until_completed() {
    // three in a row with both ends open is a threat, not yet a win
    let mut board = play_locations(
        GomokuBoard::new(5, 5, 4),
        &[(2, 1), (0, 0), (2, 2), (0, 1), (2, 3), (0, 3)],
    );
    assert_eq!(board.outcome(), None);
    assert!(!board.is_done());

    let extension = board.location_to_move(2, 4).unwrap();
    board.play(extension);
    assert_eq!(board.outcome(), Some(Outcome::WonBy(Player::A)));
}

#[test]
fn full_board_without_line_is_draw() {
    // a classic tic-tac-toe draw position
    // aab
    // bba
    // aab
    let moves_a = [(0, 0), (0, 1), (1, 2), (2, 0), (2, 1)];
    let moves_b = [(0, 2), (1, 0), (1, 1), (2, 2)];

    let mut board = GomokuBoard::new(3, 3, 3);
    for i in 0..moves_a.len() + moves_b.len() {
        assert_eq!(board.outcome(), None);
        let (row, col) = if i % 2 == 0 { moves_a[i / 2] } else { moves_b[i / 2] };
        board.play(board.location_to_move(row, col).unwrap());
    }

    assert_eq!(board.outcome(), Some(Outcome::Draw));
    board_test_main(&board);
}

#[test]
fn reset_clears_the_board() {
    let mut board = play_locations(GomokuBoard::new(5, 5, 4), &[(2, 2), (1, 1), (3, 3)]);

    board.reset(Player::B);

    assert_eq!(board.stone_count(), 0);
    assert_eq!(board.next_player(), Player::B);
    assert_eq!(board.last_move(), None);
    assert!(!board.can_undo());
    board_test_main(&board);
}

#[test]
fn board_with_moves_plays_in_order() {
    let board = board_with_moves(GomokuBoard::new(3, 3, 3), &[4, 0, 8]);
    assert_eq!(board.tile(4), Some(Player::A));
    assert_eq!(board.tile(0), Some(Player::B));
    assert_eq!(board.tile(8), Some(Player::A));
    assert_eq!(board.next_player(), Player::B);
    assert_eq!(board.last_move(), Some(8));
}

use gomoku::ai::alphabeta::{alpha_beta, AlphaBetaBot};
use gomoku::ai::cutoff::{cutoff_alpha_beta, CutoffBot};
use gomoku::ai::minimax::{minimax, MiniMaxBot};
use gomoku::ai::Bot;
use gomoku::board::{Board, Player};
use gomoku::games::gomoku::GomokuBoard;
use gomoku::heuristic::gomoku::{ShapeHeuristic, ZeroHeuristic};
use gomoku::util::board_gen::{board_with_moves, random_board_with_moves};
use gomoku::util::consistent_rng;

fn ttt_board() -> GomokuBoard {
    GomokuBoard::new(3, 3, 3)
}

#[test]
fn minimax_ttt_root_is_draw() {
    let result = minimax(&ttt_board(), Player::A);
    assert_eq!(result.value, 0, "3x3 with 3 in a row is a theoretical draw");
    assert!(result.best_move.is_some());
}

#[test]
fn minimax_finds_immediate_win() {
    // a a .      a completes the top row by playing move 2
    // b b .
    // . . .
    let board = board_with_moves(ttt_board(), &[0, 3, 1, 4]);

    let result = minimax(&board, Player::A);
    assert_eq!(result.value, 1);
    assert_eq!(result.best_move, Some(2));

    assert_eq!(MiniMaxBot::new().select_move(&board), 2);
    assert_eq!(AlphaBetaBot::new().select_move(&board), 2);
}

#[test]
fn minimax_sees_forced_loss() {
    // a b a      with b to move: a threatens to complete both diagonals
    // . a b      (moves 6 and 8), so b cannot parry in time
    // . . .
    let board = board_with_moves(ttt_board(), &[0, 1, 4, 5, 2]);
    assert_eq!(board.next_player(), Player::B);

    let result = minimax(&board, Player::B);
    assert_eq!(result.value, -1);
}

#[test]
fn alpha_beta_matches_minimax() {
    let mut rng = consistent_rng();
    let empty = ttt_board();

    for n_moves in 1..9 {
        for _ in 0..4 {
            let board = random_board_with_moves(&empty, n_moves, &mut rng);
            if board.is_done() {
                continue;
            }

            for player in [Player::A, Player::B] {
                let mm = minimax(&board, player);
                let ab = alpha_beta(&board, player);

                assert_eq!(mm.value, ab.value, "value mismatch on\n{}", board);
                assert_eq!(mm.best_move, ab.best_move, "move mismatch on\n{}", board);
                assert!(
                    ab.nodes <= mm.nodes,
                    "pruning visited more nodes ({} > {}) on\n{}",
                    ab.nodes,
                    mm.nodes,
                    board
                );
            }
        }
    }
}

#[test]
fn alpha_beta_prunes_from_the_empty_board() {
    let mm = minimax(&ttt_board(), Player::A);
    let ab = alpha_beta(&ttt_board(), Player::A);

    assert_eq!(mm.value, ab.value);
    assert_eq!(mm.best_move, ab.best_move);
    assert!(
        ab.nodes < mm.nodes,
        "expected strictly fewer nodes, got {} vs {}",
        ab.nodes,
        mm.nodes
    );
}

#[test]
fn cutoff_with_enough_depth_matches_minimax() {
    let mut rng = consistent_rng();
    let empty = ttt_board();

    // 20 plies is deeper than any 3x3 game, so the heuristic is never consulted
    for n_moves in 2..9 {
        for _ in 0..3 {
            let board = random_board_with_moves(&empty, n_moves, &mut rng);
            if board.is_done() {
                continue;
            }

            let player = board.next_player();
            let mm = minimax(&board, player);
            let cutoff = cutoff_alpha_beta(&board, player, &ZeroHeuristic, 20);

            assert_eq!(mm.value as f32, cutoff.value, "value mismatch on\n{}", board);
            assert_eq!(mm.best_move, cutoff.best_move, "move mismatch on\n{}", board);
        }
    }
}

#[test]
fn cutoff_takes_immediate_win() {
    let board = board_with_moves(ttt_board(), &[0, 3, 1, 4]);
    let mut bot = CutoffBot::new(1, ZeroHeuristic);
    assert_eq!(bot.select_move(&board), 2);
}

#[test]
fn cutoff_blocks_immediate_loss() {
    // row 2 holds "abbb.", so a must block at (2, 4) or lose on the spot
    let mut board = GomokuBoard::new(5, 5, 4);
    for &(row, col) in &[(2, 0), (2, 1), (0, 0), (2, 2), (0, 2), (2, 3)] {
        board.play(board.location_to_move(row, col).unwrap());
    }
    assert_eq!(board.next_player(), Player::A);

    let block = board.location_to_move(2, 4).unwrap();
    let mut bot = CutoffBot::new(1, ShapeHeuristic::default());
    assert_eq!(bot.select_move(&board), block);
}

#[test]
fn cutoff_depth_counts_opponent_replies() {
    // a has an open three on row 3 of a 7x7 five-in-a-row board. Extending it to an open
    // four forces a win, but only on a's *second* move, so the win is invisible with a
    // single opponent reply of depth and certain with two.
    let mut board = GomokuBoard::new(7, 7, 5);
    for &(row, col) in &[(3, 2), (0, 0), (3, 3), (0, 2), (3, 4), (0, 4)] {
        board.play(board.location_to_move(row, col).unwrap());
    }
    assert_eq!(board.next_player(), Player::A);

    let shallow = cutoff_alpha_beta(&board, Player::A, &ZeroHeuristic, 1);
    assert_eq!(shallow.value, 0.0, "the forced win is beyond the horizon");

    let deep = cutoff_alpha_beta(&board, Player::A, &ZeroHeuristic, 2);
    assert_eq!(deep.value, 1.0);
    assert_eq!(deep.best_move, board.location_to_move(3, 1));
}

#[test]
fn cutoff_depth_zero_evaluates_in_place() {
    let board = ttt_board();
    let result = cutoff_alpha_beta(&board, Player::A, &ZeroHeuristic, 0);
    assert_eq!(result.value, 0.0);
    assert_eq!(result.best_move, None);
}

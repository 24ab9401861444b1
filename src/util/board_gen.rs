//! Utilities to generate a `Board` in a random state.
use rand::Rng;

use crate::board::Board;

/// Play the given moves, starting from `start`.
pub fn board_with_moves<B: Board>(start: B, moves: &[B::Move]) -> B {
    let mut curr = start;
    for &mv in moves {
        assert!(!curr.is_done(), "Board already done, playing {} on {}", mv, curr);
        assert!(curr.is_available_move(mv), "Move not available, playing {} on {}", mv, curr);
        curr.play(mv);
    }
    curr
}

/// Generate a `Board` by playing `n` random moves on `start`.
pub fn random_board_with_moves<B: Board>(start: &B, n: u32, rng: &mut impl Rng) -> B {
    // this implementation could be made faster with backtracking instead of starting from
    // scratch, but that only starts to matter for very high n
    'new_try: loop {
        let mut board = start.clone();
        for _ in 0..n {
            if board.is_done() {
                continue 'new_try;
            }
            let mv = board.random_available_move(rng);
            board.play(mv);
        }
        return board;
    }
}

/// Generate a `Board` by playing random moves until `cond(&board)` returns true.
pub fn random_board_with_condition<B: Board>(start: &B, rng: &mut impl Rng, mut cond: impl FnMut(&B) -> bool) -> B {
    if cond(start) {
        return start.clone();
    }
    assert!(
        !start.is_done(),
        "Start board is done and does not match condition, so we won't find anything that does"
    );

    loop {
        let mut board = start.clone();
        while !board.is_done() {
            let mv = board.random_available_move(rng);
            board.play(mv);
            if cond(&board) {
                return board;
            }
        }
    }
}

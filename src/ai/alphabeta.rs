use std::fmt::{Debug, Formatter};
use std::ops::ControlFlow;

use crate::ai::minimax::SearchResult;
use crate::ai::Bot;
use crate::board::{Board, Player};
use crate::pov::NonPov;
use crate::util::internal_ext::InternalIteratorExt;

/// Evaluate the board with alpha-beta pruned minimax.
///
/// Value-preserving relative to [minimax](crate::ai::minimax::minimax): the root value is always
/// identical and so is the chosen move under first-move tie-breaking, but pruned branches are
/// never visited, so `nodes` is at most the exhaustive count.
pub fn alpha_beta<B: Board>(board: &B, player: Player) -> SearchResult<i32, B::Move> {
    let mut nodes = 0;
    let (value, best_move) = alpha_beta_recurse(board, player, -INF, INF, &mut nodes);

    if best_move.is_none() {
        assert!(board.is_done(), "Implementation error in alpha_beta");
    }

    SearchResult { value, best_move, nodes }
}

const INF: i32 = i32::MAX;

fn alpha_beta_recurse<B: Board>(
    board: &B,
    player: Player,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> (i32, Option<B::Move>) {
    *nodes += 1;

    if let Some(outcome) = board.outcome() {
        return (outcome.pov(player).sign(), None);
    }

    let maximizing = board.next_player() == player;
    let mut best_value = if maximizing { -INF } else { INF };
    let mut best_move = None;

    let _ = board.available_moves().for_each_control(|mv: B::Move| {
        let child = board.clone_and_play(mv);
        let (child_value, _) = alpha_beta_recurse(&child, player, alpha, beta, nodes);

        if maximizing {
            if child_value > best_value {
                best_value = child_value;
                best_move = Some(mv);
            }
            if best_value >= beta {
                return ControlFlow::Break(());
            }
            alpha = alpha.max(best_value);
        } else {
            if child_value < best_value {
                best_value = child_value;
                best_move = Some(mv);
            }
            if best_value <= alpha {
                return ControlFlow::Break(());
            }
            beta = beta.min(best_value);
        }

        ControlFlow::Continue(())
    });

    (best_value, best_move)
}

/// Bot that plays the best move found by [alpha_beta].
pub struct AlphaBetaBot;

impl AlphaBetaBot {
    pub fn new() -> Self {
        AlphaBetaBot
    }
}

impl Debug for AlphaBetaBot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AlphaBetaBot")
    }
}

impl<B: Board> Bot<B> for AlphaBetaBot {
    fn select_move(&mut self, board: &B) -> B::Move {
        assert!(!board.is_done());
        // unwrap is safe, alpha_beta only returns None for done boards
        alpha_beta(board, board.next_player()).best_move.unwrap()
    }
}

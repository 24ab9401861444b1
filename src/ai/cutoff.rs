use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::ControlFlow;

use crate::ai::minimax::SearchResult;
use crate::ai::Bot;
use crate::board::{Board, Player, ReversibleBoard};
use crate::pov::NonPov;
use crate::util::internal_ext::InternalIteratorExt;

/// A static evaluator for non-terminal boards, used by [CutoffBot] at the depth limit.
pub trait Heuristic<B: Board>: Debug {
    /// Return the heuristic value of `board` from the next player's POV.
    /// Must be finite for every reachable non-terminal board, this is never allowed to fail.
    fn value(&self, board: &B) -> f32;
}

/// Heuristic leaf values are clamped strictly inside the terminal win/loss values `+1`/`-1`,
/// so a forced outcome within the horizon is never masked by evaluation noise.
const MAX_HEURISTIC: f32 = 0.999;

/// Evaluate the board with depth-bounded alpha-beta search.
///
/// Identical to [alpha_beta](crate::ai::alphabeta::alpha_beta) except that the recursion also
/// stops once `max_depth` is exhausted, at which point `heuristic` supplies the value (negated
/// to `player`'s POV if it is not the mover's). The depth counts *opponent replies*: it is
/// decremented each time control passes from the opponent back down the tree, so `max_depth = d`
/// explores `d` of the opponent's replies deep, and `player`'s own moves never consume depth.
pub fn cutoff_alpha_beta<B: ReversibleBoard, H: Heuristic<B>>(
    board: &B,
    player: Player,
    heuristic: &H,
    max_depth: u32,
) -> SearchResult<f32, B::Move> {
    let mut nodes = 0;
    let (value, best_move) = cutoff_recurse(
        board,
        player,
        heuristic,
        max_depth,
        f32::NEG_INFINITY,
        f32::INFINITY,
        &mut nodes,
    );

    if best_move.is_none() {
        assert!(board.is_done() || max_depth == 0, "Implementation error in cutoff_alpha_beta");
    }

    SearchResult { value, best_move, nodes }
}

fn cutoff_recurse<B: ReversibleBoard, H: Heuristic<B>>(
    board: &B,
    player: Player,
    heuristic: &H,
    depth_left: u32,
    mut alpha: f32,
    mut beta: f32,
    nodes: &mut u64,
) -> (f32, Option<B::Move>) {
    *nodes += 1;

    if let Some(outcome) = board.outcome() {
        return (outcome.pov(player).sign(), None);
    }
    if depth_left == 0 {
        let value = heuristic.value(board).clamp(-MAX_HEURISTIC, MAX_HEURISTIC);
        // the heuristic speaks for the mover, flip it to the searching player's POV
        return (board.next_player().sign::<f32>(player) * value, None);
    }

    let maximizing = board.next_player() == player;
    let mut best_value = if maximizing { f32::NEG_INFINITY } else { f32::INFINITY };
    let mut best_move = None;

    // one working board per frame, reverted after each child: deeper frames clone their own,
    // so the single undo slot is always ours here
    let mut working = board.clone();

    let _ = board.available_moves().for_each_control(|mv: B::Move| {
        working.play(mv);
        let child_depth = if maximizing { depth_left } else { depth_left - 1 };
        let (child_value, _) = cutoff_recurse(&working, player, heuristic, child_depth, alpha, beta, nodes);
        working.undo_play();

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

/// Bot that plays the best move found by [cutoff_alpha_beta] with a fixed depth and heuristic.
pub struct CutoffBot<B: ReversibleBoard, H: Heuristic<B>> {
    max_depth: u32,
    heuristic: H,
    ph: PhantomData<B>,
}

impl<B: ReversibleBoard, H: Heuristic<B>> CutoffBot<B, H> {
    pub fn new(max_depth: u32, heuristic: H) -> Self {
        assert!(max_depth > 0, "requires max_depth>0 to find the best move");
        CutoffBot {
            max_depth,
            heuristic,
            ph: PhantomData,
        }
    }
}

impl<B: ReversibleBoard, H: Heuristic<B>> Debug for CutoffBot<B, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CutoffBot {{ max_depth: {}, heuristic: {:?} }}",
            self.max_depth, self.heuristic
        )
    }
}

impl<B: ReversibleBoard, H: Heuristic<B>> Bot<B> for CutoffBot<B, H> {
    fn select_move(&mut self, board: &B) -> B::Move {
        assert!(!board.is_done());
        // unwrap is safe, max_depth > 0 and the board is not done
        cutoff_alpha_beta(board, board.next_player(), &self.heuristic, self.max_depth)
            .best_move
            .unwrap()
    }
}

use std::fmt::{Debug, Formatter};

use internal_iterator::InternalIterator;

use crate::ai::Bot;
use crate::board::{Board, Player};
use crate::pov::NonPov;

/// The result of a full tree search.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SearchResult<V, M> {
    /// The value of the board from the searching player's POV.
    pub value: V,

    /// The best move to play, `None` if the board is done
    /// (or, for depth-bounded searches, if the depth was 0).
    pub best_move: Option<M>,

    /// The number of states visited during the search, terminal states included.
    pub nodes: u64,
}

/// Evaluate the board with exhaustive minimax, recursing all the way to terminal states.
///
/// Values are `+1`/`0`/`-1` for a win/draw/loss of `player`. At nodes where `player` moves the
/// maximizing child is chosen, elsewhere the minimizing one; ties keep the first move in
/// iteration order. There is no depth limit, so this is only usable on boards small enough to
/// explore completely, or as a correctness reference for the pruning searches.
pub fn minimax<B: Board>(board: &B, player: Player) -> SearchResult<i32, B::Move> {
    let mut nodes = 0;
    let (value, best_move) = minimax_recurse(board, player, &mut nodes);

    if best_move.is_none() {
        assert!(board.is_done(), "Implementation error in minimax");
    }

    SearchResult { value, best_move, nodes }
}

fn minimax_recurse<B: Board>(board: &B, player: Player, nodes: &mut u64) -> (i32, Option<B::Move>) {
    *nodes += 1;

    if let Some(outcome) = board.outcome() {
        return (outcome.pov(player).sign(), None);
    }

    let maximizing = board.next_player() == player;
    let mut best_value = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    board.available_moves().for_each(|mv: B::Move| {
        let child = board.clone_and_play(mv);
        let (child_value, _) = minimax_recurse(&child, player, nodes);

        let better = if maximizing {
            child_value > best_value
        } else {
            child_value < best_value
        };
        if better {
            best_value = child_value;
            best_move = Some(mv);
        }
    });

    (best_value, best_move)
}

/// Bot that plays the best move found by exhaustive [minimax].
pub struct MiniMaxBot;

impl MiniMaxBot {
    pub fn new() -> Self {
        MiniMaxBot
    }
}

impl Debug for MiniMaxBot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MiniMaxBot")
    }
}

impl<B: Board> Bot<B> for MiniMaxBot {
    fn select_move(&mut self, board: &B) -> B::Move {
        assert!(!board.is_done());
        // unwrap is safe, minimax only returns None for done boards
        minimax(board, board.next_player()).best_move.unwrap()
    }
}

//! Utilities for enumerating game trees, mostly for testing board and bot implementations.
use std::collections::HashSet;

use internal_iterator::InternalIterator;

use crate::board::Board;

/// Generate the set of all distinct board positions reachable from the given board.
/// This function can easily take a long time or not terminate at all depending on the game,
/// only use it on very small boards.
pub fn all_possible_boards<B: Board>(start: &B, include_done: bool) -> Vec<B> {
    let mut set = HashSet::new();
    let mut result = vec![];
    all_possible_boards_impl(start, include_done, &mut result, &mut set);
    result
}

fn all_possible_boards_impl<B: Board>(start: &B, include_done: bool, result: &mut Vec<B>, set: &mut HashSet<B>) {
    if !include_done && start.is_done() {
        return;
    }
    if !set.insert(start.clone()) {
        return;
    }
    result.push(start.clone());
    if start.is_done() {
        return;
    }

    start
        .available_moves()
        .for_each(|mv| all_possible_boards_impl(&start.clone_and_play(mv), include_done, result, set))
}

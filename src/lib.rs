#![warn(missing_debug_implementations)]
#![allow(clippy::new_without_default)]

//! A [Board](crate::board::Board) abstraction for Gomoku/Go-Bang style games:
//! place a stone on an N×N grid, win by getting `n` in a row.
//!
//! # Features
//!
//! The game state is [GomokuBoard](crate::games::gomoku::GomokuBoard), a runtime-sized
//! board with a reversible single-slot undo, so search algorithms can mutate one working
//! state in place instead of cloning per branch.
//!
//! Game-playing algorithms, all implementing [Bot](crate::ai::Bot):
//! * [RandomBot](crate::ai::simple::RandomBot),
//!     which simply picks a random move.
//! * [MiniMaxBot](crate::ai::minimax::MiniMaxBot),
//!     exhaustive minimax to terminal states, usable as a correctness reference.
//! * [AlphaBetaBot](crate::ai::alphabeta::AlphaBetaBot),
//!     minimax with alpha-beta pruning, value-preserving but visiting fewer nodes.
//! * [CutoffBot](crate::ai::cutoff::CutoffBot),
//!     depth-bounded alpha-beta that falls back to a
//!     [Heuristic](crate::ai::cutoff::Heuristic) at the depth limit.
//! * [MCTSBot](crate::ai::mcts::MCTSBot),
//!     Monte Carlo Tree Search with UCB1 selection and random rollouts.
//!
//! Heuristics live in [heuristic::gomoku](crate::heuristic::gomoku): a shape-pattern
//! feature extractor (live fours, broken fours, threes, ...) plus weighted evaluators
//! built on top of it.
//!
//! # Examples
//!
//! ## List the available moves on a board and play a random one.
//!
//! ```
//! use gomoku::games::gomoku::GomokuBoard;
//! use gomoku::board::{Board, BoardMoves};
//! use internal_iterator::InternalIterator;
//!
//! let mut rng = rand::thread_rng();
//! let mut board = GomokuBoard::new(8, 8, 5);
//! println!("{}", board);
//!
//! board.available_moves().for_each(|mv| {
//!     println!("{:?}", mv)
//! });
//!
//! let mv = board.random_available_move(&mut rng);
//! println!("Picked move {:?}", mv);
//! board.play(mv);
//! println!("{}", board);
//! ```
//!
//! ## Get the best move according to MCTS
//!
//! ```
//! use gomoku::ai::mcts::MCTSBot;
//! use gomoku::ai::Bot;
//! use gomoku::games::gomoku::GomokuBoard;
//! use rand::thread_rng;
//!
//! let board = GomokuBoard::new(5, 5, 4);
//! println!("{}", board);
//!
//! let mut bot = MCTSBot::new(1000, 5.0, thread_rng());
//! println!("{:?}", bot.select_move(&board))
//! ```

pub mod board;

pub mod pov;

pub mod ai;

pub mod games;

pub mod heuristic;

pub mod util;

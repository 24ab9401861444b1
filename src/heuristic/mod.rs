//! Board evaluation heuristics, used by [CutoffBot](crate::ai::cutoff::CutoffBot).
pub mod gomoku;

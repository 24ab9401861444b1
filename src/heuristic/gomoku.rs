//! Shape-based feature extraction and evaluation for [GomokuBoard].
//!
//! The extractor counts, per player, occurrences of the classic gomoku shapes
//! (live four, four, live three, three, live two) along each of the four ray directions,
//! plus a centrality measure. The evaluators combine those counts into a zero-sum scalar.

use crate::ai::cutoff::Heuristic;
use crate::board::{Board, Player};
use crate::games::gomoku::{GomokuBoard, Move, DIRECTIONS};

/// Per-player shape counts and centrality, extracted from a board by [shape_counts].
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ShapeCounts {
    pub live_four: u32,
    pub four: u32,
    pub live_three: u32,
    pub three: u32,
    pub live_two: u32,
    /// Manhattan distance from the board center to the player's farthest stone,
    /// normalized to `0.0..=1.0`. Zero if the player has no stones.
    pub max_distance: f32,
}

// Shape templates over a 1-D line of cells: 1 is the player's own stone,
// 0 is anything that is not (empty or opponent). Windows must fit on the board entirely.
//
// Order matters twice: categories are matched highest priority first, and within a
// category templates are matched in the listed order, with matched cells consumed
// per direction so the same stones are never counted again by a weaker shape.
const SHAPES_LIVE_FOUR: &[&[u8]] = &[&[0, 1, 1, 1, 1, 0]];
const SHAPES_FOUR: &[&[u8]] = &[
    &[0, 1, 1, 1, 1],
    &[0, 1, 1, 1, 0, 1],
    &[0, 1, 1, 0, 1, 1],
    &[0, 1, 0, 1, 1, 1],
    &[1, 1, 1, 1, 0],
    &[1, 0, 1, 1, 1, 0],
    &[1, 1, 0, 1, 1, 0],
    &[1, 1, 1, 0, 1, 0],
];
const SHAPES_LIVE_THREE: &[&[u8]] = &[&[0, 1, 1, 1, 0], &[0, 1, 1, 0, 1, 0], &[0, 1, 0, 1, 1, 0]];
const SHAPES_THREE: &[&[u8]] = &[
    &[0, 1, 1, 1],
    &[0, 1, 1, 0, 1],
    &[0, 1, 0, 1, 1],
    &[1, 1, 1, 0],
    &[1, 1, 0, 1, 0],
    &[1, 0, 1, 1, 0],
];
const SHAPES_LIVE_TWO: &[&[u8]] = &[&[0, 1, 1, 0], &[0, 1, 0, 1, 0]];

/// Extract the [ShapeCounts] of `player` from `board`.
pub fn shape_counts(board: &GomokuBoard, player: Player) -> ShapeCounts {
    // (direction, cell) pairs already claimed by a higher-priority shape
    let mut consumed = vec![false; DIRECTIONS.len() * board.size() as usize];

    ShapeCounts {
        live_four: count_shapes(board, player, &mut consumed, SHAPES_LIVE_FOUR),
        four: count_shapes(board, player, &mut consumed, SHAPES_FOUR),
        live_three: count_shapes(board, player, &mut consumed, SHAPES_LIVE_THREE),
        three: count_shapes(board, player, &mut consumed, SHAPES_THREE),
        live_two: count_shapes(board, player, &mut consumed, SHAPES_LIVE_TWO),
        max_distance: max_center_distance(board, player),
    }
}

fn count_shapes(board: &GomokuBoard, player: Player, consumed: &mut [bool], templates: &[&[u8]]) -> u32 {
    let width = board.width() as i32;
    let height = board.height() as i32;
    let size = board.size() as usize;

    let mut count = 0;

    for &template in templates {
        // all windows of one template are matched against the consumed set as it stood
        // before the template, then claimed together, so overlapping matches of the
        // same template all count
        let mut matched: Vec<Vec<usize>> = Vec::new();

        for (d, &(dr, dc)) in DIRECTIONS.iter().enumerate() {
            for row in 0..height {
                'window: for col in 0..width {
                    let mut claim = Vec::with_capacity(template.len());

                    for (i, &want) in template.iter().enumerate() {
                        let r = row + dr * i as i32;
                        let c = col + dc * i as i32;
                        if !(0..height).contains(&r) || !(0..width).contains(&c) {
                            continue 'window;
                        }

                        let cell = (r * width + c) as usize;
                        if consumed[d * size + cell] {
                            continue 'window;
                        }
                        let own = board.tile(cell as Move) == Some(player);
                        if (want == 1) != own {
                            continue 'window;
                        }

                        claim.push(d * size + cell);
                    }

                    matched.push(claim);
                }
            }
        }

        count += matched.len() as u32;
        for claim in matched {
            for index in claim {
                consumed[index] = true;
            }
        }
    }

    count
}

fn max_center_distance(board: &GomokuBoard, player: Player) -> f32 {
    let center_row = (board.height() - 1) as f32 / 2.0;
    let center_col = (board.width() - 1) as f32 / 2.0;

    let scale = center_row + center_col;
    if scale == 0.0 {
        // 1x1 board, the only stone is the center
        return 0.0;
    }

    let max = board
        .stones()
        .filter(|&(_, owner)| owner == player)
        .map(|(mv, _)| {
            let (row, col) = board.move_to_location(mv);
            (row as f32 - center_row).abs() + (col as f32 - center_col).abs()
        })
        .fold(0.0, f32::max);

    max / scale
}

/// The weights combining [ShapeCounts] into a scalar, see [ShapeHeuristic].
/// The defaults are tuned so that tactical shape differences dominate centrality.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeWeights {
    pub live_four: f32,
    pub four: f32,
    pub live_three: f32,
    pub three: f32,
    pub live_two: f32,
    pub max_distance: f32,
}

impl Default for ShapeWeights {
    fn default() -> Self {
        ShapeWeights {
            live_four: 0.5,
            four: 0.05,
            live_three: 0.04,
            three: 0.025,
            live_two: 0.01,
            max_distance: 0.01,
        }
    }
}

impl ShapeWeights {
    /// Combine `counts` into a single scalar for one player.
    pub fn score(self, counts: ShapeCounts) -> f32 {
        counts.live_four as f32 * self.live_four
            + counts.four as f32 * self.four
            + counts.live_three as f32 * self.live_three
            + counts.three as f32 * self.three
            + counts.live_two as f32 * self.live_two
            - counts.max_distance * self.max_distance
    }
}

/// Heuristic that always returns zero, turning [CutoffBot](crate::ai::cutoff::CutoffBot)
/// into a pure win/loss/draw searcher within its depth.
#[derive(Debug)]
pub struct ZeroHeuristic;

impl Heuristic<GomokuBoard> for ZeroHeuristic {
    fn value(&self, _: &GomokuBoard) -> f32 {
        0.0
    }
}

/// Heuristic that only looks at how far each player has strayed from the board center.
#[derive(Debug)]
pub struct DistanceHeuristic;

impl Heuristic<GomokuBoard> for DistanceHeuristic {
    fn value(&self, board: &GomokuBoard) -> f32 {
        let next = board.next_player();
        max_center_distance(board, next.other()) - max_center_distance(board, next)
    }
}

/// The main evaluator: a zero-sum weighted combination of both players' shape counts,
/// from the next player's POV.
#[derive(Debug, Default)]
pub struct ShapeHeuristic {
    pub weights: ShapeWeights,
}

impl ShapeHeuristic {
    pub fn new(weights: ShapeWeights) -> Self {
        ShapeHeuristic { weights }
    }
}

impl Heuristic<GomokuBoard> for ShapeHeuristic {
    fn value(&self, board: &GomokuBoard) -> f32 {
        let next = board.next_player();
        self.weights.score(shape_counts(board, next)) - self.weights.score(shape_counts(board, next.other()))
    }
}

use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

use internal_iterator::{Internal, IteratorExt};
use itertools::join;
use rand::Rng;

use crate::board::{Board, BoardMoves, Outcome, PlayError, Player, ReversibleBoard};

/// A move, the linear index of the cell a stone is placed on: `row * width + col`.
pub type Move = u16;

/// The four ray directions used for line detection and shape matching,
/// as `(delta_row, delta_col)`: east, south, south-east, south-west.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A Gomoku/Go-Bang board of runtime size `width x height`,
/// won by the first player to get `n_in_row` stones in a line.
///
/// Unlike the usual immutable-ish board types, this board additionally supports a *single-slot*
/// undo: [GomokuBoard::undo] reverts the last [Board::play] exactly once. Search algorithms can
/// use this to mutate one working board in place, as long as they keep strict LIFO discipline:
/// play, recurse, undo, and never play twice without an undo in between when backtracking.
#[derive(Clone)]
pub struct GomokuBoard {
    width: u8,
    height: u8,
    n_in_row: u8,

    /// Cell contents, indexed by `Move`. Always in sync with `available`:
    /// the empty cells and the occupied cells partition `0..width*height`.
    tiles: Vec<Option<Player>>,
    /// The empty cells, kept sorted ascending.
    available: Vec<Move>,

    next: Player,
    outcome: Option<Outcome>,

    last_move: Option<Move>,
    /// Whether the single undo slot is still pending, true exactly between a play and the matching undo.
    can_undo: bool,
    /// The value of `last_move` before the most recent play, so undo can restore it.
    prev_last_move: Option<Move>,
}

impl GomokuBoard {
    /// Construct an empty board. Player A moves first, see [GomokuBoard::reset] to change that.
    ///
    /// Panics if the board cannot fit `n_in_row` stones in a line, this is a fatal
    /// configuration error rather than a recoverable one.
    pub fn new(width: u8, height: u8, n_in_row: u8) -> Self {
        assert!(n_in_row >= 1, "n_in_row must be at least 1, got {}", n_in_row);
        assert!(
            width >= n_in_row && height >= n_in_row,
            "board size {}x{} cannot fit {} in a row",
            width,
            height,
            n_in_row
        );

        let size = width as usize * height as usize;
        GomokuBoard {
            width,
            height,
            n_in_row,
            tiles: vec![None; size],
            available: (0..size as Move).collect(),
            next: Player::A,
            outcome: None,
            last_move: None,
            can_undo: false,
            prev_last_move: None,
        }
    }

    /// Clear this board back to the empty position with `start_player` to move.
    pub fn reset(&mut self, start_player: Player) {
        *self = GomokuBoard::new(self.width, self.height, self.n_in_row);
        self.next = start_player;
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn n_in_row(&self) -> u8 {
        self.n_in_row
    }

    pub fn size(&self) -> u16 {
        self.width as u16 * self.height as u16
    }

    pub fn tile(&self, mv: Move) -> Option<Player> {
        self.tiles[mv as usize]
    }

    /// The most recently played move, `None` for the empty board.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Whether [GomokuBoard::undo] would currently revert a move.
    pub fn can_undo(&self) -> bool {
        self.can_undo
    }

    /// The number of stones on the board.
    pub fn stone_count(&self) -> u16 {
        self.size() - self.available.len() as u16
    }

    /// Iterator over all placed stones as `(mv, owner)`, in ascending move order.
    pub fn stones(&self) -> impl Iterator<Item = (Move, Player)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(i, tile)| tile.map(|player| (i as Move, player)))
    }

    /// Map a move to its `(row, col)` location.
    pub fn move_to_location(&self, mv: Move) -> (u8, u8) {
        debug_assert!(mv < self.size());
        ((mv / self.width as Move) as u8, (mv % self.width as Move) as u8)
    }

    /// Map a `(row, col)` location to a move, `None` if the location falls outside the board.
    pub fn location_to_move(&self, row: u8, col: u8) -> Option<Move> {
        if row < self.height && col < self.width {
            Some(row as Move * self.width as Move + col as Move)
        } else {
            None
        }
    }

    /// Try to play `mv`, failing without touching the board if the game is done or the move
    /// does not denote an empty cell. This is the recoverable entry point for external input
    /// (GUI clicks, console coordinates); [Board::play] panics instead.
    pub fn try_play(&mut self, mv: Move) -> Result<(), PlayError> {
        if self.is_done() {
            return Err(PlayError::BoardDone);
        }
        if mv >= self.size() || self.tiles[mv as usize].is_some() {
            return Err(PlayError::UnavailableMove);
        }

        let player = self.next;
        self.tiles[mv as usize] = Some(player);
        // unwrap is safe, the cell was empty so it must be in available
        let index = self.available.binary_search(&mv).unwrap();
        self.available.remove(index);

        self.prev_last_move = self.last_move;
        self.last_move = Some(mv);
        self.can_undo = true;
        self.next = player.other();

        self.outcome = if let Some(winner) = self.find_winner() {
            Some(Outcome::WonBy(winner))
        } else if self.available.is_empty() {
            Some(Outcome::Draw)
        } else {
            None
        };

        Ok(())
    }

    /// Revert the most recent play, restoring the tiles, the available set, the player to move
    /// and `last_move` to their values right before it. Only a single slot deep: a no-op unless
    /// called exactly once, immediately after the play it reverts.
    pub fn undo(&mut self) {
        if !self.can_undo {
            return;
        }

        // unwrap is safe, can_undo is only set by try_play which also sets last_move
        let mv = self.last_move.unwrap();
        self.tiles[mv as usize] = None;
        // unwrap_err is safe, the cell was occupied so it cannot be in available
        let index = self.available.binary_search(&mv).unwrap_err();
        self.available.insert(index, mv);

        self.next = self.next.other();
        self.last_move = self.prev_last_move;
        self.prev_last_move = None;
        self.can_undo = false;
        // the board was not done before the move, play panics on done boards
        self.outcome = None;
    }

    /// Scan the board for a completed line of `n_in_row` stones and return its owner.
    ///
    /// Played positions are visited in ascending order and each is checked as the start of a
    /// line in the four ray [DIRECTIONS]. A legal game can complete at most one new line per
    /// move, so no stronger "first winning line" semantics are needed.
    pub fn find_winner(&self) -> Option<Player> {
        let n = self.n_in_row as i32;

        // a line needs n stones of one player and n-1 of the other to even be possible
        if (self.stone_count() as i32) < 2 * n - 1 {
            return None;
        }

        for (mv, player) in self.stones() {
            let (row, col) = self.move_to_location(mv);
            for &(dr, dc) in &DIRECTIONS {
                let complete = (0..n).all(|i| {
                    let r = row as i32 + dr * i;
                    let c = col as i32 + dc * i;
                    (0..self.height as i32).contains(&r)
                        && (0..self.width as i32).contains(&c)
                        && self.tiles[(r * self.width as i32 + c) as usize] == Some(player)
                });
                if complete {
                    return Some(player);
                }
            }
        }

        None
    }
}

impl Board for GomokuBoard {
    type Move = Move;

    fn next_player(&self) -> Player {
        self.next
    }

    fn is_available_move(&self, mv: Self::Move) -> bool {
        assert!(!self.is_done());
        mv < self.size() && self.tiles[mv as usize].is_none()
    }

    fn random_available_move(&self, rng: &mut impl Rng) -> Self::Move {
        assert!(!self.is_done());
        self.available[rng.gen_range(0..self.available.len())]
    }

    fn play(&mut self, mv: Self::Move) {
        if let Err(error) = self.try_play(mv) {
            panic!("cannot play {:?} on {:?}: {}", mv, self, error);
        }
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

impl ReversibleBoard for GomokuBoard {
    fn undo_play(&mut self) {
        self.undo()
    }
}

impl<'a> BoardMoves<'a, GomokuBoard> for GomokuBoard {
    type AvailableMovesIterator = Internal<std::iter::Copied<std::slice::Iter<'a, Move>>>;

    fn available_moves(&'a self) -> Self::AvailableMovesIterator {
        assert!(!self.is_done());
        self.available.iter().copied().into_internal()
    }
}

// Identity is the position itself: the board shape, the stones and the player to move.
// The undo bookkeeping is deliberately left out so that transpositions compare equal.
impl PartialEq for GomokuBoard {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.n_in_row == other.n_in_row
            && self.tiles == other.tiles
            && self.next == other.next
    }
}

impl Eq for GomokuBoard {}

impl Hash for GomokuBoard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.n_in_row.hash(state);
        self.tiles.hash(state);
        self.next.hash(state);
    }
}

fn tile_to_char(tile: Option<Player>) -> char {
    match tile {
        Some(Player::A) => 'a',
        Some(Player::B) => 'b',
        None => '.',
    }
}

impl Debug for GomokuBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GomokuBoard {{ size: {}x{}, n_in_row: {}, next_player: {:?}, last_move: {:?}, outcome: {:?} }}",
            self.width, self.height, self.n_in_row, self.next, self.last_move, self.outcome,
        )
    }
}

impl Display for GomokuBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "   {}", join((0..self.width).map(|col| col % 10), ""))?;
        for row in 0..self.height {
            write!(f, "{:2} ", row)?;
            for col in 0..self.width {
                // unwrap is safe, row and col are in range
                let mv = self.location_to_move(row, col).unwrap();
                write!(f, "{}", tile_to_char(self.tiles[mv as usize]))?;
            }

            if row == self.height / 2 {
                write!(f, "    {}", self.next.to_char())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

use std::fmt::{Debug, Formatter};

use decorum::N32;
use internal_iterator::InternalIterator;
use rand::Rng;

use crate::ai::Bot;
use crate::board::Board;
use crate::pov::NonPov;

/// A node in the search tree. Nodes are owned by the [Tree] arena, child links are arena
/// indices and the parent link is a non-owning back index used only for value propagation.
#[derive(Debug)]
struct Node<M> {
    parent: Option<usize>,
    /// Expanded children in expansion order, the node owns the entire subtree under each.
    children: Vec<(M, usize)>,
    /// Legal moves at this node not yet expanded, computed once at node creation.
    untried: Vec<M>,

    /// The number of completed playouts that passed through this node.
    visits: u64,
    /// Running sum of playout values, from the POV of the player to move *at this node*.
    /// Zero iff `visits` is zero.
    total_value: f32,
}

impl<M> Node<M> {
    fn new(parent: Option<usize>, untried: Vec<M>) -> Self {
        Node {
            parent,
            children: vec![],
            untried,
            visits: 0,
            total_value: 0.0,
        }
    }

    /// The UCB1 value of this node as seen by its parent. Since `total_value` is stored from
    /// this node's own mover's POV, which is the opponent of whoever chooses at the parent,
    /// the exploitation term is negated.
    ///
    /// Only valid on visited nodes: selection happens strictly among already-expanded children,
    /// each of which was visited by the playout that expanded it.
    fn ucb(&self, parent_visits: u64, exploration: f32) -> f32 {
        debug_assert!(self.visits > 0);
        let exploit = -(self.total_value / self.visits as f32);
        let explore = ((parent_visits as f32).ln() / self.visits as f32).sqrt();
        exploit + exploration * explore
    }
}

/// The arena owning all nodes of one search, rooted at index 0.
#[derive(Debug)]
struct Tree<M> {
    nodes: Vec<Node<M>>,
}

impl<M: Copy> Tree<M> {
    fn new<B: Board<Move = M>>(root_board: &B) -> Self {
        let untried = root_board.available_moves().collect();
        Tree {
            nodes: vec![Node::new(None, untried)],
        }
    }

    /// Run a single playout: select down the tree, expand one node, roll out to the end of
    /// the game and propagate the value back up. `board` must be a working copy of the root
    /// board, it is consumed by the descent and rollout.
    fn playout<B: Board<Move = M>>(&mut self, mut board: B, exploration: f32, rng: &mut impl Rng) {
        let mut node = 0;

        loop {
            if board.is_done() {
                break;
            }

            if !self.nodes[node].untried.is_empty() {
                // expansion: pick one untried move uniformly and create exactly one child
                let index = rng.gen_range(0..self.nodes[node].untried.len());
                let mv = self.nodes[node].untried.swap_remove(index);
                board.play(mv);

                let untried = if board.is_done() { vec![] } else { board.available_moves().collect() };
                let child = self.nodes.len();
                self.nodes.push(Node::new(Some(node), untried));
                self.nodes[node].children.push((mv, child));

                node = child;
                break;
            }

            // selection: every legal move here is expanded, descend into the best child
            let parent_visits = self.nodes[node].visits;
            let (mv, child) = *self.nodes[node]
                .children
                .iter()
                .max_by_key(|(_, child)| N32::from(self.nodes[*child].ucb(parent_visits, exploration)))
                .unwrap();

            board.play(mv);
            node = child;
        }

        // rollout from the stopping point, scored for whoever is to move there
        let mover = board.next_player();
        while !board.is_done() {
            let mv = board.random_available_move(rng);
            board.play(mv);
        }
        // unwrap is safe, the rollout loop only ends on a done board
        let leaf_value = board.outcome().unwrap().pov(mover).sign::<f32>();

        // backpropagation: each ply up the tree flips whose win the value means
        let mut value = leaf_value;
        let mut current = Some(node);
        while let Some(index) = current {
            self.nodes[index].total_value += value;
            self.nodes[index].visits += 1;
            value = -value;
            current = self.nodes[index].parent;
        }
    }

    /// The root move with the highest visit count (robust child), first one on ties.
    fn best_move(&self) -> Option<M> {
        let mut best: Option<(M, u64)> = None;
        for &(mv, child) in &self.nodes[0].children {
            let visits = self.nodes[child].visits;
            if best.map_or(true, |(_, best_visits)| visits > best_visits) {
                best = Some((mv, visits));
            }
        }
        best.map(|(mv, _)| mv)
    }
}

/// Bot that picks moves using Monte Carlo Tree Search with UCB1 selection and uniformly
/// random rollouts. A fresh tree is built per move from a budget of `n_playout` playouts.
pub struct MCTSBot<R: Rng> {
    n_playout: u64,
    exploration: f32,
    rng: R,
}

impl<R: Rng> Debug for MCTSBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MCTSBot {{ n_playout: {}, exploration: {} }}",
            self.n_playout, self.exploration
        )
    }
}

impl<R: Rng> MCTSBot<R> {
    /// The exploration constant balancing the UCB terms; `5.0` is a reasonable default
    /// for values in `-1..=1`.
    pub const DEFAULT_EXPLORATION: f32 = 5.0;

    pub fn new(n_playout: u64, exploration: f32, rng: R) -> Self {
        MCTSBot {
            n_playout,
            exploration,
            rng,
        }
    }
}

impl<B: Board, R: Rng> Bot<B> for MCTSBot<R> {
    fn select_move(&mut self, board: &B) -> B::Move {
        assert!(!board.is_done());

        let mut tree = Tree::new(board);
        for _ in 0..self.n_playout {
            tree.playout(board.clone(), self.exploration, &mut self.rng);
        }

        // with a zero playout budget no child exists yet, fall back to an arbitrary legal move
        tree.best_move()
            .unwrap_or_else(|| board.random_available_move(&mut self.rng))
    }
}

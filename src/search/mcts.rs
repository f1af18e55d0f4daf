//! Monte Carlo Tree Search with UCT selection
//!
//! The tree lives in an arena (`Vec<Node>`) and nodes refer to each other by
//! index. The parent index is only followed during backpropagation.
//!
//! Each iteration:
//! 1. **Selection** - descend through fully expanded nodes by UCT
//! 2. **Expansion** - add one child for an untried move
//! 3. **Simulation** - play a short tactical rollout from the new node
//! 4. **Backpropagation** - credit the rollout winner up to the root
//!
//! A node's win count is from the point of view of the player who made the
//! move into that node.

use crate::board::{Board, Pos, Stone};
use crate::rules::{is_forbidden_at, Rule};

use super::minimax::DEFAULT_RADIUS;
use super::prioritizer::prioritized_moves;

/// Default UCT exploration constant
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Default maximum plies per rollout
pub const DEFAULT_ROLLOUT_CAP: u32 = 60;

/// Search failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal move available")]
    NoLegalMove,
}

/// Index of a node in the search arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Debug)]
struct Node {
    /// Move that led here (`None` at the root)
    mv: Option<Pos>,
    /// Player who made `mv`
    mover: Stone,
    visits: u32,
    wins: u32,
    /// Candidate moves not yet expanded, in prioritizer order
    untried: Vec<Pos>,
    /// Untried moves came from a tactical tier
    tactical: bool,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    /// Game over at this node: `Some(winner)` or `Some(Empty)` for a draw
    outcome: Option<Stone>,
}

impl Node {
    #[inline]
    fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    #[inline]
    fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }
}

/// Outcome of an MCTS search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsResult {
    pub best_move: Pos,
    /// Visits of the chosen root child
    pub visits: u32,
    /// Win rate of the chosen root child for the searching player
    pub win_rate: f64,
    /// Iterations run
    pub iterations: u32,
    /// Nodes in the tree when the search ended
    pub tree_size: usize,
}

/// UCT searcher over a fixed ruleset.
pub struct MctsSearcher<R: Rule> {
    rule: R,
    iterations: u32,
    exploration: f64,
    rollout_cap: u32,
    radius: i32,
    rng: fastrand::Rng,
    nodes: Vec<Node>,
}

impl<R: Rule> MctsSearcher<R> {
    /// Create a searcher running `iterations` iterations per search.
    #[must_use]
    pub fn new(rule: R, iterations: u32, seed: u64) -> Self {
        Self {
            rule,
            iterations,
            exploration: DEFAULT_EXPLORATION,
            rollout_cap: DEFAULT_ROLLOUT_CAP,
            radius: DEFAULT_RADIUS,
            rng: fastrand::Rng::with_seed(seed),
            nodes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    #[must_use]
    pub fn with_rollout_cap(mut self, cap: u32) -> Self {
        self.rollout_cap = cap;
        self
    }

    /// Neighborhood radius for non-tactical expansion candidates
    #[must_use]
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius.max(1);
        self
    }

    /// Pick a move for `player`.
    ///
    /// # Errors
    /// `SearchError::NoLegalMove` when `player` has nothing to play.
    pub fn search(&mut self, board: &Board, player: Stone) -> Result<MctsResult, SearchError> {
        self.nodes.clear();
        let mut root_board = board.clone();
        let untried = prioritized_moves(&mut root_board, player, &self.rule, self.radius);
        self.nodes.push(Node {
            mv: None,
            mover: player.opponent(),
            visits: 0,
            wins: 0,
            tactical: untried.tier.is_tactical(),
            untried: untried.moves,
            children: Vec::new(),
            parent: None,
            outcome: None,
        });

        if self.nodes[ROOT.0].untried.is_empty() {
            return Err(SearchError::NoLegalMove);
        }

        for _ in 0..self.iterations {
            self.iterate(&root_board);
        }

        let result = self.final_choice()?;
        log::debug!(
            "mcts: {} iterations, {} nodes, best {:?} ({} visits, {:.3} win rate)",
            result.iterations,
            result.tree_size,
            result.best_move,
            result.visits,
            result.win_rate
        );
        Ok(result)
    }

    fn final_choice(&self) -> Result<MctsResult, SearchError> {
        let root = &self.nodes[ROOT.0];

        let mut best: Option<&Node> = None;
        for &child in &root.children {
            let node = &self.nodes[child.0];
            if best.map_or(true, |b| node.visits > b.visits) {
                best = Some(node);
            }
        }

        if let Some(node) = best {
            let best_move = node.mv.ok_or(SearchError::NoLegalMove)?;
            return Ok(MctsResult {
                best_move,
                visits: node.visits,
                win_rate: node.win_rate(),
                iterations: root.visits,
                tree_size: self.nodes.len(),
            });
        }

        let best_move = *root.untried.first().ok_or(SearchError::NoLegalMove)?;
        Ok(MctsResult {
            best_move,
            visits: 0,
            win_rate: 0.0,
            iterations: root.visits,
            tree_size: self.nodes.len(),
        })
    }

    fn iterate(&mut self, root_board: &Board) {
        let mut board = root_board.clone();

        // Selection
        let mut id = ROOT;
        loop {
            let node = &self.nodes[id.0];
            if node.is_terminal() || !node.untried.is_empty() || node.children.is_empty() {
                break;
            }
            id = self.select_child(id);
            let child = &self.nodes[id.0];
            if let Some(mv) = child.mv {
                board.place_stone(mv, child.mover);
            }
        }

        // Expansion
        if !self.nodes[id.0].is_terminal() && !self.nodes[id.0].untried.is_empty() {
            id = self.expand(id, &mut board);
        }

        // Simulation
        let (outcome, mover) = (self.nodes[id.0].outcome, self.nodes[id.0].mover);
        let winner = match outcome {
            Some(Stone::Empty) => None,
            Some(winner) => Some(winner),
            None => self.rollout(&mut board, mover.opponent()),
        };

        // Backpropagation
        let mut current = Some(id);
        while let Some(cur) = current {
            let node = &mut self.nodes[cur.0];
            node.visits += 1;
            if winner == Some(node.mover) {
                node.wins += 1;
            }
            current = node.parent;
        }
    }

    /// Child of `parent` with the highest UCT value. Unvisited children win.
    fn select_child(&self, parent: NodeId) -> NodeId {
        let parent_node = &self.nodes[parent.0];
        let ln_parent = f64::from(parent_node.visits.max(1)).ln();

        let mut best = parent_node.children[0];
        let mut best_value = f64::NEG_INFINITY;
        for &child in &parent_node.children {
            let node = &self.nodes[child.0];
            let value = if node.visits == 0 {
                f64::INFINITY
            } else {
                let visits = f64::from(node.visits);
                node.win_rate() + self.exploration * (ln_parent / visits).sqrt()
            };
            if value > best_value {
                best_value = value;
                best = child;
            }
        }
        best
    }

    /// Take one untried move from `parent`, play it and add the child node.
    fn expand(&mut self, parent: NodeId, board: &mut Board) -> NodeId {
        let parent_node = &mut self.nodes[parent.0];
        let index = if parent_node.tactical {
            0
        } else {
            self.rng.usize(..parent_node.untried.len())
        };
        let mv = parent_node.untried.remove(index);
        let mover = parent_node.mover.opponent();

        board.place_stone(mv, mover);

        let outcome = if self.rule.is_winning_move(board, mv, mover) {
            Some(mover)
        } else if board.is_full() {
            Some(Stone::Empty)
        } else {
            None
        };

        let (untried, tactical) = if outcome.is_some() {
            (Vec::new(), false)
        } else {
            let next = prioritized_moves(board, mover.opponent(), &self.rule, self.radius);
            (next.moves, next.tier.is_tactical())
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            mv: Some(mv),
            mover,
            visits: 0,
            wins: 0,
            untried,
            tactical,
            children: Vec::new(),
            parent: Some(parent),
            outcome,
        });
        self.nodes[parent.0].children.push(id);
        log::trace!("mcts: expanded {mv:?} for {mover}");
        id
    }

    /// Play from the current board with `player` to move until someone wins,
    /// the board fills, or the ply cap is hit. Returns the winner.
    fn rollout(&mut self, board: &mut Board, mut player: Stone) -> Option<Stone> {
        for _ in 0..self.rollout_cap {
            if board.is_full() {
                return None;
            }
            let mv = self.rollout_move(board, player)?;
            board.place_stone(mv, player);
            if self.rule.is_winning_move(board, mv, player) {
                return Some(player);
            }
            player = player.opponent();
        }
        None
    }

    /// One rollout ply: win if possible, else block, else a random nearby
    /// legal cell. `None` when `player` has no legal move.
    fn rollout_move(&mut self, board: &mut Board, player: Stone) -> Option<Pos> {
        let mut near: Vec<Pos> = board
            .empty_positions()
            .filter(|&pos| board.has_neighbor(pos, 1))
            .collect();
        if near.is_empty() {
            near = board.empty_positions().collect();
        }

        if let Some(mv) = self.find_winning_cell(board, &near, player) {
            return Some(mv);
        }
        if let Some(mv) = self.find_winning_cell(board, &near, player.opponent()) {
            if !is_forbidden_at(board, mv, player, &self.rule) {
                return Some(mv);
            }
        }

        while !near.is_empty() {
            let index = self.rng.usize(..near.len());
            let mv = near.swap_remove(index);
            if !is_forbidden_at(board, mv, player, &self.rule) {
                return Some(mv);
            }
        }
        None
    }

    fn find_winning_cell(&self, board: &mut Board, cells: &[Pos], player: Stone) -> Option<Pos> {
        cells.iter().copied().find(|&pos| {
            board.place_stone(pos, player);
            let wins = self.rule.is_winning_move(board, pos, player);
            board.remove_stone(pos);
            wins
        })
    }
}

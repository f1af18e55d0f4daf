//! Depth-bounded minimax with alpha-beta pruning
//!
//! Scores come from the evaluator, which is always from Black's point of
//! view: Black plies maximize, White plies minimize. Moves are applied to a
//! working copy of the board and retracted on the way back up, so the board
//! is identical before and after every recursive call.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::rules::Freestyle;
//! use gomoku::search::Searcher;
//!
//! let mut board = Board::square(15);
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let mut searcher = Searcher::new(Freestyle);
//! let result = searcher.best_move(&board, Stone::White, 2);
//! assert!(result.best_move.is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, PatternScore};
use crate::rules::Rule;

use super::prioritizer::{neighborhood_moves, prioritized_moves};

/// Bound outside any reachable score
const INF: i32 = PatternScore::WIN + 1;

/// Default neighborhood radius for candidate generation
pub const DEFAULT_RADIUS: i32 = 2;

/// How candidate moves are generated at each node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveGeneration {
    /// Threat-tier prioritizer
    #[default]
    Prioritized,
    /// Every legal cell near a stone
    Neighborhood,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` when there was nothing to play
    pub best_move: Option<Pos>,
    /// Minimax value from Black's perspective
    pub score: i32,
    /// Depth searched
    pub depth: u8,
    /// Total nodes visited
    pub nodes: u64,
}

/// Alpha-beta searcher over a fixed ruleset.
pub struct Searcher<R: Rule> {
    rule: R,
    radius: i32,
    generation: MoveGeneration,
    pruning: bool,
    nodes: u64,
}

impl<R: Rule> Searcher<R> {
    /// Create a searcher with prioritized move generation and pruning on.
    #[must_use]
    pub fn new(rule: R) -> Self {
        Self {
            rule,
            radius: DEFAULT_RADIUS,
            generation: MoveGeneration::Prioritized,
            pruning: true,
            nodes: 0,
        }
    }

    /// Neighborhood radius used by the fallback tiers
    #[must_use]
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius.max(1);
        self
    }

    #[must_use]
    pub fn with_move_generation(mut self, generation: MoveGeneration) -> Self {
        self.generation = generation;
        self
    }

    /// Turn pruning off to run plain minimax with the same move order.
    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Nodes visited by the last search
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `depth` plies ahead for `player`.
    ///
    /// The caller's board is not modified; the search works on a copy.
    ///
    /// # Arguments
    /// * `board` - Current position
    /// * `player` - Side to move
    /// * `depth` - Plies to search (0 just evaluates)
    #[must_use]
    pub fn best_move(&mut self, board: &Board, player: Stone, depth: u8) -> SearchResult {
        self.nodes = 0;
        let mut work = board.clone();
        let (score, best_move) = self.minimax(&mut work, depth, -INF, INF, player);
        debug_assert_eq!(&work, board, "search leaked a stone");

        log::debug!(
            "minimax: depth {depth} best {best_move:?} score {score} nodes {}",
            self.nodes
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        }
    }

    fn candidates(&self, board: &mut Board, player: Stone) -> Vec<Pos> {
        match self.generation {
            MoveGeneration::Prioritized => {
                prioritized_moves(board, player, &self.rule, self.radius).moves
            }
            MoveGeneration::Neighborhood => {
                neighborhood_moves(board, player, &self.rule, self.radius)
            }
        }
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        player: Stone,
    ) -> (i32, Option<Pos>) {
        self.nodes += 1;

        let eval = evaluate(board, &self.rule);
        if depth == 0 || eval.abs() == PatternScore::WIN || board.is_full() {
            return (eval, None);
        }

        let moves = self.candidates(board, player);
        if moves.is_empty() {
            return (eval, None);
        }

        let maximizing = player == Stone::Black;
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for mv in moves {
            board.place_stone(mv, player);
            let (score, _) = self.minimax(board, depth - 1, alpha, beta, player.opponent());
            board.remove_stone(mv);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }

            if self.pruning && beta <= alpha {
                log::trace!("minimax: cutoff at depth {depth} after {mv:?}");
                break;
            }
        }

        (best_score, best_move)
    }
}

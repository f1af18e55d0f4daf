//! Main AI engine tying the rules and searches together
//!
//! For each request the engine:
//!
//! 1. **Terminal check**: a board that is already won or full gets a verdict
//!    instead of a move
//! 2. **Player to move**: derived from stone-count parity
//! 3. **Ruleset**: [`RuleKind`] is matched once and the search is
//!    monomorphized over the chosen [`Rule`]
//! 4. **Search**: minimax or MCTS, with budgets from [`EngineConfig`]
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Algorithm, Board, GameStatus, Pos, RuleKind, Stone};
//!
//! let engine = AIEngine::new();
//! let mut board = Board::square(15);
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let result = engine.get_move_with_stats(&board, RuleKind::Renju, Algorithm::Minimax);
//! assert_eq!(result.status, GameStatus::Playing);
//! assert_eq!(result.player, Stone::White);
//! println!("Best move: {:?} in {}ms", result.best_move, result.time_ms);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::rules::{winner, Freestyle, Renju, Rule, RuleKind};
use crate::search::{MctsSearcher, SearchError, Searcher};

/// Search algorithm selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Minimax,
    Mcts,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Minimax => "minimax",
            Algorithm::Mcts => "mcts",
        })
    }
}

/// Unknown algorithm name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{0}' (expected 'minimax' or 'mcts')")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "mcts" => Ok(Algorithm::Mcts),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Game state reported alongside a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// A move was found and the game goes on
    Playing,
    /// The board already has a winner
    Win,
    /// The board is full with no winner
    Draw,
    /// The player to move has no legal move
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    pub status: GameStatus,
    /// Move to play, only for `Playing`
    pub best_move: Option<Pos>,
    /// Winner for `Win`, otherwise the player to move
    pub player: Stone,
    /// Minimax value (Black's view) or MCTS win rate in thousandths
    pub score: i32,
    pub algorithm: Algorithm,
    /// Nodes searched (tree size for MCTS)
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn verdict(status: GameStatus, player: Stone, algorithm: Algorithm) -> Self {
        Self {
            status,
            best_move: None,
            player,
            score: 0,
            algorithm,
            nodes: 0,
            time_ms: 0,
        }
    }
}

/// Move-picking engine.
///
/// The engine holds only configuration; every call builds fresh search state,
/// so results never depend on earlier calls.
#[derive(Debug, Clone, Default)]
pub struct AIEngine {
    config: EngineConfig,
}

impl AIEngine {
    /// Create an engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit settings
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Set the minimax depth
    pub fn set_depth(&mut self, depth: u8) {
        self.config.minimax_depth = depth.max(1);
    }

    /// Set the MCTS iteration count
    pub fn set_iterations(&mut self, iterations: u32) {
        self.config.mcts_iterations = iterations.max(1);
    }

    /// Get the best move for the player to move, if any.
    pub fn get_move(&self, board: &Board, rule: RuleKind, algorithm: Algorithm) -> Option<Pos> {
        self.get_move_with_stats(board, rule, algorithm).best_move
    }

    /// Get the best move with the game status and search statistics.
    ///
    /// # Arguments
    /// * `board` - Current position; not modified
    /// * `rule` - Ruleset to play under
    /// * `algorithm` - Search to run
    pub fn get_move_with_stats(
        &self,
        board: &Board,
        rule: RuleKind,
        algorithm: Algorithm,
    ) -> MoveResult {
        let start = Instant::now();
        let mut result = match rule {
            RuleKind::Freestyle => self.run(board, Freestyle, algorithm),
            RuleKind::Renju => self.run(board, Renju, algorithm),
        };
        result.time_ms = start.elapsed().as_millis() as u64;

        log::info!(
            "{algorithm} ({rule}): {:?} {:?} for {} score {} nodes {} in {}ms",
            result.status,
            result.best_move,
            result.player,
            result.score,
            result.nodes,
            result.time_ms
        );
        result
    }

    fn run<R: Rule>(&self, board: &Board, rule: R, algorithm: Algorithm) -> MoveResult {
        if let Some(won) = winner(board, &rule) {
            return MoveResult::verdict(GameStatus::Win, won, algorithm);
        }

        let player = board.current_player();
        if board.is_full() {
            return MoveResult::verdict(GameStatus::Draw, player, algorithm);
        }

        match algorithm {
            Algorithm::Minimax => self.run_minimax(board, rule, player),
            Algorithm::Mcts => self.run_mcts(board, rule, player),
        }
    }

    fn run_minimax<R: Rule>(&self, board: &Board, rule: R, player: Stone) -> MoveResult {
        let mut searcher = Searcher::new(rule)
            .with_radius(self.config.neighbor_radius)
            .with_move_generation(self.config.move_generation);
        let search = searcher.best_move(board, player, self.config.minimax_depth.max(1));

        match search.best_move {
            Some(mv) => MoveResult {
                status: GameStatus::Playing,
                best_move: Some(mv),
                player,
                score: search.score,
                algorithm: Algorithm::Minimax,
                nodes: search.nodes,
                time_ms: 0,
            },
            None => {
                assert!(
                    rule.restricts(player),
                    "no candidate on a non-terminal board for unrestricted {player}"
                );
                MoveResult::verdict(GameStatus::NoMove, player, Algorithm::Minimax)
            }
        }
    }

    fn run_mcts<R: Rule>(&self, board: &Board, rule: R, player: Stone) -> MoveResult {
        let mut searcher = MctsSearcher::new(rule, self.config.mcts_iterations, self.config.seed)
            .with_exploration(self.config.exploration)
            .with_rollout_cap(self.config.rollout_cap)
            .with_radius(self.config.neighbor_radius);

        match searcher.search(board, player) {
            Ok(search) => MoveResult {
                status: GameStatus::Playing,
                best_move: Some(search.best_move),
                player,
                #[allow(clippy::cast_possible_truncation)]
                score: (search.win_rate * 1000.0).round() as i32,
                algorithm: Algorithm::Mcts,
                nodes: search.tree_size as u64,
                time_ms: 0,
            },
            Err(SearchError::NoLegalMove) => {
                MoveResult::verdict(GameStatus::NoMove, player, Algorithm::Mcts)
            }
        }
    }
}

//! Search module for Gomoku AI
//!
//! Contains:
//! - Threat-pattern move prioritizer shared by both searches
//! - Minimax with alpha-beta pruning
//! - Monte Carlo Tree Search with UCT selection

pub mod mcts;
pub mod minimax;
pub mod prioritizer;

pub use mcts::{MctsResult, MctsSearcher, SearchError, DEFAULT_EXPLORATION, DEFAULT_ROLLOUT_CAP};
pub use minimax::{MoveGeneration, SearchResult, Searcher, DEFAULT_RADIUS};
pub use prioritizer::{neighborhood_moves, prioritized_moves, Pattern, Prioritized, Side, Tier};

//! Gomoku AI move engine with Freestyle and Renju rules
//!
//! Picks a move for the side to move on any rectangular board from 8x8 to
//! 64x64:
//! - Five or more in a row wins under Freestyle
//! - Renju forbids Black overlines, double fours and double threes, and a
//!   forbidden five does not win
//! - Two interchangeable searches: minimax with alpha-beta pruning, and Monte
//!   Carlo Tree Search with UCT selection
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Rectangular board with in-place place/remove
//! - [`rules`]: Win detection and Renju forbidden moves
//! - [`eval`]: Static run-length evaluation
//! - [`search`]: Threat prioritizer, minimax and MCTS
//! - [`engine`]: Main AI engine integrating all components
//! - [`config`]: Search budgets loaded from TOML
//! - [`protocol`]: JSON request validation and responses
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Algorithm, Board, EngineConfig, Pos, RuleKind, Stone};
//!
//! let engine = AIEngine::with_config(EngineConfig {
//!     minimax_depth: 2,
//!     ..EngineConfig::default()
//! });
//!
//! let mut board = Board::square(15);
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! // AI responds as White
//! if let Some(pos) = engine.get_move(&board, RuleKind::Freestyle, Algorithm::Minimax) {
//!     board.place_stone(pos, Stone::White);
//!     println!("AI plays at ({}, {})", pos.row, pos.col);
//! }
//! ```
//!
//! # Logging
//!
//! Search progress is reported through the `log` facade (`debug!` per search,
//! `trace!` per node or tier). Nothing is printed unless the application
//! installs a logger.

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod protocol;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone};
pub use config::{ConfigError, EngineConfig};
pub use engine::{AIEngine, Algorithm, GameStatus, MoveResult};
pub use rules::{Freestyle, Renju, Rule, RuleKind};
pub use search::SearchError;

//! Evaluation module for Gomoku positions
//!
//! Positions are scored from Black's perspective: positive favors Black,
//! negative favors White. The score is a sum of rewards over every maximal
//! run of stones, with a fixed win score overriding everything else.

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, partial_score};
pub use patterns::{run_reward, PatternScore};

//! Heuristic evaluation function for Gomoku board positions
//!
//! The evaluation is a static snapshot score:
//! - A board won by Black scores `+PatternScore::WIN`
//! - A board won by White scores `-PatternScore::WIN`
//! - Otherwise Black's run rewards minus White's run rewards
//!
//! Win detection goes through the ruleset, so a forbidden Renju five is
//! scored as an ordinary run.

use crate::board::{Board, Stone};
use crate::rules::{runs, Rule};

use super::patterns::{run_reward, PatternScore};

/// Evaluate the board from Black's perspective.
///
/// # Arguments
/// * `board` - The current board state
/// * `rule` - Ruleset used for win detection
///
/// # Returns
/// `PatternScore::WIN` for a Black win, `-PatternScore::WIN` for a White win,
/// otherwise `partial_score(Black) - partial_score(White)`.
#[must_use]
pub fn evaluate<R: Rule>(board: &Board, rule: &R) -> i32 {
    if rule.is_winning(board, Stone::Black) {
        return PatternScore::WIN;
    }
    if rule.is_winning(board, Stone::White) {
        return -PatternScore::WIN;
    }
    partial_score(board, Stone::Black) - partial_score(board, Stone::White)
}

/// Sum of run rewards over every maximal run of `stone` in all four directions.
#[must_use]
pub fn partial_score(board: &Board, stone: Stone) -> i32 {
    runs(board, stone).map(|run| run_reward(run.len)).sum()
}

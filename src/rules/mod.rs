//! Game rules for Gomoku
//!
//! Two rulesets share one capability trait:
//! - [`Freestyle`]: five or more in a row wins, nothing is forbidden
//! - [`Renju`]: Black may not make an overline, a double four or a double
//!   three, and a forbidden five does not win
//!
//! The ruleset is chosen once (see [`RuleKind`]) and passed to the searches as
//! a type parameter, so the hot path never re-checks which rules apply.

pub mod forbidden;
pub mod win;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};

// Re-exports for convenient access
pub use forbidden::{
    count_open_fours, count_open_runs, count_open_threes, has_overline, is_forbidden_for_black,
    is_forbidden_placement,
};
pub use win::{has_five_at_pos, has_five_in_row, run_through, runs, LineRun, WIN_LENGTH};

/// Ruleset capability used by the evaluator and both searches.
pub trait Rule: Copy + Send + Sync + fmt::Debug + 'static {
    /// Which ruleset this is
    fn kind(&self) -> RuleKind;

    /// Whether forbidden-move filtering applies to `player`
    fn restricts(&self, player: Stone) -> bool;

    /// Check the current board (after placement) for a forbidden Black pattern.
    fn is_forbidden_move(&self, board: &Board) -> bool;

    /// Check if `player` has won on the current board.
    ///
    /// For a restricted player the board must first be free of forbidden
    /// patterns.
    fn is_winning(&self, board: &Board, player: Stone) -> bool {
        if self.restricts(player) && self.is_forbidden_move(board) {
            return false;
        }
        has_five_in_row(board, player)
    }

    /// Check if the stone `player` just placed at `pos` wins.
    ///
    /// Only the four lines through `pos` are scanned for the five.
    fn is_winning_move(&self, board: &Board, pos: Pos, player: Stone) -> bool {
        if !has_five_at_pos(board, pos, player) {
            return false;
        }
        !(self.restricts(player) && self.is_forbidden_move(board))
    }
}

/// Five or more in a row wins, no restrictions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Freestyle;

impl Rule for Freestyle {
    #[inline]
    fn kind(&self) -> RuleKind {
        RuleKind::Freestyle
    }

    #[inline]
    fn restricts(&self, _player: Stone) -> bool {
        false
    }

    #[inline]
    fn is_forbidden_move(&self, _board: &Board) -> bool {
        false
    }
}

/// Renju restrictions for Black
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renju;

impl Rule for Renju {
    #[inline]
    fn kind(&self) -> RuleKind {
        RuleKind::Renju
    }

    #[inline]
    fn restricts(&self, player: Stone) -> bool {
        player == Stone::Black
    }

    fn is_forbidden_move(&self, board: &Board) -> bool {
        is_forbidden_for_black(board)
    }
}

/// Ruleset name as it appears in requests and config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    #[default]
    Freestyle,
    Renju,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Freestyle => "freestyle",
            RuleKind::Renju => "renju",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown ruleset name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule type '{0}' (expected 'freestyle' or 'renju')")]
pub struct UnknownRule(pub String);

impl FromStr for RuleKind {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freestyle" => Ok(RuleKind::Freestyle),
            "renju" => Ok(RuleKind::Renju),
            _ => Err(UnknownRule(s.to_string())),
        }
    }
}

/// Winner on the current board, if any. Black is checked first.
pub fn winner<R: Rule>(board: &Board, rule: &R) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&player| rule.is_winning(board, player))
}

/// Check whether placing `player` at `pos` is forbidden under `rule`.
///
/// Unrestricted players are never forbidden. The trial stone is always
/// retracted.
pub fn is_forbidden_at<R: Rule>(board: &mut Board, pos: Pos, player: Stone, rule: &R) -> bool {
    if !rule.restricts(player) {
        return false;
    }
    board.place_stone(pos, player);
    let forbidden = rule.is_forbidden_move(board);
    board.remove_stone(pos);
    forbidden
}

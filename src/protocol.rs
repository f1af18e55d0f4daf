//! JSON request/response boundary
//!
//! A request carries the board as nested integers (1 = Black, -1 = White,
//! 0 = Empty) plus the ruleset, the algorithm and optional budgets:
//!
//! ```json
//! { "board": [[0, 0, ...], ...], "rule": "renju", "algorithm": "mcts",
//!   "depth": 3, "iterations": 2000 }
//! ```
//!
//! Everything is validated here, before the engine runs. A failed check
//! becomes a response with status `Error` and a stable error code.
//!
//! # Example
//!
//! ```
//! use gomoku::config::EngineConfig;
//! use gomoku::protocol::{handle_json, ResponseStatus};
//!
//! let mut rows = vec![vec![0; 15]; 15];
//! rows[7][7] = 1;
//! let request = serde_json::json!({ "board": rows, "rule": "freestyle", "depth": 1 });
//!
//! let response = handle_json(&EngineConfig::default(), &request.to_string());
//! assert_eq!(response.status, ResponseStatus::Playing);
//! assert_eq!(response.player.as_deref(), Some("White"));
//! ```

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::config::{EngineConfig, MAX_DEPTH};
use crate::engine::{AIEngine, Algorithm, GameStatus, MoveResult};
use crate::rules::{has_five_in_row, Renju, Rule, RuleKind};

/// Request validation failures, one variant per error code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("invalid depth {0}; depth should be larger than 0")]
    InvalidDepth(i64),

    #[error("invalid iteration count {0}; iterations should be larger than 0")]
    InvalidIterations(i64),

    #[error("'{0}' is an invalid rule; rule should be 'freestyle' or 'renju'")]
    InvalidRuleType(String),

    #[error("'{0}' is an invalid algorithm; algorithm should be 'minimax' or 'mcts'")]
    InvalidAlgorithm(String),

    #[error("invalid stone count (black {black}, white {white}); black must equal white or lead by one")]
    InvalidStoneCount { black: usize, white: usize },

    #[error("invalid board value {value} at ({row}, {col}); only 1 (Black), -1 (White) or 0 (Empty) are allowed")]
    InvalidBoardValues { row: usize, col: usize, value: i64 },
}

impl InputError {
    /// Stable error code reported on the wire
    pub fn code(&self) -> &'static str {
        match self {
            InputError::Malformed(_) => "InvalidRequest",
            InputError::InvalidBoard(_) => "InvalidBoard",
            InputError::InvalidDepth(_) | InputError::InvalidIterations(_) => "InvalidDepth",
            InputError::InvalidRuleType(_) => "InvalidRuleType",
            InputError::InvalidAlgorithm(_) => "InvalidAlgorithm",
            InputError::InvalidStoneCount { .. } => "InvalidStoneCount",
            InputError::InvalidBoardValues { .. } => "InvalidBoardValues",
        }
    }
}

/// Raw wire request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub board: Vec<Vec<i64>>,
    pub rule: String,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub depth: Option<i64>,
    #[serde(default)]
    pub iterations: Option<i64>,
}

/// Request after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub board: Board,
    pub rule: RuleKind,
    pub algorithm: Algorithm,
    pub depth: Option<u8>,
    pub iterations: Option<u32>,
}

impl MoveRequest {
    /// Check every field and build the core types.
    ///
    /// # Errors
    /// The first failed check, in this order: board shape, depth, iterations,
    /// rule, algorithm, cell values, stone count, Renju forbidden position,
    /// multiple winners. Depths above [`MAX_DEPTH`] are clamped.
    pub fn validate(&self) -> Result<ValidRequest, InputError> {
        let rows = self.board.len();
        let cols = self.board.first().map_or(0, Vec::len);
        let sizes = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        if !sizes.contains(&rows) || !sizes.contains(&cols) {
            return Err(InputError::InvalidBoard(format!(
                "board must be between {MIN_BOARD_SIZE}x{MIN_BOARD_SIZE} and \
                 {MAX_BOARD_SIZE}x{MAX_BOARD_SIZE}, got {rows}x{cols}"
            )));
        }
        if let Some((r, row)) = self.board.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(InputError::InvalidBoard(format!(
                "row {r} has {} cells, expected {cols}",
                row.len()
            )));
        }

        let depth = match self.depth {
            Some(d) if d < 1 => return Err(InputError::InvalidDepth(d)),
            Some(d) => Some(u8::try_from(d.min(i64::from(MAX_DEPTH))).unwrap_or(MAX_DEPTH)),
            None => None,
        };
        let iterations = match self.iterations {
            Some(n) if n < 1 => return Err(InputError::InvalidIterations(n)),
            Some(n) => Some(u32::try_from(n).unwrap_or(u32::MAX)),
            None => None,
        };

        let rule: RuleKind = self
            .rule
            .parse()
            .map_err(|_| InputError::InvalidRuleType(self.rule.clone()))?;
        let algorithm = match &self.algorithm {
            Some(name) => name
                .parse()
                .map_err(|_| InputError::InvalidAlgorithm(name.clone()))?,
            None => Algorithm::default(),
        };

        let mut values = Vec::with_capacity(rows);
        for (r, row) in self.board.iter().enumerate() {
            let mut cells = Vec::with_capacity(cols);
            for (c, &value) in row.iter().enumerate() {
                let cell = i8::try_from(value)
                    .ok()
                    .filter(|v| Stone::from_value(*v).is_some())
                    .ok_or(InputError::InvalidBoardValues { row: r, col: c, value })?;
                cells.push(cell);
            }
            values.push(cells);
        }
        let board =
            Board::from_values(&values).map_err(|e| InputError::InvalidBoard(e.to_string()))?;

        let black = board.count(Stone::Black) as usize;
        let white = board.count(Stone::White) as usize;
        if black < white || black - white > 1 {
            return Err(InputError::InvalidStoneCount { black, white });
        }

        if rule == RuleKind::Renju && Renju.is_forbidden_move(&board) {
            return Err(InputError::InvalidBoard(
                "black made a forbidden move under renju rules".into(),
            ));
        }
        if has_five_in_row(&board, Stone::Black) && has_five_in_row(&board, Stone::White) {
            return Err(InputError::InvalidBoard("multiple winners detected".into()));
        }

        Ok(ValidRequest {
            board,
            rule,
            algorithm,
            depth,
            iterations,
        })
    }
}

/// Wire response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    Playing,
    Win,
    Draw,
    NoMove,
    Error,
}

impl From<GameStatus> for ResponseStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Playing => ResponseStatus::Playing,
            GameStatus::Win => ResponseStatus::Win,
            GameStatus::Draw => ResponseStatus::Draw,
            GameStatus::NoMove => ResponseStatus::NoMove,
        }
    }
}

/// Wire response. `row`/`col` are -1 when there is no move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub status: ResponseStatus,
    pub row: i32,
    pub col: i32,
    /// Winner for `Win`, otherwise the player to move; absent on errors
    pub player: Option<String>,
    pub score: i32,
    pub message: String,
    /// Error code, only on `Error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub nodes: u64,
    #[serde(default)]
    pub time_ms: u64,
}

impl MoveResponse {
    /// Error response for a rejected request
    pub fn from_error(err: &InputError) -> Self {
        Self {
            status: ResponseStatus::Error,
            row: -1,
            col: -1,
            player: None,
            score: 0,
            message: err.to_string(),
            code: Some(err.code().to_string()),
            nodes: 0,
            time_ms: 0,
        }
    }

    /// Response for an engine result
    pub fn from_result(result: &MoveResult) -> Self {
        let (row, col) = result
            .best_move
            .map_or((-1, -1), |Pos { row, col }| (i32::from(row), i32::from(col)));

        let message = match result.status {
            GameStatus::Playing => format!("Best move found by {}", result.algorithm),
            GameStatus::Win => format!("The game is already over. {} wins.", result.player),
            GameStatus::Draw => "The game is a draw.".to_string(),
            GameStatus::NoMove => format!("No legal move for {}.", result.player),
        };

        Self {
            status: result.status.into(),
            row,
            col,
            player: Some(result.player.to_string()),
            score: result.score,
            message,
            code: None,
            nodes: result.nodes,
            time_ms: result.time_ms,
        }
    }
}

/// Validate a request and run the engine on it.
///
/// Request budgets override the config's defaults.
pub fn solve(config: &EngineConfig, request: &MoveRequest) -> MoveResponse {
    let valid = match request.validate() {
        Ok(valid) => valid,
        Err(err) => {
            log::warn!("rejected request: {err}");
            return MoveResponse::from_error(&err);
        }
    };

    let mut engine = AIEngine::with_config(config.clone());
    if let Some(depth) = valid.depth {
        engine.set_depth(depth);
    }
    if let Some(iterations) = valid.iterations {
        engine.set_iterations(iterations);
    }

    let result = engine.get_move_with_stats(&valid.board, valid.rule, valid.algorithm);
    MoveResponse::from_result(&result)
}

/// Parse a JSON request and solve it. Malformed JSON yields an `Error` response.
pub fn handle_json(config: &EngineConfig, input: &str) -> MoveResponse {
    match serde_json::from_str::<MoveRequest>(input) {
        Ok(request) => solve(config, &request),
        Err(e) => MoveResponse::from_error(&InputError::Malformed(e.to_string())),
    }
}

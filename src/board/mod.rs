//! Board representation for Gomoku

pub mod board;


// Re-exports
pub use board::{Board, BoardError};

/// Smallest accepted board side
pub const MIN_BOARD_SIZE: usize = 8;
/// Largest accepted board side (coordinates fit in a `u8`)
pub const MAX_BOARD_SIZE: usize = 64;
/// Default board side used by the CLI demo
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Direction vectors for line scanning (4 directions)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Anti-diagonal SW
];

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Wire value: Black = 1, White = -1, Empty = 0
    #[inline]
    pub fn value(self) -> i8 {
        match self {
            Stone::Black => 1,
            Stone::White => -1,
            Stone::Empty => 0,
        }
    }

    /// Parse a wire value, rejecting anything outside {-1, 0, 1}
    #[inline]
    pub fn from_value(value: i8) -> Option<Stone> {
        match value {
            1 => Some(Stone::Black),
            -1 => Some(Stone::White),
            0 => Some(Stone::Empty),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stone::Black => "Black",
            Stone::White => "White",
            Stone::Empty => "Empty",
        };
        f.write_str(name)
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Step `dist` cells along direction `(dr, dc)`.
    ///
    /// Returns signed coordinates; callers check them with `Board::contains`.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, dist: i32) -> (i32, i32) {
        (
            i32::from(self.row) + dr * dist,
            i32::from(self.col) + dc * dist,
        )
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

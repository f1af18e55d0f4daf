//! Rectangular board with in-place place/remove

use super::{Pos, Stone, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Errors raised when building a board from raw cell values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must be between {min}x{min} and {max}x{max}, got {rows}x{cols}")]
    Size {
        rows: usize,
        cols: usize,
        min: usize,
        max: usize,
    },

    #[error("board rows must all have the same length (row {row} has {len}, expected {expected})")]
    Ragged { row: usize, len: usize, expected: usize },

    #[error("invalid cell value {value} at ({row}, {col}); only -1, 0 and 1 are allowed")]
    CellValue { row: usize, col: usize, value: i8 },
}

/// Game board.
///
/// Cells are stored row-major. The size is fixed at construction; stones
/// are placed and removed in place so that search can apply and undo moves
/// without cloning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Stone>,
    black_count: u32,
    white_count: u32,
}

impl Board {
    /// Create an empty `rows` x `cols` board.
    ///
    /// # Panics
    /// Panics if either side is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    /// Use [`Board::try_new`] for untrusted sizes.
    pub fn new(rows: usize, cols: usize) -> Self {
        match Self::try_new(rows, cols) {
            Ok(board) => board,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create an empty board, validating the size.
    pub fn try_new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        let valid = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(BoardError::Size {
                rows,
                cols,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Stone::Empty; rows * cols],
            black_count: 0,
            white_count: 0,
        })
    }

    /// Square board helper
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Build a board from nested wire values (1 = Black, -1 = White, 0 = Empty).
    pub fn from_values(values: &[Vec<i8>]) -> Result<Self, BoardError> {
        let rows = values.len();
        let cols = values.first().map_or(0, Vec::len);
        let mut board = Self::try_new(rows, cols)?;

        for (r, row) in values.iter().enumerate() {
            if row.len() != cols {
                return Err(BoardError::Ragged {
                    row: r,
                    len: row.len(),
                    expected: cols,
                });
            }
            for (c, &value) in row.iter().enumerate() {
                let stone = Stone::from_value(value).ok_or(BoardError::CellValue {
                    row: r,
                    col: c,
                    value,
                })?;
                #[allow(clippy::cast_possible_truncation)]
                board.place_stone(Pos::new(r as u8, c as u8), stone);
            }
        }
        Ok(board)
    }

    /// Convert back to nested wire values
    pub fn to_values(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|s| s.value()).collect())
            .collect()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.in_bounds(pos), "{pos:?} outside {}x{}", self.rows, self.cols);
        pos.row as usize * self.cols + pos.col as usize
    }

    #[inline]
    fn in_bounds(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.rows && (pos.col as usize) < self.cols
    }

    /// Check signed coordinates against the board bounds
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Stone at signed coordinates, `None` when off the board
    #[inline]
    pub fn at(&self, row: i32, col: i32) -> Option<Stone> {
        if self.contains(row, col) {
            Some(self.cells[row as usize * self.cols + col as usize])
        } else {
            None
        }
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[self.index(pos)]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone, replacing whatever was there.
    ///
    /// Placing `Stone::Empty` is the same as [`Board::remove_stone`].
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        let idx = self.index(pos);
        let old = self.cells[idx];
        self.adjust_count(old, -1);
        self.adjust_count(stone, 1);
        self.cells[idx] = stone;
    }

    /// Remove a stone (undo of a placement)
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.place_stone(pos, Stone::Empty);
    }

    #[inline]
    fn adjust_count(&mut self, stone: Stone, delta: i32) {
        match stone {
            Stone::Black => self.black_count = self.black_count.wrapping_add_signed(delta),
            Stone::White => self.white_count = self.white_count.wrapping_add_signed(delta),
            Stone::Empty => {}
        }
    }

    /// Number of stones of one color
    #[inline]
    pub fn count(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black_count,
            Stone::White => self.white_count,
            Stone::Empty => self.cells.len() as u32 - self.stone_count(),
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black_count + self.white_count
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stone_count() == 0
    }

    /// Check if every cell is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.cells.len()
    }

    /// Player to move, derived from stone-count parity.
    ///
    /// Equal counts mean Black moves; otherwise White.
    #[inline]
    pub fn current_player(&self) -> Stone {
        if self.black_count == self.white_count {
            Stone::Black
        } else {
            Stone::White
        }
    }

    /// Center cell (rounded down on even sides)
    #[inline]
    pub fn center(&self) -> Pos {
        #[allow(clippy::cast_possible_truncation)]
        Pos::new((self.rows / 2) as u8, (self.cols / 2) as u8)
    }

    /// Iterate over every position, row-major
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        #[allow(clippy::cast_possible_truncation)]
        (0..self.cells.len()).map(move |i| Pos::new((i / cols) as u8, (i % cols) as u8))
    }

    /// Iterate over empty positions, row-major
    pub fn empty_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&p| self.is_empty(p))
    }

    /// Iterate over positions holding `stone`, row-major
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&p| self.get(p) == stone)
    }

    /// Check whether any stone lies within Chebyshev distance `radius` of `pos`
    pub fn has_neighbor(&self, pos: Pos, radius: i32) -> bool {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (r, c) = pos.offset(dr, dc, 1);
                if matches!(self.at(r, c), Some(s) if s != Stone::Empty) {
                    return true;
                }
            }
        }
        false
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.cols {
            write!(f, "{c:3}")?;
        }
        writeln!(f)?;

        for r in 0..self.rows {
            write!(f, "{r:3}")?;
            for c in 0..self.cols {
                let ch = match self.cells[r * self.cols + c] {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    Stone::Empty => '.',
                };
                write!(f, "  {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Line scanning and five-in-a-row detection
//!
//! Every rule check in the engine reduces to contiguous runs of one color
//! along the four line directions. A run is *maximal*: the cells just past
//! each end are empty, an opponent stone, or off the board.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Stones needed for a win
pub const WIN_LENGTH: u32 = 5;

/// A contiguous run of one color along a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    /// Number of consecutive stones
    pub len: u32,
    /// Cell before the first stone is on the board and empty
    pub open_start: bool,
    /// Cell after the last stone is on the board and empty
    pub open_end: bool,
}

impl LineRun {
    /// Number of open ends (0, 1, or 2)
    #[inline]
    pub fn open_ends(&self) -> u8 {
        u8::from(self.open_start) + u8::from(self.open_end)
    }

    /// Both ends open
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open_start && self.open_end
    }

    /// Exactly one end open
    #[inline]
    pub fn is_semi_open(&self) -> bool {
        self.open_start != self.open_end
    }
}

#[inline]
fn is_open_cell(board: &Board, row: i32, col: i32) -> bool {
    board.at(row, col) == Some(Stone::Empty)
}

/// Measure the run of `stone` through `pos` in direction `(dr, dc)`.
///
/// `pos` itself always counts as one stone, so this can be used right after a
/// hypothetical placement.
pub fn run_through(board: &Board, pos: Pos, stone: Stone, dr: i32, dc: i32) -> LineRun {
    let (forward, end_open) = walk(board, pos, stone, dr, dc);
    let (backward, start_open) = walk(board, pos, stone, -dr, -dc);

    LineRun {
        len: 1 + forward + backward,
        open_start: start_open,
        open_end: end_open,
    }
}

/// Count same-color stones stepping away from `pos`, and whether the first
/// cell past them is empty.
#[inline]
fn walk(board: &Board, pos: Pos, stone: Stone, dr: i32, dc: i32) -> (u32, bool) {
    let mut count = 0;
    let (mut r, mut c) = pos.offset(dr, dc, 1);
    while board.at(r, c) == Some(stone) {
        count += 1;
        r += dr;
        c += dc;
    }
    (count, is_open_cell(board, r, c))
}

/// Run of `stone` starting at `pos` in direction `(dr, dc)`, or `None` when
/// `pos` is not the first stone of its run.
///
/// Only counting from the start of a run guarantees each maximal run is seen
/// exactly once per direction.
fn run_from_start(board: &Board, pos: Pos, stone: Stone, dr: i32, dc: i32) -> Option<LineRun> {
    let (pr, pc) = pos.offset(-dr, -dc, 1);
    let before = board.at(pr, pc);
    if before == Some(stone) {
        return None;
    }

    let (forward, end_open) = walk(board, pos, stone, dr, dc);
    Some(LineRun {
        len: 1 + forward,
        open_start: before == Some(Stone::Empty),
        open_end: end_open,
    })
}

/// Every maximal run of `stone` on rows, columns, diagonals and anti-diagonals.
///
/// An isolated stone yields four runs of length 1, one per direction.
pub fn runs(board: &Board, stone: Stone) -> impl Iterator<Item = LineRun> + '_ {
    board.stones(stone).flat_map(move |pos| {
        DIRECTIONS
            .iter()
            .filter_map(move |&(dr, dc)| run_from_start(board, pos, stone, dr, dc))
    })
}

/// Check if there's 5+ in a row for the given color anywhere on the board
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    runs(board, stone).any(|run| run.len >= WIN_LENGTH)
}

/// Fast five-in-a-row check through a specific position.
///
/// Only checks the 4 lines through `pos`.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, stone: Stone) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_through(board, pos, stone, dr, dc).len >= WIN_LENGTH)
}

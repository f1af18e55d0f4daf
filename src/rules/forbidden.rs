//! Renju forbidden-move rules for Black
//!
//! A Black position is forbidden when any of these hold, checked in order:
//! - Overline: 6 or more consecutive Black stones in any line
//! - Double four: 2 or more distinct open fours
//! - Double three: 2 or more distinct open threes
//!
//! Patterns are counted as maximal runs with both ends empty. An open four
//! also counts as an open three, which makes the four-three combination a
//! double three. Runs of five or more are never threes or fours: a five
//! wins, and only an overline forbids it.
//!
//! Status is always computed on the board *after* the placement.

use crate::board::{Board, Pos, Stone};

use super::win::runs;

/// Run length that makes an overline
pub const OVERLINE_LENGTH: u32 = 6;

/// Longest run counted as a three or four
const MAX_THREAT_LENGTH: u32 = 4;

/// Check for 6+ consecutive stones of `stone` anywhere on the board
pub fn has_overline(board: &Board, stone: Stone) -> bool {
    runs(board, stone).any(|run| run.len >= OVERLINE_LENGTH)
}

/// Count maximal runs of `min_len` to 4 stones with both ends open.
///
/// # Arguments
/// * `board` - Position to scan (after placement)
/// * `stone` - Color whose runs are counted
/// * `min_len` - Minimum run length
pub fn count_open_runs(board: &Board, stone: Stone, min_len: u32) -> usize {
    runs(board, stone)
        .filter(|run| (min_len..=MAX_THREAT_LENGTH).contains(&run.len) && run.is_open())
        .count()
}

/// Count open fours for `stone`
#[inline]
pub fn count_open_fours(board: &Board, stone: Stone) -> usize {
    count_open_runs(board, stone, 4)
}

/// Count open threes for `stone` (open fours included)
#[inline]
pub fn count_open_threes(board: &Board, stone: Stone) -> usize {
    count_open_runs(board, stone, 3)
}

/// Check if the current board is forbidden for Black.
///
/// # Returns
/// `true` on an overline, a double open four, or a double open three.
pub fn is_forbidden_for_black(board: &Board) -> bool {
    if has_overline(board, Stone::Black) {
        return true;
    }
    if count_open_fours(board, Stone::Black) >= 2 {
        return true;
    }
    count_open_threes(board, Stone::Black) >= 2
}

/// Check whether Black placing at `pos` would be forbidden.
///
/// Places the stone, tests the resulting board, then retracts it. The board
/// is left exactly as it was.
pub fn is_forbidden_placement(board: &mut Board, pos: Pos) -> bool {
    debug_assert!(board.is_empty(pos), "placement check on occupied cell {pos:?}");
    board.place_stone(pos, Stone::Black);
    let forbidden = is_forbidden_for_black(board);
    board.remove_stone(pos);
    forbidden
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_not_forbidden() {
        let board = Board::square(15);
        assert!(!is_forbidden_for_black(&board));
    }

    #[test]
    fn test_single_open_three_allowed() {
        let mut board = Board::square(15);
        // _ B B B _
        board.place_stone(Pos::new(7, 6), Stone::Black);
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::Black);

        assert_eq!(count_open_threes(&board, Stone::Black), 1);
        assert!(!is_forbidden_for_black(&board), "Single open three is legal");
    }

    #[test]
    fn test_double_three_cross_pattern() {
        let mut board = Board::square(15);
        //     col: 7 8 9 10 11
        // row 8:   . . B .  .
        // row 9:   _ B X B  _
        // row 10:  . . B .  .
        board.place_stone(Pos::new(9, 8), Stone::Black);
        board.place_stone(Pos::new(9, 10), Stone::Black);
        board.place_stone(Pos::new(8, 9), Stone::Black);
        board.place_stone(Pos::new(10, 9), Stone::Black);

        assert!(!is_forbidden_for_black(&board));
        assert!(
            is_forbidden_placement(&mut board, Pos::new(9, 9)),
            "Cross pattern should be double three"
        );
    }

    #[test]
    fn test_double_three_diagonal_cross() {
        let mut board = Board::square(15);
        board.place_stone(Pos::new(8, 8), Stone::Black);
        board.place_stone(Pos::new(10, 10), Stone::Black);
        board.place_stone(Pos::new(8, 10), Stone::Black);
        board.place_stone(Pos::new(10, 8), Stone::Black);
        board.place_stone(Pos::new(9, 9), Stone::Black);

        assert_eq!(count_open_threes(&board, Stone::Black), 2);
        assert!(is_forbidden_for_black(&board));
    }

    #[test]
    fn test_blocked_three_does_not_count() {
        let mut board = Board::square(15);
        // W B B B _ crossed with _ B B B _ vertically
        board.place_stone(Pos::new(9, 5), Stone::White);
        board.place_stone(Pos::new(9, 6), Stone::Black);
        board.place_stone(Pos::new(9, 7), Stone::Black);
        board.place_stone(Pos::new(9, 8), Stone::Black);
        board.place_stone(Pos::new(8, 7), Stone::Black);
        board.place_stone(Pos::new(10, 7), Stone::Black);

        assert_eq!(count_open_threes(&board, Stone::Black), 1);
        assert!(!is_forbidden_for_black(&board));
    }

    #[test]
    fn test_overline_forbidden() {
        let mut board = Board::square(15);
        for c in 2..8 {
            board.place_stone(Pos::new(4, c), Stone::Black);
        }
        assert!(has_overline(&board, Stone::Black));
        assert!(is_forbidden_for_black(&board));
    }

    #[test]
    fn test_exact_five_is_not_overline() {
        let mut board = Board::square(15);
        for c in 2..7 {
            board.place_stone(Pos::new(4, c), Stone::Black);
        }
        assert!(!has_overline(&board, Stone::Black));
        assert!(!is_forbidden_for_black(&board));
    }

    #[test]
    fn test_double_open_four_forbidden() {
        let mut board = Board::square(15);
        // Horizontal _ B B B B _ on row 3, vertical _ B B B B _ on col 10
        for c in 2..6 {
            board.place_stone(Pos::new(3, c), Stone::Black);
        }
        for r in 6..10 {
            board.place_stone(Pos::new(r, 10), Stone::Black);
        }
        assert_eq!(count_open_fours(&board, Stone::Black), 2);
        assert!(is_forbidden_for_black(&board));
    }

    #[test]
    fn test_four_three_forbidden() {
        let mut board = Board::square(15);
        // Open four along row 7 through (7,7), open three down col 7 through it
        board.place_stone(Pos::new(7, 5), Stone::Black);
        board.place_stone(Pos::new(7, 6), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::Black);
        board.place_stone(Pos::new(6, 7), Stone::Black);
        board.place_stone(Pos::new(8, 7), Stone::Black);

        assert!(is_forbidden_placement(&mut board, Pos::new(7, 7)));

        board.place_stone(Pos::new(7, 7), Stone::Black);
        assert_eq!(count_open_fours(&board, Stone::Black), 1);
        assert_eq!(count_open_threes(&board, Stone::Black), 2);
    }

    #[test]
    fn test_open_five_is_not_a_three() {
        let mut board = Board::square(15);
        for c in 4..9 {
            board.place_stone(Pos::new(6, c), Stone::Black);
        }
        assert_eq!(count_open_fours(&board, Stone::Black), 0);
        assert_eq!(count_open_threes(&board, Stone::Black), 0);
    }

    #[test]
    fn test_gap_fill_five_with_open_three_allowed() {
        let mut board = Board::square(15);
        // Open three on row 2, B B _ B B on row 10
        for c in 5..8 {
            board.place_stone(Pos::new(2, c), Stone::Black);
        }
        for c in [3, 4, 6, 7] {
            board.place_stone(Pos::new(10, c), Stone::Black);
        }
        assert!(!is_forbidden_for_black(&board));
        assert!(!is_forbidden_placement(&mut board, Pos::new(10, 5)));

        board.place_stone(Pos::new(10, 5), Stone::Black);
        assert_eq!(count_open_threes(&board, Stone::Black), 1);
        assert!(!is_forbidden_for_black(&board));
    }

    #[test]
    fn test_white_never_checked() {
        let mut board = Board::square(15);
        for c in 2..8 {
            board.place_stone(Pos::new(4, c), Stone::White);
        }
        assert!(!is_forbidden_for_black(&board));
        assert!(has_overline(&board, Stone::White));
    }

    #[test]
    fn test_placement_check_restores_board() {
        let mut board = Board::square(15);
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);
        let before = board.clone();

        for pos in before.empty_positions() {
            is_forbidden_placement(&mut board, pos);
        }
        assert_eq!(board, before);
    }
}

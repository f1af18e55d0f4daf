//! Threat-pattern move prioritizer
//!
//! Cuts the branching factor down to the tactically relevant cells. Every
//! empty cell is tried for both sides by placing a stone and retracting it:
//! the strongest pattern the trial stone makes decides the cell's tier. The full
//! move set of the best non-empty tier is returned, so the searches can branch
//! over equivalent options.
//!
//! Tiers, strongest first (attack = mover creates, defend = opponent would
//! create, so the mover blocks):
//!
//! | # | Tier |
//! |---|------|
//! | 1 | Win (attack) |
//! | 2 | Win (defend) |
//! | 3 | Open four (attack) |
//! | 4 | Open four (defend) |
//! | 5 | Semi-open four (attack) |
//! | 6 | Semi-open four (defend) |
//! | 7 | Open three (attack) |
//! | 8 | Open three (defend) |
//! | 9 | Semi-open three (attack) |
//! | 10 | Semi-open three (defend) |
//!
//! With no pattern anywhere, empty cells near existing stones are returned,
//! then any empty cell.

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::rules::{is_forbidden_at, run_through, Rule};

/// Line pattern a trial stone can make, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pattern {
    Win,
    OpenFour,
    SemiOpenFour,
    OpenThree,
    SemiOpenThree,
}

/// Whose pattern a tactical tier describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    /// The mover makes the pattern
    Attack,
    /// The opponent would make it; the mover takes the cell first
    Defend,
}

/// Which rule produced a prioritized move set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Empty board opening
    Center,
    /// A tactical pattern was found
    Threat(Pattern, Side),
    /// Empty cells near existing stones
    Neighborhood,
    /// Any empty legal cell
    Anywhere,
}

impl Tier {
    /// Whether the move set came from pattern detection
    #[inline]
    pub fn is_tactical(self) -> bool {
        matches!(self, Tier::Threat(..))
    }

    fn from_rank(rank: usize) -> Tier {
        const PATTERNS: [Pattern; 5] = [
            Pattern::Win,
            Pattern::OpenFour,
            Pattern::SemiOpenFour,
            Pattern::OpenThree,
            Pattern::SemiOpenThree,
        ];
        let side = if rank % 2 == 0 { Side::Attack } else { Side::Defend };
        Tier::Threat(PATTERNS[rank / 2], side)
    }
}

#[inline]
fn rank(pattern: Pattern, side: Side) -> usize {
    pattern as usize * 2 + side as usize
}

/// Candidate moves together with the tier that produced them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prioritized {
    pub tier: Tier,
    /// Row-major order
    pub moves: Vec<Pos>,
}

impl Prioritized {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }
}

/// Strongest line pattern of `player` through `pos`, on a board where `pos`
/// already holds the player's stone.
fn strongest_line(board: &Board, pos: Pos, player: Stone) -> Option<Pattern> {
    DIRECTIONS
        .iter()
        .filter_map(|&(dr, dc)| {
            let run = run_through(board, pos, player, dr, dc);
            match (run.len, run.open_ends()) {
                (4, 2) => Some(Pattern::OpenFour),
                (4, 1) => Some(Pattern::SemiOpenFour),
                (3, 2) => Some(Pattern::OpenThree),
                (3, 1) => Some(Pattern::SemiOpenThree),
                _ => None,
            }
        })
        .min()
}

/// Try `pos` for `player` and return the strongest pattern it makes.
///
/// The trial stone is retracted before returning.
pub fn classify<R: Rule>(board: &mut Board, pos: Pos, player: Stone, rule: &R) -> Option<Pattern> {
    board.place_stone(pos, player);
    let pattern = if rule.is_winning_move(board, pos, player) {
        Some(Pattern::Win)
    } else {
        strongest_line(board, pos, player)
    };
    board.remove_stone(pos);
    pattern
}

/// Empty cells the mover may legally play, row-major
fn legal_moves<R: Rule>(board: &mut Board, player: Stone, rule: &R) -> Vec<Pos> {
    let empties: Vec<Pos> = board.empty_positions().collect();
    if !rule.restricts(player) {
        return empties;
    }
    empties
        .into_iter()
        .filter(|&pos| !is_forbidden_at(board, pos, player, rule))
        .collect()
}

/// Prioritized candidate moves for `player`.
///
/// # Arguments
/// * `board` - Position to scan. Trial stones are undone, so it is unchanged on return.
/// * `player` - Side to move
/// * `rule` - Ruleset (forbidden cells are dropped for a restricted mover)
/// * `radius` - Neighborhood radius for the non-tactical fallback
///
/// # Returns
/// The tier that matched and its moves. `moves` is empty only when the mover
/// has no legal move at all.
pub fn prioritized_moves<R: Rule>(
    board: &mut Board,
    player: Stone,
    rule: &R,
    radius: i32,
) -> Prioritized {
    if board.is_board_empty() {
        return Prioritized {
            tier: Tier::Center,
            moves: vec![board.center()],
        };
    }

    let legal = legal_moves(board, player, rule);
    let opponent = player.opponent();

    let mut best_rank = usize::MAX;
    let mut best_moves = Vec::new();

    for &pos in &legal {
        let attack = classify(board, pos, player, rule).map(|p| rank(p, Side::Attack));
        let defend = classify(board, pos, opponent, rule).map(|p| rank(p, Side::Defend));

        let Some(cell_rank) = attack.into_iter().chain(defend).min() else {
            continue;
        };
        if cell_rank < best_rank {
            best_rank = cell_rank;
            best_moves.clear();
            best_moves.push(pos);
        } else if cell_rank == best_rank {
            best_moves.push(pos);
        }
    }

    if !best_moves.is_empty() {
        let tier = Tier::from_rank(best_rank);
        log::trace!("prioritizer: {tier:?} with {} moves", best_moves.len());
        return Prioritized {
            tier,
            moves: best_moves,
        };
    }

    let near: Vec<Pos> = legal
        .iter()
        .copied()
        .filter(|&pos| board.has_neighbor(pos, radius))
        .collect();
    if !near.is_empty() {
        log::trace!("prioritizer: neighborhood with {} moves", near.len());
        return Prioritized {
            tier: Tier::Neighborhood,
            moves: near,
        };
    }

    log::trace!("prioritizer: anywhere with {} moves", legal.len());
    Prioritized {
        tier: Tier::Anywhere,
        moves: legal,
    }
}

/// Unfiltered move generation: legal empty cells within `radius` of a stone.
///
/// On an empty board this is the center cell. Falls back to every legal cell
/// when nothing is near a stone.
pub fn neighborhood_moves<R: Rule>(
    board: &mut Board,
    player: Stone,
    rule: &R,
    radius: i32,
) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }
    let legal = legal_moves(board, player, rule);
    let near: Vec<Pos> = legal
        .iter()
        .copied()
        .filter(|&pos| board.has_neighbor(pos, radius))
        .collect();
    if near.is_empty() {
        legal
    } else {
        near
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Freestyle, Renju};

    #[test]
    fn test_empty_board_returns_center() {
        let mut board = Board::square(15);
        let result = prioritized_moves(&mut board, Stone::Black, &Freestyle, 2);
        assert_eq!(result.tier, Tier::Center);
        assert_eq!(result.moves, vec![Pos::new(7, 7)]);
    }

    #[test]
    fn test_block_open_four() {
        let mut board = Board::square(15);
        for c in 5..9 {
            board.place_stone(Pos::new(7, c), Stone::Black);
        }
        board.place_stone(Pos::new(0, 0), Stone::White);
        board.place_stone(Pos::new(0, 14), Stone::White);
        board.place_stone(Pos::new(14, 0), Stone::White);

        let result = prioritized_moves(&mut board, Stone::White, &Freestyle, 2);
        assert_eq!(result.tier, Tier::Threat(Pattern::Win, Side::Defend));
        assert_eq!(result.moves, vec![Pos::new(7, 4), Pos::new(7, 9)]);
    }

    #[test]
    fn test_own_win_beats_block() {
        let mut board = Board::square(15);
        // Black four on row 3, White four on row 10, Black to move
        for c in 3..7 {
            board.place_stone(Pos::new(3, c), Stone::Black);
            board.place_stone(Pos::new(10, c), Stone::White);
        }
        let result = prioritized_moves(&mut board, Stone::Black, &Freestyle, 2);
        assert_eq!(result.tier, Tier::Threat(Pattern::Win, Side::Attack));
        assert_eq!(result.moves, vec![Pos::new(3, 2), Pos::new(3, 7)]);
    }

    #[test]
    fn test_open_three_makes_open_four_tier() {
        let mut board = Board::square(15);
        for c in 6..9 {
            board.place_stone(Pos::new(7, c), Stone::Black);
        }
        board.place_stone(Pos::new(3, 3), Stone::White);
        board.place_stone(Pos::new(11, 11), Stone::White);

        let result = prioritized_moves(&mut board, Stone::Black, &Freestyle, 2);
        assert_eq!(result.tier, Tier::Threat(Pattern::OpenFour, Side::Attack));
        assert_eq!(result.moves, vec![Pos::new(7, 5), Pos::new(7, 9)]);
    }

    #[test]
    fn test_defend_open_four_threat() {
        let mut board = Board::square(15);
        // White open three, Black has only scattered stones
        for c in 6..9 {
            board.place_stone(Pos::new(7, c), Stone::White);
        }
        board.place_stone(Pos::new(1, 1), Stone::Black);
        board.place_stone(Pos::new(1, 13), Stone::Black);
        board.place_stone(Pos::new(13, 1), Stone::Black);
        board.place_stone(Pos::new(13, 13), Stone::Black);

        let result = prioritized_moves(&mut board, Stone::Black, &Freestyle, 2);
        assert_eq!(result.tier, Tier::Threat(Pattern::OpenFour, Side::Defend));
        assert_eq!(result.moves, vec![Pos::new(7, 5), Pos::new(7, 9)]);
    }

    #[test]
    fn test_neighborhood_fallback() {
        let mut board = Board::square(15);
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(0, 0), Stone::White);

        // Singletons make twos at most, so no tactical tier matches
        let result = prioritized_moves(&mut board, Stone::Black, &Freestyle, 1);
        assert_eq!(result.tier, Tier::Neighborhood);
        assert_eq!(result.len(), 8 + 3);
        assert!(
            result.moves.windows(2).all(|w| (w[0].row, w[0].col) < (w[1].row, w[1].col)),
            "row-major order"
        );
    }

    #[test]
    fn test_renju_excludes_forbidden_cells() {
        let mut board = Board::square(15);
        // (9,9) would make a double three for Black
        board.place_stone(Pos::new(9, 8), Stone::Black);
        board.place_stone(Pos::new(9, 10), Stone::Black);
        board.place_stone(Pos::new(8, 9), Stone::Black);
        board.place_stone(Pos::new(10, 9), Stone::Black);
        for pos in [Pos::new(0, 0), Pos::new(0, 14), Pos::new(14, 0), Pos::new(14, 14)] {
            board.place_stone(pos, Stone::White);
        }

        let free = prioritized_moves(&mut board, Stone::Black, &Freestyle, 2);
        assert!(free.moves.contains(&Pos::new(9, 9)));

        let renju = prioritized_moves(&mut board, Stone::Black, &Renju, 2);
        assert!(!renju.moves.contains(&Pos::new(9, 9)));
        assert!(!renju.is_empty());
    }

    #[test]
    fn test_scan_restores_board() {
        let mut board = Board::square(15);
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);
        board.place_stone(Pos::new(8, 8), Stone::Black);
        board.place_stone(Pos::new(6, 6), Stone::White);
        board.place_stone(Pos::new(9, 9), Stone::Black);
        let before = board.clone();

        let _ = prioritized_moves(&mut board, Stone::White, &Renju, 2);
        let _ = prioritized_moves(&mut board, Stone::Black, &Renju, 2);
        let _ = neighborhood_moves(&mut board, Stone::Black, &Renju, 2);
        assert_eq!(board, before);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let mut board = Board::square(8);
        let all: Vec<Pos> = board.positions().collect();
        for pos in all {
            // Pairs of columns alternate colors; no line reaches five
            let stone = if (pos.col / 2 + pos.row) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place_stone(pos, stone);
        }
        let result = prioritized_moves(&mut board, Stone::Black, &Freestyle, 2);
        assert!(result.is_empty());
        assert!(neighborhood_moves(&mut board, Stone::Black, &Freestyle, 2).is_empty());
    }

    #[test]
    fn test_neighborhood_moves_radius() {
        let mut board = Board::square(15);
        board.place_stone(Pos::new(7, 7), Stone::Black);
        assert_eq!(neighborhood_moves(&mut board, Stone::White, &Freestyle, 1).len(), 8);
        assert_eq!(neighborhood_moves(&mut board, Stone::White, &Freestyle, 2).len(), 24);
    }

    #[test]
    fn test_tier_rank_roundtrip() {
        for pattern in [
            Pattern::Win,
            Pattern::OpenFour,
            Pattern::SemiOpenFour,
            Pattern::OpenThree,
            Pattern::SemiOpenThree,
        ] {
            for side in [Side::Attack, Side::Defend] {
                assert_eq!(Tier::from_rank(rank(pattern, side)), Tier::Threat(pattern, side));
            }
        }
        assert!(Tier::Threat(Pattern::Win, Side::Attack).is_tactical());
        assert!(!Tier::Neighborhood.is_tactical());
    }
}

//! Run-length rewards for Gomoku evaluation
//!
//! A run is rewarded by length only. Open ends do not change the reward, so
//! the evaluator stays symmetric between the two colors.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Score of a won position (from the winner's side)
    pub const WIN: i32 = 1_000_000;

    /// Single stone
    pub const ONE: i32 = 2;
    /// Two in a row
    pub const TWO: i32 = 10;
    /// Three in a row
    pub const THREE: i32 = 50;
    /// Four in a row
    pub const FOUR: i32 = 500;
    /// Five in a row. Longer runs score this much per stone.
    pub const FIVE: i32 = 10_000;
}

/// Reward for a single maximal run of `len` stones.
///
/// | len | reward |
/// |-----|--------|
/// | 1   | 2      |
/// | 2   | 10     |
/// | 3   | 50     |
/// | 4   | 500    |
/// | 5   | 10,000 |
/// | n>5 | 10,000 * n |
#[inline]
#[must_use]
pub const fn run_reward(len: u32) -> i32 {
    match len {
        0 => 0,
        1 => PatternScore::ONE,
        2 => PatternScore::TWO,
        3 => PatternScore::THREE,
        4 => PatternScore::FOUR,
        5 => PatternScore::FIVE,
        #[allow(clippy::cast_possible_wrap)]
        n => PatternScore::FIVE * n as i32,
    }
}

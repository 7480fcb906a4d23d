use std::time::Duration;

use serde::Serialize;

/// Base points for line clears, multiplied by the level at the time of the clear.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

const LINES_PER_LEVEL: usize = 10;
const BASE_DROP_INTERVAL: Duration = Duration::from_millis(1000);
const DROP_INTERVAL_STEP: Duration = Duration::from_millis(50);
const MIN_DROP_INTERVAL: Duration = Duration::from_millis(50);

/// Game statistics tracking score, level, lines cleared and piece count.
///
/// # Scoring
///
/// Clearing `n` rows at once awards `SCORE_TABLE[n] * level` points, where
/// `level` is the level before the clear. Afterwards the level is recomputed as
/// `lines / 10 + 1`. There are no combo, back-to-back or T-spin bonuses.
///
/// # Example
///
/// ```
/// use stackfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_line_clear(4);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.lines(), 4);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    lines: usize,
    level: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Total number of rows cleared.
    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Current level, starting at 1 and increasing every 10 lines.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Number of pieces locked into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of line clears by count.
    ///
    /// - `[0]`: locks that cleared nothing
    /// - `[1]`..`[4]`: singles, doubles, triples and four-line clears
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Delay between two gravity ticks at the current level.
    ///
    /// Starts at 1000ms and shrinks by 50ms per level, never going below 50ms.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        let steps = u32::try_from(self.level - 1).unwrap_or(u32::MAX);
        BASE_DROP_INTERVAL
            .saturating_sub(DROP_INTERVAL_STEP.saturating_mul(steps))
            .max(MIN_DROP_INTERVAL)
    }

    pub fn record_lock(&mut self) {
        self.completed_pieces += 1;
    }

    /// Applies the result of one line-clear pass.
    ///
    /// Counts above 4 (possible only through direct board manipulation) are
    /// scored and counted as four-line clears.
    pub fn record_line_clear(&mut self, cleared_lines: usize) {
        let index = cleared_lines.min(SCORE_TABLE.len() - 1);
        self.line_cleared_counter[index] += 1;
        if cleared_lines == 0 {
            return;
        }
        self.score += SCORE_TABLE[index] * self.level;
        self.lines += cleared_lines;
        self.level = self.lines / LINES_PER_LEVEL + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.lines(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.drop_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_score_is_multiplied_by_level() {
        for (n, &points) in SCORE_TABLE.iter().enumerate().skip(1) {
            let mut stats = GameStats::new();
            stats.lines = 20;
            stats.level = 3;
            stats.record_line_clear(n);
            assert_eq!(stats.score(), points * 3);
        }
    }

    #[test]
    fn test_zero_lines_changes_nothing_but_histogram() {
        let mut stats = GameStats::new();
        stats.record_line_clear(3);
        let before = stats.clone();
        stats.record_line_clear(0);
        assert_eq!(stats.score(), before.score());
        assert_eq!(stats.lines(), before.lines());
        assert_eq!(stats.level(), before.level());
        assert_eq!(stats.line_cleared_counter()[0], 1);
    }

    #[test]
    fn test_four_lines_beat_four_singles() {
        let mut tetris = GameStats::new();
        tetris.record_line_clear(4);

        let mut singles = GameStats::new();
        for _ in 0..4 {
            singles.record_line_clear(1);
        }

        assert_eq!(tetris.score(), 1200);
        assert_eq!(singles.score(), 160);
    }

    #[test]
    fn test_level_follows_lines() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.record_line_clear(1);
            assert_eq!(stats.level(), stats.lines() / 10 + 1);
        }
        assert_eq!(stats.level(), 1);
        stats.record_line_clear(2);
        assert_eq!(stats.lines(), 11);
        assert_eq!(stats.level(), 2);
        // the clear that crosses the boundary is still scored at the old level
        assert_eq!(stats.score(), 9 * 40 + 100);
    }

    #[test]
    fn test_oversized_clear_uses_last_entry() {
        let mut stats = GameStats::new();
        stats.record_line_clear(6);
        assert_eq!(stats.score(), 1200);
        assert_eq!(stats.lines(), 6);
        assert_eq!(stats.line_cleared_counter()[4], 1);
    }

    #[test]
    fn test_drop_interval_floor() {
        let mut stats = GameStats::new();
        stats.level = 2;
        assert_eq!(stats.drop_interval(), Duration::from_millis(950));
        stats.level = 19;
        assert_eq!(stats.drop_interval(), Duration::from_millis(100));
        stats.level = 20;
        assert_eq!(stats.drop_interval(), Duration::from_millis(50));
        stats.level = 500;
        assert_eq!(stats.drop_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_serialization() {
        let mut stats = GameStats::new();
        stats.record_lock();
        stats.record_line_clear(1);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["score"], 40);
        assert_eq!(json["level"], 1);
        assert_eq!(json["completed_pieces"], 1);
        assert_eq!(json["line_cleared_counter"][1], 1);
    }
}

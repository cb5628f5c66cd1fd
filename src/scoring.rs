//! Line-clear scoring and level/speed progression.

use crate::board::Board;
use tracing::info;

pub const MAX_LEVEL: u32 = 10;
/// Level n is left once the score reaches `LEVEL_SCORE_STEP * n`.
pub const LEVEL_SCORE_STEP: u32 = 600;

/// Points for rows cleared in one pass. Fixed table, not a formula.
pub fn score_for_clear(lines: i32) -> u32 {
    match lines {
        1 => 100,
        2 => 300,
        3 => 700,
        4 => 1500,
        _ => 0,
    }
}

/// Score, level and the speed counter shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub speed: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            speed: 1,
        }
    }
}

impl Progress {
    /// Adds points; returns true when this raised the level.
    pub fn award(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if points == 0 || self.score < LEVEL_SCORE_STEP.saturating_mul(self.level) {
            return false;
        }
        if self.level < MAX_LEVEL && self.score != 0 {
            self.level += 1;
            self.speed += 1;
            return true;
        }
        false
    }
}

/// Outcome of one scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearReport {
    pub lines: usize,
    pub points: u32,
    pub leveled_up: bool,
}

/// Clears full rows, scores them and advances level/speed.
pub fn apply_scoring(board: &mut Board, progress: &mut Progress) -> ClearReport {
    let lines = board.clear_full_rows();
    let points = score_for_clear(i32::try_from(lines).unwrap_or(i32::MAX));
    let leveled_up = progress.award(points);
    if leveled_up {
        info!(level = progress.level, speed = progress.speed, score = progress.score, "level up");
    }
    ClearReport {
        lines,
        points,
        leveled_up,
    }
}

//! Engine tunables. The binary fills this from CLI flags; `Default` is the classic timing.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Gravity interval before level and per-piece acceleration are taken off.
    pub base_interval_ms: u64,
    /// Taken off the interval per level.
    pub level_step_ms: u64,
    /// Per-piece acceleration: starting value and growth per gravity step.
    pub accel_step_ms: u64,
    /// Seed for the piece generator; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Draw the landing preview.
    pub show_ghost: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 1000,
            level_step_ms: 70,
            accel_step_ms: 15,
            seed: None,
            show_ghost: true,
        }
    }
}

impl GameConfig {
    /// `base - level * level_step - accel`, floored at zero.
    pub fn gravity_interval(&self, level: u32, piece_accel_ms: u64) -> Duration {
        let ms = self
            .base_interval_ms
            .saturating_sub(u64::from(level).saturating_mul(self.level_step_ms))
            .saturating_sub(piece_accel_ms);
        Duration::from_millis(ms)
    }
}

//! One play-through: poll input, tick, draw, until the game ends. Renderer,
//! input and score storage are passed in so the loop runs headless in tests.

use crate::game::{EndReason, Frame, GameState};
use crate::highscores::ScoreStore;
use crate::input::{InputSource, key_to_action};
use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

/// Draws one frame. Called once per loop iteration.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub level: u32,
    /// Record before this session.
    pub best_before: u32,
    pub new_record: bool,
    pub reason: EndReason,
}

/// Runs `game` to completion. A failed high-score write is logged and does not
/// fail the session; input and renderer errors do.
pub fn run_session<I, R, S>(
    mut game: GameState,
    input: &mut I,
    renderer: &mut R,
    store: &S,
) -> Result<SessionSummary>
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
    S: ScoreStore + ?Sized,
{
    let best_before = store.read();
    info!(best = best_before, "session start");
    loop {
        let action = input.poll_key()?.and_then(key_to_action);
        let report = game.tick(Instant::now(), action);
        renderer.draw(&game.frame())?;
        if let Some(reason) = report.ended {
            let progress = game.progress();
            let new_record = match store.update(progress.score) {
                Ok(stored) => stored,
                Err(e) => {
                    warn!(error = %e, "could not save high score");
                    false
                }
            };
            info!(score = progress.score, ?reason, new_record, "session over");
            return Ok(SessionSummary {
                score: progress.score,
                level: progress.level,
                best_before,
                new_record,
                reason,
            });
        }
    }
}

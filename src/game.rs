//! Game state: board, current and next piece, progress, pause, and the tick
//! state machine that applies input, gravity, locking and scoring.

use crate::board::Board;
use crate::config::GameConfig;
use crate::input::Action;
use crate::overlay::Overlay;
use crate::piece::Piece;
use crate::rules::{self, Direction};
use crate::scoring::{self, Progress};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, info};

/// Running or paused. Whether the game has started at all is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseState {
    #[default]
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Next piece not generated yet.
    Spawning,
    Falling,
    Paused,
    /// Current piece is being written into the board.
    Locking,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// A block reached row 0.
    ToppedOut,
    /// Player pressed quit.
    Quit,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub gravity_step: bool,
    pub locked: bool,
    pub lines_cleared: usize,
    pub points: u32,
    pub leveled_up: bool,
    pub ended: Option<EndReason>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub board: &'a Board,
    pub overlay: Overlay,
    pub next: Option<&'a Piece>,
    pub progress: Progress,
    pub pause: PauseState,
    pub phase: Phase,
}

#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    current: Piece,
    next: Option<Piece>,
    progress: Progress,
    pause: PauseState,
    started: bool,
    exit_requested: bool,
    phase: Phase,
    end_reason: Option<EndReason>,
    /// Grows every gravity step since the current piece spawned.
    piece_accel_ms: u64,
    last_gravity: Instant,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: &GameConfig, now: Instant) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let current = Piece::spawn(&mut rng);
        Self::with_rng(config, Board::new(), current, rng, now)
    }

    /// Starts from a given board and current piece; later pieces come from `config.seed`.
    pub fn from_parts(config: &GameConfig, board: Board, current: Piece, now: Instant) -> Self {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_default());
        Self::with_rng(config, board, current, rng, now)
    }

    fn with_rng(
        config: &GameConfig,
        board: Board,
        current: Piece,
        rng: StdRng,
        now: Instant,
    ) -> Self {
        Self {
            config: config.clone(),
            board,
            current,
            next: None,
            progress: Progress::default(),
            pause: PauseState::Running,
            started: false,
            exit_requested: false,
            phase: Phase::Spawning,
            end_reason: None,
            piece_accel_ms: config.accel_step_ms,
            last_gravity: now,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn pause(&self) -> PauseState {
        self.pause
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn piece_accel_ms(&self) -> u64 {
        self.piece_accel_ms
    }

    /// Current gravity threshold.
    pub fn gravity_interval(&self) -> std::time::Duration {
        self.config
            .gravity_interval(self.progress.level, self.piece_accel_ms)
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, "phase");
            self.phase = phase;
        }
    }

    /// Generates the queued piece if missing and leaves the spawning phase.
    fn finish_spawn(&mut self) {
        if self.next.is_none() {
            self.next = Some(Piece::spawn(&mut self.rng));
        }
        self.started = true;
        let phase = match self.pause {
            PauseState::Running => Phase::Falling,
            PauseState::Paused => Phase::Paused,
        };
        self.set_phase(phase);
    }

    /// Applies one player action. Moves and rotation only while running,
    /// pause only once the game has started, quit at any time.
    pub fn apply(&mut self, action: Action) {
        if self.is_terminated() {
            return;
        }
        match action {
            Action::Quit => self.exit_requested = true,
            Action::Pause => self.toggle_pause(),
            _ if self.pause == PauseState::Paused => {}
            Action::MoveLeft => {
                rules::move_piece(&mut self.current, Direction::Left, &self.board);
            }
            Action::MoveRight => {
                rules::move_piece(&mut self.current, Direction::Right, &self.board);
            }
            Action::SoftDrop => {
                rules::move_piece(&mut self.current, Direction::Down, &self.board);
            }
            Action::Rotate => {
                rules::rotate(&mut self.current, &self.board);
            }
        }
    }

    fn toggle_pause(&mut self) {
        if !self.started {
            return;
        }
        self.pause = match self.pause {
            PauseState::Running => PauseState::Paused,
            PauseState::Paused => PauseState::Running,
        };
        info!(pause = ?self.pause, "pause toggled");
        let phase = match self.pause {
            PauseState::Running => Phase::Falling,
            PauseState::Paused => Phase::Paused,
        };
        self.set_phase(phase);
    }

    /// One loop iteration: spawn bookkeeping, the polled action, gravity if due,
    /// scoring, then the loss and exit checks.
    pub fn tick(&mut self, now: Instant, action: Option<Action>) -> TickReport {
        let mut report = TickReport::default();
        if self.is_terminated() {
            report.ended = self.end_reason;
            return report;
        }
        if self.phase == Phase::Spawning {
            self.finish_spawn();
        }

        if let Some(action) = action {
            self.apply(action);
        }

        if self.pause == PauseState::Running
            && now.saturating_duration_since(self.last_gravity) > self.gravity_interval()
        {
            self.gravity_step(now, &mut report);
        }

        let clear = scoring::apply_scoring(&mut self.board, &mut self.progress);
        if clear.lines > 0 {
            debug!(lines = clear.lines, points = clear.points, score = self.progress.score, "rows cleared");
        }
        report.lines_cleared = clear.lines;
        report.points = clear.points;
        report.leveled_up = clear.leveled_up;

        if self.board.top_row_filled() {
            self.terminate(EndReason::ToppedOut);
        } else if self.exit_requested {
            self.terminate(EndReason::Quit);
        } else if self.phase == Phase::Spawning {
            self.finish_spawn();
        }
        report.ended = self.end_reason;
        report
    }

    /// Locks a grounded piece and promotes the next one, then lets the current
    /// piece fall a row.
    fn gravity_step(&mut self, now: Instant, report: &mut TickReport) {
        self.last_gravity = now;
        report.gravity_step = true;

        if rules::touches_below(&self.current, &self.board) {
            self.set_phase(Phase::Locking);
            self.board.lock_piece(&self.current);
            debug!(kind = ?self.current.kind(), x = self.current.x, y = self.current.y, "piece locked");
            self.current = match self.next.take() {
                Some(piece) => piece,
                None => Piece::spawn(&mut self.rng),
            };
            self.piece_accel_ms = self.config.accel_step_ms;
            report.locked = true;
            self.set_phase(Phase::Spawning);
        }

        rules::move_piece(&mut self.current, Direction::Down, &self.board);
        self.piece_accel_ms = self.piece_accel_ms.saturating_add(self.config.accel_step_ms);
    }

    fn terminate(&mut self, reason: EndReason) {
        info!(?reason, score = self.progress.score, level = self.progress.level, "game over");
        self.end_reason = Some(reason);
        self.set_phase(Phase::Terminated);
    }

    /// Snapshot for the renderer; the overlay is built fresh each call.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            board: &self.board,
            overlay: Overlay::compose(&self.current, &self.board, self.config.show_ghost),
            next: self.next.as_ref(),
            progress: self.progress,
            pause: self.pause,
            phase: self.phase,
        }
    }
}

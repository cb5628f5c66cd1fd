//! App: terminal init, main menu loop, and the crossterm/ratatui adapters the
//! session runs against.

use crate::theme::Theme;
use crate::ui;
use anyhow::Result;
use brickgame::config::GameConfig;
use brickgame::game::{Frame as GameFrame, GameState};
use brickgame::highscores::{FileScoreStore, ScoreStore};
use brickgame::input::InputSource;
use brickgame::session::{Renderer, SessionSummary, run_session};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Exit,
}

impl MenuChoice {
    fn toggled(self) -> Self {
        match self {
            Self::Start => Self::Exit,
            Self::Exit => Self::Start,
        }
    }
}

/// Polls crossterm for at most `timeout` per call so the loop does not spin.
struct CrosstermInput {
    timeout: Duration,
}

impl InputSource for CrosstermInput {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        if event::poll(self.timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

struct TerminalRenderer<'a> {
    terminal: &'a mut DefaultTerminal,
    theme: &'a Theme,
    best: u32,
}

impl Renderer for TerminalRenderer<'_> {
    fn draw(&mut self, frame: &GameFrame<'_>) -> Result<()> {
        let (theme, best) = (self.theme, self.best);
        self.terminal
            .draw(|f| ui::draw_game(f, frame, theme, best))?;
        Ok(())
    }
}

pub struct App {
    config: GameConfig,
    theme: Theme,
    store: FileScoreStore,
    poll_timeout: Duration,
    skip_menu: bool,
    selected: MenuChoice,
    best: u32,
    last: Option<SessionSummary>,
}

impl App {
    pub fn new(
        config: GameConfig,
        theme: Theme,
        store: FileScoreStore,
        poll_timeout: Duration,
        skip_menu: bool,
    ) -> Self {
        let best = store.read();
        Self {
            config,
            theme,
            store,
            poll_timeout,
            skip_menu,
            selected: MenuChoice::Start,
            best,
            last: None,
        }
    }

    /// Takes over the terminal, runs until the player exits, and restores it
    /// whether or not the loop failed.
    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            cursor::{Hide, Show},
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        let leave = execute!(std::io::stdout(), Show, LeaveAlternateScreen);
        disable_raw_mode()?;
        leave?;
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        if self.skip_menu {
            return self.play(terminal);
        }
        loop {
            terminal.draw(|f| {
                ui::draw_menu(f, &self.theme, self.selected, self.last.as_ref(), self.best);
            })?;

            if !event::poll(self.poll_timeout)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Up | KeyCode::Down | KeyCode::Char('k' | 'j') => {
                    self.selected = self.selected.toggled();
                }
                KeyCode::Enter | KeyCode::Char(' ') => match self.selected {
                    MenuChoice::Start => self.play(terminal)?,
                    MenuChoice::Exit => break,
                },
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => break,
                _ => {}
            }
        }
        info!("exit from menu");
        Ok(())
    }

    fn play(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let game = GameState::new(&self.config, Instant::now());
        let mut input = CrosstermInput {
            timeout: self.poll_timeout,
        };
        let mut renderer = TerminalRenderer {
            terminal,
            theme: &self.theme,
            best: self.best,
        };
        let summary = run_session(game, &mut input, &mut renderer, &self.store)?;
        self.best = self.best.max(summary.score);
        self.last = Some(summary);
        Ok(())
    }
}

//! brickgame: classic falling-block puzzle in the terminal.

mod app;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use brickgame::config::GameConfig;
use brickgame::highscores::FileScoreStore;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path, &args.log)?;
    }

    let config = GameConfig {
        base_interval_ms: args.base_interval_ms,
        seed: args.seed,
        show_ghost: !args.no_ghost,
        ..GameConfig::default()
    };
    let store = match args.highscore_file {
        Some(path) => FileScoreStore::new(path),
        None => FileScoreStore::default(),
    };
    tracing::info!(?config, highscore = %store.path().display(), "starting");

    let theme = theme::Theme::for_palette(args.palette);
    let mut app = App::new(
        config,
        theme,
        store,
        Duration::from_millis(args.poll_ms),
        args.no_menu,
    );
    app.run()
}

/// Logs go to a file; stdout belongs to the game.
fn init_logging(path: &Path, filter: &str) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Classic brick game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "brickgame",
    version,
    about = "Classic falling-block puzzle in the terminal. Fill rows to clear them; the game ends when the stack reaches the top.",
    long_about = "brickgame is a 20x14 falling-block puzzle.\n\n\
        Pieces fall one row per gravity step. A piece that cannot fall further locks into the \
        board; full rows are cleared and scored (1/2/3/4 rows = 100/300/700/1500). Every 600 \
        points raises the level (max 10) and speeds up gravity.\n\n\
        CONTROLS:\n  Left/Right or h/l  Move     Down or j  Soft drop\n  R, Up or k         Rotate   P          Pause\n  Q / Esc            Quit"
)]
pub struct Args {
    /// Skip the main menu and start a game immediately; exit when it ends.
    #[arg(long)]
    pub no_menu: bool,

    /// Seed for the piece generator (same seed, same pieces).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Hide the landing preview.
    #[arg(long)]
    pub no_ghost: bool,

    /// Gravity interval at level 0 before per-piece acceleration, in ms.
    #[arg(long, default_value = "1000", value_name = "MS")]
    pub base_interval_ms: u64,

    /// High score file. Defaults to $XDG_CONFIG_HOME/brickgame/highscore.txt.
    #[arg(long, value_name = "FILE")]
    pub highscore_file: Option<PathBuf>,

    /// Colour palette: normal or high-contrast.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Longest wait for a key per frame, in ms.
    #[arg(long, default_value = "16", value_name = "MS")]
    pub poll_ms: u64,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter (tracing EnvFilter syntax).
    #[arg(long, default_value = "info")]
    pub log: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["brickgame"]);
        assert!(!args.no_menu);
        assert_eq!(args.base_interval_ms, 1000);
        assert_eq!(args.poll_ms, 16);
        assert_eq!(args.palette, Palette::Normal);
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "brickgame",
            "--no-menu",
            "--seed",
            "9",
            "--no-ghost",
            "--palette",
            "contrast",
        ]);
        assert!(args.no_menu);
        assert_eq!(args.seed, Some(9));
        assert!(args.no_ghost);
        assert_eq!(args.palette, Palette::HighContrast);
    }
}

//! Brick game engine: a 20×14 falling-block puzzle with a landing preview,
//! line-clear scoring and level-based gravity.
//!
//! Everything here is terminal-agnostic; the `brickgame` binary supplies the
//! crossterm input, the ratatui renderer and the on-disk high score.

pub mod board;
pub mod config;
pub mod game;
pub mod highscores;
pub mod input;
pub mod overlay;
pub mod piece;
pub mod rules;
pub mod scoring;
pub mod session;

//! Best score persisted as one decimal in a text file
//! (XDG config or ~/.config/brickgame/highscore.txt).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const DIR_NAME: &str = "brickgame";
const FILENAME: &str = "highscore.txt";

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("could not create {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Where the best score lives. Reads never fail: a missing or unreadable
/// record counts as zero.
pub trait ScoreStore {
    fn read(&self) -> u32;

    fn write(&self, score: u32) -> Result<(), HighScoreError>;

    /// Stores `score` if it beats the record. Returns whether it did.
    fn update(&self, score: u32) -> Result<bool, HighScoreError> {
        if score > self.read() {
            self.write(score)?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/brickgame/highscore.txt`, else `$HOME/.config/...`,
    /// else `./highscore.txt`.
    pub fn default_path() -> PathBuf {
        let config_dir = match std::env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => Some(PathBuf::from(xdg)),
            _ => std::env::var("HOME")
                .ok()
                .filter(|h| !h.is_empty())
                .map(|h| PathBuf::from(h).join(".config")),
        };
        match config_dir {
            Some(dir) => dir.join(DIR_NAME).join(FILENAME),
            None => PathBuf::from(FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl ScoreStore for FileScoreStore {
    fn read(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(content) => content.trim().parse().unwrap_or_else(|_| {
                debug!(path = %self.path.display(), "high score file is not a number");
                0
            }),
            Err(_) => 0,
        }
    }

    fn write(&self, score: u32) -> Result<(), HighScoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| HighScoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, score.to_string()).map_err(|source| HighScoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

//! Persistence port: the last score and the chosen grid.
//!
//! Nothing else survives a restart.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::GridSize;
use crate::error::StoreError;

/// Key-value style store for progress that outlives a session.
pub trait ScoreStore {
    fn save_score(&mut self, score: u32) -> Result<(), StoreError>;

    /// `None` when no score has been saved.
    fn load_score(&self) -> Result<Option<u32>, StoreError>;

    fn save_grid_choice(&mut self, grid: GridSize) -> Result<(), StoreError>;

    /// `None` when no grid has been chosen yet.
    fn load_grid_choice(&self) -> Result<Option<GridSize>, StoreError>;
}

/// Store kept in memory for the life of the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    score: Option<u32>,
    grid: Option<GridSize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn save_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.score = Some(score);
        Ok(())
    }

    fn load_score(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.score)
    }

    fn save_grid_choice(&mut self, grid: GridSize) -> Result<(), StoreError> {
        self.grid = Some(grid);
        Ok(())
    }

    fn load_grid_choice(&self) -> Result<Option<GridSize>, StoreError> {
        Ok(self.grid)
    }
}

/// On-disk document.
///
/// The grid is kept as `"rows,cols"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct StoredProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    grid: Option<String>,
}

/// Store backed by a single JSON file.
///
/// Every save rewrites the whole document. A missing file reads as empty.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use the file at `path`, creating parent directories on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read(&self) -> Result<StoredProgress, StoreError> {
        if !self.path.exists() {
            return Ok(StoredProgress::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if contents.trim().is_empty() {
            return Ok(StoredProgress::default());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write(&self, progress: &StoredProgress) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let json = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        tracing::debug!("Saved progress to {}", self.path.display());
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn save_score(&mut self, score: u32) -> Result<(), StoreError> {
        let mut progress = self.read()?;
        progress.score = Some(score);
        self.write(&progress)
    }

    fn load_score(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.read()?.score)
    }

    fn save_grid_choice(&mut self, grid: GridSize) -> Result<(), StoreError> {
        let mut progress = self.read()?;
        progress.grid = Some(grid.to_string());
        self.write(&progress)
    }

    fn load_grid_choice(&self) -> Result<Option<GridSize>, StoreError> {
        let Some(raw) = self.read()?.grid else {
            return Ok(None);
        };

        match raw.parse::<GridSize>() {
            Ok(grid) => Ok(Some(grid)),
            Err(err) => {
                tracing::warn!(
                    "Ignoring unreadable grid choice in {}: {}",
                    self.path.display(),
                    err
                );
                Ok(None)
            }
        }
    }
}

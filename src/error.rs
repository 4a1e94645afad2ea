//! Error types.
//!
//! Nothing in normal play is fatal. These errors surface the few conditions a
//! host may want to react to: a grid that does not fit, or a store that
//! cannot be read or written.

use thiserror::Error;

use crate::core::GridSize;

/// A grid that cannot be laid out in the configured area.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("grid {grid} has no cells")]
    EmptyGrid { grid: GridSize },

    #[error(
        "grid {grid} needs {required_width}x{required_height} but only \
         {available_width}x{available_height} is available"
    )]
    DoesNotFit {
        grid: GridSize,
        required_width: f32,
        required_height: f32,
        available_width: f32,
        available_height: f32,
    },
}

/// A persisted grid choice that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    #[error("expected \"rows,cols\", got {0:?}")]
    MissingSeparator(String),

    #[error("invalid grid dimension {0:?}")]
    InvalidDimension(String),
}

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode or decode store document")]
    Format(#[from] serde_json::Error),
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

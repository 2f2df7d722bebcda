//! Error types

use thiserror::Error;

/// Session setup failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("invalid playfield {width}x{height}: dimensions must be finite and positive")]
    InvalidPlayfield { width: f32, height: f32 },

    #[error("playfield width {width} is too narrow, at least {required} is needed")]
    PlayfieldTooNarrow { width: f32, required: f32 },
}

/// Settings parsing and validation failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Playfield(#[from] SessionError),

    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

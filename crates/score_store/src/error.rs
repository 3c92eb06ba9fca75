use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading line {line} in {path}: {source}")]
    IoLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON at {path}:{line}: {source}")]
    JsonLineParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing score header line in {path}")]
    MissingHeader { path: PathBuf },

    #[error("line {line} in {path} must be a score header record")]
    InvalidHeaderRecord { path: PathBuf, line: usize },

    #[error("line {line} in {path} must be a score record")]
    InvalidScoreRecord { path: PathBuf, line: usize },

    #[error("line {line} in {path} has unsupported score file version {found}; expected 1")]
    UnsupportedVersion {
        path: PathBuf,
        line: usize,
        found: u32,
    },

    #[error("score file {path} is for game '{found}'; expected '{expected}'")]
    GameMismatch {
        path: PathBuf,
        found: String,
        expected: &'static str,
    },

    #[error("no score entry at row {index} in {path}")]
    NoSuchEntry { path: PathBuf, index: usize },

    #[error("failed to serialize score line for {path}: {source}")]
    JsonSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to format current UTC timestamp as RFC3339: {0}")]
    ClockFormat(#[source] time::error::Format),
}

impl StoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn io_line(path: impl Into<PathBuf>, line: usize, source: std::io::Error) -> Self {
        Self::IoLine {
            path: path.into(),
            line,
            source,
        }
    }

    #[must_use]
    pub fn json_line(path: impl Into<PathBuf>, line: usize, source: serde_json::Error) -> Self {
        Self::JsonLineParse {
            path: path.into(),
            line,
            source,
        }
    }

    #[must_use]
    pub fn json_serialize(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonSerialize {
            path: path.into(),
            source,
        }
    }
}

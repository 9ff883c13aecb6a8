//! Error types for picture decoding and storage

use std::path::PathBuf;

use thiserror::Error;

/// A persisted picture record could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("record {record}: expected 7 fields, found {found}")]
    FieldCount { record: usize, found: usize },
    #[error("record {record}, field {field}: `{value}` is not a number")]
    InvalidNumber {
        record: usize,
        field: usize,
        value: String,
    },
    #[error("record {record}: colour channel {channel} is `{value}`, outside [0, 1]")]
    ColourOutOfRange {
        record: usize,
        channel: usize,
        value: String,
    },
}

/// Reading or writing a file failed
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: corrupt picture: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("{}: bad settings: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short text suitable for a notification
    pub fn summary(&self) -> &'static str {
        match self {
            StorageError::Io { .. } => "Could not access storage",
            StorageError::Parse { .. } => "Saved picture was corrupt",
            StorageError::Settings { .. } => "Settings file was invalid",
        }
    }
}

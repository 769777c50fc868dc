use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Failure categories reported to callers of [`crate::convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Archive,
    Io,
    InvalidFormat,
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("EPUB file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read EPUB {}: {reason}", path.display())]
    Archive { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown output format: {0} (expected 'txt' or 'md')")]
    UnknownFormat(String),
}

impl ConvertError {
    pub(crate) fn archive(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ConvertError::Archive {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::NotFound { .. } => ErrorKind::NotFound,
            ConvertError::Archive { .. } => ErrorKind::Archive,
            ConvertError::Io { .. } => ErrorKind::Io,
            ConvertError::UnknownFormat(_) => ErrorKind::InvalidFormat,
        }
    }
}

// errors.rs
use std::fmt;

/// Errors that stop the pipeline before a snapshot exists. Field-level
/// malformation is never represented here: bad cells degrade to defaults
/// inside normalization and the row survives.
#[derive(Debug)]
pub enum LoadError {
    /// The required primary source file is missing or unreadable.
    PrimarySource(String),
    Io(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::PrimarySource(msg) => write!(f, "Primary source unavailable: {msg}"),
            LoadError::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

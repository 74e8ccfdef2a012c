//! Error types for file I/O

use thiserror::Error;

/// File I/O errors
#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode audio: {0}")]
    Decode(String),

    #[error("failed to encode audio: {0}")]
    Encode(String),

    #[error("malformed TextGrid: {0}")]
    TextGrid(String),
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

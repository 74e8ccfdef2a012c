//! Error types for signal transforms

use thiserror::Error;

/// Signal transform errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DspError {
    #[error("invalid sample rate: {0} Hz")]
    InvalidRate(u32),

    #[error("cannot normalize an all-zero buffer")]
    DegenerateAudio,
}

/// Result type for signal transforms
pub type DspResult<T> = Result<T, DspError>;

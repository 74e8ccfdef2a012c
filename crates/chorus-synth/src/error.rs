//! Error types for synthesis

use thiserror::Error;

/// Synthesis errors
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Extraction produced no usable segments for this source file. Callers
    /// should skip the output file and continue the batch.
    #[error("no usable segments extracted from the source annotation")]
    NoSegments,

    #[error(transparent)]
    Dsp(#[from] chorus_dsp::DspError),
}

/// Result type for synthesis operations
pub type SynthResult<T> = Result<T, SynthesisError>;

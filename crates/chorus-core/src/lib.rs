//! Chorus Core — shared leaf types
//!
//! Types used across the synthesis workspace:
//! - [`AudioBuffer`] — interleaved f64 audio with channel count and sample rate
//! - [`Interval`] / [`IntervalTier`] — a single labeled annotation tier

mod annotation;
mod buffer;

pub use annotation::{Interval, IntervalTier};
pub use buffer::AudioBuffer;

/// Label recorded for every placed overlap group.
pub const OVERLAP_LABEL: &str = "OV";

/// Label used to fill unannotated time.
pub const SILENCE_LABEL: &str = "silence";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

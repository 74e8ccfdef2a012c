//! Chorus Synth — synthetic overlapping-vocalization generator
//!
//! Builds labeled training audio from a source recording and its annotation:
//!
//! ```text
//! source audio + annotation
//!        │
//!        ▼
//!  extract_segments ──► segment pool
//!        │
//!        ▼
//!  SynthesisEngine ──► mix_segments + effect chain, group by group
//!        │
//!        ▼
//!  output buffer + "OV" intervals ──► cover_timeline ──► final annotation
//! ```
//!
//! Every stochastic decision draws from one seeded generator owned by the
//! engine, so a seed plus an input set fully determines the output.

mod config;
mod engine;
mod error;
mod mixer;
mod segment;
mod timeline;

pub use config::{AmplitudeModulation, EffectsConfig, SynthesisConfig};
pub use engine::{SynthesisEngine, SynthesisOutput};
pub use error::{SynthResult, SynthesisError};
pub use mixer::mix_segments;
pub use segment::{Segment, extract_segments};
pub use timeline::cover_timeline;

//! Chorus DSP — stateless signal transforms
//!
//! Numeric operations the synthesis engine builds on:
//! - FFT-based resampling ([`resample`])
//! - Peak normalization ([`normalize`])
//! - Pitch-shift / time-stretch approximations ([`pitch_shift`], [`time_stretch`])
//! - Amplitude modulation ([`amplitude_modulate`])
//! - Gaussian noise injection at a target SNR ([`add_noise`])
//! - The ordered effect chain ([`Effect`], [`apply_chain`])
//!
//! All transforms are deterministic except [`add_noise`], which draws from the
//! caller-supplied random source.

mod effects;
mod error;
mod resample;
mod transforms;

pub use effects::{Effect, apply_chain};
pub use error::{DspError, DspResult};
pub use resample::resample;
pub use transforms::{add_noise, amplitude_modulate, normalize, pitch_shift, time_stretch};

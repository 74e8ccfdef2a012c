//! Effect chain applied to mixed overlap groups
//!
//! A closed set of tagged operations applied in a fixed order rather than a
//! polymorphic processor hierarchy; the scheduler only needs to know that a
//! chain maps one buffer to another and may change its length.

use chorus_core::AudioBuffer;

use crate::transforms::{amplitude_modulate, pitch_shift, time_stretch};

/// One enabled effect.
///
/// Chains are applied in declaration order: pitch shift, then time stretch,
/// then amplitude modulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Pitch shift in semitones (duration preserved)
    PitchShift { semitones: f64 },
    /// Time stretch factor (changes length)
    TimeStretch { factor: f64 },
    /// Amplitude modulation with `frequency` Hz and `depth` in [0, 1]
    AmplitudeModulation { frequency: f64, depth: f64 },
}

impl Effect {
    /// Apply this effect to a buffer.
    pub fn apply(&self, buffer: AudioBuffer) -> AudioBuffer {
        match *self {
            Self::PitchShift { semitones } => pitch_shift(&buffer, semitones),
            Self::TimeStretch { factor } => time_stretch(&buffer, factor),
            Self::AmplitudeModulation { frequency, depth } => {
                let mut buffer = buffer;
                amplitude_modulate(&mut buffer, frequency, depth);
                buffer
            }
        }
    }

    /// Effect name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PitchShift { .. } => "pitch_shift",
            Self::TimeStretch { .. } => "time_stretch",
            Self::AmplitudeModulation { .. } => "amplitude_modulation",
        }
    }
}

/// Run a buffer through every effect in order.
///
/// The output length may differ from the input length (time stretch);
/// callers must re-derive the written extent from the returned buffer.
pub fn apply_chain(effects: &[Effect], buffer: AudioBuffer) -> AudioBuffer {
    effects
        .iter()
        .fold(buffer, |buffer, effect| effect.apply(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(frames: usize) -> AudioBuffer {
        let samples = (0..frames).map(|i| i as f64 / frames as f64).collect();
        AudioBuffer::from_samples(samples, 1, 16000)
    }

    #[test]
    fn empty_chain_is_identity() {
        let buf = ramp(100);
        assert_eq!(apply_chain(&[], buf.clone()), buf);
    }

    #[test]
    fn stretch_in_chain_changes_length() {
        let chain = [
            Effect::PitchShift { semitones: 2.0 },
            Effect::TimeStretch { factor: 0.5 },
            Effect::AmplitudeModulation {
                frequency: 3.0,
                depth: 0.2,
            },
        ];
        let out = apply_chain(&chain, ramp(1000));
        assert_eq!(out.frames(), 500);
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(Effect::PitchShift { semitones: 1.0 }.name(), "pitch_shift");
        assert_eq!(Effect::TimeStretch { factor: 2.0 }.name(), "time_stretch");
    }
}

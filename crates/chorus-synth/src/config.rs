//! Configuration types for synthesis

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use chorus_dsp::Effect;

/// Parameters of one synthesis run. Immutable once the engine is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Duration of each generated file in seconds
    pub file_length_seconds: f64,

    /// Minimum overlap fraction between group members, in [0, 1].
    /// Range-checked but not consulted by the scheduler.
    // TODO: enforce a minimum overlap fraction when placing groups.
    pub min_overlap_percentage: f64,

    /// Upper bound on the number of segments mixed into one group (>= 1)
    pub max_overlaps: usize,

    /// Gain applied to every segment before its per-segment jitter, in [0, 1]
    pub amplitude_scaling: f64,

    /// Peak-normalize the finished buffer
    pub normalize_output: bool,

    /// Silence inserted after each placed group, in milliseconds
    pub silence_duration_ms: u32,

    /// Lowercased label -> inclusion probability in [0, 1]
    pub label_probabilities: HashMap<String, f64>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            file_length_seconds: 60.0,
            min_overlap_percentage: 0.3,
            max_overlaps: 3,
            amplitude_scaling: 0.7,
            normalize_output: true,
            silence_duration_ms: 500,
            label_probabilities: HashMap::new(),
        }
    }
}

/// Optional signal-distortion effects, each independently enabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Pitch shift in semitones
    pub pitch_shift: Option<f64>,

    /// Time stretch factor (> 0)
    pub time_stretch: Option<f64>,

    /// Amplitude modulation parameters
    pub amplitude_modulation: Option<AmplitudeModulation>,
}

/// Amplitude modulation parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmplitudeModulation {
    /// Modulator frequency in Hz
    pub frequency: f64,
    /// Modulation depth in [0, 1]
    pub depth: f64,
}

impl EffectsConfig {
    /// True when no effect is enabled.
    pub fn is_empty(&self) -> bool {
        self.pitch_shift.is_none()
            && self.time_stretch.is_none()
            && self.amplitude_modulation.is_none()
    }

    /// Render the enabled effects as an ordered chain:
    /// pitch shift, then time stretch, then amplitude modulation.
    pub fn chain(&self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(semitones) = self.pitch_shift {
            effects.push(Effect::PitchShift { semitones });
        }
        if let Some(factor) = self.time_stretch {
            effects.push(Effect::TimeStretch { factor });
        }
        if let Some(modulation) = self.amplitude_modulation {
            effects.push(Effect::AmplitudeModulation {
                frequency: modulation.frequency,
                depth: modulation.depth,
            });
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_keeps_fixed_order() {
        let config = EffectsConfig {
            pitch_shift: Some(-2.0),
            time_stretch: Some(1.2),
            amplitude_modulation: Some(AmplitudeModulation {
                frequency: 4.0,
                depth: 0.5,
            }),
        };
        let chain = config.chain();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0], Effect::PitchShift { semitones: -2.0 });
        assert_eq!(chain[1], Effect::TimeStretch { factor: 1.2 });
        assert_eq!(
            chain[2],
            Effect::AmplitudeModulation {
                frequency: 4.0,
                depth: 0.5
            }
        );
    }

    #[test]
    fn disabled_effects_yield_empty_chain() {
        let config = EffectsConfig::default();
        assert!(config.is_empty());
        assert!(config.chain().is_empty());
    }
}

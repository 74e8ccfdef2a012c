//! TOML settings file with range validation
//!
//! The file mirrors the on-disk layout the field teams already use: paths,
//! synthesis parameters, effect toggles, the label-probability table, and
//! output/logging options. Everything is range-checked here so the synthesis
//! crates can assume validated values.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;

use chorus_synth::{AmplitudeModulation, EffectsConfig, SynthesisConfig};

/// Top-level settings file.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub paths: Paths,
    pub synthesis: Synthesis,
    pub audio_effects: AudioEffects,
    pub audio: Audio,
    /// Label -> inclusion probability (keys are lowercased on conversion)
    pub labels: HashMap<String, f64>,
    pub output: Output,
    pub logging: Logging,
}

#[derive(Debug, Deserialize)]
pub struct Paths {
    pub input_wav_dir: PathBuf,
    pub input_textgrid_dir: PathBuf,
    pub output_wav_dir: PathBuf,
    pub output_textgrid_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct Synthesis {
    pub num_synthetic_files: usize,
    pub file_length_seconds: f64,
    /// Percentage, 0-100; stored as a 0-1 fraction on the engine config
    pub min_overlap_percentage: f64,
    pub max_overlaps: usize,
    pub random_seed: u64,
    pub amplitude_scaling: f64,
    pub normalize_output: bool,
    pub silence_duration_ms: u32,
}

#[derive(Debug, Deserialize)]
pub struct AudioEffects {
    pub apply_effects: bool,
    pub pitch_shift: bool,
    pub pitch_shift_semitones: f64,
    pub time_stretch: bool,
    pub time_stretch_factor: f64,
    pub amplitude_modulation: bool,
    pub amplitude_modulation_frequency: f64,
    pub amplitude_modulation_depth: f64,
}

#[derive(Debug, Deserialize)]
pub struct Audio {
    pub sample_rate: u32,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    pub file_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct Logging {
    /// 0 = warnings, 1 = info, 2 = debug
    pub verbosity_level: u8,
}

impl Settings {
    /// Read, parse, and validate a settings file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file {}", path.display()))?;
        let settings: Settings = toml::from_str(&text)
            .with_context(|| format!("cannot parse settings file {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let synthesis = &self.synthesis;
        if synthesis.num_synthetic_files == 0 {
            bail!("synthesis.num_synthetic_files must be at least 1");
        }
        if synthesis.file_length_seconds <= 0.0 {
            bail!("synthesis.file_length_seconds must be positive");
        }
        if !(0.0..=100.0).contains(&synthesis.min_overlap_percentage) {
            bail!("synthesis.min_overlap_percentage must be between 0 and 100");
        }
        if synthesis.max_overlaps == 0 {
            bail!("synthesis.max_overlaps must be at least 1");
        }
        if !(0.0..=1.0).contains(&synthesis.amplitude_scaling) {
            bail!("synthesis.amplitude_scaling must be between 0 and 1");
        }

        let effects = &self.audio_effects;
        if effects.time_stretch_factor <= 0.0 {
            bail!("audio_effects.time_stretch_factor must be positive");
        }
        if effects.amplitude_modulation_frequency < 0.0 {
            bail!("audio_effects.amplitude_modulation_frequency must not be negative");
        }
        if !(0.0..=1.0).contains(&effects.amplitude_modulation_depth) {
            bail!("audio_effects.amplitude_modulation_depth must be between 0 and 1");
        }

        if self.audio.sample_rate == 0 {
            bail!("audio.sample_rate must be at least 1");
        }

        if self.labels.is_empty() {
            bail!("at least one entry is required in [labels]");
        }
        for (label, probability) in &self.labels {
            if !(0.0..=1.0).contains(probability) {
                bail!("labels.{label} probability must be between 0 and 1");
            }
        }

        if self.output.file_prefix.is_empty() {
            bail!("output.file_prefix must not be empty");
        }
        if self.logging.verbosity_level > 2 {
            bail!("logging.verbosity_level must be 0, 1, or 2");
        }

        if !self.paths.input_wav_dir.is_dir() {
            bail!(
                "paths.input_wav_dir '{}' is not a directory",
                self.paths.input_wav_dir.display()
            );
        }
        if !self.paths.input_textgrid_dir.is_dir() {
            bail!(
                "paths.input_textgrid_dir '{}' is not a directory",
                self.paths.input_textgrid_dir.display()
            );
        }
        Ok(())
    }

    /// Engine-facing synthesis parameters.
    pub fn synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig {
            file_length_seconds: self.synthesis.file_length_seconds,
            min_overlap_percentage: self.synthesis.min_overlap_percentage / 100.0,
            max_overlaps: self.synthesis.max_overlaps,
            amplitude_scaling: self.synthesis.amplitude_scaling,
            normalize_output: self.synthesis.normalize_output,
            silence_duration_ms: self.synthesis.silence_duration_ms,
            label_probabilities: self
                .labels
                .iter()
                .map(|(label, probability)| (label.to_lowercase(), *probability))
                .collect(),
        }
    }

    /// Engine-facing effect configuration; empty when effects are disabled.
    pub fn effects_config(&self) -> EffectsConfig {
        let effects = &self.audio_effects;
        if !effects.apply_effects {
            return EffectsConfig::default();
        }
        EffectsConfig {
            pitch_shift: effects.pitch_shift.then_some(effects.pitch_shift_semitones),
            time_stretch: effects.time_stretch.then_some(effects.time_stretch_factor),
            amplitude_modulation: effects.amplitude_modulation.then_some(AmplitudeModulation {
                frequency: effects.amplitude_modulation_frequency,
                depth: effects.amplitude_modulation_depth,
            }),
        }
    }

    /// Log level from the configured verbosity.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.logging.verbosity_level {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_toml(wav_dir: &Path, grid_dir: &Path) -> String {
        format!(
            r#"
[paths]
input_wav_dir = "{}"
input_textgrid_dir = "{}"
output_wav_dir = "out/wav"
output_textgrid_dir = "out/grids"

[synthesis]
num_synthetic_files = 10
file_length_seconds = 30.0
min_overlap_percentage = 25.0
max_overlaps = 3
random_seed = 42
amplitude_scaling = 0.8
normalize_output = true
silence_duration_ms = 250

[audio_effects]
apply_effects = true
pitch_shift = true
pitch_shift_semitones = 1.5
time_stretch = false
time_stretch_factor = 1.0
amplitude_modulation = false
amplitude_modulation_frequency = 4.0
amplitude_modulation_depth = 0.3

[audio]
sample_rate = 22050

[labels]
Bark = 0.9
howl = 0.4

[output]
file_prefix = "synthetic_"

[logging]
verbosity_level = 1
"#,
            wav_dir.display(),
            grid_dir.display()
        )
    }

    fn load_sample(mutate: impl Fn(String) -> String) -> anyhow::Result<Settings> {
        let dir = tempfile::tempdir().unwrap();
        let wav_dir = dir.path().join("wav");
        let grid_dir = dir.path().join("grids");
        fs::create_dir(&wav_dir).unwrap();
        fs::create_dir(&grid_dir).unwrap();

        let path = dir.path().join("chorus.toml");
        fs::write(&path, mutate(sample_toml(&wav_dir, &grid_dir))).unwrap();
        Settings::load(&path)
    }

    #[test]
    fn valid_settings_load() {
        let settings = load_sample(|text| text).unwrap();
        assert_eq!(settings.synthesis.num_synthetic_files, 10);
        assert_eq!(settings.audio.sample_rate, 22050);
        assert_eq!(settings.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn synthesis_config_lowercases_labels_and_scales_percentage() {
        let settings = load_sample(|text| text).unwrap();
        let config = settings.synthesis_config();
        assert_eq!(config.label_probabilities.get("bark"), Some(&0.9));
        assert_eq!(config.label_probabilities.get("howl"), Some(&0.4));
        assert!((config.min_overlap_percentage - 0.25).abs() < 1e-12);
    }

    #[test]
    fn effects_config_respects_toggles() {
        let settings = load_sample(|text| text).unwrap();
        let effects = settings.effects_config();
        assert_eq!(effects.pitch_shift, Some(1.5));
        assert_eq!(effects.time_stretch, None);
        assert!(effects.amplitude_modulation.is_none());
    }

    #[test]
    fn disabled_effects_yield_an_empty_config() {
        let settings =
            load_sample(|text| text.replace("apply_effects = true", "apply_effects = false"))
                .unwrap();
        assert!(settings.effects_config().is_empty());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(
            load_sample(|t| t.replace("amplitude_scaling = 0.8", "amplitude_scaling = 1.5"))
                .is_err()
        );
        assert!(
            load_sample(|t| t.replace("max_overlaps = 3", "max_overlaps = 0")).is_err()
        );
        assert!(
            load_sample(|t| t.replace("verbosity_level = 1", "verbosity_level = 5")).is_err()
        );
        assert!(load_sample(|t| t.replace("Bark = 0.9", "Bark = 1.9")).is_err());
        assert!(
            load_sample(|t| t.replace("time_stretch_factor = 1.0", "time_stretch_factor = 0.0"))
                .is_err()
        );
    }

    #[test]
    fn missing_input_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let grid_dir = dir.path().join("grids");
        fs::create_dir(&grid_dir).unwrap();
        let missing = dir.path().join("nope");

        let path = dir.path().join("chorus.toml");
        fs::write(&path, sample_toml(&missing, &grid_dir)).unwrap();
        assert!(Settings::load(&path).is_err());
    }
}

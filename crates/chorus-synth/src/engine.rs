//! Synthesis engine: the overlap-scheduling loop
//!
//! Owns the seeded random source and drives extraction, mixing, and the
//! effect chain to tile a fixed-length output buffer with overlap groups.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use chorus_core::{AudioBuffer, Interval, IntervalTier, OVERLAP_LABEL};
use chorus_dsp::{Effect, apply_chain, normalize};

use crate::config::{EffectsConfig, SynthesisConfig};
use crate::error::{SynthResult, SynthesisError};
use crate::mixer::mix_segments;
use crate::segment::{Segment, extract_segments};
use crate::timeline::cover_timeline;

/// One finished synthesis: fixed-length audio plus its covering annotation.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// Generated audio, exactly `round(file_length_seconds * sample_rate)` frames
    pub audio: AudioBuffer,
    /// Sorted, contiguous annotation over the full duration
    pub annotation: IntervalTier,
}

/// Synthesis engine
///
/// Every stochastic decision (source-file choice, label-inclusion draws,
/// overlap-count draws, segment sampling, offset/gain jitter) consumes the
/// one generator seeded at construction, in a fixed order, so a seed plus an
/// input set fully determines a batch. Successive calls share the advancing
/// generator state; files in a batch are intentionally not re-seeded.
pub struct SynthesisEngine {
    config: SynthesisConfig,
    effects: Vec<Effect>,
    sample_rate: u32,
    rng: StdRng,
}

impl SynthesisEngine {
    /// Create an engine with a seeded random source.
    pub fn new(config: SynthesisConfig, effects: &EffectsConfig, sample_rate: u32, seed: u64) -> Self {
        let chain = effects.chain();
        log::debug!(
            "engine ready: {} labels, {} effects, {} Hz, seed {}",
            config.label_probabilities.len(),
            chain.len(),
            sample_rate,
            seed
        );
        Self {
            config,
            effects: chain,
            sample_rate,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Synthesis parameters.
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Pick a random element, consuming the shared generator.
    ///
    /// Used for input-pair selection so that file choice participates in the
    /// deterministic draw order.
    pub fn pick_random<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Synthesize one output file from an annotated source recording.
    ///
    /// Fails with [`SynthesisError::NoSegments`] when extraction yields an
    /// empty pool; no partial output is produced on any failure.
    pub fn synthesize(
        &mut self,
        source: &AudioBuffer,
        annotation: &IntervalTier,
    ) -> SynthResult<SynthesisOutput> {
        let segments = extract_segments(
            source,
            annotation,
            &self.config.label_probabilities,
            self.sample_rate,
            &mut self.rng,
        )?;
        if segments.is_empty() {
            return Err(SynthesisError::NoSegments);
        }

        let total_frames =
            (self.config.file_length_seconds * self.sample_rate as f64).round() as usize;
        let channels = source.channels.max(1);
        let mut output = AudioBuffer::zeroed(channels, self.sample_rate, total_frames);
        let silence_frames = (self.config.silence_duration_ms as f64 * self.sample_rate as f64
            / 1000.0)
            .round() as usize;

        let mut placed: Vec<Interval> = Vec::new();
        let mut cursor = 0usize;

        while cursor < total_frames {
            let wanted = self.rng.random_range(1..=self.config.max_overlaps);
            let group: Vec<&Segment> = segments
                .choose_multiple(&mut self.rng, wanted.min(segments.len()))
                .collect();

            let longest = group.iter().map(|s| s.frames()).max().unwrap_or(0);
            let window_frames = (cursor + longest).min(total_frames) - cursor;

            let mixed = mix_segments(
                &group,
                window_frames,
                self.config.amplitude_scaling,
                &mut self.rng,
            );
            let mixed = apply_chain(&self.effects, mixed);

            // The effect chain may have changed the length; the written
            // extent comes from the actual output, clamped to the buffer.
            let written = mixed.frames().min(total_frames - cursor);
            for i in 0..written * channels {
                output.samples[cursor * channels + i] += mixed.samples[i];
            }

            if written > 0 {
                let rate = self.sample_rate as f64;
                placed.push(Interval::new(
                    cursor as f64 / rate,
                    (cursor + written) as f64 / rate,
                    OVERLAP_LABEL,
                ));
            }

            // A zero-length write with no silence gap must not stall the loop.
            cursor += (written + silence_frames).max(1);
        }

        if self.config.normalize_output {
            normalize(&mut output)?;
        }

        let annotation = cover_timeline(&placed, self.config.file_length_seconds);
        log::debug!(
            "synthesized {} frames, {} groups placed",
            total_frames,
            placed.len()
        );
        Ok(SynthesisOutput {
            audio: output,
            annotation,
        })
    }
}

//! Probabilistic segment extraction

use std::collections::HashMap;

use rand::Rng;

use chorus_core::{AudioBuffer, IntervalTier};
use chorus_dsp::resample;

use crate::error::SynthResult;

/// A slice of source audio corresponding to one labeled annotation interval.
///
/// Always stored at the engine's output sample rate; resampling happens here
/// at extraction time, never later in the pipeline.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Segment audio at the engine's output rate
    pub audio: AudioBuffer,
    /// Source annotation label (original casing)
    pub label: String,
}

impl Segment {
    /// Number of frames.
    pub fn frames(&self) -> usize {
        self.audio.frames()
    }
}

/// Extract candidate segments from an annotated source recording.
///
/// For each interval the label is lowercased and looked up in
/// `label_probabilities`; unknown labels are skipped with a warning. Known
/// labels consume exactly one uniform draw from `rng` and are included when
/// the draw lands below their probability. Slice boundaries are
/// `[round(start * rate), round(end * rate))`, clamped to the buffer;
/// zero-length slices are dropped so they can never stall the scheduler.
///
/// An empty result is a valid outcome the caller must handle.
pub fn extract_segments<R: Rng + ?Sized>(
    source: &AudioBuffer,
    annotation: &IntervalTier,
    label_probabilities: &HashMap<String, f64>,
    target_rate: u32,
    rng: &mut R,
) -> SynthResult<Vec<Segment>> {
    let source_rate = source.sample_rate;
    let mut segments = Vec::new();

    for interval in &annotation.intervals {
        let label = interval.label.to_lowercase();
        let Some(&probability) = label_probabilities.get(&label) else {
            log::warn!(
                "unrecognized label '{}' in annotation; skipping interval",
                interval.label
            );
            continue;
        };

        if rng.random::<f64>() >= probability {
            continue;
        }

        let start = (interval.start * source_rate as f64).round() as usize;
        let end = (interval.end * source_rate as f64).round() as usize;
        let slice = source.slice_frames(start, end);
        if slice.is_empty() {
            log::warn!(
                "zero-length slice for label '{}' at {:.3}s; skipping interval",
                interval.label,
                interval.start
            );
            continue;
        }

        let audio = if source_rate != target_rate {
            resample(&slice, source_rate, target_rate)?
        } else {
            slice
        };

        log::debug!(
            "extracted segment '{}': {} frames at {} Hz",
            interval.label,
            audio.frames(),
            target_rate
        );
        segments.push(Segment {
            audio,
            label: interval.label.clone(),
        });
    }

    if segments.is_empty() {
        log::warn!("no segments survived extraction from this annotation");
    }

    Ok(segments)
}

//! Stateless buffer transforms
//!
//! Pitch shift and time stretch are resampling approximations: both change
//! spectral content by re-rendering at a different length, so a time stretch
//! shifts pitch as well. Good enough for augmenting training data; not a
//! phase-preserving stretch.

use std::f64::consts::PI;

use chorus_core::AudioBuffer;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{DspError, DspResult};
use crate::resample::resample_channel;

/// Scale the buffer so its peak absolute value is exactly 1.0.
///
/// Fails with [`DspError::DegenerateAudio`] on an all-zero buffer; callers
/// must special-case silent output rather than divide by zero.
pub fn normalize(buffer: &mut AudioBuffer) -> DspResult<()> {
    let peak = buffer.peak();
    if peak == 0.0 {
        return Err(DspError::DegenerateAudio);
    }
    for sample in &mut buffer.samples {
        *sample /= peak;
    }
    Ok(())
}

/// Shift pitch by `semitones`, preserving duration.
///
/// Re-renders each channel at `frames / 2^(semitones/12)` samples and forces
/// the result back to the input length (truncate or zero-pad), so the
/// perceived pitch moves while the segment keeps its place on the timeline.
pub fn pitch_shift(buffer: &AudioBuffer, semitones: f64) -> AudioBuffer {
    let frames = buffer.frames();
    let factor = 2.0_f64.powf(semitones / 12.0);
    let intermediate = (frames as f64 / factor).round() as usize;

    let channels: Vec<Vec<f64>> = (0..buffer.channels)
        .map(|ch| {
            let mut data = resample_channel(&buffer.channel(ch), intermediate);
            data.resize(frames, 0.0);
            data
        })
        .collect();

    AudioBuffer::from_channels(&channels, buffer.sample_rate)
}

/// Stretch to `round(frames * factor)` frames.
///
/// Duration and pitch change together; `factor` must be positive.
pub fn time_stretch(buffer: &AudioBuffer, factor: f64) -> AudioBuffer {
    let out_frames = (buffer.frames() as f64 * factor).round() as usize;

    let channels: Vec<Vec<f64>> = (0..buffer.channels)
        .map(|ch| resample_channel(&buffer.channel(ch), out_frames))
        .collect();

    AudioBuffer::from_channels(&channels, buffer.sample_rate)
}

/// Multiply frame `i` by `1 + depth * sin(2π * frequency * i / sample_rate)`.
///
/// The same modulator value is applied to every channel of a frame; `depth`
/// is expected in `[0, 1]`.
pub fn amplitude_modulate(buffer: &mut AudioBuffer, frequency: f64, depth: f64) {
    if buffer.channels == 0 || buffer.sample_rate == 0 {
        return;
    }
    let rate = buffer.sample_rate as f64;
    let channels = buffer.channels;
    for (frame, samples) in buffer.samples.chunks_mut(channels).enumerate() {
        let modulator = 1.0 + depth * (2.0 * PI * frequency * frame as f64 / rate).sin();
        for sample in samples {
            *sample *= modulator;
        }
    }
}

/// Add zero-mean Gaussian noise at `snr_db` below the signal power.
///
/// Noise power is derived from the buffer's mean-square power; the draws come
/// from the caller's random source so seeded runs stay reproducible.
pub fn add_noise<R: Rng + ?Sized>(buffer: &mut AudioBuffer, snr_db: f64, rng: &mut R) {
    if buffer.is_empty() {
        return;
    }
    let signal_power =
        buffer.samples.iter().map(|s| s * s).sum::<f64>() / buffer.samples.len() as f64;
    let noise_power = signal_power / 10.0_f64.powf(snr_db / 10.0);
    let Ok(dist) = Normal::new(0.0, noise_power.sqrt()) else {
        return;
    };
    for sample in &mut buffer.samples {
        *sample += dist.sample(rng);
    }
}

//! Frequency-domain resampling
//!
//! Resamples by forward real FFT, spectrum truncation or zero-extension, and
//! inverse FFT at the new length. Deterministic, no windowing state.

use chorus_core::AudioBuffer;
use realfft::RealFftPlanner;
use rustfft::num_complex::Complex;

use crate::error::{DspError, DspResult};

/// Resample a buffer from `source_rate` to `target_rate`.
///
/// The output holds `round(frames * target_rate / source_rate)` frames per
/// channel. Fails with [`DspError::InvalidRate`] when either rate is zero.
pub fn resample(buffer: &AudioBuffer, source_rate: u32, target_rate: u32) -> DspResult<AudioBuffer> {
    if source_rate == 0 {
        return Err(DspError::InvalidRate(source_rate));
    }
    if target_rate == 0 {
        return Err(DspError::InvalidRate(target_rate));
    }

    let frames = buffer.frames();
    let out_frames = (frames as f64 * target_rate as f64 / source_rate as f64).round() as usize;

    let channels: Vec<Vec<f64>> = (0..buffer.channels)
        .map(|ch| resample_channel(&buffer.channel(ch), out_frames))
        .collect();

    Ok(AudioBuffer::from_channels(&channels, target_rate))
}

/// Resample one channel to an explicit output length.
///
/// Shared by [`resample`] and the pitch/time transforms, which express their
/// rate factors directly as target lengths.
pub(crate) fn resample_channel(input: &[f64], out_len: usize) -> Vec<f64> {
    let n = input.len();
    if out_len == n {
        return input.to_vec();
    }
    if n == 0 || out_len == 0 {
        return vec![0.0; out_len];
    }

    let mut planner = RealFftPlanner::<f64>::new();

    let forward = planner.plan_fft_forward(n);
    let mut time = input.to_vec();
    let mut spectrum: Vec<Complex<f64>> = forward.make_output_vec();
    forward.process(&mut time, &mut spectrum).ok();

    let inverse = planner.plan_fft_inverse(out_len);
    let mut out_spectrum = inverse.make_input_vec();
    let bins = spectrum.len().min(out_spectrum.len());
    out_spectrum[..bins].copy_from_slice(&spectrum[..bins]);

    // The inverse transform requires purely real DC and Nyquist bins.
    out_spectrum[0].im = 0.0;
    if out_len % 2 == 0 {
        let nyquist = out_spectrum.len() - 1;
        out_spectrum[nyquist].im = 0.0;
    }

    let mut output = inverse.make_output_vec();
    inverse.process(&mut out_spectrum, &mut output).ok();

    // Unnormalized forward/inverse pair; dividing by the input length keeps
    // amplitudes unchanged across the length change.
    let scale = 1.0 / n as f64;
    for sample in &mut output {
        *sample *= scale;
    }
    output
}

//! Overlap-group mixer

use rand::Rng;

use chorus_core::AudioBuffer;

use crate::segment::Segment;

/// Superimpose a group of segments into a window of `window_frames` frames.
///
/// Each segment lands at a uniform random offset in
/// `[0, max(0, window_frames - segment_frames))` (offset 0 when it fills or
/// exceeds the window) with a uniform gain jitter in `[0.8, 1.0]` on top of
/// `amplitude_scaling`, and is truncated at the window edge. Writes are
/// additive and never leave `[0, window_frames)`.
///
/// Channel shape and sample rate come from the first segment; every segment
/// in a group is assumed to share them.
pub fn mix_segments<R: Rng + ?Sized>(
    group: &[&Segment],
    window_frames: usize,
    amplitude_scaling: f64,
    rng: &mut R,
) -> AudioBuffer {
    debug_assert!(!group.is_empty(), "mix_segments requires a non-empty group");
    let Some(first) = group.first() else {
        return AudioBuffer::zeroed(1, 0, window_frames);
    };

    let channels = first.audio.channels;
    let mut mixed = AudioBuffer::zeroed(channels, first.audio.sample_rate, window_frames);

    for segment in group {
        debug_assert_eq!(segment.audio.channels, channels);
        let seg_frames = segment.frames();
        if seg_frames == 0 {
            continue;
        }

        let max_start = window_frames.saturating_sub(seg_frames);
        let start = if max_start > 0 {
            rng.random_range(0..max_start)
        } else {
            0
        };
        let gain = amplitude_scaling * rng.random_range(0.8..1.0);

        let copy_frames = seg_frames.min(window_frames.saturating_sub(start));
        for i in 0..copy_frames * channels {
            mixed.samples[start * channels + i] += segment.audio.samples[i] * gain;
        }
    }

    mixed
}

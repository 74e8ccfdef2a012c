//! Audio decoding via symphonia
//!
//! Decodes the first audio track of any supported container to interleaved
//! f64 at the file's native rate; resampling to the engine rate happens at
//! segment-extraction time, not here.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use chorus_core::AudioBuffer;

use crate::error::{FileError, FileResult};

/// Decode an audio file to an [`AudioBuffer`] at its native sample rate.
pub fn read_audio(path: &Path) -> FileResult<AudioBuffer> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| FileError::Decode(format!("{}: {e}", path.display())))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| FileError::Decode(format!("{}: no audio track", path.display())))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| FileError::Decode(format!("{}: unknown sample rate", path.display())))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| FileError::Decode(format!("{}: {e}", path.display())))?;

    let mut channels = codec_params.channels.map(|c| c.count()).unwrap_or(0);
    let mut samples: Vec<f64> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f64>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(FileError::Decode(format!("{}: {e}", path.display()))),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // Recoverable corruption; symphonia already resynchronized.
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("{}: skipping undecodable packet: {e}", path.display());
                continue;
            }
            Err(e) => return Err(FileError::Decode(format!("{}: {e}", path.display()))),
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            channels = spec.channels.count();
            sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }
        if let Some(buf) = &mut sample_buf {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    log::debug!(
        "decoded {}: {} frames, {} channel(s) at {} Hz",
        path.display(),
        if channels == 0 { 0 } else { samples.len() / channels },
        channels,
        sample_rate
    );
    Ok(AudioBuffer::from_samples(
        samples,
        channels.max(1),
        sample_rate,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::write_wav;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wav_survives_an_encode_decode_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let samples: Vec<f64> = (0..800)
            .map(|i| (i as f64 * 0.05).sin() * 0.5)
            .collect();
        let original = AudioBuffer::from_samples(samples, 1, 8000);
        write_wav(&path, &original).unwrap();

        let decoded = read_audio(&path).unwrap();
        assert_eq!(decoded.sample_rate, 8000);
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.frames(), 800);
        for (a, b) in decoded.samples.iter().zip(&original.samples) {
            // 16-bit quantization error
            assert_abs_diff_eq!(a, b, epsilon = 1.0 / 32000.0);
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_audio(Path::new("/nonexistent/audio.wav")).unwrap_err();
        assert!(matches!(err, FileError::Io(_)));
    }
}

//! WAV encoding via hound

use std::path::Path;

use chorus_core::AudioBuffer;

use crate::error::{FileError, FileResult};

/// Write a buffer as 16-bit PCM WAV, clamping samples to `[-1, 1]`.
pub fn write_wav(path: &Path, buffer: &AudioBuffer) -> FileResult<()> {
    let spec = hound::WavSpec {
        channels: buffer.channels as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| FileError::Encode(format!("{}: {e}", path.display())))?;
    for &sample in &buffer.samples {
        let quantized = (sample.clamp(-1.0, 1.0) * f64::from(i16::MAX)).round() as i16;
        writer
            .write_sample(quantized)
            .map_err(|e| FileError::Encode(format!("{}: {e}", path.display())))?;
    }
    writer
        .finalize()
        .map_err(|e| FileError::Encode(format!("{}: {e}", path.display())))?;

    log::debug!("wrote {}: {} frames", path.display(), buffer.frames());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipping_input_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hot.wav");
        let buffer = AudioBuffer::from_samples(vec![2.0, -3.0, 0.0], 1, 8000);
        write_wav(&path, &buffer).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX, 0]);
    }

    #[test]
    fn stereo_spec_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let buffer = AudioBuffer::zeroed(2, 44100, 100);
        write_wav(&path, &buffer).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(reader.len(), 200);
    }
}

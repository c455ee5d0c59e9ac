use std::path::Path;

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::error::{MustcError, Result};

use super::resample::resample;
use super::{AudioDecoder, DecodedAudio, TARGET_SAMPLE_RATE};

/// WAV decoder that downmixes to mono and resamples to a fixed rate.
#[derive(Debug, Clone, Copy)]
pub struct WavDecoder {
    pub target_rate: u32,
}

impl Default for WavDecoder {
    fn default() -> Self {
        Self {
            target_rate: TARGET_SAMPLE_RATE,
        }
    }
}

impl AudioDecoder for WavDecoder {
    fn load_window(&self, path: &Path, offset: f64, duration: f64) -> Result<DecodedAudio> {
        load_window(path, offset, duration, self.target_rate)
    }

    fn sampling_rate(&self) -> u32 {
        self.target_rate
    }
}

/// Whole frames in `secs` seconds at `rate`, truncated toward zero and never negative.
fn frames_at(secs: f64, rate: u32) -> u64 {
    (secs * rate as f64).trunc().max(0.0) as u64
}

/// Decode `[offset, offset + duration)` seconds of a WAV file as mono at `target_rate`.
///
/// A window reaching past the end of the recording is cut at the end.
pub fn load_window(path: &Path, offset: f64, duration: f64, target_rate: u32) -> Result<DecodedAudio> {
    let audio_err = |source| MustcError::Audio {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = WavReader::open(path).map_err(audio_err)?;
    let spec = reader.spec();
    let native_rate = spec.sample_rate;
    let channels = spec.channels.max(1) as usize;

    let total_frames = reader.duration() as u64;
    let start = frames_at(offset, native_rate).min(total_frames);
    let frames = frames_at(duration, native_rate).min(total_frames - start) as usize;

    debug!(
        "Decoding {} frames at {} from {} ({} Hz, {} channels)",
        frames,
        start,
        path.display(),
        native_rate,
        channels
    );

    reader.seek(start as u32).map_err(|source| MustcError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let wanted = frames * channels;
    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .take(wanted)
            .collect::<std::result::Result<_, _>>()
            .map_err(audio_err)?,
        SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .take(wanted)
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(audio_err)?
        }
    };

    let mono = downmix(&interleaved, channels);
    let samples = resample(&mono, native_rate, target_rate)?;

    Ok(DecodedAudio {
        samples,
        sampling_rate: target_rate,
    })
}

/// Average interleaved channels into one.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

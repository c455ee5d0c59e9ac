pub mod decode;
pub mod resample;

pub use decode::{load_window, WavDecoder};
pub use resample::resample;

use std::path::Path;

use crate::error::Result;

/// Rate every decoded window is delivered at.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// A mono waveform and the rate it was produced at.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sampling_rate: u32,
}

/// Decodes a time window of a recording into mono samples.
pub trait AudioDecoder {
    /// Load `[offset, offset + duration)` seconds of `path`.
    fn load_window(&self, path: &Path, offset: f64, duration: f64) -> Result<DecodedAudio>;

    /// Rate the decoder resamples to.
    fn sampling_rate(&self) -> u32;
}

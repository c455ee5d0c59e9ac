use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::{MustcError, Result};

/// Resample a mono waveform from `from_rate` to `to_rate`.
///
/// The output is aligned with the input (the filter delay is removed) and has
/// `round(len * to_rate / from_rate)` samples.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let expected = (samples.len() as f64 * ratio).round() as usize;

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 1.0, params, samples.len(), 1)
        .map_err(|e| MustcError::Resample(e.to_string()))?;
    let delay = resampler.output_delay();

    let input = vec![samples.to_vec()];
    let mut output = resampler
        .process(&input, None)
        .map_err(|e| MustcError::Resample(e.to_string()))?
        .swap_remove(0);

    // Flush the filter tail with silence.
    while output.len() < expected + delay {
        let tail = resampler
            .process_partial(None::<&[Vec<f32>]>, None)
            .map_err(|e| MustcError::Resample(e.to_string()))?
            .swap_remove(0);
        if tail.is_empty() {
            break;
        }
        output.extend(tail);
    }

    output.drain(..delay.min(output.len()));
    output.truncate(expected);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_is_identity() {
        let samples = vec![0.1, -0.2, 0.3];
        assert_eq!(resample(&samples, 16000, 16000).unwrap(), samples);
    }

    #[test]
    fn test_empty_input() {
        assert!(resample(&[], 44100, 16000).unwrap().is_empty());
    }

    #[test]
    fn test_downsample_length() {
        let samples = vec![0.0f32; 44100];
        let out = resample(&samples, 44100, 16000).unwrap();
        assert!((out.len() as i64 - 16000).abs() <= 2);
    }

    #[test]
    fn test_upsample_preserves_level() {
        // 200 Hz tone at 8 kHz, well below both Nyquist limits.
        let samples: Vec<f32> = (0..8000)
            .map(|i| (2.0 * std::f32::consts::PI * 200.0 * i as f32 / 8000.0).sin() * 0.5)
            .collect();
        let out = resample(&samples, 8000, 16000).unwrap();

        assert!((out.len() as i64 - 16000).abs() <= 2);
        let peak = out[2000..14000].iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        assert!((peak - 0.5).abs() < 0.05, "peak was {peak}");
    }
}

//! Channel mixing utilities (multi-channel to mono conversion)

use crate::error::AnalysisError;

/// Average interleaved multi-channel samples down to mono
///
/// # Arguments
///
/// * `interleaved` - Interleaved samples (L R L R ... for stereo)
/// * `channels` - Channel count
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `channels` is zero or the sample
/// count is not a multiple of the channel count.
///
/// # Example
///
/// ```
/// use stratum_chords::preprocessing::channel_mixer::downmix_to_mono;
///
/// let mono = downmix_to_mono(&[1.0, 0.0, 0.5, 0.5], 2)?;
/// assert_eq!(mono, vec![0.5, 0.5]);
/// # Ok::<(), stratum_chords::AnalysisError>(())
/// ```
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Result<Vec<f32>, AnalysisError> {
    if channels == 0 {
        return Err(AnalysisError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }

    if interleaved.len() % channels != 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "{} samples is not a whole number of {}-channel frames",
            interleaved.len(),
            channels
        )));
    }

    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    let scale = 1.0 / channels as f32;
    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect())
}

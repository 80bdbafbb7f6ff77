//! Energy flux onset detection
//!
//! An onset is a frame where RMS energy rises faster than in the frames
//! around it. The rise is half-wave rectified so decays never register, and
//! rises below `threshold_db` relative to the strongest rise are ignored.
//!
//! Bello et al. (2005), *A Tutorial on Onset Detection in Music Signals*.

use crate::error::AnalysisError;
use crate::features::period::peak_picking::find_peaks;

fn check_framing(frame_size: usize, hop_size: usize) -> Result<(), AnalysisError> {
    if frame_size == 0 || hop_size == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Onset frame and hop size must be > 0, got {} / {}",
            frame_size, hop_size
        )));
    }
    Ok(())
}

/// RMS energy of each full frame; trailing partial frames are dropped
fn frame_rms(samples: &[f32], frame_size: usize, hop_size: usize) -> Vec<f32> {
    if samples.len() < frame_size {
        return Vec::new();
    }
    samples
        .windows(frame_size)
        .step_by(hop_size)
        .map(|frame| (frame.iter().map(|x| x * x).sum::<f32>() / frame_size as f32).sqrt())
        .collect()
}

/// Half-wave rectified RMS energy difference between consecutive frames
///
/// Entry n is the rise from frame n to frame n+1, so the envelope has one
/// entry fewer than there are frames. Signals shorter than two frames give
/// an empty envelope.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `frame_size` or `hop_size` is zero.
pub fn compute_energy_flux(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
) -> Result<Vec<f32>, AnalysisError> {
    check_framing(frame_size, hop_size)?;

    let energies = frame_rms(samples, frame_size, hop_size);
    Ok(energies
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).max(0.0))
        .collect())
}

/// Onset positions in samples, ascending
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `frame_size` - Energy frame size (2048 by default)
/// * `hop_size` - Frame hop; onsets are quantized to multiples of it
/// * `threshold_db` - Minimum rise relative to the strongest one, in dB
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `frame_size` or `hop_size` is zero.
///
/// # Example
///
/// ```
/// use stratum_chords::features::onset::energy_flux::detect_energy_flux_onsets;
///
/// let silence = vec![0.0f32; 44100];
/// assert!(detect_energy_flux_onsets(&silence, 2048, 512, -30.0)?.is_empty());
/// # Ok::<(), stratum_chords::AnalysisError>(())
/// ```
pub fn detect_energy_flux_onsets(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
    threshold_db: f32,
) -> Result<Vec<usize>, AnalysisError> {
    let flux = compute_energy_flux(samples, frame_size, hop_size)?;
    if flux.is_empty() {
        if !samples.is_empty() {
            log::warn!(
                "{} samples is less than two onset frames of {}, no onsets detected",
                samples.len(),
                frame_size
            );
        }
        return Ok(Vec::new());
    }

    let relative_threshold = 10.0_f32.powf(threshold_db / 20.0);

    // Flux entry i is the rise into frame i + 1, so the onset sits at that frame's start.
    let mut positions: Vec<usize> = find_peaks(&flux, relative_threshold)
        .into_iter()
        .map(|(i, _)| (i + 1) * hop_size)
        .filter(|&position| position < samples.len())
        .collect();
    positions.sort_unstable();

    // Overlapping frames can report the same attack twice; keep onsets at least half a hop apart.
    let min_gap = hop_size / 2;
    let mut onsets: Vec<usize> = Vec::with_capacity(positions.len());
    for position in positions {
        if onsets.last().map_or(true, |&last| position >= last + min_gap) {
            onsets.push(position);
        }
    }

    log::debug!(
        "Energy flux: {} onsets from {} flux frames (threshold {:.1} dB)",
        onsets.len(),
        flux.len(),
        threshold_db
    );

    Ok(onsets)
}

//! Autocorrelation-based BPM estimation
//!
//! Onsets are quantized to a binary frame signal whose autocorrelation peaks
//! at lags equal to the beat period and its multiples. Peaks inside the
//! admissible lag window become BPM candidates via
//! `BPM = 60 * sample_rate / (lag * hop_size)`.
//!
//! Ellis & Pikrakis (2006), *Real-time Beat Induction*.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use super::peak_picking::find_peaks;
use super::BpmCandidate;
use crate::error::AnalysisError;

const EPSILON: f32 = 1e-10;

/// Minimum ACF peak height relative to the strongest in-range value
const MIN_RELATIVE_PEAK: f32 = 0.1;

fn check_params(
    onsets: &[usize],
    sample_rate: u32,
    hop_size: usize,
    min_bpm: f32,
    max_bpm: f32,
) -> Result<(), AnalysisError> {
    if onsets.is_empty() {
        return Err(AnalysisError::InvalidInput("Empty onset list".to_string()));
    }
    if sample_rate == 0 || hop_size == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Sample rate and hop size must be > 0, got {} / {}",
            sample_rate, hop_size
        )));
    }
    if !(min_bpm > 0.0 && max_bpm > min_bpm) {
        return Err(AnalysisError::InvalidInput(format!(
            "Invalid BPM range: [{:.1}, {:.1}]",
            min_bpm, max_bpm
        )));
    }
    Ok(())
}

/// 1.0 at every frame holding an onset, 0.0 elsewhere
fn binary_onset_signal(onsets: &[usize], hop_size: usize) -> Vec<f32> {
    let last_frame = onsets.iter().max().map_or(0, |&o| o / hop_size);
    let mut signal = vec![0.0f32; last_frame + 1];
    for &onset in onsets {
        signal[onset / hop_size] = 1.0;
    }
    signal
}

/// Inclusive lag window for a BPM range, widened by one lag on each side so
/// the boundary lags can still be interior peaks
fn lag_window(frames_per_minute: f32, min_bpm: f32, max_bpm: f32) -> (usize, usize) {
    let shortest = ((frames_per_minute / max_bpm).ceil() as usize).max(2);
    let longest = (frames_per_minute / min_bpm).floor() as usize;
    (shortest - 1, longest + 1)
}

/// BPM candidates from onset positions, most confident first
///
/// Confidence is the ACF value at the candidate lag divided by the zero-lag
/// value (the onset count).
///
/// # Arguments
///
/// * `onsets` - Onset positions in samples
/// * `sample_rate` - Sample rate in Hz
/// * `hop_size` - Onset frame hop in samples
/// * `min_bpm`, `max_bpm` - Admissible tempo range
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an empty onset list, a zero
/// sample rate or hop, or an empty BPM range. A single onset is not an error
/// and yields no candidates.
pub fn estimate_bpm_from_autocorrelation(
    onsets: &[usize],
    sample_rate: u32,
    hop_size: usize,
    min_bpm: f32,
    max_bpm: f32,
) -> Result<Vec<BpmCandidate>, AnalysisError> {
    check_params(onsets, sample_rate, hop_size, min_bpm, max_bpm)?;

    if onsets.len() < 2 {
        log::warn!("Too few onsets for autocorrelation: {}", onsets.len());
        return Ok(vec![]);
    }

    let frames_per_minute = 60.0 * sample_rate as f32 / hop_size as f32;
    let acf = compute_autocorrelation_fft(&binary_onset_signal(onsets, hop_size));
    let zero_lag = acf.first().copied().unwrap_or(0.0);
    if zero_lag < EPSILON {
        return Ok(vec![]);
    }

    let (lag_min, lag_max) = lag_window(frames_per_minute, min_bpm, max_bpm);
    if lag_max >= acf.len() {
        log::debug!(
            "Onsets span {} frames, too short for lags up to {}",
            acf.len(),
            lag_max
        );
        return Ok(vec![]);
    }

    let mut candidates: Vec<BpmCandidate> = find_peaks(&acf[lag_min..=lag_max], MIN_RELATIVE_PEAK)
        .into_iter()
        .map(|(offset, value)| BpmCandidate {
            bpm: frames_per_minute / (lag_min + offset) as f32,
            confidence: (value / zero_lag).clamp(0.0, 1.0),
        })
        .filter(|c| (min_bpm..=max_bpm).contains(&c.bpm))
        .collect();

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    log::debug!(
        "Autocorrelation over lags [{}, {}]: {} BPM candidates",
        lag_min,
        lag_max,
        candidates.len()
    );

    Ok(candidates)
}

/// Linear (non-circular) autocorrelation via `IFFT(|FFT(x)|²)`
///
/// The input is zero-padded to at least twice its length. The output has the
/// input's length; lag 0 is the signal energy.
pub fn compute_autocorrelation_fft(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let fft_size = (2 * n).next_power_of_two();
    let mut spectrum: Vec<Complex<f32>> = signal
        .iter()
        .map(|&x| Complex::new(x, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(fft_size)
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(fft_size).process(&mut spectrum);
    for bin in spectrum.iter_mut() {
        *bin = Complex::new(bin.norm_sqr(), 0.0);
    }
    planner.plan_fft_inverse(fft_size).process(&mut spectrum);

    let scale = 1.0 / fft_size as f32;
    spectrum
        .iter()
        .take(n)
        .map(|bin| (bin.re * scale).max(0.0))
        .collect()
}

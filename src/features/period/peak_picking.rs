//! Peak detection utilities
//!
//! Finds local maxima in 1D signals such as autocorrelation functions and
//! onset envelopes.

const EPSILON: f32 = 1e-10;

/// Find interior local maxima at or above `min_relative_height` of the
/// signal maximum
///
/// A sample is a peak when it is strictly greater than its left neighbour and
/// at least as large as its right neighbour, so a two-sample plateau reports
/// its first sample. The first and last samples are never peaks.
///
/// # Returns
///
/// Vector of (index, value) pairs, sorted by value (highest first); equal
/// values keep ascending index order.
///
/// # Example
///
/// ```
/// use stratum_chords::features::period::peak_picking::find_peaks;
///
/// let signal = vec![0.0, 0.5, 1.0, 0.7, 0.3, 0.9, 0.2];
/// let peaks = find_peaks(&signal, 0.5);
/// assert_eq!(peaks, vec![(2, 1.0), (5, 0.9)]);
/// ```
pub fn find_peaks(signal: &[f32], min_relative_height: f32) -> Vec<(usize, f32)> {
    if signal.len() < 3 {
        return vec![];
    }

    let max_value = signal.iter().copied().fold(0.0f32, f32::max);
    if max_value < EPSILON {
        return vec![];
    }
    let threshold = max_value * min_relative_height.clamp(0.0, 1.0);

    let mut peaks: Vec<(usize, f32)> = signal
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] >= w[2] && w[1] >= threshold)
        .map(|(i, w)| (i + 1, w[1]))
        .collect();

    peaks.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    log::debug!("Found {} peaks in signal of length {}", peaks.len(), signal.len());

    peaks
}

//! Chroma aggregation
//!
//! Collapses a chroma matrix into a single averaged pitch-class vector.

use crate::error::AnalysisError;

/// Averaged 12-bin chroma energy; index i is i semitones above C
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChromaVector(pub [f32; 12]);

impl ChromaVector {
    /// Energy values
    pub fn values(&self) -> &[f32; 12] {
        &self.0
    }

    /// Inner product with a 12-element profile
    pub fn dot(&self, profile: &[f32; 12]) -> f32 {
        self.0.iter().zip(profile.iter()).map(|(a, b)| a * b).sum()
    }
}

/// Average chroma frames (frame-major: one 12-element vector per frame)
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the matrix is empty or any frame
/// does not have exactly 12 entries or holds a negative value, and
/// `AnalysisError::NumericalError` if a frame contains a non-finite value.
///
/// # Example
///
/// ```
/// use stratum_chords::features::chroma::aggregate::average_chroma;
///
/// let mut a = vec![0.0f32; 12];
/// let mut b = vec![0.0f32; 12];
/// a[0] = 1.0;
/// b[0] = 3.0;
/// let mean = average_chroma(&[a, b])?;
/// assert_eq!(mean.values()[0], 2.0);
/// # Ok::<(), stratum_chords::AnalysisError>(())
/// ```
pub fn average_chroma(frames: &[Vec<f32>]) -> Result<ChromaVector, AnalysisError> {
    if frames.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty chroma matrix".to_string(),
        ));
    }

    let mut sum = [0.0f64; 12];
    for (i, frame) in frames.iter().enumerate() {
        if frame.len() != 12 {
            return Err(AnalysisError::InvalidInput(format!(
                "Chroma frame at index {} has {} elements, expected 12",
                i,
                frame.len()
            )));
        }
        for (acc, &value) in sum.iter_mut().zip(frame.iter()) {
            if !value.is_finite() {
                return Err(AnalysisError::NumericalError(format!(
                    "Non-finite chroma value in frame {}",
                    i
                )));
            }
            if value < 0.0 {
                return Err(AnalysisError::InvalidInput(format!(
                    "Negative chroma value {} in frame {}",
                    value, i
                )));
            }
            *acc += value as f64;
        }
    }

    let n = frames.len() as f64;
    let mut mean = [0.0f32; 12];
    for (m, s) in mean.iter_mut().zip(sum.iter()) {
        *m = (s / n) as f32;
    }

    log::debug!("Averaged {} chroma frames", frames.len());

    Ok(ChromaVector(mean))
}

/// Average a pitch-major chroma matrix (12 rows, one column per frame)
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if there are not exactly 12 rows,
/// the rows are empty, or the rows differ in length.
pub fn average_pitch_rows(rows: &[Vec<f32>]) -> Result<ChromaVector, AnalysisError> {
    if rows.len() != 12 {
        return Err(AnalysisError::InvalidInput(format!(
            "Pitch-major chroma matrix must have 12 rows, got {}",
            rows.len()
        )));
    }

    let n_frames = rows[0].len();
    if n_frames == 0 {
        return Err(AnalysisError::InvalidInput(
            "Empty chroma matrix".to_string(),
        ));
    }

    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_frames) {
        return Err(AnalysisError::InvalidInput(format!(
            "Chroma row {} has {} frames, expected {}",
            i,
            row.len(),
            n_frames
        )));
    }

    let frames: Vec<Vec<f32>> = (0..n_frames)
        .map(|t| rows.iter().map(|row| row[t]).collect())
        .collect();

    average_chroma(&frames)
}

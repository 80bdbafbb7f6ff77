//! Key detection algorithm
//!
//! Picks the pitch class with the largest total chroma energy as the tonic
//! and labels it major. There is no mode discrimination and no check that
//! the third and fifth support the chosen tonic.

use super::{compute_key_clarity, KeyDetectionResult};
use crate::analysis::result::{Key, PitchClass};
use crate::error::AnalysisError;

/// Detect musical key from chroma vectors
///
/// Sums chroma energy per pitch class across all frames and selects the
/// strongest. On an exact tie the lowest pitch-class index wins.
///
/// # Arguments
///
/// * `chroma_vectors` - Vector of 12-element chroma vectors (one per frame)
///
/// # Errors
///
/// Returns `AnalysisError` if:
/// - Chroma vectors are empty
/// - Chroma vectors have incorrect dimensions
///
/// # Example
///
/// ```
/// use stratum_chords::features::key::detect_key;
/// use stratum_chords::PitchClass;
///
/// let mut frame = vec![0.1f32; 12];
/// frame[7] = 1.0;
/// let result = detect_key(&[frame])?;
/// assert_eq!(result.key.tonic, PitchClass::G);
/// assert_eq!(result.key.scale_name(), "G Major");
/// # Ok::<(), stratum_chords::AnalysisError>(())
/// ```
pub fn detect_key(chroma_vectors: &[Vec<f32>]) -> Result<KeyDetectionResult, AnalysisError> {
    log::debug!("Detecting key from {} chroma vectors", chroma_vectors.len());

    if chroma_vectors.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty chroma vectors".to_string(),
        ));
    }

    let mut energies = [0.0f32; 12];
    for (i, chroma) in chroma_vectors.iter().enumerate() {
        if chroma.len() != 12 {
            return Err(AnalysisError::InvalidInput(format!(
                "Chroma vector at index {} has {} elements, expected 12",
                i,
                chroma.len()
            )));
        }
        for (total, &value) in energies.iter_mut().zip(chroma.iter()) {
            *total += value;
        }
    }

    // First maximum wins, so ties resolve to the lower index.
    let mut best = 0usize;
    for i in 1..12 {
        if energies[i] > energies[best] {
            best = i;
        }
    }

    let best_energy = energies[best];
    let second_energy = energies
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != best)
        .map(|(_, &e)| e)
        .fold(0.0f32, f32::max);

    let confidence = if best_energy > 0.0 {
        ((best_energy - second_energy) / best_energy).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let clarity = compute_key_clarity(&energies);
    let key = Key::major(PitchClass::from_index(best));

    log::debug!(
        "Detected key: {}, energy: {:.4}, confidence: {:.4}, clarity: {:.4}",
        key.scale_name(),
        best_energy,
        confidence,
        clarity
    );

    Ok(KeyDetectionResult {
        key,
        confidence,
        clarity,
        pitch_class_energy: energies,
    })
}

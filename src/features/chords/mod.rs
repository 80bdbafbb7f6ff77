//! Chord detection modules
//!
//! Rank likely chords from an averaged chromagram:
//! - Major-triad template bank (12 roots)
//! - Dot-product template matching and ranking

pub mod matcher;
pub mod templates;

pub use matcher::{chord_count_from_signed, rank_chord_names, rank_chords, score_templates};
pub use templates::{ChordTemplate, TemplateBank};

use crate::analysis::result::ChordScore;
use crate::error::AnalysisError;
use crate::features::chroma::aggregate::average_chroma;

/// Detect the `limit` most likely chords from a frame-major chroma matrix
///
/// Averages the frames, then ranks the averaged vector against `bank`.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the chroma matrix is empty or
/// malformed.
pub fn detect_chords(
    chroma_frames: &[Vec<f32>],
    bank: &TemplateBank,
    limit: usize,
) -> Result<Vec<ChordScore>, AnalysisError> {
    let mean = average_chroma(chroma_frames)?;
    Ok(rank_chords(&mean, bank, limit))
}

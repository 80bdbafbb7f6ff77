//! Template matching and ranking
//!
//! Scores an averaged chroma vector against every template in a bank and
//! ranks chords by descending similarity.

use super::templates::TemplateBank;
use crate::analysis::result::ChordScore;
use crate::error::AnalysisError;
use crate::features::chroma::aggregate::ChromaVector;

/// Score every template in the bank, in bank order
pub fn score_templates(chroma: &ChromaVector, bank: &TemplateBank) -> Vec<ChordScore> {
    bank.templates()
        .iter()
        .map(|template| ChordScore {
            name: template.name().to_string(),
            root: template.root,
            score: chroma.dot(&template.weights),
        })
        .collect()
}

/// Rank chords by template similarity and keep the best `limit`
///
/// Scores are sorted descending with a stable sort, so exactly equal scores
/// stay in bank enumeration order (chromatic from C for the default bank).
/// A `limit` larger than the bank returns the full ranking.
///
/// # Example
///
/// ```
/// use stratum_chords::features::chords::{rank_chords, TemplateBank};
/// use stratum_chords::features::chroma::aggregate::ChromaVector;
///
/// let chroma = ChromaVector([3.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
/// let ranked = rank_chords(&chroma, &TemplateBank::major_triads(), 4);
/// assert_eq!(ranked[0].name, "C");
/// assert_eq!(ranked[0].score, 7.0);
/// ```
pub fn rank_chords(chroma: &ChromaVector, bank: &TemplateBank, limit: usize) -> Vec<ChordScore> {
    let mut scores = score_templates(chroma, bank);

    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scores.truncate(limit);

    log::debug!(
        "Ranked chords: {}",
        scores
            .iter()
            .map(|c| format!("{}={:.4}", c.name, c.score))
            .collect::<Vec<_>>()
            .join(", ")
    );

    scores
}

/// Ranked chord names only
pub fn rank_chord_names(chroma: &ChromaVector, bank: &TemplateBank, limit: usize) -> Vec<String> {
    rank_chords(chroma, bank, limit)
        .into_iter()
        .map(|c| c.name)
        .collect()
}

/// Convert a signed chord count from an outer surface into a ranking limit
///
/// # Errors
///
/// Returns `AnalysisError::Configuration` for negative counts. Zero is valid
/// and yields an empty ranking.
pub fn chord_count_from_signed(count: i64) -> Result<usize, AnalysisError> {
    usize::try_from(count).map_err(|_| {
        AnalysisError::Configuration(format!(
            "Chord count must be >= 0, got {}",
            count
        ))
    })
}

//! Period estimation modules
//!
//! Convert onset list to a tempo estimate using:
//! - FFT autocorrelation of the onset signal
//! - Peak picking over the BPM lag range
//! - A log-normal tempo prior to settle octave ambiguity

pub mod autocorrelation;
pub mod peak_picking;

use crate::error::AnalysisError;

/// BPM candidate with confidence
#[derive(Debug, Clone, PartialEq)]
pub struct BpmCandidate {
    /// BPM estimate
    pub bpm: f32,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,
}

/// Tempo prior parameters
#[derive(Debug, Clone, Copy)]
pub struct TempoPrior {
    /// Most likely tempo in BPM
    pub center_bpm: f32,

    /// Standard deviation in octaves
    pub octave_spread: f32,
}

impl Default for TempoPrior {
    fn default() -> Self {
        Self {
            center_bpm: 120.0,
            octave_spread: 1.0,
        }
    }
}

impl TempoPrior {
    /// Prior weight in (0, 1]; 1.0 at the centre, ~0.61 one spread away
    pub fn weight(&self, bpm: f32) -> f32 {
        if bpm <= 0.0 || self.center_bpm <= 0.0 || self.octave_spread <= 0.0 {
            return 0.0;
        }
        let octaves = (bpm / self.center_bpm).log2() / self.octave_spread;
        (-0.5 * octaves * octaves).exp()
    }
}

/// Final tempo estimate
#[derive(Debug, Clone, PartialEq)]
pub struct TempoEstimate {
    /// Tempo in BPM
    pub bpm: f32,

    /// Confidence score (0.0-1.0) of the chosen candidate
    pub confidence: f32,
}

/// Pick the best tempo from onsets
///
/// Candidates from [`autocorrelation::estimate_bpm_from_autocorrelation`] are
/// re-ranked by `confidence * prior.weight(bpm)`. Returns `None` when fewer
/// than two onsets are available or no periodicity is found in range.
///
/// # Errors
///
/// Propagates parameter errors from the autocorrelation stage.
pub fn estimate_tempo(
    onsets: &[usize],
    sample_rate: u32,
    hop_size: usize,
    min_bpm: f32,
    max_bpm: f32,
    prior: TempoPrior,
) -> Result<Option<TempoEstimate>, AnalysisError> {
    if onsets.len() < 2 {
        log::debug!("Not enough onsets for tempo estimation: {}", onsets.len());
        return Ok(None);
    }

    let candidates = autocorrelation::estimate_bpm_from_autocorrelation(
        onsets,
        sample_rate,
        hop_size,
        min_bpm,
        max_bpm,
    )?;

    let best = candidates
        .iter()
        .map(|c| (c, c.confidence * prior.weight(c.bpm)))
        .fold(None::<(&BpmCandidate, f32)>, |best, (c, w)| match best {
            Some((_, bw)) if bw >= w => best,
            _ => Some((c, w)),
        });

    Ok(best.map(|(c, weighted)| {
        log::debug!(
            "Selected tempo {:.2} BPM (confidence {:.3}, weighted {:.3})",
            c.bpm,
            c.confidence,
            weighted
        );
        TempoEstimate {
            bpm: c.bpm,
            confidence: c.confidence,
        }
    }))
}

//! Key clarity scoring
//!
//! Estimates how "tonal" vs "atonal" a track is from how concentrated its
//! pitch-class energy is.

/// Compute key clarity from per-pitch-class energy totals
///
/// Clarity is 1 - (normalized entropy of the energy distribution): a single
/// dominant pitch class gives 1.0, perfectly flat energy gives 0.0.
///
/// # Returns
///
/// Clarity score (0.0-1.0), higher = more tonal
pub fn compute_key_clarity(energies: &[f32; 12]) -> f32 {
    let total: f32 = energies.iter().map(|e| e.max(0.0)).sum();
    if total <= 1e-10 {
        return 0.0;
    }

    let entropy: f32 = energies
        .iter()
        .map(|&e| e.max(0.0) / total)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum();

    (1.0 - entropy / (12.0f32).ln()).clamp(0.0, 1.0)
}

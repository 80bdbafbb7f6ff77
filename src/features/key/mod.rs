//! Key detection modules
//!
//! Detect musical key using:
//! - Maximum summed chroma energy
//! - Key clarity scoring

pub mod detector;
pub mod key_clarity;

pub use detector::detect_key;
pub use key_clarity::compute_key_clarity;

use crate::analysis::result::Key;

/// Key detection result
#[derive(Debug, Clone)]
pub struct KeyDetectionResult {
    /// Detected key (always major)
    pub key: Key,

    /// Confidence score (0.0-1.0): relative margin of the tonic over the runner-up
    pub confidence: f32,

    /// Key clarity (0.0-1.0)
    pub clarity: f32,

    /// Summed chroma energy per pitch class
    pub pitch_class_energy: [f32; 12],
}

//! Configuration parameters for audio analysis

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Analysis configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // Input
    /// Maximum amount of audio analysed, in seconds (default: 60.0)
    /// Decoded audio beyond this point is discarded
    pub max_duration_seconds: f32,

    // STFT parameters
    /// Frame size for STFT (default: 4096)
    pub frame_size: usize,

    /// Hop size for STFT (default: 512)
    pub hop_size: usize,

    // Tempo estimation
    /// Minimum BPM to consider (default: 60.0)
    pub min_bpm: f32,

    /// Maximum BPM to consider (default: 200.0)
    pub max_bpm: f32,

    /// Centre of the log-normal tempo prior (default: 120.0)
    pub prior_bpm: f32,

    /// Frame size for onset energy measurement (default: 2048)
    pub onset_frame_size: usize,

    /// Onset threshold in dB relative to the strongest energy rise (default: -30.0)
    pub onset_threshold_db: f32,

    // Chroma
    /// Reference tuning frequency for A4 (default: 440.0 Hz)
    pub center_frequency: f32,

    /// Lowest frequency folded into the chromagram (default: 65.0 Hz, ~C2)
    pub chroma_min_frequency: f32,

    /// Highest frequency folded into the chromagram (default: 2100.0 Hz, ~C7)
    pub chroma_max_frequency: f32,

    // Chords
    /// Number of ranked chords reported (default: 4)
    pub chord_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_duration_seconds: 60.0,
            frame_size: 4096,
            hop_size: 512,
            min_bpm: 60.0,
            max_bpm: 200.0,
            prior_bpm: 120.0,
            onset_frame_size: 2048,
            onset_threshold_db: -30.0,
            center_frequency: 440.0,
            chroma_min_frequency: 65.0,
            chroma_max_frequency: 2100.0,
            chord_count: 4,
        }
    }
}

impl AnalysisConfig {
    /// Check that all parameters are usable before any audio is touched
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.max_duration_seconds > 0.0) {
            return Err(AnalysisError::Configuration(format!(
                "max_duration_seconds must be > 0, got {}",
                self.max_duration_seconds
            )));
        }

        if self.frame_size == 0 || self.hop_size == 0 {
            return Err(AnalysisError::Configuration(format!(
                "frame_size and hop_size must be > 0, got {} / {}",
                self.frame_size, self.hop_size
            )));
        }

        if self.onset_frame_size == 0 {
            return Err(AnalysisError::Configuration(
                "onset_frame_size must be > 0".to_string(),
            ));
        }

        if self.hop_size > self.frame_size {
            return Err(AnalysisError::Configuration(format!(
                "hop_size ({}) must not exceed frame_size ({})",
                self.hop_size, self.frame_size
            )));
        }

        if self.min_bpm <= 0.0 || self.max_bpm <= self.min_bpm {
            return Err(AnalysisError::Configuration(format!(
                "Invalid BPM range: [{:.1}, {:.1}]",
                self.min_bpm, self.max_bpm
            )));
        }

        if self.prior_bpm <= 0.0 {
            return Err(AnalysisError::Configuration(format!(
                "prior_bpm must be > 0, got {}",
                self.prior_bpm
            )));
        }

        if self.center_frequency <= 0.0 {
            return Err(AnalysisError::Configuration(format!(
                "center_frequency must be > 0, got {}",
                self.center_frequency
            )));
        }

        if self.chroma_min_frequency <= 0.0
            || self.chroma_max_frequency <= self.chroma_min_frequency
        {
            return Err(AnalysisError::Configuration(format!(
                "Invalid chroma frequency range: [{:.1}, {:.1}] Hz",
                self.chroma_min_frequency, self.chroma_max_frequency
            )));
        }

        Ok(())
    }
}

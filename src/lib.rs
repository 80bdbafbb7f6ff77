//! # Stratum Chords
//!
//! A lightweight audio analysis engine estimating tempo, key and the most
//! likely chords of a recording from classical DSP features.
//!
//! ## Features
//!
//! - **Tempo**: Energy-flux onsets with FFT autocorrelation and a tempo prior
//! - **Key**: Strongest pitch class of the chromagram (always reported as major)
//! - **Chords**: Averaged chroma matched against 12 major-triad templates
//!
//! ## Quick Start
//!
//! ```no_run
//! use stratum_chords::{analyze_audio, AnalysisConfig};
//!
//! // Load audio samples (mono, f32, normalized)
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 44100;
//!
//! let result = analyze_audio(&samples, sample_rate, &AnalysisConfig::default())?;
//!
//! println!("Tempo: {:.2} BPM", result.tempo);
//! println!("Key: {}", result.key.scale_name());
//! println!("Chords: {:?}", result.chord_names());
//! # Ok::<(), stratum_chords::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Audio file → Decode (mono) → Chroma ─┬→ Key
//!                    │                  └→ Aggregate → Template match → Chords
//!                    └→ Onsets → Autocorrelation → Tempo
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

use std::path::Path;
use std::time::Instant;

// Re-export main types
pub use analysis::report::AnalysisReport;
pub use analysis::result::{AnalysisMetadata, AnalysisResult, ChordScore, Key, PitchClass};
pub use config::AnalysisConfig;
pub use error::AnalysisError;

use features::chords::{rank_chords, TemplateBank};
use features::chroma::{average_chroma, extract_chroma_with_params, ChromaParams};
use features::key::detect_key;
use features::onset::detect_energy_flux_onsets;
use features::period::{estimate_tempo, TempoPrior};

/// Key clarity below which the tonality warning is raised
const WEAK_TONALITY_CLARITY: f32 = 0.05;

/// Main analysis function
///
/// Analyzes mono audio samples and returns tempo, key and ranked chords.
/// Samples beyond `config.max_duration_seconds` are ignored.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Analysis configuration parameters
///
/// # Errors
///
/// Returns `AnalysisError` if the configuration or input is invalid or a
/// processing stage fails.
///
/// # Example
///
/// ```
/// use stratum_chords::{analyze_audio, AnalysisConfig};
///
/// // Two seconds of an A major triad
/// let sr = 22050;
/// let samples: Vec<f32> = (0..sr * 2)
///     .map(|i| {
///         let t = i as f32 / sr as f32;
///         [220.0f32, 277.18, 329.63]
///             .iter()
///             .map(|f| (2.0 * std::f32::consts::PI * f * t).sin() / 3.0)
///             .sum()
///     })
///     .collect();
///
/// let result = analyze_audio(&samples, sr as u32, &AnalysisConfig::default())?;
/// assert_eq!(result.chords[0].name, "A");
/// # Ok::<(), stratum_chords::AnalysisError>(())
/// ```
pub fn analyze_audio(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let start_time = Instant::now();

    log::debug!(
        "Starting audio analysis: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    config.validate()?;

    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput("Empty audio samples".to_string()));
    }

    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput("Invalid sample rate".to_string()));
    }

    let max_samples = (config.max_duration_seconds * sample_rate as f32) as usize;
    let samples = &samples[..samples.len().min(max_samples.max(1))];
    let mut warnings = Vec::new();

    // Chroma
    let chroma_params = ChromaParams {
        frame_size: config.frame_size,
        hop_size: config.hop_size,
        center_frequency: config.center_frequency,
        min_frequency: config.chroma_min_frequency,
        max_frequency: config.chroma_max_frequency,
    };
    let chroma = extract_chroma_with_params(samples, sample_rate, chroma_params)?;
    if chroma.is_empty() {
        return Err(AnalysisError::ProcessingError(
            "No chroma frames produced".to_string(),
        ));
    }

    // Tempo
    let onsets = detect_energy_flux_onsets(
        samples,
        config.onset_frame_size,
        config.hop_size,
        config.onset_threshold_db,
    )?;
    log::debug!("Detected {} onsets using energy flux", onsets.len());

    let prior = TempoPrior {
        center_bpm: config.prior_bpm,
        ..Default::default()
    };
    let (tempo, tempo_confidence) = match estimate_tempo(
        &onsets,
        sample_rate,
        config.hop_size,
        config.min_bpm,
        config.max_bpm,
        prior,
    )? {
        Some(estimate) => (estimate.bpm, estimate.confidence),
        None => {
            log::warn!("No periodicity found in {} onsets, reporting tempo 0", onsets.len());
            warnings.push("Tempo could not be estimated".to_string());
            (0.0, 0.0)
        }
    };

    // Key
    let key_result = detect_key(&chroma)?;
    if key_result.clarity < WEAK_TONALITY_CLARITY {
        warnings.push(format!(
            "Weak tonality (key clarity {:.3})",
            key_result.clarity
        ));
    }

    // Chords
    let mean_chroma = average_chroma(&chroma)?;
    let bank = TemplateBank::major_triads();
    let chords = rank_chords(&mean_chroma, &bank, config.chord_count);

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Analysis done in {:.2} ms: tempo={:.2}, key={}, chords={:?}",
        processing_time_ms,
        tempo,
        key_result.key.scale_name(),
        chords.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
    );

    Ok(AnalysisResult {
        tempo,
        tempo_confidence,
        key: key_result.key,
        key_confidence: key_result.confidence,
        chords,
        mean_chroma: *mean_chroma.values(),
        metadata: AnalysisMetadata {
            duration_seconds: samples.len() as f32 / sample_rate as f32,
            sample_rate,
            chroma_frames: chroma.len(),
            onset_count: onsets.len(),
            processing_time_ms,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            warnings,
        },
    })
}

/// Decode an audio file and analyze it
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` for unreadable or unsupported
/// files, and any error from [`analyze_audio`].
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<AnalysisResult, AnalysisError> {
    config.validate()?;
    let decoded = io::decode_audio(path, Some(config.max_duration_seconds))?;
    analyze_audio(&decoded.samples, decoded.sample_rate, config)
}

/// Analyze an audio file and fold any failure into the report
///
/// This is the outermost boundary: it never returns an error and never
/// yields partial results.
///
/// ```
/// use stratum_chords::{analyze_file_report, AnalysisConfig, AnalysisReport};
///
/// let report = analyze_file_report("missing.wav".as_ref(), &AnalysisConfig::default());
/// assert!(matches!(report, AnalysisReport::Failure { .. }));
/// ```
pub fn analyze_file_report(path: &Path, config: &AnalysisConfig) -> AnalysisReport {
    match analyze_file(path, config) {
        Ok(result) => AnalysisReport::from(&result),
        Err(err) => {
            log::warn!("Analysis of {} failed: {}", path.display(), err);
            AnalysisReport::failure(err.to_string())
        }
    }
}

//! Serializable analysis report
//!
//! The report is the value handed to outer surfaces (CLI, services): either a
//! compact summary or a single error message, never both.

use serde::{Deserialize, Serialize};

use super::result::AnalysisResult;
use crate::error::AnalysisError;

/// Outcome of a full analysis, serialized without a tag
///
/// ```
/// use stratum_chords::AnalysisReport;
///
/// let report = AnalysisReport::failure("Decoding error: bad header");
/// assert_eq!(
///     serde_json::to_string(&report).unwrap(),
///     r#"{"error":"Decoding error: bad header"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    /// Successful analysis
    Success {
        /// Tempo in BPM, rounded to 2 decimal places
        tempo: f64,
        /// Key tonic name (e.g. "G")
        key: String,
        /// Scale label (e.g. "G Major")
        scale: String,
        /// Ranked chord names, best first
        chords: Vec<String>,
    },
    /// Failed analysis
    Failure {
        /// Human-readable error message
        error: String,
    },
}

impl AnalysisReport {
    /// Build a failure report
    pub fn failure(message: impl Into<String>) -> Self {
        AnalysisReport::Failure {
            error: message.into(),
        }
    }

    /// True for `Success`
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisReport::Success { .. })
    }
}

impl From<&AnalysisResult> for AnalysisReport {
    fn from(result: &AnalysisResult) -> Self {
        AnalysisReport::Success {
            tempo: round_to_hundredths(result.tempo),
            key: result.key.name().to_string(),
            scale: result.key.scale_name(),
            chords: result.chord_names(),
        }
    }
}

impl From<Result<AnalysisResult, AnalysisError>> for AnalysisReport {
    fn from(outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        match outcome {
            Ok(result) => AnalysisReport::from(&result),
            Err(err) => AnalysisReport::failure(err.to_string()),
        }
    }
}

/// Round to two decimal places in f64 so the JSON carries e.g. `120.19`
fn round_to_hundredths(value: f32) -> f64 {
    (value as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::{AnalysisMetadata, ChordScore, Key, PitchClass};

    fn sample_result(tempo: f32) -> AnalysisResult {
        AnalysisResult {
            tempo,
            tempo_confidence: 0.8,
            key: Key::major(PitchClass::A),
            key_confidence: 0.5,
            chords: ["A", "D", "E", "F#"]
                .iter()
                .map(|&name| ChordScore {
                    name: name.to_string(),
                    root: PitchClass::from_name(name).unwrap(),
                    score: 1.0,
                })
                .collect(),
            mean_chroma: [0.0; 12],
            metadata: AnalysisMetadata {
                duration_seconds: 10.0,
                sample_rate: 44100,
                chroma_frames: 10,
                onset_count: 20,
                processing_time_ms: 1.0,
                algorithm_version: "test".to_string(),
                warnings: vec![],
            },
        }
    }

    #[test]
    fn test_success_json_shape() {
        let report = AnalysisReport::from(&sample_result(120.18734));
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["tempo"], serde_json::json!(120.19));
        assert_eq!(json["key"], "A");
        assert_eq!(json["scale"], "A Major");
        assert_eq!(json["chords"], serde_json::json!(["A", "D", "E", "F#"]));
        assert!(json.get("error").is_none());
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_failure_from_error() {
        let outcome: Result<AnalysisResult, AnalysisError> =
            Err(AnalysisError::InvalidInput("Empty audio samples".to_string()));
        let report = AnalysisReport::from(outcome);

        assert!(!report.is_success());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Invalid input: Empty audio samples"}));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to_hundredths(99.994), 99.99);
        assert_eq!(round_to_hundredths(0.0), 0.0);
        assert_eq!(round_to_hundredths(143.556), 143.56);
    }

    #[test]
    fn test_untagged_deserialize() {
        let report: AnalysisReport = serde_json::from_str(
            r#"{"tempo": 128.0, "key": "C", "scale": "C Major", "chords": ["C"]}"#,
        )
        .unwrap();
        assert!(report.is_success());

        let report: AnalysisReport = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(report, AnalysisReport::failure("boom"));
    }
}

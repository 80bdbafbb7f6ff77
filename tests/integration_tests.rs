//! Integration tests for the audio analysis engine
//!
//! Fixtures are synthesized into a temporary directory with `hound` so the
//! full decode path (symphonia) is exercised end to end.

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use stratum_chords::{
    analyze_audio, analyze_file, analyze_file_report, AnalysisConfig, AnalysisError,
    AnalysisReport, PitchClass,
};

const SAMPLE_RATE: u32 = 44100;

/// Write `channels` interleaved f32 samples as a 16-bit PCM WAV
fn write_wav(path: &Path, samples: &[f32], channels: u16, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for &s in samples {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(v).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

/// Kick every beat: a short exponentially decaying burst
fn kick_pattern(duration_seconds: f32, bpm: f32, sample_rate: u32) -> Vec<f32> {
    let num_samples = (duration_seconds * sample_rate as f32) as usize;
    let mut samples = vec![0.0f32; num_samples];
    let beat_interval = (60.0 / bpm * sample_rate as f32) as usize;
    let kick_samples = (0.15 * sample_rate as f32) as usize;

    let mut pos = 0;
    while pos < num_samples {
        let end = (pos + kick_samples).min(num_samples);
        for i in 0..(end - pos) {
            let t = i as f32 / kick_samples as f32;
            samples[pos + i] = (-t * 5.0).exp() * 0.8;
        }
        pos += beat_interval;
    }
    samples
}

/// Sustained sum of sines at the given frequencies
fn tone_mix(duration_seconds: f32, frequencies: &[f32], sample_rate: u32) -> Vec<f32> {
    let num_samples = (duration_seconds * sample_rate as f32) as usize;
    let gain = 0.8 / frequencies.len() as f32;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            frequencies
                .iter()
                .map(|f| (2.0 * PI * f * t).sin() * gain)
                .sum()
        })
        .collect()
}

const C_MAJOR_TRIAD: [f32; 3] = [261.63, 329.63, 392.0];

fn fixture(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn test_analyze_120bpm_kick_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "120bpm_kick.wav");
    write_wav(&path, &kick_pattern(8.0, 120.0, SAMPLE_RATE), 1, SAMPLE_RATE);

    let result = analyze_file(&path, &AnalysisConfig::default()).expect("Analysis should succeed");

    assert!(
        (result.tempo - 120.0).abs() < 5.0,
        "Tempo should be close to 120, got {:.2}",
        result.tempo
    );
    assert!(result.tempo_confidence > 0.0);
    assert_eq!(result.metadata.sample_rate, SAMPLE_RATE);
    assert!(result.metadata.duration_seconds > 7.9 && result.metadata.duration_seconds < 8.1);
    assert!(result.metadata.onset_count >= 12);
}

#[test]
fn test_analyze_c_major_triad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "c_major.wav");
    write_wav(&path, &tone_mix(4.0, &C_MAJOR_TRIAD, SAMPLE_RATE), 1, SAMPLE_RATE);

    let result = analyze_file(&path, &AnalysisConfig::default()).expect("Analysis should succeed");

    assert_eq!(result.chords.len(), 4);
    assert_eq!(result.chords[0].name, "C");
    assert!(
        [PitchClass::C, PitchClass::E, PitchClass::G].contains(&result.key.tonic),
        "Key should be a triad tone, got {}",
        result.key.name()
    );
    assert_eq!(result.key.scale_name().split(' ').last(), Some("Major"));

    // Scores follow ranking order.
    for pair in result.chords.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_stereo_file_is_downmixed() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "stereo.wav");

    let mono = tone_mix(3.0, &C_MAJOR_TRIAD, SAMPLE_RATE);
    let interleaved: Vec<f32> = mono.iter().flat_map(|&s| [s, s]).collect();
    write_wav(&path, &interleaved, 2, SAMPLE_RATE);

    let result = analyze_file(&path, &AnalysisConfig::default()).expect("Analysis should succeed");

    assert!(
        (result.metadata.duration_seconds - 3.0).abs() < 0.05,
        "Stereo frames should map to mono samples, got {:.2}s",
        result.metadata.duration_seconds
    );
    assert_eq!(result.chords[0].name, "C");
}

#[test]
fn test_max_duration_truncates_decoded_audio() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "long.wav");
    write_wav(&path, &tone_mix(5.0, &C_MAJOR_TRIAD, SAMPLE_RATE), 1, SAMPLE_RATE);

    let config = AnalysisConfig {
        max_duration_seconds: 2.0,
        ..Default::default()
    };
    let result = analyze_file(&path, &config).unwrap();

    assert!(
        (result.metadata.duration_seconds - 2.0).abs() < 0.01,
        "Expected 2s of analysed audio, got {:.3}s",
        result.metadata.duration_seconds
    );
}

#[test]
fn test_report_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "groove.wav");

    let kick = kick_pattern(6.0, 120.0, SAMPLE_RATE);
    let tones = tone_mix(6.0, &C_MAJOR_TRIAD, SAMPLE_RATE);
    let mix: Vec<f32> = kick.iter().zip(&tones).map(|(k, t)| 0.5 * k + 0.5 * t).collect();
    write_wav(&path, &mix, 1, SAMPLE_RATE);

    let report = analyze_file_report(&path, &AnalysisConfig::default());
    assert!(report.is_success(), "{:?}", report);

    let json = serde_json::to_value(&report).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert!(object["tempo"].is_f64());
    let key = object["key"].as_str().unwrap();
    assert_eq!(object["scale"].as_str().unwrap(), format!("{} Major", key));

    let chords = object["chords"].as_array().unwrap();
    assert_eq!(chords.len(), 4);
    assert!(chords.iter().all(|c| c.is_string()));

    // Tempo is reported with at most two decimals.
    let tempo = object["tempo"].as_f64().unwrap();
    assert!(((tempo * 100.0).round() - tempo * 100.0).abs() < 1e-6);
}

#[test]
fn test_custom_chord_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "c_major.wav");
    write_wav(&path, &tone_mix(2.0, &C_MAJOR_TRIAD, SAMPLE_RATE), 1, SAMPLE_RATE);

    let config = AnalysisConfig {
        chord_count: 20,
        ..Default::default()
    };
    match analyze_file_report(&path, &config) {
        AnalysisReport::Success { chords, .. } => {
            assert_eq!(chords.len(), 12);
            let mut unique = chords.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 12);
        }
        AnalysisReport::Failure { error } => panic!("unexpected failure: {}", error),
    }
}

#[test]
fn test_unsupported_extension_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "notes.txt");
    std::fs::write(&path, "not audio").unwrap();

    let report = analyze_file_report(&path, &AnalysisConfig::default());
    match report {
        AnalysisReport::Failure { error } => assert!(error.contains("Unsupported"), "{}", error),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn test_missing_file_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let report = analyze_file_report(&fixture(&dir, "missing.wav"), &AnalysisConfig::default());

    let json = serde_json::to_value(&report).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object["error"].is_string());
}

#[test]
fn test_corrupt_file_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "broken.mp3");
    std::fs::write(&path, [0u8; 64]).unwrap();

    let report = analyze_file_report(&path, &AnalysisConfig::default());
    assert!(!report.is_success());
}

#[test]
fn test_empty_samples_error() {
    let result = analyze_audio(&[], SAMPLE_RATE, &AnalysisConfig::default());
    assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
}

#[test]
fn test_silence_reports_zero_tempo() {
    let samples = vec![0.0f32; SAMPLE_RATE as usize * 3];
    let result = analyze_audio(&samples, SAMPLE_RATE, &AnalysisConfig::default())
        .expect("Silence is analysable");

    assert_eq!(result.tempo, 0.0);
    assert!(!result.metadata.warnings.is_empty());
    // All-zero chroma ties every template; chromatic order wins.
    assert_eq!(result.chord_names(), vec!["C", "C#", "D", "D#"]);
    assert_eq!(result.key.tonic, PitchClass::C);
}

#[test]
fn test_invalid_config_rejected() {
    let config = AnalysisConfig {
        min_bpm: 200.0,
        max_bpm: 100.0,
        ..Default::default()
    };
    let samples = tone_mix(1.0, &C_MAJOR_TRIAD, SAMPLE_RATE);
    let result = analyze_audio(&samples, SAMPLE_RATE, &config);
    assert!(matches!(result, Err(AnalysisError::Configuration(_))));
}

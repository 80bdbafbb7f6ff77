//! Example: Analyze a single audio file
//!
//! Usage:
//!   cargo run --release --example analyze_file -- <audio-file>

use std::env;
use std::path::Path;

use stratum_chords::{analyze_file, AnalysisConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .ok_or("Usage: analyze_file <audio-file>")?;

    let config = AnalysisConfig::default();
    let result = analyze_file(Path::new(&path), &config)?;

    println!("Analysis Results:");
    println!(
        "  Tempo: {:.2} BPM (confidence: {:.2})",
        result.tempo, result.tempo_confidence
    );
    println!(
        "  Key: {} (confidence: {:.2})",
        result.key.scale_name(),
        result.key_confidence
    );
    for (rank, chord) in result.chords.iter().enumerate() {
        println!("  Chord #{}: {} (score {:.3})", rank + 1, chord.name, chord.score);
    }
    println!(
        "  Duration: {:.2}s, {} chroma frames, {} onsets",
        result.metadata.duration_seconds,
        result.metadata.chroma_frames,
        result.metadata.onset_count
    );
    println!("  Processing time: {:.2} ms", result.metadata.processing_time_ms);
    for warning in &result.metadata.warnings {
        println!("  Warning: {}", warning);
    }

    Ok(())
}

//! Command-line entry point: analyze one audio file and print a JSON report
//!
//! The process prints exactly one JSON object to stdout and exits with code 0
//! whether or not the analysis succeeded.

use std::path::{Path, PathBuf};

use clap::Parser;
use stratum_chords::features::chords::chord_count_from_signed;
use stratum_chords::{analyze_file_report, AnalysisConfig, AnalysisReport};

#[derive(Parser)]
#[command(
    name = "stratum-chords",
    version,
    about = "Estimate tempo, key and likely chords of an audio file",
    long_about = "Analyzes an audio file (mp3, wav, m4a, ogg, flac) and prints a JSON object with \
                  tempo, key, scale and the top ranked major chords, or an object with a single \
                  error field."
)]
struct Cli {
    /// Audio file to analyze
    audio: Option<PathBuf>,

    /// Number of ranked chords to report [default: 4]
    #[arg(short, long, allow_negative_numbers = true)]
    chords: Option<i64>,

    /// Seconds of audio to analyze from the start of the file [default: 60]
    #[arg(short, long)]
    duration: Option<f32>,

    /// Optional JSON file with analysis configuration overrides
    ///
    /// `--chords` and `--duration` take precedence over the file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging (stderr)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let report = run(&cli);

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };

    match rendered {
        Ok(json) => println!("{}", json),
        // Only reachable if serialization itself fails; keep the stdout contract.
        Err(e) => println!("{{\"error\":{:?}}}", e.to_string()),
    }
}

fn run(cli: &Cli) -> AnalysisReport {
    let Some(audio) = cli.audio.as_ref() else {
        return AnalysisReport::failure("No audio file provided");
    };

    let config = match resolve_config(cli) {
        Ok(config) => config,
        Err(message) => return AnalysisReport::failure(message),
    };

    log::info!("Analyzing {}", audio.display());
    analyze_file_report(audio, &config)
}

/// Defaults, then the `--config` file, then explicit flags
fn resolve_config(cli: &Cli) -> Result<AnalysisConfig, String> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(count) = cli.chords {
        config.chord_count = chord_count_from_signed(count).map_err(|e| e.to_string())?;
    }
    if let Some(seconds) = cli.duration {
        config.max_duration_seconds = seconds;
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<AnalysisConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}

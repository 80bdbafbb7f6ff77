//! Example: Analyze multiple audio files in parallel
//!
//! Usage:
//!   cargo run --release --example analyze_batch -- [--jobs N] <file1> <file2> ...
//!
//! Emits one JSON object per line (JSONL), in the order the files were given.
//! Parallelism is across files; each file analysis is single-threaded.

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use stratum_chords::{analyze_file_report, AnalysisConfig, AnalysisReport};

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<PathBuf> = Vec::new();

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--jobs" => {
                if args.is_empty() {
                    return Err("--jobs requires a value".into());
                }
                let v = args.remove(0).parse::<usize>()?;
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_batch [--jobs N] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n"
                );
                return Ok(());
            }
            _ => paths.push(PathBuf::from(a)),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one audio file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let config = AnalysisConfig::default();
    let t0 = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let reports: Vec<AnalysisReport> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| analyze_file_report(path, &config))
            .collect()
    });

    for (path, report) in paths.iter().zip(&reports) {
        println!(
            "{{\"file\":{},\"report\":{}}}",
            serde_json::to_string(&path.display().to_string())?,
            serde_json::to_string(report)?
        );
    }

    let ok = reports.iter().filter(|r| r.is_success()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        reports.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

//! Chroma extraction modules
//!
//! Extract pitch-class distribution (12 semitones) from audio:
//! - STFT chroma vector computation
//! - Normalization strategies
//! - Aggregation over time

pub mod aggregate;
pub mod extractor;
pub mod normalization;

pub use aggregate::{average_chroma, average_pitch_rows, ChromaVector};
pub use extractor::{extract_chroma, extract_chroma_with_params, ChromaParams};

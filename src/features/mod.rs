//! Feature extraction modules
//!
//! This module contains all feature extraction algorithms:
//! - Onset detection (energy flux)
//! - Period estimation (tempo)
//! - Chroma extraction and aggregation
//! - Key detection
//! - Chord template matching

pub mod chords;
pub mod chroma;
pub mod key;
pub mod onset;
pub mod period;

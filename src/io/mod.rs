//! Audio I/O modules
//!
//! Audio decoding using Symphonia.

pub mod decoder;

pub use decoder::{decode_audio, is_supported_extension, DecodedAudio, SUPPORTED_EXTENSIONS};

//! Audio decoding using Symphonia

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::AnalysisError;
use crate::preprocessing::channel_mixer::downmix_to_mono;

/// File extensions accepted for analysis (case-insensitive)
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp3", "wav", "m4a", "ogg", "flac"];

/// Decoded mono audio
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Mono samples, nominally in [-1.0, 1.0]
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Channel count of the source before downmixing
    pub source_channels: usize,
}

impl DecodedAudio {
    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// True if the path has one of [`SUPPORTED_EXTENSIONS`]
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Decode an audio file to mono PCM samples
///
/// Multi-channel audio is averaged to mono. When `max_duration_seconds` is
/// set, decoding stops once that much audio has been read and the result is
/// truncated to exactly that length.
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if the extension is unsupported,
/// the file cannot be opened, no decodable track exists, or the decoder fails.
pub fn decode_audio(
    path: &Path,
    max_duration_seconds: Option<f32>,
) -> Result<DecodedAudio, AnalysisError> {
    log::debug!("Decoding audio file: {}", path.display());

    if !is_supported_extension(path) {
        return Err(AnalysisError::DecodingError(format!(
            "Unsupported audio format for {} (expected one of: {})",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    let file = File::open(path).map_err(|e| {
        AnalysisError::DecodingError(format!("Cannot open {}: {}", path.display(), e))
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::DecodingError("No supported audio tracks found".to_string()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| AnalysisError::DecodingError("Unknown sample rate".to_string()))?;

    let mut decoder =
        symphonia::default::get_codecs().make(&codec_params, &DecoderOptions::default())?;

    let max_samples = max_duration_seconds
        .map(|seconds| (seconds.max(0.0) * sample_rate as f32) as usize)
        .unwrap_or(usize::MAX);

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut source_channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    while samples.len() < max_samples {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                source_channels = spec.channels.count();

                let needs_alloc = sample_buf
                    .as_ref()
                    .map(|b| b.capacity() < decoded.capacity() * source_channels)
                    .unwrap_or(true);
                if needs_alloc {
                    sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
                }

                if let Some(buf) = sample_buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    let mono = downmix_to_mono(buf.samples(), source_channels)?;
                    samples.extend_from_slice(&mono);
                }
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping corrupt packet: {}", msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    samples.truncate(max_samples);

    log::debug!(
        "Decoded {} samples at {} Hz ({} source channels)",
        samples.len(),
        sample_rate,
        source_channels
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        source_channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension(Path::new("song.mp3")));
        assert!(is_supported_extension(Path::new("/tmp/Song.FLAC")));
        assert!(is_supported_extension(Path::new("take.m4a")));
        assert!(!is_supported_extension(Path::new("notes.txt")));
        assert!(!is_supported_extension(Path::new("no_extension")));
    }

    #[test]
    fn test_unsupported_extension_rejected_before_open() {
        let err = decode_audio(Path::new("/does/not/exist.txt"), None).unwrap_err();
        assert!(matches!(err, AnalysisError::DecodingError(_)));
        assert!(err.to_string().contains("Unsupported"), "{}", err);
    }

    #[test]
    fn test_missing_file() {
        let err = decode_audio(Path::new("/does/not/exist.wav"), None).unwrap_err();
        assert!(err.to_string().contains("Cannot open"), "{}", err);
    }
}

//! Chroma vector extraction
//!
//! Converts an STFT magnitude spectrogram to 12-element chroma vectors.
//!
//! Each FFT bin inside the configured frequency range is assigned to its
//! nearest equal-tempered semitone relative to the tuning reference, and the
//! bin powers (squared magnitudes) are summed per pitch class. Frames are then
//! max-normalized.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use super::normalization::normalize_frame_max;
use crate::error::AnalysisError;

/// Chroma extraction parameters
#[derive(Debug, Clone, Copy)]
pub struct ChromaParams {
    /// FFT frame size in samples
    pub frame_size: usize,
    /// Hop size in samples
    pub hop_size: usize,
    /// A4 tuning reference in Hz
    pub center_frequency: f32,
    /// Lowest folded frequency in Hz
    pub min_frequency: f32,
    /// Highest folded frequency in Hz
    pub max_frequency: f32,
}

impl Default for ChromaParams {
    fn default() -> Self {
        Self {
            frame_size: 4096,
            hop_size: 512,
            center_frequency: 440.0,
            min_frequency: 65.0,
            max_frequency: 2100.0,
        }
    }
}

/// Extract chroma vectors from audio samples with default tuning and range
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - FFT frame size (default: 4096)
/// * `hop_size` - Hop size (default: 512)
///
/// # Returns
///
/// Vector of 12-element chroma vectors (one per frame)
pub fn extract_chroma(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
) -> Result<Vec<Vec<f32>>, AnalysisError> {
    extract_chroma_with_params(
        samples,
        sample_rate,
        ChromaParams {
            frame_size,
            hop_size,
            ..Default::default()
        },
    )
}

/// Extract chroma vectors with explicit parameters
///
/// Signals shorter than one frame are zero-padded to a single frame.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an empty signal, a zero sample
/// rate or zero frame/hop sizes.
pub fn extract_chroma_with_params(
    samples: &[f32],
    sample_rate: u32,
    params: ChromaParams,
) -> Result<Vec<Vec<f32>>, AnalysisError> {
    log::debug!(
        "Extracting chroma: {} samples at {} Hz, frame={}, hop={}",
        samples.len(),
        sample_rate,
        params.frame_size,
        params.hop_size
    );

    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }

    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput(
            "Invalid sample rate: 0".to_string(),
        ));
    }

    if params.frame_size == 0 || params.hop_size == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Frame and hop size must be > 0, got {} / {}",
            params.frame_size, params.hop_size
        )));
    }

    let frame_size = params.frame_size;
    let bin_map = build_bin_map(sample_rate, params);
    let window = hann_window(frame_size);

    let num_frames = if samples.len() >= frame_size {
        (samples.len() - frame_size) / params.hop_size + 1
    } else {
        1
    };

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(frame_size);
    let mut buffer = vec![Complex::new(0.0f32, 0.0); frame_size];
    let mut chroma_frames = Vec::with_capacity(num_frames);

    for frame_idx in 0..num_frames {
        let start = frame_idx * params.hop_size;
        for (i, slot) in buffer.iter_mut().enumerate() {
            let sample = samples.get(start + i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * window[i], 0.0);
        }

        fft.process(&mut buffer);

        let mut chroma = vec![0.0f32; 12];
        for &(bin, pitch_class) in &bin_map {
            chroma[pitch_class] += buffer[bin].norm_sqr();
        }
        normalize_frame_max(&mut chroma);
        chroma_frames.push(chroma);
    }

    log::debug!("Extracted {} chroma frames", chroma_frames.len());

    Ok(chroma_frames)
}

/// Pitch class (0 = C) nearest to `frequency` under the given A4 reference
pub fn frequency_to_pitch_class(frequency: f32, center_frequency: f32) -> usize {
    let midi = 69.0 + 12.0 * (frequency / center_frequency).log2();
    (midi.round() as i64).rem_euclid(12) as usize
}

/// (bin index, pitch class) pairs for every bin inside the frequency range
fn build_bin_map(sample_rate: u32, params: ChromaParams) -> Vec<(usize, usize)> {
    let bin_hz = sample_rate as f32 / params.frame_size as f32;
    let nyquist = sample_rate as f32 / 2.0;
    let max_frequency = params.max_frequency.min(nyquist);

    (1..=params.frame_size / 2)
        .filter_map(|bin| {
            let frequency = bin as f32 * bin_hz;
            if frequency < params.min_frequency || frequency > max_frequency {
                return None;
            }
            Some((bin, frequency_to_pitch_class(frequency, params.center_frequency)))
        })
        .collect()
}

fn hann_window(size: usize) -> Vec<f32> {
    if size == 1 {
        return vec![1.0];
    }
    (0..size)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f32, sample_rate: u32, seconds: f32) -> Vec<f32> {
        let n = (sample_rate as f32 * seconds) as usize;
        (0..n)
            .map(|i| {
                (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32).sin()
                    * 0.5
            })
            .collect()
    }

    fn argmax(v: &[f32]) -> usize {
        v.iter()
            .enumerate()
            .fold((0, f32::MIN), |best, (i, &x)| if x > best.1 { (i, x) } else { best })
            .0
    }

    #[test]
    fn test_frequency_to_pitch_class() {
        assert_eq!(frequency_to_pitch_class(440.0, 440.0), 9); // A4
        assert_eq!(frequency_to_pitch_class(261.63, 440.0), 0); // C4
        assert_eq!(frequency_to_pitch_class(329.63, 440.0), 4); // E4
        assert_eq!(frequency_to_pitch_class(65.41, 440.0), 0); // C2
        assert_eq!(frequency_to_pitch_class(466.16, 440.0), 10); // A#4
    }

    #[test]
    fn test_a440_sine_peaks_at_a() {
        let samples = sine(440.0, 44100, 1.0);
        let chroma = extract_chroma(&samples, 44100, 4096, 512).unwrap();

        assert!(!chroma.is_empty());
        for frame in &chroma {
            assert_eq!(frame.len(), 12);
            assert_eq!(argmax(frame), 9, "frame {:?}", frame);
            assert!((frame[9] - 1.0).abs() < 1e-6, "frames are max-normalized");
        }
    }

    #[test]
    fn test_c_major_triad_dominates() {
        let sr = 44100;
        let c = sine(261.63, sr, 1.0);
        let e = sine(329.63, sr, 1.0);
        let g = sine(392.00, sr, 1.0);
        let mix: Vec<f32> = (0..c.len()).map(|i| (c[i] + e[i] + g[i]) / 3.0).collect();

        let chroma = extract_chroma(&mix, sr, 4096, 512).unwrap();
        let frame = &chroma[chroma.len() / 2];
        let floor = [0usize, 4, 7]
            .iter()
            .map(|&i| frame[i])
            .fold(f32::MAX, f32::min);
        for (i, &v) in frame.iter().enumerate() {
            if ![0, 4, 7].contains(&i) {
                assert!(v < floor, "pitch class {} ({}) >= triad floor {}", i, v, floor);
            }
        }
    }

    #[test]
    fn test_pitch_class_energy_is_power() {
        // A4 at full amplitude, E5 at half: power ratio 4:1.
        let sr = 44100;
        let mix: Vec<f32> = (0..sr as usize)
            .map(|i| {
                let t = i as f32 / sr as f32;
                0.6 * (2.0 * std::f32::consts::PI * 440.0 * t).sin()
                    + 0.3 * (2.0 * std::f32::consts::PI * 659.26 * t).sin()
            })
            .collect();

        let chroma = extract_chroma(&mix, sr, 4096, 512).unwrap();
        let frame = &chroma[chroma.len() / 2];
        assert!((frame[9] - 1.0).abs() < 1e-6);
        assert!(
            (frame[4] - 0.25).abs() < 0.03,
            "E relative to A should be ~0.25, got {}",
            frame[4]
        );
    }

    #[test]
    fn test_frame_count() {
        let samples = vec![0.0f32; 4096 + 512 * 9];
        let chroma = extract_chroma(&samples, 44100, 4096, 512).unwrap();
        assert_eq!(chroma.len(), 10);
    }

    #[test]
    fn test_short_signal_padded_to_one_frame() {
        let samples = sine(440.0, 44100, 0.05);
        let chroma = extract_chroma(&samples, 44100, 4096, 512).unwrap();
        assert_eq!(chroma.len(), 1);
    }

    #[test]
    fn test_silence_yields_zero_frames() {
        let samples = vec![0.0f32; 8192];
        let chroma = extract_chroma(&samples, 44100, 4096, 512).unwrap();
        assert!(chroma.iter().all(|f| f.iter().all(|&v| v == 0.0)));
    }

    #[test]
    fn test_invalid_parameters() {
        let samples = vec![0.1f32; 8192];
        assert!(extract_chroma(&[], 44100, 4096, 512).is_err());
        assert!(extract_chroma(&samples, 0, 4096, 512).is_err());
        assert!(extract_chroma(&samples, 44100, 0, 512).is_err());
        assert!(extract_chroma(&samples, 44100, 4096, 0).is_err());
    }
}

//! Audio waveform decoding and acoustic feature computation.
//!
//! Decoding goes through FFmpeg to mono f32le PCM at a fixed resample
//! rate, via a temporary file. Feature derivation is a pure function over
//! the sample buffer so identical audio always yields identical features.
//!
//! Windowing is fixed: 2048-sample analysis frames with a 512-sample hop,
//! Hann-weighted for the spectrum. A signal shorter than one frame is
//! analyzed as a single frame (zero-padded for the spectrum).

use std::path::Path;

use rustfft::{num_complex::Complex, FftPlanner};
use tempfile::NamedTempFile;
use tracing::debug;

use cwatch_models::AcousticFeatureVector;

use crate::error::{MediaError, MediaResult};

/// Fixed resample rate for feature extraction.
pub const FEATURE_SAMPLE_RATE: u32 = 22_050;

/// Analysis window length in samples.
const FRAME_LEN: usize = 2048;

/// Hop between analysis windows in samples.
const HOP_LEN: usize = 512;

/// Decode an audio file and compute its acoustic feature vector.
///
/// Fails with a decode error if FFmpeg cannot produce a waveform or the
/// file contains no audio samples.
pub async fn extract_features(path: impl AsRef<Path>) -> MediaResult<AcousticFeatureVector> {
    let samples = decode_waveform(path.as_ref()).await?;
    if samples.is_empty() {
        return Err(MediaError::NoAudioData);
    }

    let features = compute_features(&samples, FEATURE_SAMPLE_RATE);
    debug!(
        samples = samples.len(),
        duration = features.duration,
        "Acoustic feature extraction complete"
    );

    Ok(features)
}

/// Decode any input container to mono f32le PCM at the fixed rate.
async fn decode_waveform(input: &Path) -> MediaResult<Vec<f32>> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

    let temp_pcm = NamedTempFile::new()?;

    let status = tokio::process::Command::new("ffmpeg")
        .arg("-i")
        .arg(input)
        .args([
            "-vn", // No video
            "-ac",
            "1", // Mono
            "-ar",
            &FEATURE_SAMPLE_RATE.to_string(),
            "-f",
            "f32le", // Raw 32-bit float little-endian
            "-y",    // Overwrite
        ])
        .arg(temp_pcm.path())
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await
        .map_err(|e| MediaError::decode_failed(format!("FFmpeg spawn failed: {}", e)))?;

    if !status.success() {
        return Err(MediaError::decode_failed(format!(
            "FFmpeg exited with code: {:?}",
            status.code()
        )));
    }

    let bytes = tokio::fs::read(temp_pcm.path()).await?;
    if bytes.is_empty() {
        return Err(MediaError::NoAudioData);
    }

    // 4 bytes per sample, little-endian
    let samples: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    Ok(samples)
}

/// Compute the four scalar descriptors from a mono waveform.
///
/// Deterministic: the same samples and rate always produce bitwise
/// identical output.
pub fn compute_features(samples: &[f32], sample_rate: u32) -> AcousticFeatureVector {
    let duration = samples.len() as f64 / sample_rate as f64;
    if samples.is_empty() {
        return AcousticFeatureVector {
            duration: 0.0,
            rms_energy: 0.0,
            spectral_centroid: 0.0,
            zero_crossing_rate: 0.0,
        };
    }

    let mut fft_planner = FftPlanner::<f64>::new();
    let fft = fft_planner.plan_fft_forward(FRAME_LEN);
    let hann = hann_window(FRAME_LEN);

    let mut rms_sum = 0.0f64;
    let mut zcr_sum = 0.0f64;
    let mut centroid_sum = 0.0f64;
    let mut frames = 0u64;

    let mut start = 0usize;
    loop {
        let end = (start + FRAME_LEN).min(samples.len());
        let window = &samples[start..end];

        rms_sum += frame_rms(window);
        zcr_sum += frame_zero_crossings(window);
        centroid_sum += frame_centroid(window, sample_rate, fft.as_ref(), &hann);
        frames += 1;

        start += HOP_LEN;
        if start + FRAME_LEN > samples.len() {
            break;
        }
    }

    let n = frames as f64;
    AcousticFeatureVector {
        duration,
        rms_energy: rms_sum / n,
        spectral_centroid: centroid_sum / n,
        zero_crossing_rate: zcr_sum / n,
    }
}

/// Root-mean-square amplitude of one window.
fn frame_rms(window: &[f32]) -> f64 {
    let energy: f64 = window.iter().map(|&x| (x as f64) * (x as f64)).sum();
    (energy / window.len() as f64).sqrt()
}

/// Fraction of adjacent sample pairs whose sign differs.
fn frame_zero_crossings(window: &[f32]) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }
    let crossings = window
        .windows(2)
        .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
        .count();
    crossings as f64 / (window.len() - 1) as f64
}

/// Hann window coefficients, applied before the FFT to keep spectral
/// leakage from skewing the centroid.
fn hann_window(len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let phase = 2.0 * std::f64::consts::PI * n as f64 / (len - 1) as f64;
            0.5 * (1.0 - phase.cos())
        })
        .collect()
}

/// Magnitude-weighted average frequency of one window's spectrum.
///
/// An all-zero window has no energy to weight; its centroid is 0.
fn frame_centroid(
    window: &[f32],
    sample_rate: u32,
    fft: &dyn rustfft::Fft<f64>,
    hann: &[f64],
) -> f64 {
    let mut buffer: Vec<Complex<f64>> = window
        .iter()
        .map(|&x| x as f64)
        .chain(std::iter::repeat(0.0))
        .take(FRAME_LEN)
        .zip(hann.iter())
        .map(|(x, &w)| Complex::new(x * w, 0.0))
        .collect();
    fft.process(&mut buffer);

    let bin_hz = sample_rate as f64 / FRAME_LEN as f64;
    let mut weighted = 0.0f64;
    let mut total = 0.0f64;
    for (k, value) in buffer.iter().take(FRAME_LEN / 2 + 1).enumerate() {
        let magnitude = value.norm();
        weighted += k as f64 * bin_hz * magnitude;
        total += magnitude;
    }

    if total > 0.0 {
        weighted / total
    } else {
        0.0
    }
}

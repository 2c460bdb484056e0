//! Prompt construction for the inference service.
//!
//! Both templates enumerate the same four analysis focuses. Feature value
//! interpolation controls display precision only; the extractor's values
//! are never rounded before this point.

use cwatch_media::{MediaResult, SampledFrame};
use cwatch_ml_client::Part;
use cwatch_models::AcousticFeatureVector;

/// Hard cap on frames sent per request, applied again here even if the
/// sampler returned more.
const MAX_PROMPT_FRAMES: usize = 10;

const VIDEO_INSTRUCTION: &str = "You are a safety analyst. The following images are frames sampled \
in temporal order from a short video clip. Assess the clip for risk, focusing on:\n\
1. Aggressive or threatening movement\n\
2. Signs of distress or danger\n\
3. Unsafe situations or environments\n\
4. Suspicious behavioral patterns\n\
Describe what the frames show, then give an overall risk assessment with your reasoning.";

/// Build the multimodal request for the video branch.
///
/// An instruction text part followed by at most the first ten frames as
/// inline PNG parts, in temporal order.
pub fn video_request(frames: &[SampledFrame]) -> MediaResult<Vec<Part>> {
    let mut parts = Vec::with_capacity(1 + frames.len().min(MAX_PROMPT_FRAMES));
    parts.push(Part::text(VIDEO_INSTRUCTION));

    for frame in frames.iter().take(MAX_PROMPT_FRAMES) {
        parts.push(Part::png(&frame.to_png_bytes()?));
    }

    Ok(parts)
}

/// Build the templated text request for the audio branch.
pub fn audio_request(features: &AcousticFeatureVector) -> String {
    format!(
        "You are a safety analyst. An audio clip was summarized into acoustic descriptors:\n\
- Duration: {:.2} seconds\n\
- RMS energy: {:.2}\n\
- Spectral centroid: {:.2} Hz\n\
- Zero crossing rate: {:.4}\n\
Assess the clip for risk, focusing on:\n\
1. Aggressive or threatening sounds\n\
2. Signs of distress or danger\n\
3. Unsafe situations or environments\n\
4. Suspicious acoustic patterns\n\
Interpret the descriptors, then give an overall risk assessment with your reasoning.",
        features.duration,
        features.rms_energy,
        features.spectral_centroid,
        features.zero_crossing_rate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn frame(index: u64) -> SampledFrame {
        SampledFrame {
            index,
            image: RgbImage::new(1, 1),
        }
    }

    #[test]
    fn test_video_request_shape() {
        let frames: Vec<SampledFrame> = (0..3).map(frame).collect();
        let parts = video_request(&frames).unwrap();

        assert_eq!(parts.len(), 4);
        assert!(matches!(&parts[0], Part::Text(t) if t.contains("threatening movement")));
        assert!(matches!(&parts[1], Part::InlineData(_)));
    }

    #[test]
    fn test_video_request_double_cap() {
        let frames: Vec<SampledFrame> = (0..25).map(frame).collect();
        let parts = video_request(&frames).unwrap();

        // 1 instruction + at most 10 frames
        assert_eq!(parts.len(), 11);
    }

    #[test]
    fn test_audio_request_formatting() {
        let features = AcousticFeatureVector {
            duration: 3.0,
            rms_energy: 0.0,
            spectral_centroid: 0.0,
            zero_crossing_rate: 0.0,
        };
        let prompt = audio_request(&features);

        assert!(prompt.contains("Duration: 3.00 seconds"));
        assert!(prompt.contains("RMS energy: 0.00"));
        assert!(prompt.contains("Spectral centroid: 0.00 Hz"));
        assert!(prompt.contains("Zero crossing rate: 0.0000"));
        assert!(prompt.contains("distress"));
    }

    #[test]
    fn test_audio_request_precision() {
        let features = AcousticFeatureVector {
            duration: 12.3456,
            rms_energy: 0.087_65,
            spectral_centroid: 1523.456,
            zero_crossing_rate: 0.123_456,
        };
        let prompt = audio_request(&features);

        assert!(prompt.contains("12.35 seconds"));
        assert!(prompt.contains("RMS energy: 0.09"));
        assert!(prompt.contains("1523.46 Hz"));
        assert!(prompt.contains("0.1235"));
    }
}

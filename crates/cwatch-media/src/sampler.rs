//! Evenly spaced frame sampling.

use tracing::debug;

use crate::error::MediaResult;
use crate::video::{SampledFrame, VideoSource};

/// Default cap on sampled frames per video.
pub const DEFAULT_MAX_FRAMES: usize = 10;

/// Stride between sampled frame indices: `max(1, total / cap)`.
pub fn sampling_interval(total_frames: u64, max_frames: usize) -> u64 {
    (total_frames / max_frames.max(1) as u64).max(1)
}

/// Select up to `max_frames` evenly spaced frames from a video source.
///
/// Visits indices `0, interval, 2*interval, ...` and collects frames in
/// visitation order. Indices that fail to decode are skipped without retry
/// or substitution, so the result may be shorter than the cap near an
/// unreliable end of stream. Source indices in the result are strictly
/// increasing.
pub async fn sample_frames<S: VideoSource + ?Sized>(
    source: &S,
    max_frames: usize,
) -> MediaResult<Vec<SampledFrame>> {
    let total = source.frame_count();
    let interval = sampling_interval(total, max_frames);

    let mut frames = Vec::with_capacity(max_frames);
    let mut index = 0u64;

    while index < total && frames.len() < max_frames {
        if let Some(frame) = source.read_frame(index).await {
            frames.push(frame);
        }
        index += interval;
    }

    debug!(
        total_frames = total,
        interval,
        sampled = frames.len(),
        "Frame sampling complete"
    );

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::RgbImage;
    use std::collections::HashSet;

    /// In-memory source producing 1x1 frames, with optional bad indices.
    struct FakeSource {
        total: u64,
        bad: HashSet<u64>,
    }

    impl FakeSource {
        fn new(total: u64) -> Self {
            Self {
                total,
                bad: HashSet::new(),
            }
        }

        fn with_bad(total: u64, bad: &[u64]) -> Self {
            Self {
                total,
                bad: bad.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl VideoSource for FakeSource {
        fn frame_count(&self) -> u64 {
            self.total
        }

        async fn read_frame(&self, index: u64) -> Option<SampledFrame> {
            if self.bad.contains(&index) {
                return None;
            }
            Some(SampledFrame {
                index,
                image: RgbImage::new(1, 1),
            })
        }
    }

    #[test]
    fn test_sampling_interval() {
        assert_eq!(sampling_interval(100, 10), 10);
        assert_eq!(sampling_interval(5, 10), 1);
        assert_eq!(sampling_interval(0, 10), 1);
        assert_eq!(sampling_interval(99, 10), 9);
    }

    #[tokio::test]
    async fn test_even_stride_over_long_video() {
        let source = FakeSource::new(100);
        let frames = sample_frames(&source, 10).await.unwrap();

        let indices: Vec<u64> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
    }

    #[tokio::test]
    async fn test_short_video_yields_every_frame() {
        let source = FakeSource::new(5);
        let frames = sample_frames(&source, 10).await.unwrap();

        let indices: Vec<u64> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_failed_decodes_are_skipped() {
        let source = FakeSource::with_bad(100, &[20, 50]);
        let frames = sample_frames(&source, 10).await.unwrap();

        let indices: Vec<u64> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 10, 30, 40, 60, 70, 80, 90]);
    }

    #[tokio::test]
    async fn test_cap_is_respected_and_indices_increase() {
        let source = FakeSource::new(1000);
        let frames = sample_frames(&source, 10).await.unwrap();

        assert_eq!(frames.len(), 10);
        assert!(frames.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[tokio::test]
    async fn test_empty_source_yields_nothing() {
        let source = FakeSource::new(0);
        let frames = sample_frames(&source, 10).await.unwrap();
        assert!(frames.is_empty());
    }
}

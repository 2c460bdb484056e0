//! Video decode boundary.
//!
//! `VideoSource` abstracts the capture handle: a frame count plus random
//! access to individual frames. The FFmpeg-backed implementation seeks by
//! timestamp and decodes one frame per read; nothing persists between
//! reads, so dropping the source releases every decode resource.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use image::RgbImage;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};
use crate::probe::{probe_media, MediaInfo};

/// One decoded frame, normalized to RGB8, tagged with its source index.
#[derive(Debug, Clone)]
pub struct SampledFrame {
    /// Frame index in the source's temporal order
    pub index: u64,
    /// Decoded raster, canonical RGB channel order
    pub image: RgbImage,
}

impl SampledFrame {
    /// Encode the frame as PNG bytes for the multimodal request.
    pub fn to_png_bytes(&self) -> MediaResult<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(self.image.clone())
            .write_to(&mut buf, image::ImageOutputFormat::Png)
            .map_err(|e| MediaError::decode_failed(format!("PNG encode failed: {}", e)))?;
        Ok(buf.into_inner())
    }
}

/// Random-access decode boundary over a video stream.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Total decodable frame count.
    fn frame_count(&self) -> u64;

    /// Seek to `index` and decode one frame. `None` means the frame could
    /// not be decoded; callers are expected to skip it.
    async fn read_frame(&self, index: u64) -> Option<SampledFrame>;
}

/// FFmpeg-backed video source.
pub struct FfmpegVideoSource {
    path: PathBuf,
    info: MediaInfo,
}

impl FfmpegVideoSource {
    /// Open a video file, probing it once for frame count and rate.
    pub async fn open(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref().to_path_buf();

        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;
        let info = probe_media(&path).await?;

        if info.frame_count == 0 {
            return Err(MediaError::InvalidVideo(
                "no decodable frames".to_string(),
            ));
        }

        debug!(
            path = %path.display(),
            frames = info.frame_count,
            fps = info.fps,
            "Opened video source"
        );

        Ok(Self { path, info })
    }

    /// Probed media information.
    pub fn info(&self) -> &MediaInfo {
        &self.info
    }
}

#[async_trait]
impl VideoSource for FfmpegVideoSource {
    fn frame_count(&self) -> u64 {
        self.info.frame_count
    }

    async fn read_frame(&self, index: u64) -> Option<SampledFrame> {
        let seek = index as f64 / self.info.fps.max(1.0);

        let output = Command::new("ffmpeg")
            .args(["-v", "error", "-ss", &format!("{:.6}", seek), "-i"])
            .arg(&self.path)
            .args(["-frames:v", "1", "-f", "image2pipe", "-c:v", "png", "pipe:1"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .ok()?;

        if !output.status.success() || output.stdout.is_empty() {
            debug!(index, "Frame decode failed, skipping");
            return None;
        }

        let image = match image::load_from_memory(&output.stdout) {
            Ok(decoded) => decoded.to_rgb8(),
            Err(e) => {
                debug!(index, error = %e, "Frame parse failed, skipping");
                return None;
            }
        };

        Some(SampledFrame { index, image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trip_keeps_rgb_order() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 0, 255]));
        let frame = SampledFrame { index: 7, image: img };

        let png = frame.to_png_bytes().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();

        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255]);
    }
}

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

/// Source of raw video frames. `frame_size` returning `None` means the
/// source has no valid frame yet (camera still warming up, stream ended);
/// the sampling loop skips that tick and retries on the next one.
pub trait CaptureSource: Send + Sync + 'static {
    fn frame_size(&self) -> Option<(u32, u32)>;

    fn grab(&self) -> Result<RgbImage>;
}

/// Encode one frame as the JPEG sample sent to the analysis server.
pub fn encode_jpeg_sample(frame: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    frame
        .write_with_encoder(encoder)
        .context("jpeg encoding failed")?;
    Ok(bytes)
}

/// Synthetic gradient frames for the demo binary and tests.
pub struct TestPatternSource {
    width: u32,
    height: u32,
}

impl TestPatternSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl CaptureSource for TestPatternSource {
    fn frame_size(&self) -> Option<(u32, u32)> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some((self.width, self.height))
        }
    }

    fn grab(&self) -> Result<RgbImage> {
        let image = RgbImage::from_fn(self.width, self.height, |x, y| {
            let r = (x * 255 / self.width.max(1)) as u8;
            let g = (y * 255 / self.height.max(1)) as u8;
            image::Rgb([r, g, 128])
        });
        Ok(image)
    }
}

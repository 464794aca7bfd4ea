use crate::device_camera::interface::FrameSize;
use image::RgbImage;

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// An encoded still taken from one frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Sample {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub frame_size: FrameSize,
}

impl std::fmt::Debug for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sample")
            .field("bytes", &self.bytes.len())
            .field("content_type", &self.content_type)
            .field("frame_size", &self.frame_size)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("camera stream is not ready")]
    NotReady,
    #[error("frame capture failed: {0}")]
    Capture(String),
    #[error("frame encoding failed: {0}")]
    Encode(String),
}

pub trait ImageEncoder: Send + Sync {
    fn encode(&self, frame: &RgbImage) -> Result<Sample, SampleError>;
}

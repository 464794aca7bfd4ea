use image::RgbImage;
use std::error::Error;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A frame is only usable once the device reports both dimensions.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCameraEvent {
    /// The first decodable frame of a freshly started stream arrived.
    FrameReady(FrameSize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceCameraError {
    #[error("camera capture is not supported on this device")]
    Unsupported,
    #[error("camera access was denied")]
    PermissionDenied,
    #[error("camera failed to start: {0}")]
    Other(String),
}

pub trait DeviceCamera: Send + Sync {
    /// Acquire the device and start streaming. Starting a live camera releases
    /// the previous stream first.
    fn start(&self) -> Result<(), DeviceCameraError>;

    /// Release the device. Calling this on a stopped camera is a no-op.
    fn stop(&self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Native dimensions of the most recent frame, `None` until one arrives.
    fn frame_size(&self) -> Option<FrameSize>;

    /// Snapshot of the current frame at native size. `Ok(None)` when the
    /// stream is not producing frames yet.
    fn capture_frame(&self) -> Result<Option<RgbImage>, Box<dyn Error + Send + Sync>>;

    fn events(&self) -> Receiver<DeviceCameraEvent>;
}

use crate::device_camera::interface::FrameSize;
use crate::image_encoder::interface::{ImageEncoder, Sample, SampleError, JPEG_CONTENT_TYPE};
use image::RgbImage;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Encoder that skips the codec. `failing()` yields no data, like an encoder
/// that could not serialize the frame.
pub struct ImageEncoderFake {
    fail: bool,
    calls: AtomicUsize,
}

impl ImageEncoderFake {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageEncoder for ImageEncoderFake {
    fn encode(&self, frame: &RgbImage) -> Result<Sample, SampleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SampleError::Encode("fake encoder failure".to_string()));
        }
        Ok(Sample {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            content_type: JPEG_CONTENT_TYPE,
            frame_size: FrameSize::new(frame.width(), frame.height()),
        })
    }
}

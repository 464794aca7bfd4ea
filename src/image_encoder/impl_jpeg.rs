use crate::device_camera::interface::FrameSize;
use crate::image_encoder::interface::{ImageEncoder, Sample, SampleError, JPEG_CONTENT_TYPE};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

pub struct ImageEncoderJpeg {
    quality: u8,
}

impl ImageEncoderJpeg {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl ImageEncoder for ImageEncoderJpeg {
    fn encode(&self, frame: &RgbImage) -> Result<Sample, SampleError> {
        let frame_size = FrameSize::new(frame.width(), frame.height());
        if frame_size.is_empty() {
            return Err(SampleError::Encode("frame has no pixels".to_string()));
        }

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.quality)
            .encode_image(frame)
            .map_err(|e| SampleError::Encode(e.to_string()))?;

        if bytes.is_empty() {
            return Err(SampleError::Encode("encoder produced no data".to_string()));
        }

        Ok(Sample {
            bytes,
            content_type: JPEG_CONTENT_TYPE,
            frame_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_at_native_size() {
        let frame = RgbImage::from_pixel(64, 48, image::Rgb([200, 30, 30]));

        let sample = ImageEncoderJpeg::new(80).encode(&frame).unwrap();

        assert_eq!(sample.content_type, "image/jpeg");
        assert_eq!(sample.frame_size, FrameSize::new(64, 48));
        assert_eq!(&sample.bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&sample.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn test_empty_frame_fails() {
        let frame = RgbImage::new(0, 0);

        let result = ImageEncoderJpeg::new(80).encode(&frame);

        assert!(matches!(result, Err(SampleError::Encode(_))));
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(ImageEncoderJpeg::new(0).quality, 1);
        assert_eq!(ImageEncoderJpeg::new(255).quality, 100);
    }
}

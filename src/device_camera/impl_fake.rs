use crate::device_camera::event_hub::CameraEventHub;
use crate::device_camera::interface::{
    DeviceCamera, DeviceCameraError, DeviceCameraEvent, FrameSize,
};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use rand::RngCore;
use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DeviceCameraFakeConfig {
    pub start_result: Result<(), DeviceCameraError>,
    pub frame_size: FrameSize,
    pub warmup: Duration,
}

impl Default for DeviceCameraFakeConfig {
    fn default() -> Self {
        Self {
            start_result: Ok(()),
            frame_size: FrameSize::new(640, 480),
            warmup: Duration::from_millis(500),
        }
    }
}

/// Synthetic camera producing noise frames.
pub struct DeviceCameraFake {
    config: DeviceCameraFakeConfig,
    logger: Arc<dyn Logger + Send + Sync>,
    hub: CameraEventHub,
    live: AtomicBool,
    acquisitions: AtomicUsize,
    releases: AtomicUsize,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_config(DeviceCameraFakeConfig::default(), logger)
    }

    pub fn with_config(
        config: DeviceCameraFakeConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("camera").with_namespace("fake"),
            hub: CameraEventHub::new(),
            live: AtomicBool::new(false),
            acquisitions: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    fn release(&self) -> bool {
        if self.live.swap(false, Ordering::SeqCst) {
            self.releases.fetch_add(1, Ordering::SeqCst);
            self.hub.reset();
            true
        } else {
            false
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), DeviceCameraError> {
        let _ = self.logger.info("Starting camera...");

        if self.release() {
            let _ = self.logger.info("Released previous stream");
        }

        self.config.start_result.clone()?;

        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        self.live.store(true, Ordering::SeqCst);
        std::thread::sleep(self.config.warmup);

        if !self.config.frame_size.is_empty() {
            self.hub
                .publish(DeviceCameraEvent::FrameReady(self.config.frame_size));
        }

        let _ = self.logger.info("Camera started");
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.release() {
            self.logger.info("Camera stopped")?;
        }
        Ok(())
    }

    fn frame_size(&self) -> Option<FrameSize> {
        if self.live.load(Ordering::SeqCst) && !self.config.frame_size.is_empty() {
            Some(self.config.frame_size)
        } else {
            None
        }
    }

    fn capture_frame(&self) -> Result<Option<RgbImage>, Box<dyn Error + Send + Sync>> {
        let Some(size) = self.frame_size() else {
            return Ok(None);
        };

        let mut pixels = vec![0u8; size.width as usize * size.height as usize * 3];
        rand::rng().fill_bytes(&mut pixels);

        let frame = RgbImage::from_raw(size.width, size.height, pixels)
            .ok_or("frame buffer does not match frame size")?;
        Ok(Some(frame))
    }

    fn events(&self) -> Receiver<DeviceCameraEvent> {
        self.hub.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::utc;
    use crate::library::logger::impl_console::LoggerConsole;

    fn camera(config: DeviceCameraFakeConfig) -> DeviceCameraFake {
        DeviceCameraFake::with_config(config, Arc::new(LoggerConsole::new(utc())))
    }

    fn instant() -> DeviceCameraFakeConfig {
        DeviceCameraFakeConfig {
            warmup: Duration::ZERO,
            ..DeviceCameraFakeConfig::default()
        }
    }

    #[test]
    fn test_frames_have_native_size() {
        let camera = camera(instant());
        camera.start().unwrap();

        let frame = camera.capture_frame().unwrap().unwrap();

        assert_eq!(frame.dimensions(), (640, 480));
    }

    #[test]
    fn test_no_frames_before_start() {
        let camera = camera(instant());

        assert_eq!(camera.frame_size(), None);
        assert!(camera.capture_frame().unwrap().is_none());
    }

    #[test]
    fn test_start_publishes_frame_ready() {
        let camera = camera(instant());
        let events = camera.events();

        camera.start().unwrap();

        assert_eq!(
            events.try_recv().ok(),
            Some(DeviceCameraEvent::FrameReady(FrameSize::new(640, 480)))
        );
    }

    #[test]
    fn test_denied_camera_never_streams() {
        let camera = camera(DeviceCameraFakeConfig {
            start_result: Err(DeviceCameraError::PermissionDenied),
            ..instant()
        });
        let events = camera.events();

        assert_eq!(camera.start(), Err(DeviceCameraError::PermissionDenied));
        assert_eq!(camera.acquisitions(), 0);
        assert!(events.try_recv().is_err());
        assert!(camera.capture_frame().unwrap().is_none());
    }

    #[test]
    fn test_stop_releases_exactly_once() {
        let camera = camera(instant());
        camera.start().unwrap();

        camera.stop().unwrap();
        camera.stop().unwrap();

        assert_eq!(camera.releases(), 1);
    }

    #[test]
    fn test_restart_releases_previous_stream() {
        let camera = camera(instant());
        camera.start().unwrap();
        camera.start().unwrap();
        camera.stop().unwrap();

        assert_eq!(camera.acquisitions(), 2);
        assert_eq!(camera.releases(), 2);
    }
}

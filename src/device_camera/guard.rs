use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Releases the camera when dropped, on every exit path of the owner.
pub struct CameraGuard {
    camera: Arc<dyn DeviceCamera + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraGuard {
    pub fn new(
        camera: Arc<dyn DeviceCamera + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            camera,
            logger: logger.with_namespace("camera_guard"),
        }
    }
}

impl Drop for CameraGuard {
    fn drop(&mut self) {
        let _ = self.logger.info("Releasing camera");
        if let Err(e) = self.camera.stop() {
            let _ = self
                .logger
                .error(&format!("Failed to stop camera during shutdown: {}", e));
        }
    }
}

use crate::device_camera::event_hub::CameraEventHub;
use crate::device_camera::interface::{
    DeviceCamera, DeviceCameraError, DeviceCameraEvent, FrameSize,
};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use std::error::Error;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use v4l::buffer::Type;
use v4l::io::traits::CaptureStream;
use v4l::prelude::MmapStream;
use v4l::video::Capture;
use v4l::FourCC;

const BUFFER_COUNT: u32 = 4;
/// Longest a dequeue may block before the capture thread rechecks shutdown.
const CAPTURE_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PixelFormat {
    Rgb3,
    Mjpg,
}

impl PixelFormat {
    fn from_fourcc(fourcc: FourCC) -> Option<Self> {
        match &fourcc.repr {
            b"RGB3" => Some(PixelFormat::Rgb3),
            b"MJPG" => Some(PixelFormat::Mjpg),
            _ => None,
        }
    }
}

struct CaptureThread {
    shutdown: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Video4Linux2 camera. A capture thread owns the device and its mmap stream
/// and keeps the latest decoded frame.
pub struct DeviceCameraV4l2 {
    device_path: String,
    logger: Arc<dyn Logger + Send + Sync>,
    hub: Arc<CameraEventHub>,
    latest: Arc<Mutex<Option<RgbImage>>>,
    capture: Mutex<Option<CaptureThread>>,
}

impl DeviceCameraV4l2 {
    pub fn new(device_path: &str, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            device_path: device_path.to_string(),
            logger: logger.with_namespace("camera").with_namespace("v4l2"),
            hub: Arc::new(CameraEventHub::new()),
            latest: Arc::new(Mutex::new(None)),
            capture: Mutex::new(None),
        }
    }

    fn release(&self) -> bool {
        let capture = match self.capture.lock() {
            Ok(mut capture) => capture.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(capture) = capture else {
            return false;
        };

        capture.shutdown.store(true, Ordering::SeqCst);
        if capture.handle.join().is_err() {
            let _ = self.logger.error("Capture thread panicked");
        }
        if let Ok(mut latest) = self.latest.lock() {
            *latest = None;
        }
        self.hub.reset();
        true
    }

    fn open_device(&self) -> Result<(v4l::Device, PixelFormat), DeviceCameraError> {
        if !Path::new(&self.device_path).exists() {
            return Err(DeviceCameraError::Unsupported);
        }

        let device = v4l::Device::with_path(&self.device_path).map_err(map_open_error)?;

        let mut format = device
            .format()
            .map_err(|e| DeviceCameraError::Other(format!("read format: {}", e)))?;

        for fourcc in [b"MJPG", b"RGB3"] {
            format.fourcc = FourCC::new(fourcc);
            match device.set_format(&format) {
                Ok(applied) => {
                    if let Some(pixel_format) = PixelFormat::from_fourcc(applied.fourcc) {
                        let _ = self.logger.info(&format!(
                            "Opened {} ({}x{} {})",
                            self.device_path, applied.width, applied.height, applied.fourcc
                        ));
                        return Ok((device, pixel_format));
                    }
                }
                Err(e) => {
                    let _ = self.logger.info(&format!(
                        "Device {} rejected {}: {}",
                        self.device_path,
                        FourCC::new(fourcc),
                        e
                    ));
                }
            }
        }

        Err(DeviceCameraError::Other(format!(
            "{} offers neither MJPG nor RGB3",
            self.device_path
        )))
    }
}

fn map_open_error(error: io::Error) -> DeviceCameraError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => DeviceCameraError::PermissionDenied,
        io::ErrorKind::NotFound => DeviceCameraError::Unsupported,
        _ => DeviceCameraError::Other(error.to_string()),
    }
}

/// A dequeue that timed out only means the device had nothing new.
fn is_idle(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::TimedOut
}

fn decode_frame(pixel_format: PixelFormat, buf: &[u8], size: FrameSize) -> Option<RgbImage> {
    match pixel_format {
        PixelFormat::Mjpg => image::load_from_memory(buf).ok().map(|i| i.into_rgb8()),
        PixelFormat::Rgb3 => {
            let len = size.width as usize * size.height as usize * 3;
            if buf.len() < len {
                return None;
            }
            RgbImage::from_raw(size.width, size.height, buf[..len].to_vec())
        }
    }
}

impl DeviceCamera for DeviceCameraV4l2 {
    fn start(&self) -> Result<(), DeviceCameraError> {
        if self.release() {
            let _ = self.logger.info("Released previous stream");
        }

        let (mut device, pixel_format) = self.open_device()?;
        let size = device
            .format()
            .map(|f| FrameSize::new(f.width, f.height))
            .map_err(|e| DeviceCameraError::Other(format!("read format: {}", e)))?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = sync_channel::<Result<(), String>>(1);
        let thread_shutdown = shutdown.clone();
        let latest = self.latest.clone();
        let hub = self.hub.clone();
        let logger = self.logger.clone();

        let handle = std::thread::spawn(move || {
            let mut stream =
                match MmapStream::with_buffers(&mut device, Type::VideoCapture, BUFFER_COUNT) {
                    Ok(mut stream) => {
                        stream.set_timeout(CAPTURE_TIMEOUT);
                        let _ = ready_tx.send(Ok(()));
                        stream
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };

            let mut announced = false;
            while !thread_shutdown.load(Ordering::SeqCst) {
                let (buf, _meta) = match stream.next() {
                    Ok(next) => next,
                    Err(e) if is_idle(&e) => continue,
                    Err(e) => {
                        let _ = logger.error(&format!("Capture failed: {}", e));
                        std::thread::sleep(Duration::from_millis(100));
                        continue;
                    }
                };

                let Some(frame) = decode_frame(pixel_format, buf, size) else {
                    continue;
                };
                let (width, height) = frame.dimensions();
                if let Ok(mut slot) = latest.lock() {
                    *slot = Some(frame);
                }

                let frame_size = FrameSize::new(width, height);
                if !announced && !frame_size.is_empty() {
                    announced = true;
                    hub.publish(DeviceCameraEvent::FrameReady(frame_size));
                }
            }
        });

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = handle.join();
                return Err(DeviceCameraError::Other(format!("create stream: {}", e)));
            }
            Err(_) => {
                let _ = handle.join();
                return Err(DeviceCameraError::Other(
                    "capture thread exited before streaming".to_string(),
                ));
            }
        }

        match self.capture.lock() {
            Ok(mut capture) => *capture = Some(CaptureThread { shutdown, handle }),
            Err(poisoned) => *poisoned.into_inner() = Some(CaptureThread { shutdown, handle }),
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
        let latest = self.latest.lock().ok()?;
        latest
            .as_ref()
            .map(|frame| FrameSize::new(frame.width(), frame.height()))
    }

    fn capture_frame(&self) -> Result<Option<RgbImage>, Box<dyn Error + Send + Sync>> {
        let latest = self
            .latest
            .lock()
            .map_err(|_| "latest frame lock poisoned")?;
        Ok(latest.clone())
    }

    fn events(&self) -> Receiver<DeviceCameraEvent> {
        self.hub.subscribe()
    }
}

impl Drop for DeviceCameraV4l2 {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            let _ = self
                .logger
                .error(&format!("Failed to stop camera during shutdown: {}", e));
        }
    }
}

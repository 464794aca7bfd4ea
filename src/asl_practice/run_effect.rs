use crate::asl_practice::core::{Effect, Event};
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::image_encoder::interface::{ImageEncoder, Sample, SampleError};
use crate::inference_client::interface::InferenceClient;
use crate::library::logger::interface::Logger;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    image_encoder: Arc<dyn ImageEncoder + Send + Sync>,
    inference_client: Arc<dyn InferenceClient + Send + Sync>,
    event_sender: Sender<Event>,
    alive: Arc<AtomicBool>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        image_encoder: Arc<dyn ImageEncoder + Send + Sync>,
        inference_client: Arc<dyn InferenceClient + Send + Sync>,
        event_sender: Sender<Event>,
        alive: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            device_camera,
            image_encoder,
            inference_client,
            event_sender,
            alive,
        }
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Delivers an event unless the loop is gone. Returns false once nothing
    /// is listening anymore.
    fn send(&self, event: Event) -> bool {
        self.is_alive() && self.event_sender.send(event).is_ok()
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToCameraEvents => {
                let events = self.device_camera.events();
                while self.is_alive() {
                    match events.recv_timeout(POLL_INTERVAL) {
                        Ok(event) => {
                            if !self.send(Event::CameraEvent(event)) {
                                break;
                            }
                        }
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            }
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if !self.send(Event::Tick(Instant::now())) {
                    break;
                }
            },
            Effect::StartCamera => {
                let started = self.device_camera.start();
                let acquired = started.is_ok();
                if !self.send(Event::CameraStartDone(started)) && acquired {
                    let _ = self
                        .logger
                        .info("Camera started after shutdown, releasing it");
                    if let Err(e) = self.device_camera.stop() {
                        let _ = self.logger.error(&format!("Failed to stop camera: {}", e));
                    }
                }
            }
            Effect::CaptureSample => {
                let sample = self.capture_sample();
                if let Err(e) = &sample {
                    let _ = self.logger.info(&format!("Skipping tick: {}", e));
                }
                let _ = self.send(Event::SampleDone(sample));
            }
            Effect::SubmitSample { sample } => {
                let result = self.inference_client.infer(&sample);
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Submission failed: {}", e));
                }
                let delivered = self.send(Event::SubmitDone {
                    result,
                    received_at: Utc::now(),
                });
                if !delivered {
                    let _ = self.logger.info("Discarding inference result after shutdown");
                }
            }
        }
    }

    fn capture_sample(&self) -> Result<Sample, SampleError> {
        let has_frames = self
            .device_camera
            .frame_size()
            .is_some_and(|size| !size.is_empty());
        if !has_frames {
            return Err(SampleError::NotReady);
        }

        let frame = self
            .device_camera
            .capture_frame()
            .map_err(|e| SampleError::Capture(e.to_string()))?
            .ok_or(SampleError::NotReady)?;

        self.image_encoder.encode(&frame)
    }
}

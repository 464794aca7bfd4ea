use crate::asl_practice::core::{Event, State};
use crate::asl_practice::main::AslPractice;
use crate::config::{utc, Config};
use crate::device_camera::impl_fake::{DeviceCameraFake, DeviceCameraFakeConfig};
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::image_encoder::impl_fake::ImageEncoderFake;
use crate::inference_client::impl_fake::InferenceClientFake;
use crate::inference_client::interface::{InferenceError, InferenceResponse};
use crate::library::logger::impl_console::LoggerConsole;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct Fixture {
    pub device_camera: Arc<DeviceCameraFake>,
    pub image_encoder: Arc<ImageEncoderFake>,
    pub inference_client: Arc<InferenceClientFake>,
    pub device_display: DeviceDisplayFake,
    pub asl_practice: Option<AslPractice>,
}

pub struct FixtureOptions {
    pub camera: DeviceCameraFakeConfig,
    pub encoder: ImageEncoderFake,
    pub latency: Duration,
    pub script: Vec<Result<InferenceResponse, InferenceError>>,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            camera: DeviceCameraFakeConfig {
                warmup: Duration::ZERO,
                ..DeviceCameraFakeConfig::default()
            },
            encoder: ImageEncoderFake::new(),
            latency: Duration::ZERO,
            script: vec![],
        }
    }
}

impl Fixture {
    pub fn new(options: FixtureOptions) -> Self {
        let config = Config {
            tick_rate: Duration::from_millis(10),
            ..Config::default()
        };
        let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(utc()));
        let device_camera = Arc::new(DeviceCameraFake::with_config(options.camera, logger.clone()));
        let image_encoder = Arc::new(options.encoder);
        let inference_client = Arc::new(InferenceClientFake::scripted(
            logger.clone(),
            options.latency,
            options.script,
        ));
        let device_display = DeviceDisplayFake::new();

        let asl_practice = AslPractice::new(
            config,
            logger,
            device_camera.clone(),
            image_encoder.clone(),
            inference_client.clone(),
            Arc::new(Mutex::new(device_display.clone())),
        );

        Self {
            device_camera,
            image_encoder,
            inference_client,
            device_display,
            asl_practice: Some(asl_practice),
        }
    }

    /// Runs the loop for `duration`, then shuts it down and returns the final state.
    pub fn run_for(&mut self, duration: Duration) -> State {
        let asl_practice = self.asl_practice.take().expect("fixture already ran");
        let shutdown = asl_practice.event_sender();
        let handle = std::thread::spawn(move || asl_practice.run());

        std::thread::sleep(duration);
        shutdown.send(Event::Shutdown).unwrap();

        handle.join().unwrap().unwrap()
    }
}

pub fn nothing_forever() -> Vec<Result<InferenceResponse, InferenceError>> {
    vec![Ok(InferenceResponse::nothing()); 10_000]
}

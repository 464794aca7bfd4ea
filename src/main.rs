use asl_practice::core::Event;
use asl_practice::main::AslPractice;
use clap::Parser;
use cli::Cli;
use config::{CameraKind, Config, DisplayKind, InferenceKind};
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::interface::DeviceCamera;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use image_encoder::impl_jpeg::ImageEncoderJpeg;
use inference_client::impl_fake::InferenceClientFake;
use inference_client::impl_http::InferenceClientHttp;
use inference_client::interface::InferenceClient;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

mod asl_practice;
mod cli;
mod config;
mod device_camera;
mod device_display;
mod image_encoder;
mod inference_client;
mod library;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn build_camera(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn DeviceCamera + Send + Sync>, BoxError> {
    match config.camera {
        CameraKind::Fake => Ok(Arc::new(DeviceCameraFake::new(logger))),
        #[cfg(feature = "camera-v4l2")]
        CameraKind::V4l2 => Ok(Arc::new(
            device_camera::impl_v4l2::DeviceCameraV4l2::new(&config.camera_device, logger),
        )),
        #[cfg(not(feature = "camera-v4l2"))]
        CameraKind::V4l2 => Err(format!(
            "cannot open {}: built without the camera-v4l2 feature",
            config.camera_device
        )
        .into()),
    }
}

fn build_inference_client(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Arc<dyn InferenceClient + Send + Sync> {
    match config.inference {
        InferenceKind::Http => Arc::new(InferenceClientHttp::new(&config.infer_url(), logger)),
        InferenceKind::Fake => Arc::new(InferenceClientFake::new(logger)),
    }
}

fn main() -> Result<(), BoxError> {
    let config = Cli::parse().into_config()?;

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));
    logger.info(&format!("Sampling every {:?} to {}", config.tick_rate, config.infer_url()))?;

    let device_camera = build_camera(&config, logger.clone())?;
    let image_encoder = Arc::new(ImageEncoderJpeg::new(config.jpeg_quality));
    let inference_client = build_inference_client(&config, logger.clone());

    match config.display {
        DisplayKind::Console => {
            let device_display = Arc::new(Mutex::new(DeviceDisplayConsole::new()));
            let asl_practice = AslPractice::new(
                config,
                logger,
                device_camera,
                image_encoder,
                inference_client,
                device_display,
            );

            let shutdown = asl_practice.event_sender();
            ctrlc::set_handler(move || {
                let _ = shutdown.send(Event::Shutdown);
            })?;

            asl_practice.run()?;
        }
        DisplayKind::Gui => {
            let device_display = DeviceDisplayGui::new();
            let window = device_display.window();
            let asl_practice = AslPractice::new(
                config,
                logger,
                device_camera,
                image_encoder,
                inference_client,
                Arc::new(Mutex::new(device_display)),
            );

            let shutdown = asl_practice.event_sender();
            let ctrlc_shutdown = shutdown.clone();
            let ctrlc_closer = window.closer();
            ctrlc::set_handler(move || {
                let _ = ctrlc_shutdown.send(Event::Shutdown);
                ctrlc_closer.close();
            })?;

            let pipeline_closer = window.closer();
            let pipeline = std::thread::spawn(move || {
                let result = asl_practice.run();
                pipeline_closer.close();
                result
            });

            let window_result = window.run();
            let _ = shutdown.send(Event::Shutdown);

            pipeline
                .join()
                .map_err(|_| "pipeline thread panicked")??;
            window_result?;
        }
    }

    Ok(())
}

use chrono::Offset;
use std::time::Duration;

pub const INFER_PATH: &str = "/api/asl-infer";
pub const INFER_FIELD_NAME: &str = "image";
pub const INFER_FILE_NAME: &str = "frame.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CameraKind {
    Fake,
    #[value(name = "v4l2")]
    V4l2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DisplayKind {
    Console,
    Gui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InferenceKind {
    Http,
    Fake,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub jpeg_quality: u8,
    pub api_base_url: String,
    pub camera: CameraKind,
    pub camera_device: String,
    pub display: DisplayKind,
    pub inference: InferenceKind,
    pub logger_timezone: chrono::FixedOffset,
}

impl Config {
    pub fn infer_url(&self) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), INFER_PATH)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(1200),
            jpeg_quality: 80,
            api_base_url: "http://localhost:8000".to_string(),
            camera: CameraKind::Fake,
            camera_device: "/dev/video0".to_string(),
            display: DisplayKind::Console,
            inference: InferenceKind::Http,
            logger_timezone: utc(),
        }
    }
}

pub fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}

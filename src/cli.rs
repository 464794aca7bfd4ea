use crate::config::{CameraKind, Config, DisplayKind, InferenceKind};
use clap::Parser;
use std::time::Duration;

/// Live ASL letter recognition: samples the camera and asks the inference
/// service what letter is being signed.
#[derive(Parser, Debug)]
#[command(name = "asl-practice", version)]
pub struct Cli {
    /// Base URL of the inference service
    #[arg(long, env = "API_BASE_URL", default_value = "http://localhost:8000")]
    pub api_base_url: String,

    /// Sampling period in milliseconds
    #[arg(long, default_value_t = 1200, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// JPEG quality of submitted frames
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: u8,

    #[arg(long, value_enum, default_value_t = CameraKind::Fake)]
    pub camera: CameraKind,

    /// Capture device node, used with `--camera v4l2`
    #[arg(long, default_value = "/dev/video0")]
    pub camera_device: String,

    #[arg(long, value_enum, default_value_t = DisplayKind::Console)]
    pub display: DisplayKind,

    #[arg(long, value_enum, default_value_t = InferenceKind::Http)]
    pub inference: InferenceKind,

    /// Offset from UTC for log and "Updated" timestamps
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub utc_offset_hours: i32,
}

impl Cli {
    pub fn into_config(self) -> Result<Config, String> {
        let logger_timezone = chrono::FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .ok_or_else(|| format!("invalid UTC offset: {} hours", self.utc_offset_hours))?;

        Ok(Config {
            tick_rate: Duration::from_millis(self.tick_ms),
            jpeg_quality: self.jpeg_quality,
            api_base_url: self.api_base_url,
            camera: self.camera,
            camera_device: self.camera_device,
            display: self.display,
            inference: self.inference,
            logger_timezone,
        })
    }
}

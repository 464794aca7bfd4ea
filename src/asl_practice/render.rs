use crate::asl_practice::core::{State, Status};
use crate::device_display::interface::DeviceDisplay;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    timezone: chrono::FixedOffset,
}

impl Render {
    pub fn new(
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        timezone: chrono::FixedOffset,
    ) -> Self {
        Self {
            device_display,
            timezone,
        }
    }

    pub fn lines(&self, state: &State) -> Vec<String> {
        let letter = state
            .result
            .as_ref()
            .map(|result| result.letter.as_str())
            .unwrap_or("-");
        let updated = state
            .result
            .as_ref()
            .map(|result| {
                let local = result.produced_at.with_timezone(&self.timezone);
                format!("Updated {}", local.format("%I:%M:%S %p"))
            })
            .unwrap_or_default();

        let mut lines = vec![
            state.status.text().to_string(),
            format!("Detected letter: {}", letter),
            updated,
        ];

        if state.status == Status::PermissionDenied {
            lines.push("Enable your camera".to_string());
            lines.push("Allow camera access to practice ASL letters.".to_string());
        }

        lines
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut device_display = self
            .device_display
            .lock()
            .map_err(|_| "display lock poisoned")?;

        device_display.clear()?;
        for (line, text) in self.lines(state).iter().enumerate() {
            device_display.write_line(line, text)?;
        }
        device_display.flush()?;

        Ok(())
    }
}

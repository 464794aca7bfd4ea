use crate::device_display::interface::{blank_lines, fit_line, DeviceDisplay, NUM_LINES};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Records every flushed screen.
#[derive(Clone, Default)]
pub struct DeviceDisplayFake {
    buffer: [String; NUM_LINES],
    screens: Arc<Mutex<Vec<[String; NUM_LINES]>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn screens(&self) -> Vec<[String; NUM_LINES]> {
        match self.screens.lock() {
            Ok(screens) => screens.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[allow(dead_code)]
    pub fn last_screen(&self) -> Option<[String; NUM_LINES]> {
        self.screens().pop()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.buffer = blank_lines();
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.buffer[line] = fit_line(line, text)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screens
            .lock()
            .map_err(|_| "screen log poisoned")?
            .push(self.buffer.clone());
        Ok(())
    }
}

use crate::device_display::interface::{
    blank_lines, fit_line, DeviceDisplay, CHARS_PER_LINE, NUM_LINES,
};
use std::error::Error;

pub struct DeviceDisplayConsole {
    display_buffer: [String; NUM_LINES],
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            display_buffer: blank_lines(),
        }
    }

    fn render_display(&self) -> String {
        let border = "─".repeat(CHARS_PER_LINE);
        let mut out = format!("┌{}┐\n", border);
        for row in &self.display_buffer {
            out.push_str(&format!("│{:<width$}│\n", row, width = CHARS_PER_LINE));
        }
        out.push_str(&format!("└{}┘", border));
        out
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.display_buffer = blank_lines();
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.display_buffer[line] = fit_line(line, text)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", self.render_display());
        Ok(())
    }
}

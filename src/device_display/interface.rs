use std::error::Error;

pub const NUM_LINES: usize = 5;
pub const CHARS_PER_LINE: usize = 48;

/// A small text panel: a status line, the letter and its time, and room for
/// a two-line call to action.
pub trait DeviceDisplay: Send + Sync {
    /// Clear all text from the panel
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a specific line (0-based). Text longer than the panel is
    /// truncated.
    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Show what has been written since the last `clear`.
    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;
}

pub fn blank_lines() -> [String; NUM_LINES] {
    Default::default()
}

pub fn fit_line(line: usize, text: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    if line >= NUM_LINES {
        return Err(format!("Invalid line number {}", line).into());
    }
    Ok(text.chars().take(CHARS_PER_LINE).collect())
}

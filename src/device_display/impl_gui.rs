use crate::device_display::interface::{blank_lines, fit_line, DeviceDisplay, NUM_LINES};
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type SharedLines = Arc<Mutex<[String; NUM_LINES]>>;

struct DisplayWindow {
    shown: SharedLines,
    closing: Arc<AtomicBool>,
}

impl DisplayWindow {
    fn close_if_requested(&self, ctx: &egui::Context) {
        if self.closing.load(Ordering::SeqCst) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.close_if_requested(ctx);

        let lines = match self.shown.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading("ASL Practice");
                ui.add_space(12.0);

                egui::Frame::none()
                    .fill(egui::Color32::from_rgb(30, 41, 59))
                    .rounding(12.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(format!("● {}", lines[0]))
                                .color(egui::Color32::from_rgb(134, 239, 172))
                                .size(18.0),
                        );
                    });

                ui.add_space(20.0);
                for line in &lines[1..] {
                    ui.label(egui::RichText::new(line).monospace().size(22.0));
                }
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Desktop panel. Writes land in a back buffer and become visible on `flush`.
pub struct DeviceDisplayGui {
    buffer: [String; NUM_LINES],
    shown: SharedLines,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            buffer: blank_lines(),
            shown: Arc::new(Mutex::new(blank_lines())),
        }
    }

    pub fn window(&self) -> GuiWindow {
        GuiWindow {
            shown: self.shown.clone(),
            closer: GuiWindowCloser::default(),
        }
    }
}

/// Closes a running `GuiWindow` from any thread. Closing before the window
/// opens makes it close on its first frame.
#[derive(Clone, Default)]
pub struct GuiWindowCloser {
    closing: Arc<AtomicBool>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl GuiWindowCloser {
    pub fn close(&self) {
        self.closing.store(true, Ordering::SeqCst);
        if let Ok(context) = self.context.lock() {
            if let Some(ctx) = context.as_ref() {
                ctx.request_repaint();
            }
        }
    }
}

/// The window half of the GUI display, run on the main thread.
pub struct GuiWindow {
    shown: SharedLines,
    closer: GuiWindowCloser,
}

impl GuiWindow {
    pub fn closer(&self) -> GuiWindowCloser {
        self.closer.clone()
    }

    /// Blocks until the window is closed, by the user or through a closer.
    pub fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, 320.0])
                .with_resizable(false),
            ..Default::default()
        };

        let window = DisplayWindow {
            shown: self.shown,
            closing: self.closer.closing.clone(),
        };
        let context = self.closer.context.clone();

        eframe::run_native(
            "ASL Practice",
            options,
            Box::new(move |cc| {
                if let Ok(mut context) = context.lock() {
                    *context = Some(cc.egui_ctx.clone());
                }
                Box::new(window)
            }),
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.buffer = blank_lines();
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.buffer[line] = fit_line(line, text)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut shown = self.shown.lock().map_err(|_| "display buffer poisoned")?;
        *shown = self.buffer.clone();
        Ok(())
    }
}

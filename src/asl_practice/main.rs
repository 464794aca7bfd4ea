use crate::asl_practice::core::{init, transition, Effect, Event, State};
use crate::asl_practice::render::Render;
use crate::asl_practice::run_effect::RunEffect;
use crate::config::Config;
use crate::device_camera::guard::CameraGuard;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::image_encoder::interface::ImageEncoder;
use crate::inference_client::interface::InferenceClient;
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Marks effects as orphaned when the loop exits, however it exits.
struct AliveGuard(Arc<AtomicBool>);

impl Drop for AliveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct AslPractice {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    image_encoder: Arc<dyn ImageEncoder + Send + Sync>,
    inference_client: Arc<dyn InferenceClient + Send + Sync>,
    render: Render,
    event_sender: Sender<Event>,
    event_receiver: Receiver<Event>,
}

impl AslPractice {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        image_encoder: Arc<dyn ImageEncoder + Send + Sync>,
        inference_client: Arc<dyn InferenceClient + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let render = Render::new(device_display, config.logger_timezone);

        Self {
            config,
            logger: logger.with_namespace("asl_practice"),
            device_camera,
            image_encoder,
            inference_client,
            render,
            event_sender,
            event_receiver,
        }
    }

    /// Sending `Event::Shutdown` here stops `run`.
    pub fn event_sender(&self) -> Sender<Event> {
        self.event_sender.clone()
    }

    fn spawn_effects(&self, run_effect: &RunEffect, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    fn render(&self, state: &State) {
        if let Err(e) = self.render.render(state) {
            let _ = self.logger.error(&format!("Render failed: {}", e));
        }
    }

    /// Runs until `Event::Shutdown` and returns the final state. The camera is
    /// released and pending effects are orphaned on every exit path.
    pub fn run(self) -> Result<State, Box<dyn Error + Send + Sync>> {
        // Dropped in reverse order: effects are orphaned before the camera goes.
        let _camera_guard = CameraGuard::new(self.device_camera.clone(), self.logger.clone());
        let alive = Arc::new(AtomicBool::new(true));
        let _alive_guard = AliveGuard(alive.clone());

        let run_effect = RunEffect::new(
            self.config.clone(),
            self.logger.clone(),
            self.device_camera.clone(),
            self.image_encoder.clone(),
            self.inference_client.clone(),
            self.event_sender.clone(),
            alive,
        );

        let (mut state, effects) = init();
        self.render(&state);
        self.spawn_effects(&run_effect, effects);

        loop {
            let event = self.event_receiver.recv()?;

            if matches!(event, Event::Shutdown) {
                self.logger.info("Shutting down")?;
                return Ok(state);
            }

            self.logger.info(&format!("event: {:?}", event))?;

            let previous_status = state.status;
            let (new_state, effects) = transition(state, event);

            if !effects.is_empty() {
                self.logger.info(&format!(
                    "state: {:?}, effects: {:?}",
                    new_state, effects
                ))?;
            }

            if new_state.status != previous_status {
                self.logger.info(&format!(
                    "status: {} -> {}",
                    previous_status.key(),
                    new_state.status.key()
                ))?;
            }

            state = new_state;
            self.render(&state);
            self.spawn_effects(&run_effect, effects);
        }
    }
}

use crate::image_encoder::interface::Sample;
use crate::inference_client::interface::{InferenceClient, InferenceError, InferenceResponse};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const LETTERS: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y",
];

/// Offline stand-in for the inference service. Without a script it answers
/// with a random static letter, or no detection about a third of the time.
pub struct InferenceClientFake {
    logger: Arc<dyn Logger + Send + Sync>,
    latency: Duration,
    script: Mutex<VecDeque<Result<InferenceResponse, InferenceError>>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl InferenceClientFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::scripted(logger, Duration::from_millis(300), vec![])
    }

    pub fn scripted(
        logger: Arc<dyn Logger + Send + Sync>,
        latency: Duration,
        script: Vec<Result<InferenceResponse, InferenceError>>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("inference").with_namespace("fake"),
            latency,
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of overlapping `infer` calls observed.
    #[allow(dead_code)]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_scripted(&self) -> Option<Result<InferenceResponse, InferenceError>> {
        match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        }
    }

    fn random_response(&self) -> Result<InferenceResponse, InferenceError> {
        let mut rng = rand::rng();
        let index_dist = Uniform::new(0, LETTERS.len() + LETTERS.len() / 2)
            .map_err(|e| InferenceError::Server(e.to_string()))?;

        Ok(match LETTERS.get(index_dist.sample(&mut rng)) {
            Some(letter) => InferenceResponse::detected(letter),
            None => InferenceResponse::nothing(),
        })
    }
}

impl InferenceClient for InferenceClientFake {
    fn infer(&self, sample: &Sample) -> Result<InferenceResponse, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        let _ = self
            .logger
            .info(&format!("Inferring {} byte sample...", sample.bytes.len()));
        std::thread::sleep(self.latency);

        let response = match self.next_scripted() {
            Some(response) => response,
            None => self.random_response(),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}

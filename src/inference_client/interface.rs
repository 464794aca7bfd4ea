use crate::image_encoder::interface::Sample;
use serde::Deserialize;

/// Body of a successful inference call. Fields other than `letter` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InferenceResponse {
    #[serde(default)]
    pub letter: Option<String>,
}

impl InferenceResponse {
    pub fn detected(letter: &str) -> Self {
        Self {
            letter: Some(letter.to_string()),
        }
    }

    pub fn nothing() -> Self {
        Self::default()
    }

    /// The recognized symbol, if any. Blank labels count as no detection.
    pub fn detected_letter(&self) -> Option<&str> {
        self.letter
            .as_deref()
            .map(str::trim)
            .filter(|letter| !letter.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("inference service unreachable: {0}")]
    Network(String),
    #[error("inference service failed: {0}")]
    Server(String),
}

pub trait InferenceClient: Send + Sync {
    /// One attempt, no retries.
    fn infer(&self, sample: &Sample) -> Result<InferenceResponse, InferenceError>;
}

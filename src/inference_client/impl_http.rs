use crate::config::{INFER_FIELD_NAME, INFER_FILE_NAME};
use crate::image_encoder::interface::Sample;
use crate::inference_client::interface::{InferenceClient, InferenceError, InferenceResponse};
use crate::inference_client::multipart::MultipartFile;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Posts samples to the inference service as a multipart upload.
pub struct InferenceClientHttp {
    url: String,
    agent: ureq::Agent,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferenceClientHttp {
    pub fn new(url: &str, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            url: url.to_string(),
            agent: ureq::Agent::new(),
            logger: logger.with_namespace("inference").with_namespace("http"),
        }
    }
}

impl InferenceClient for InferenceClientHttp {
    fn infer(&self, sample: &Sample) -> Result<InferenceResponse, InferenceError> {
        let upload = MultipartFile::new(
            INFER_FIELD_NAME,
            INFER_FILE_NAME,
            sample.content_type,
            &sample.bytes,
        );

        let _ = self.logger.info(&format!(
            "POST {} ({} bytes)",
            self.url,
            upload.body.len()
        ));

        let response = self
            .agent
            .post(&self.url)
            .set("Content-Type", &upload.content_type())
            .send_bytes(&upload.body)
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => {
                    InferenceError::Server(format!("HTTP status {}", status))
                }
                ureq::Error::Transport(transport) => {
                    InferenceError::Network(transport.to_string())
                }
            })?;

        serde_json::from_reader(response.into_reader())
            .map_err(|e| InferenceError::Server(format!("invalid response body: {}", e)))
    }
}

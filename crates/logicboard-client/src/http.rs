//! reqwest-backed [`Recognizer`].

use crate::config::ClientConfig;
use logicboard_core::recognition::{
    BoxFuture, CALCULATE_PATH, CalculateRequest, RecognitionError, RecognitionOutcome, Recognizer,
    parse_response,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// Talks to the recognition service over HTTP.
pub struct HttpRecognizer {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpRecognizer {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: format!("{}{}", config.base_url, CALCULATE_PATH),
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &CalculateRequest) -> RecognitionOutcome {
        log::debug!(
            "POST {} ({} bytes of image, {} bindings)",
            self.endpoint,
            request.image.len(),
            request.dict_of_vars.len()
        );
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(RecognitionError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_response(&body)
    }
}

fn transport_error(e: reqwest::Error) -> RecognitionError {
    if e.is_timeout() {
        RecognitionError::Timeout
    } else {
        RecognitionError::Request(e.to_string())
    }
}

impl Recognizer for HttpRecognizer {
    fn recognize<'a>(&'a self, request: &'a CalculateRequest) -> BoxFuture<'a, RecognitionOutcome> {
        Box::pin(self.post(request))
    }
}

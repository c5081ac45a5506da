use super::types::*;
use crate::{Error, Result, config::ModelConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(8);

/// Sends one image analysis request to a hosted model and returns the raw
/// report text. Implementations must turn an empty answer into
/// [`Error::EmptyResponse`] rather than `Ok("")`.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, request: &InferenceRequest) -> Result<String>;
}

/// Exponential backoff from [`RETRY_BASE_DELAY`], capped at [`RETRY_MAX_DELAY`].
fn retry_delay(attempt: u32) -> Duration {
    RETRY_BASE_DELAY
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(RETRY_MAX_DELAY)
}

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    config: ModelConfig,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::transport(format!("no response within {}s", self.config.timeout_secs))
        } else {
            Error::Network(e)
        }
    }

    async fn send_once(&self, body: &GenerateContentRequest) -> Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or(raw);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Read the body before decoding so a stalled or reset stream stays a
        // transport failure.
        let raw = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&raw)
            .map_err(|e| Error::empty_response(format!("undecodable response body: {}", e)))?;
        debug!(
            "Received generateContent response with {} candidates",
            parsed.candidates.len()
        );
        parsed.into_text()
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn generate(&self, request: &InferenceRequest) -> Result<String> {
        debug!(
            "Sending {} byte {} image to {}",
            request.image().len(),
            request.mime(),
            self.config.model
        );

        let body = request.to_wire(&self.config.generation, &self.config.safety_settings);

        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = retry_delay(attempt);
                    attempt += 1;
                    warn!(
                        "Model call failed ({}), retry {}/{} in {:?}",
                        e, attempt, self.config.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_client_endpoint() {
        let config = ModelConfig {
            api_key: "test-api-key".to_string(),
            ..ModelConfig::default()
        };
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_retry_delay_backs_off_and_caps() {
        assert_eq!(retry_delay(0), Duration::from_millis(500));
        assert_eq!(retry_delay(1), Duration::from_secs(1));
        assert_eq!(retry_delay(3), Duration::from_secs(4));
        assert_eq!(retry_delay(5), RETRY_MAX_DELAY);
        assert_eq!(retry_delay(40), RETRY_MAX_DELAY);
    }

    #[test]
    fn test_gemini_client_trims_trailing_slash() {
        let config = ModelConfig {
            base_url: "http://localhost:9000/v1/".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: "k".to_string(),
            ..ModelConfig::default()
        };
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9000/v1/models/gemini-2.0-flash:generateContent"
        );
    }
}

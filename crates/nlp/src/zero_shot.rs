//! Hugging Face Zero-Shot Classifier
//!
//! Implementation of the TextClassifier trait against the Hugging Face
//! inference API. The endpoint runs an NLI model (e.g. bart-large-mnli)
//! over the input with the caller's candidate labels and returns the
//! labels ranked by entailment score.

use async_trait::async_trait;
use serde::Deserialize;

use super::capability::{parse_http_error, TextClassifier};
use super::http_client::build_http_client;
use super::types::{Classification, NlpError, NlpResult, ProviderConfig};

/// Default Hugging Face inference endpoint
const HF_API_URL: &str = "https://api-inference.huggingface.co/models";

/// Zero-shot classification provider backed by the Hugging Face
/// inference API.
pub struct HfZeroShotClassifier {
    config: ProviderConfig,
    client: reqwest::Client,
}

/// Wire shape of a zero-shot inference response
#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    #[serde(default)]
    scores: Vec<f64>,
}

impl HfZeroShotClassifier {
    /// Create a new classifier with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(config.timeout_secs);
        Self { config, client }
    }

    /// Full model endpoint URL
    fn endpoint(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(HF_API_URL);
        format!("{}/{}", base.trim_end_matches('/'), self.config.model)
    }
}

#[async_trait]
impl TextClassifier for HfZeroShotClassifier {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> NlpResult<Classification> {
        let body = serde_json::json!({
            "inputs": text,
            "parameters": {
                "candidate_labels": candidate_labels,
            }
        });

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NlpError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status.as_u16(), &body, self.name()));
        }

        let parsed: ZeroShotResponse = response.json().await.map_err(|e| NlpError::ParseError {
            message: format!("zero-shot response: {}", e),
        })?;

        if parsed.labels.is_empty() {
            return Err(NlpError::ParseError {
                message: "zero-shot response carried no labels".to_string(),
            });
        }

        tracing::debug!(
            model = %self.config.model,
            top = %parsed.labels[0],
            "classified input text"
        );

        Ok(Classification {
            labels: parsed.labels,
            scores: parsed.scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uses_default_base() {
        let classifier = HfZeroShotClassifier::new(ProviderConfig {
            model: "facebook/bart-large-mnli".to_string(),
            ..ProviderConfig::default()
        });
        assert_eq!(
            classifier.endpoint(),
            "https://api-inference.huggingface.co/models/facebook/bart-large-mnli"
        );
    }

    #[test]
    fn test_endpoint_respects_base_url_override() {
        let classifier = HfZeroShotClassifier::new(ProviderConfig {
            model: "bart".to_string(),
            base_url: Some("http://localhost:8080/models/".to_string()),
            ..ProviderConfig::default()
        });
        assert_eq!(classifier.endpoint(), "http://localhost:8080/models/bart");
    }

    #[test]
    fn test_zero_shot_response_deserialization() {
        let json = r#"{
            "sequence": "find all urgent tasks",
            "labels": ["search query", "task creation"],
            "scores": [0.93, 0.07]
        }"#;
        let parsed: ZeroShotResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.labels[0], "search query");
        assert_eq!(parsed.scores.len(), 2);
    }
}

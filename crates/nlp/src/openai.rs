//! OpenAI-Compatible Extractor
//!
//! Implementation of the TaskExtractor trait against any OpenAI-compatible
//! `/chat/completions` endpoint. Extraction asks the
//! model for strict JSON matching the `ExtractionOutput` shape and biases
//! the prompt with the user's historical patterns when a context is
//! supplied.

use async_trait::async_trait;
use serde::Deserialize;

use super::capability::{parse_http_error, TaskExtractor};
use super::http_client::build_http_client;
use super::types::{
    ExtractionOutput, ExtractionRequest, NlpError, NlpResult, ProviderConfig,
};

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// System prompt for the extraction call. The model must answer with a
/// single JSON object; prose answers are treated as parse failures.
const EXTRACTION_SYSTEM_PROMPT: &str = "You extract structured task fields from free text. \
Respond with a single JSON object and nothing else. Schema: \
{\"summary\": string?, \"description\": string?, \
\"due_date\": {\"value\": RFC3339 string?, \"confidence\": number?, \"reason\": string?}, \
\"duration\": {\"value\": string?, \"confidence\": number?, \"reason\": string?}, \
\"priority\": {\"value\": \"High\"|\"Medium\"|\"Low\"?, \"confidence\": number?, \"reason\": string?}, \
\"category\": {\"value\": string?, \"confidence\": number?, \"reason\": string?}, \
\"related_keywords\": [string], \"overall_confidence\": number?}. \
Omit any field you cannot derive from the text.";

/// Extraction and completion provider for OpenAI-compatible endpoints.
pub struct OpenAiExtractor {
    config: ProviderConfig,
    client: reqwest::Client,
}

/// Wire shape of a chat-completion response (the subset we read)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiExtractor {
    /// Create a new extractor with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(config.timeout_secs);
        Self { config, client }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// Build the user message for an extraction request, embedding the
    /// historical bias lines when a context is available.
    fn build_extraction_prompt(request: &ExtractionRequest) -> String {
        let mut lines = vec![
            format!("Current time: {}", request.current_time.to_rfc3339()),
            format!("Input text: {}", request.text),
        ];

        if let Some(ctx) = request.context.as_ref().filter(|c| !c.is_empty()) {
            if !ctx.common_categories.is_empty() {
                lines.push(format!(
                    "The user's frequent categories, most used first: {}",
                    ctx.common_categories.join(", ")
                ));
            }
            lines.push(format!(
                "The user's typical priority: {}",
                ctx.most_used_priority
            ));
            lines.push(format!(
                "The user's typical task duration: {}",
                ctx.average_duration
            ));
            lines.push(
                "Prefer these historical patterns when the text itself is ambiguous.".to_string(),
            );
        }

        lines.join("\n")
    }

    /// Strip an optional Markdown code fence from model output
    fn strip_code_fence(content: &str) -> &str {
        let trimmed = content.trim();
        let without_open = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed);
        without_open
            .strip_suffix("```")
            .unwrap_or(without_open)
            .trim()
    }

    /// Parse extraction content into the typed output shape.
    ///
    /// Content that is not JSON at all is a parse error; content that is
    /// valid JSON but not an object is an unknown response shape.
    fn parse_extraction(content: &str) -> NlpResult<ExtractionOutput> {
        let cleaned = Self::strip_code_fence(content);
        let value: serde_json::Value =
            serde_json::from_str(cleaned).map_err(|e| NlpError::ParseError {
                message: format!("extraction content is not JSON: {}", e),
            })?;
        if !value.is_object() {
            return Err(NlpError::UnknownResponse);
        }
        serde_json::from_value(value).map_err(|e| NlpError::ParseError {
            message: format!("extraction content shape: {}", e),
        })
    }

    /// Send one chat-completion call and return the first choice's content.
    async fn send_chat(&self, system: &str, user: &str) -> NlpResult<String> {
        let body = serde_json::json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let mut request = self.client.post(self.base_url()).json(&body);
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
            return Err(parse_http_error(status.as_u16(), &body, "openai"));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| NlpError::ParseError {
            message: format!("chat response: {}", e),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| NlpError::ParseError {
                message: "chat response carried no content".to_string(),
            })
    }
}

#[async_trait]
impl TaskExtractor for OpenAiExtractor {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn extract(&self, request: ExtractionRequest) -> NlpResult<ExtractionOutput> {
        let prompt = Self::build_extraction_prompt(&request);
        let content = self.send_chat(EXTRACTION_SYSTEM_PROMPT, &prompt).await?;
        tracing::debug!(model = %self.config.model, "received extraction payload");
        Self::parse_extraction(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taskmind_core::{Priority, UserContext};

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(OpenAiExtractor::strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(
            OpenAiExtractor::strip_code_fence("```json\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
        assert_eq!(
            OpenAiExtractor::strip_code_fence("```\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
    }

    #[test]
    fn test_parse_extraction_happy_path() {
        let content = r#"{
            "summary": "Finish the quarterly report",
            "due_date": {"value": "2026-09-04T17:00:00Z", "confidence": 0.9, "reason": "by Friday"},
            "duration": {"value": "4h", "confidence": 0.85, "reason": "stated explicitly"},
            "priority": {"value": "High", "confidence": 0.95, "reason": "marked urgent"},
            "related_keywords": ["report", "quarterly"]
        }"#;
        let output = OpenAiExtractor::parse_extraction(content).unwrap();
        assert_eq!(output.summary.as_deref(), Some("Finish the quarterly report"));
        assert_eq!(output.duration.value.as_deref(), Some("4h"));
        assert_eq!(output.related_keywords.len(), 2);
        assert!(output.category.is_empty());
    }

    #[test]
    fn test_parse_extraction_non_json_is_parse_error() {
        let err = OpenAiExtractor::parse_extraction("I could not extract anything").unwrap_err();
        assert!(matches!(err, NlpError::ParseError { .. }));
    }

    #[test]
    fn test_parse_extraction_non_object_is_unknown_response() {
        let err = OpenAiExtractor::parse_extraction("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, NlpError::UnknownResponse));
    }

    #[test]
    fn test_extraction_prompt_embeds_context_bias() {
        let request = ExtractionRequest {
            text: "prepare slides".to_string(),
            current_time: Utc::now(),
            context: Some(UserContext {
                recent_tasks: vec![],
                common_categories: vec!["Work".to_string(), "Home".to_string()],
                most_used_priority: Priority::High,
                average_duration: "2h".to_string(),
            }),
        };
        // An empty recent_tasks list means the context is treated as empty
        // and the bias lines are skipped.
        let prompt = OpenAiExtractor::build_extraction_prompt(&request);
        assert!(!prompt.contains("frequent categories"));

        let mut request = request;
        request.context.as_mut().unwrap().recent_tasks.push(sample_task());
        let prompt = OpenAiExtractor::build_extraction_prompt(&request);
        assert!(prompt.contains("Work, Home"));
        assert!(prompt.contains("typical priority: High"));
        assert!(prompt.contains("typical task duration: 2h"));
    }

    #[test]
    fn test_extraction_prompt_without_context() {
        let request = ExtractionRequest {
            text: "buy milk".to_string(),
            current_time: Utc::now(),
            context: None,
        };
        let prompt = OpenAiExtractor::build_extraction_prompt(&request);
        assert!(prompt.contains("Input text: buy milk"));
        assert!(!prompt.contains("historical patterns"));
    }

    fn sample_task() -> taskmind_core::Task {
        taskmind_core::Task {
            id: "t1".to_string(),
            summary: "Weekly sync".to_string(),
            description: None,
            due_date: "2026-09-01T09:00:00Z".to_string(),
            estimated_duration: "1h".to_string(),
            priority: Priority::Medium,
            status: taskmind_core::Status::ToDo,
            category: "Work".to_string(),
            external_links: vec![],
            folder_id: None,
            created_at: "2026-08-25T09:00:00Z".to_string(),
        }
    }
}

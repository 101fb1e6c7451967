//! Telegram Bot Channel
//!
//! Thin inbound surface over the intent pipeline: extracts plain text from
//! a webhook update, resolves the chat identity to a linked owning user,
//! runs the pipeline, and replies via the Bot API sendMessage endpoint
//! using MarkdownV2 formatting with proper escaping of special characters.
//!
//! API endpoint: `https://api.telegram.org/bot<token>/sendMessage`

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::pipeline::{IntentPipeline, PipelineOutcome};
use crate::storage::Database;
use taskmind_core::PipelineError;

/// Channel identifier used in the chat-link table
const CHANNEL: &str = "telegram";

/// Replies list at most this many search hits
const MAX_SEARCH_HITS: usize = 5;

/// Plain text extracted from one webhook update.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub chat_id: String,
    pub text: String,
}

/// Extract the chat id and message text from a webhook `Update` payload.
/// Returns None for updates without a text message (stickers, joins, ...).
pub fn parse_update(update: &serde_json::Value) -> Option<InboundMessage> {
    let message = update.get("message")?;
    let chat_id = message.get("chat")?.get("id")?;
    let chat_id = match chat_id {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        _ => return None,
    };
    let text = message.get("text")?.as_str()?.trim().to_string();
    if text.is_empty() {
        return None;
    }
    Some(InboundMessage { chat_id, text })
}

/// Telegram Bot API integration for the intent pipeline.
pub struct TelegramChannel {
    client: reqwest::Client,
    bot_token: String,
}

impl TelegramChannel {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            client: taskmind_nlp::build_http_client(30),
            bot_token: bot_token.into(),
        }
    }

    /// Escape special characters for Telegram MarkdownV2 format.
    pub fn escape_markdown_v2(text: &str) -> String {
        let special_chars = [
            '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
            '!',
        ];
        let mut result = String::with_capacity(text.len() * 2);
        for ch in text.chars() {
            if special_chars.contains(&ch) {
                result.push('\\');
            }
            result.push(ch);
        }
        result
    }

    /// Handle one inbound webhook update end to end.
    ///
    /// The caller maintains one `IntentPipeline` per chat session and
    /// passes the matching one in.
    pub async fn handle(
        &self,
        db: &Database,
        pipeline: &mut IntentPipeline,
        update: &serde_json::Value,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let Some(inbound) = parse_update(update) else {
            return Ok(());
        };

        // Account linking must happen before the pipeline may run
        if let Some(rest) = inbound.text.strip_prefix("/link") {
            let owner = rest.trim();
            let reply = if owner.is_empty() {
                "Usage: /link <user id>".to_string()
            } else {
                db.link_chat(CHANNEL, &inbound.chat_id, owner)?;
                "Account linked. Send me a task or a search in plain words.".to_string()
            };
            return self.send_message(&inbound.chat_id, &Self::escape_markdown_v2(&reply)).await;
        }

        let Some(owner) = db.owner_for_chat(CHANNEL, &inbound.chat_id)? else {
            let reply = Self::escape_markdown_v2(
                "This chat is not linked yet. Send /link <user id> first.",
            );
            return self.send_message(&inbound.chat_id, &reply).await;
        };

        let reply = match pipeline.process(&owner, &inbound.text, now).await {
            Ok(outcome) => Self::format_outcome(&outcome),
            Err(err) => Self::format_failure(&err, pipeline),
        };
        self.send_message(&inbound.chat_id, &reply).await
    }

    /// Format a successful outcome as a MarkdownV2 reply.
    fn format_outcome(outcome: &PipelineOutcome) -> String {
        match outcome {
            PipelineOutcome::Search { results } => {
                if results.is_empty() {
                    return Self::escape_markdown_v2("No matching tasks found.");
                }
                let mut lines = vec![format!(
                    "*Found {} matching {}*",
                    results.len(),
                    if results.len() == 1 { "task" } else { "tasks" }
                )];
                for task in results.iter().take(MAX_SEARCH_HITS) {
                    lines.push(format!(
                        "\u{2022} {} \\({}\\)",
                        Self::escape_markdown_v2(&task.summary),
                        Self::escape_markdown_v2(task.status.as_str()),
                    ));
                }
                lines.join("\n")
            }
            PipelineOutcome::Create { task, analysis } => {
                let confidence = (analysis.overall_confidence * 100.0).round() as u32;
                let mut lines = vec![format!(
                    "\u{2705} *Created*: {}",
                    Self::escape_markdown_v2(&task.summary)
                )];
                lines.push(format!(
                    "*Category*: {}",
                    Self::escape_markdown_v2(&task.category)
                ));
                lines.push(format!(
                    "*Priority*: {}",
                    Self::escape_markdown_v2(task.priority.as_str())
                ));
                lines.push(format!(
                    "*Due*: {}",
                    Self::escape_markdown_v2(&task.due_date)
                ));
                lines.push(format!(
                    "*Confidence*: {}",
                    Self::escape_markdown_v2(&format!("{}%", confidence))
                ));
                lines.join("\n")
            }
        }
    }

    /// Format a failed attempt, offering a retry hint while the budget
    /// allows one.
    fn format_failure(err: &PipelineError, pipeline: &IntentPipeline) -> String {
        let mut reply = err.user_message();
        if err.is_retryable() && pipeline.state().can_retry() {
            reply.push_str(" Send the same message again to retry.");
        }
        Self::escape_markdown_v2(&reply)
    }

    /// Send a MarkdownV2 message to the given chat.
    async fn send_message(&self, chat_id: &str, text: &str) -> AppResult<()> {
        let api_url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.bot_token
        );

        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "MarkdownV2"
        });

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&body)?)
            .send()
            .await
            .map_err(|e| AppError::channel(format!("Telegram send failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::channel(format!(
                "Telegram returned HTTP {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown_v2() {
        assert_eq!(
            TelegramChannel::escape_markdown_v2("hello_world"),
            "hello\\_world"
        );
        assert_eq!(
            TelegramChannel::escape_markdown_v2("a.b.c"),
            "a\\.b\\.c"
        );
        assert_eq!(
            TelegramChannel::escape_markdown_v2("test (value)"),
            "test \\(value\\)"
        );
        assert_eq!(
            TelegramChannel::escape_markdown_v2("no special"),
            "no special"
        );
    }

    #[test]
    fn test_parse_update() {
        let update = serde_json::json!({
            "update_id": 10000,
            "message": {
                "message_id": 1,
                "chat": {"id": 123456, "type": "private"},
                "text": "  Finish the report by Friday  "
            }
        });
        let inbound = parse_update(&update).unwrap();
        assert_eq!(inbound.chat_id, "123456");
        assert_eq!(inbound.text, "Finish the report by Friday");
    }

    #[test]
    fn test_parse_update_ignores_non_text() {
        let update = serde_json::json!({
            "update_id": 10001,
            "message": {
                "message_id": 2,
                "chat": {"id": 123456, "type": "private"},
                "sticker": {"file_id": "abc"}
            }
        });
        assert!(parse_update(&update).is_none());

        let update = serde_json::json!({"update_id": 10002});
        assert!(parse_update(&update).is_none());
    }

    #[test]
    fn test_format_search_outcome() {
        let outcome = PipelineOutcome::Search { results: vec![] };
        assert_eq!(
            TelegramChannel::format_outcome(&outcome),
            "No matching tasks found\\."
        );
    }
}

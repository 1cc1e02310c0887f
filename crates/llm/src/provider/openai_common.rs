//! Shared request/response handling for OpenAI-compatible chat APIs.
//!
//! Groq exposes the same `/chat/completions` contract as OpenAI, so both
//! providers build and decode bodies here.

use crate::error::{LlmError, Result};
use crate::provider::CompletionRequest;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// POST the request to `{base_url}/chat/completions` with a bearer key
/// and return the trimmed first-choice content.
pub(crate) async fn complete_chat(
    http: &Client,
    base_url: &str,
    api_key: &str,
    request: &CompletionRequest,
) -> Result<String> {
    let body = ChatCompletionBody {
        model: &request.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &request.system,
            },
            ChatMessage {
                role: "user",
                content: &request.user,
            },
        ],
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    };

    let response = http
        .post(format!("{}/chat/completions", base_url.trim_end_matches('/')))
        .header("Authorization", format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(LlmError::Http)?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(LlmError::Api { status, message });
    }

    let parsed: ChatCompletionResponse = response
        .json()
        .await
        .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
    extract_content(parsed)
}

fn extract_content(response: ChatCompletionResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| LlmError::MalformedResponse("no choices in response".to_string()))?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(LlmError::MalformedResponse("empty completion content".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_from(value: serde_json::Value) -> ChatCompletionResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extracts_first_choice_trimmed() {
        let response = response_from(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  a summary\n" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }));
        assert_eq!(extract_content(response).unwrap(), "a summary");
    }

    #[test]
    fn missing_choices_is_malformed() {
        let response = response_from(serde_json::json!({ "choices": [] }));
        assert!(matches!(
            extract_content(response),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_content_is_malformed() {
        let response = response_from(serde_json::json!({
            "choices": [ { "message": { "content": "   " } } ]
        }));
        assert!(matches!(
            extract_content(response),
            Err(LlmError::MalformedResponse(_))
        ));
    }
}

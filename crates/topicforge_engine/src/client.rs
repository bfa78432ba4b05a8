use std::time::Duration;

use engine_logging::engine_debug;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::{CompletionError, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            // Long chapters take a while to generate.
            request_timeout: Duration::from_secs(180),
        }
    }
}

/// One single-message chat completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the text of the first choice.
    async fn complete(
        &self,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestCompletionClient {
    settings: ClientSettings,
}

impl ReqwestCompletionClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, CompletionError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| CompletionError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl CompletionClient for ReqwestCompletionClient {
    async fn complete(
        &self,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| CompletionError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = self.build_client()?;

        let body = ChatBody {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        let payload = serde_json::to_vec(&body)
            .map_err(|err| CompletionError::new(FailureKind::MalformedResponse, err.to_string()))?;

        engine_debug!(
            "POST {} model={} max_tokens={} prompt_len={}",
            endpoint,
            request.model,
            request.max_tokens,
            request.prompt.len()
        );

        let response = client
            .post(endpoint)
            .bearer_auth(credential)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        parse_reply(&bytes)
    }
}

/// Extracts `choices[0].message.content`; nothing else is read.
fn parse_reply(bytes: &[u8]) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_slice(bytes)
        .map_err(|err| CompletionError::new(FailureKind::MalformedResponse, err.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::new(FailureKind::MalformedResponse, "no message content"))
}

fn map_reqwest_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        return CompletionError::new(FailureKind::Timeout, err.to_string());
    }
    CompletionError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_choice_content_is_returned() {
        let body = br#"{"id":"x","choices":[{"message":{"role":"assistant","content":"one"}},{"message":{"content":"two"}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "one");
    }

    #[test]
    fn missing_choices_is_malformed() {
        let err = parse_reply(br#"{"choices":[]}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);

        let err = parse_reply(br#"{"error":{"message":"bad key"}}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn null_content_is_malformed() {
        let err = parse_reply(br#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }
}

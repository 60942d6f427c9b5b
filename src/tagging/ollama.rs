//! Ollama chat API client.
//!
//! One non-streaming `POST /api/chat` per prompt. The system instruction,
//! context window and output schema are sent with every call; the runtime
//! is expected to honour `format` and reply with JSON text in
//! `message.content`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::ModelConfig;
use crate::tagging::model::{LanguageModel, ModelError};

/// Async client for a local Ollama runtime.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    chat_url: Url,
    model: String,
    system_prompt: String,
    context_window: u32,
    temperature: Option<f32>,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
    format: &'a Value,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    num_ctx: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let chat_url = chat_url(&config.base_url)?;
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            chat_url,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            context_window: config.context_window,
            temperature: config.temperature,
            timeout,
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a str, schema: &'a Value) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: false,
            format: schema,
            options: ChatOptions {
                num_ctx: self.context_window,
                temperature: self.temperature,
            },
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> ModelError {
        if e.is_timeout() {
            ModelError::Timeout(self.timeout)
        } else {
            ModelError::Unavailable(e.to_string())
        }
    }
}

/// Resolve `{base_url}/api/chat`, keeping any path prefix on the base.
fn chat_url(base_url: &str) -> Result<Url, ModelError> {
    let mut base = Url::parse(base_url)
        .map_err(|e| ModelError::Configuration(format!("{base_url}: {e}")))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("api/chat")
        .map_err(|e| ModelError::Configuration(format!("{base_url}: {e}")))
}

fn parse_reply(bytes: &[u8]) -> Result<String, ModelError> {
    let reply: ChatResponse =
        serde_json::from_slice(bytes).map_err(|e| ModelError::MalformedReply(e.to_string()))?;
    reply
        .message
        .map(|m| m.content)
        .ok_or_else(|| ModelError::MalformedReply("reply has no message".into()))
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn complete(&self, prompt: &str, schema: &Value) -> Result<String, ModelError> {
        let response = self
            .client
            .post(self.chat_url.clone())
            .json(&self.request_body(prompt, schema))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Unavailable(format!("status {status}: {body}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        parse_reply(&bytes)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

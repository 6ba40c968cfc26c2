//! HTTP client for the supported AI providers.
//!
//! Anthropic uses its Messages API with base64 `image` blocks. OpenAI, Kimi
//! and OpenRouter share the chat-completions wire format with `image_url`
//! data URLs.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info};

use super::provider::Provider;
use super::response::truncate_for_log;
use super::{GenerationRequest, GenerativeModel};
use crate::error::ModelError;

/// Client-side timeout for a single completion.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// A configured provider: which API, which model, which key.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    provider: Provider,
    model: String,
    api_key: String,
    http: reqwest::Client,
}

impl ProviderClient {
    pub fn new(
        provider: Provider,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            provider,
            model: model.into(),
            api_key: api_key.into(),
            http: build_api_client(provider)?,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.provider {
            Provider::Claude => builder
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01"),
            _ => builder.header("Authorization", format!("Bearer {}", self.api_key)),
        }
    }
}

#[async_trait]
impl GenerativeModel for ProviderClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError> {
        let provider = self.provider;
        info!(
            "Calling provider '{}' model '{}' ({} attachments)",
            provider,
            self.model,
            request.attachments.len()
        );

        let body = build_request_body(provider, &self.model, &request);
        let response = self
            .authorized(self.http.post(provider.completions_url()))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_timeout() {
                    ModelError::Timeout {
                        provider: provider.to_string(),
                        seconds: REQUEST_TIMEOUT_SECS,
                    }
                } else {
                    ModelError::Request {
                        provider: provider.to_string(),
                        message: e.to_string(),
                    }
                };
                error!("{}", err);
                err
            })?;

        let body_text = handle_api_response(response, provider).await?;
        extract_completion_text(provider, &body_text)
    }
}

/// Build a reqwest client with the completion timeout.
fn build_api_client(provider: Provider) -> Result<reqwest::Client, ModelError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ModelError::Request {
            provider: provider.to_string(),
            message: format!("Failed to build HTTP client: {}", e),
        })
}

/// Check status and extract the body text.
async fn handle_api_response(
    response: reqwest::Response,
    provider: Provider,
) -> Result<String, ModelError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        let err = ModelError::Http {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: truncate_for_log(&body, 1024),
        };
        error!("{}", err);
        return Err(err);
    }
    response.text().await.map_err(|e| ModelError::Request {
        provider: provider.to_string(),
        message: format!("Failed to read API response body: {}", e),
    })
}

/// Build the provider-specific JSON body for a generation request.
pub fn build_request_body(provider: Provider, model: &str, request: &GenerationRequest) -> Value {
    match provider {
        Provider::Claude => build_claude_body(model, request),
        _ => build_chat_completions_body(provider, model, request),
    }
}

fn build_claude_body(model: &str, request: &GenerationRequest) -> Value {
    let mut content = vec![json!({"type": "text", "text": request.prompt})];
    for attachment in &request.attachments {
        if let Some(label) = &attachment.label {
            content.push(json!({"type": "text", "text": label}));
        }
        content.push(json!({
            "type": "image",
            "source": {
                "type": "base64",
                "media_type": attachment.media_type,
                "data": attachment.data_base64,
            }
        }));
    }

    // Anthropic has no response_format; the schema goes into the system prompt.
    let mut system = request.system.clone().unwrap_or_default();
    if let Some(schema) = &request.response_schema {
        if !system.is_empty() {
            system.push_str("\n\n");
        }
        system.push_str(&format!(
            "Respond with a single JSON object matching this schema, no markdown:\n{}",
            schema.schema
        ));
    }

    let mut body = json!({
        "model": model,
        "max_tokens": request.max_tokens,
        "messages": [
            {"role": "user", "content": content}
        ]
    });
    if !system.is_empty() {
        body["system"] = Value::String(system);
    }
    body
}

fn build_chat_completions_body(
    provider: Provider,
    model: &str,
    request: &GenerationRequest,
) -> Value {
    let user_content = if request.attachments.is_empty() {
        Value::String(request.prompt.clone())
    } else {
        let mut parts = vec![json!({"type": "text", "text": request.prompt})];
        for attachment in &request.attachments {
            if let Some(label) = &attachment.label {
                parts.push(json!({"type": "text", "text": label}));
            }
            parts.push(json!({
                "type": "image_url",
                "image_url": {
                    "url": format!("data:{};base64,{}", attachment.media_type, attachment.data_base64)
                }
            }));
        }
        Value::Array(parts)
    };

    let mut messages = Vec::new();
    if let Some(system) = &request.system {
        messages.push(json!({"role": "system", "content": system}));
    }
    messages.push(json!({"role": "user", "content": user_content}));

    let mut body = json!({
        "model": model,
        "max_tokens": request.max_tokens,
        "messages": messages,
    });

    if let Some(schema) = &request.response_schema {
        // Only OpenAI is trusted with strict json_schema mode.
        body["response_format"] = if provider == Provider::OpenAi {
            json!({
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "strict": false,
                    "schema": schema.schema
                }
            })
        } else {
            json!({"type": "json_object"})
        };
    }
    body
}

/// Pull the completion text out of the provider's response wrapper.
pub fn extract_completion_text(provider: Provider, body_text: &str) -> Result<String, ModelError> {
    let malformed = |message: String| {
        let err = ModelError::Malformed {
            provider: provider.to_string(),
            message,
        };
        error!("{}", err);
        err
    };

    let resp_json: Value = serde_json::from_str(body_text)
        .map_err(|e| malformed(format!("Failed to parse API response wrapper: {}", e)))?;

    let text = match provider {
        // { "content": [{"type": "text", "text": "..."}] }
        Provider::Claude => resp_json["content"]
            .as_array()
            .and_then(|blocks| blocks.iter().find_map(|b| b["text"].as_str())),
        // { "choices": [{"message": {"content": "..."}}] }
        _ => resp_json["choices"][0]["message"]["content"].as_str(),
    };

    text.map(|s| s.to_string())
        .ok_or_else(|| malformed("No text content in API response".to_string()))
}

//! Remote generative-model capability.
//!
//! Everything outside this module talks to a model through the
//! [`GenerativeModel`] trait; [`ProviderClient`] is the HTTP implementation
//! for the supported providers.

pub mod client;
pub mod provider;
pub mod response;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub use client::ProviderClient;
pub use provider::Provider;
pub use response::strip_markdown_json;

/// Default token budget for a single generation.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// A base64 image sent alongside the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Text placed immediately before the image, e.g. "Pair 1 (raw)".
    pub label: Option<String>,
    pub media_type: String,
    pub data_base64: String,
}

/// Named JSON schema the response should conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

/// One prompt to a generative model.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub attachments: Vec<ImageAttachment>,
    pub response_schema: Option<ResponseSchema>,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            attachments: Vec::new(),
            response_schema: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<ImageAttachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_schema(mut self, name: impl Into<String>, schema: serde_json::Value) -> Self {
        self.response_schema = Some(ResponseSchema {
            name: name.into(),
            schema,
        });
        self
    }
}

/// A model that turns a prompt (plus optional images) into text.
///
/// Implementations return the raw text of the first completion; callers own
/// parsing and validation of that text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError>;
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Keychain account every provider key is stored under.
pub const KEYCHAIN_ACCOUNT: &str = "darkroom";

/// Supported AI providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Claude,
    OpenAi,
    Kimi,
    OpenRouter,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Claude,
        Provider::OpenAi,
        Provider::Kimi,
        Provider::OpenRouter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Claude => "claude",
            Provider::OpenAi => "openai",
            Provider::Kimi => "kimi",
            Provider::OpenRouter => "openrouter",
        }
    }

    /// Vision-capable model used when no `ai_model` preference is set.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Claude => "claude-sonnet-4-20250514",
            Provider::OpenAi => "gpt-4o",
            Provider::Kimi => "moonshot-v1-128k-vision-preview",
            Provider::OpenRouter => "anthropic/claude-sonnet-4",
        }
    }

    /// Keychain service id holding this provider's API key.
    pub fn keychain_service(&self) -> &'static str {
        match self {
            Provider::Claude => "darkroom-claude-api",
            Provider::OpenAi => "darkroom-openai-api",
            Provider::Kimi => "darkroom-kimi-api",
            Provider::OpenRouter => "darkroom-openrouter-api",
        }
    }

    pub fn completions_url(&self) -> &'static str {
        match self {
            Provider::Claude => "https://api.anthropic.com/v1/messages",
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
            Provider::Kimi => "https://api.moonshot.cn/v1/chat/completions",
            Provider::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
        }
    }

    pub fn models_url(&self) -> &'static str {
        match self {
            Provider::Claude => "https://api.anthropic.com/v1/models",
            Provider::OpenAi => "https://api.openai.com/v1/models",
            Provider::Kimi => "https://api.moonshot.cn/v1/models",
            Provider::OpenRouter => "https://openrouter.ai/api/v1/models",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" | "anthropic" => Ok(Provider::Claude),
            "openai" => Ok(Provider::OpenAi),
            "kimi" | "moonshot" => Ok(Provider::Kimi),
            "openrouter" => Ok(Provider::OpenRouter),
            _ => Err(ModelError::UnsupportedProvider(s.to_string())),
        }
    }
}

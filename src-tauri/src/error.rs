use thiserror::Error;

/// Failures of the settings layer (keychain and preferences store).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Failures of a remote generative-model call.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unsupported AI provider: '{0}'. Supported: claude, openai, kimi, openrouter")]
    UnsupportedProvider(String),

    #[error("LLM API timeout after {seconds}s for provider '{provider}'")]
    Timeout { provider: String, seconds: u64 },

    #[error("LLM API request failed for {provider}: {message}")]
    Request { provider: String, message: String },

    #[error("LLM API error: {status} from {provider} - {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {provider}: {message}")]
    Malformed { provider: String, message: String },
}

/// Failures of the style learning pipeline.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("InsufficientPairs: {found} training pairs supplied, at least {required} required")]
    InsufficientPairs { found: usize, required: usize },

    #[error("AnalysisFailed: {0}")]
    AnalysisFailed(String),

    #[error("InvalidImage: {0}")]
    InvalidImage(String),
}

/// Failures of a negotiation turn.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("NegotiationLinkUnstable: {0}")]
    LinkUnstable(String),

    #[error("Unknown negotiation session: {0}")]
    UnknownSession(String),
}

impl From<ModelError> for StyleError {
    fn from(err: ModelError) -> Self {
        StyleError::AnalysisFailed(err.to_string())
    }
}

impl From<ModelError> for NegotiationError {
    fn from(err: ModelError) -> Self {
        NegotiationError::LinkUnstable(err.to_string())
    }
}

impl From<SettingsError> for String {
    fn from(err: SettingsError) -> Self {
        err.to_string()
    }
}

impl From<StyleError> for String {
    fn from(err: StyleError) -> Self {
        err.to_string()
    }
}

impl From<NegotiationError> for String {
    fn from(err: NegotiationError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_prefixes_survive_ipc_conversion() {
        let msg: String = StyleError::AnalysisFailed("bad json".to_string()).into();
        assert!(msg.starts_with("AnalysisFailed:"));

        let msg: String = NegotiationError::LinkUnstable("timeout".to_string()).into();
        assert!(msg.starts_with("NegotiationLinkUnstable:"));
    }

    #[test]
    fn test_model_error_maps_to_pipeline_errors() {
        let err = ModelError::Http {
            provider: "claude".to_string(),
            status: 529,
            body: "overloaded".to_string(),
        };
        match StyleError::from(err) {
            StyleError::AnalysisFailed(msg) => assert!(msg.contains("529")),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = ModelError::Timeout {
            provider: "openai".to_string(),
            seconds: 60,
        };
        match NegotiationError::from(err) {
            NegotiationError::LinkUnstable(msg) => assert!(msg.contains("60s")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

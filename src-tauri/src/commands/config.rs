use serde::Serialize;
use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use super::keychain::read_api_key;
use crate::ai::{Provider, ProviderClient};
use crate::error::SettingsError;

const PREFERENCES_STORE: &str = "preferences.json";

fn read_preference(app: &AppHandle, key: &str) -> Result<Option<String>, SettingsError> {
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        SettingsError::Config(e.to_string())
    })?;
    Ok(store
        .get(key)
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .filter(|s| !s.is_empty()))
}

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    Ok(read_preference(&app, key)?)
}

#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        e.to_string()
    })
}

/// Active provider and model from preferences, with defaults.
fn active_provider(app: &AppHandle) -> Result<(Provider, String), SettingsError> {
    let provider = match read_preference(app, "ai_provider")? {
        Some(name) => name
            .parse::<Provider>()
            .map_err(|e| SettingsError::Config(e.to_string()))?,
        None => Provider::Claude,
    };
    let model = read_preference(app, "ai_model")?
        .unwrap_or_else(|| provider.default_model().to_string());
    Ok((provider, model))
}

/// Build the model client for the configured provider.
pub(crate) fn model_client(app: &AppHandle) -> Result<ProviderClient, String> {
    let (provider, model) = active_provider(app)?;
    let api_key = read_api_key(provider.keychain_service())?.ok_or_else(|| {
        format!(
            "No API key configured for '{}'. Please set it in Settings.",
            provider
        )
    })?;
    ProviderClient::new(provider, model, api_key).map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderKeyStatus {
    pub provider: Provider,
    pub service: String,
    pub configured: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiStatus {
    pub provider: Provider,
    pub model: String,
    pub keys: Vec<ProviderKeyStatus>,
}

#[tauri::command]
pub fn get_ai_status(app: AppHandle) -> Result<AiStatus, String> {
    let (provider, model) = active_provider(&app)?;
    let keys = Provider::ALL
        .iter()
        .map(|p| ProviderKeyStatus {
            provider: *p,
            service: p.keychain_service().to_string(),
            configured: matches!(read_api_key(p.keychain_service()), Ok(Some(_))),
        })
        .collect();
    info!("AI status: provider={}, model={}", provider, model);
    Ok(AiStatus {
        provider,
        model,
        keys,
    })
}

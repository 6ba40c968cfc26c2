use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::keychain::read_api_key;
use crate::ai::Provider;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

fn into_model_infos(response: ModelsResponse) -> Vec<ModelInfo> {
    let mut result: Vec<ModelInfo> = response
        .data
        .into_iter()
        .map(|m| {
            let name = m.display_name.or(m.name).unwrap_or_else(|| m.id.clone());
            ModelInfo { id: m.id, name }
        })
        .collect();
    result.sort_by(|a, b| a.id.cmp(&b.id));
    result
}

#[tauri::command]
pub async fn list_models(provider: String) -> Result<Vec<ModelInfo>, String> {
    info!("Fetching models for provider: {}", provider);
    let provider: Provider = provider.parse().map_err(|e: crate::error::ModelError| e.to_string())?;
    let api_key = read_api_key(provider.keychain_service())?.ok_or_else(|| {
        format!("No API key configured for {}. Set it above first.", provider)
    })?;

    let client = reqwest::Client::new();
    let request = match provider {
        Provider::Claude => client
            .get(provider.models_url())
            .header("x-api-key", &api_key)
            .header("anthropic-version", "2023-06-01"),
        _ => client
            .get(provider.models_url())
            .header("Authorization", format!("Bearer {}", api_key)),
    };

    let resp = request
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        warn!("Models API error for {} ({}): {}", provider, status, body);
        return Err(format!("API error ({})", status));
    }

    let models: ModelsResponse = resp
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    let result = into_model_infos(models);
    info!("Found {} models for {}", result.len(), provider);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_infos_prefer_display_name_and_sort() {
        let response: ModelsResponse = serde_json::from_str(
            r#"{"data": [
                {"id": "gpt-4o", "name": null},
                {"id": "claude-sonnet-4", "display_name": "Claude Sonnet 4"},
                {"id": "anthropic/claude", "name": "Claude via OpenRouter"}
            ]}"#,
        )
        .unwrap();
        let infos = into_model_infos(response);
        let ids: Vec<&str> = infos.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["anthropic/claude", "claude-sonnet-4", "gpt-4o"]);
        assert_eq!(infos[1].name, "Claude Sonnet 4");
        assert_eq!(infos[0].name, "Claude via OpenRouter");
        assert_eq!(infos[2].name, "gpt-4o");
    }
}

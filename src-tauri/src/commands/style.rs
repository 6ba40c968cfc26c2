//! Tauri commands for the style learning pipeline.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::model_client;
use crate::error::StyleError;
use crate::style::image_prep::decode_base64_image;
use crate::style::{
    render_base64, EditingInstructions, FilterChain, StyleAnalyzer, StyleProfile,
    TrainingPairInput, MAX_PAIRS_SENT, MIN_PAIRS,
};

/// One raw/edited pair as sent by the front end.
#[derive(Debug, Deserialize)]
pub struct PairPayload {
    pub raw_base64: String,
    pub edited_base64: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeStyleRequest {
    pub pairs: Vec<PairPayload>,
    /// Fallback name if the model does not suggest one.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenderStyleRequest {
    pub image_base64: String,
    pub instructions: EditingInstructions,
}

#[derive(Debug, Serialize)]
pub struct FilterPreview {
    /// CSS `filter` value for the comparison view.
    pub css: String,
    /// Instructions after clamping, as rendered.
    pub instructions: EditingInstructions,
}

/// Derive a style profile from training pairs.
#[tauri::command]
pub async fn analyze_style(
    app: tauri::AppHandle,
    request: AnalyzeStyleRequest,
) -> Result<StyleProfile, String> {
    info!("Starting style analysis with {} pairs", request.pairs.len());

    // Gate before touching settings or the network.
    if request.pairs.len() < MIN_PAIRS {
        return Err(StyleError::InsufficientPairs {
            found: request.pairs.len(),
            required: MIN_PAIRS,
        }
        .into());
    }

    let pairs = decode_pairs(&request.pairs)?;

    let client = model_client(&app).map_err(StyleError::AnalysisFailed)?;
    let profile = StyleAnalyzer::new(&client).analyze(&pairs, request.name).await?;
    Ok(profile)
}

/// Decode the pairs the analyzer will actually send; later pairs are skipped.
fn decode_pairs(pairs: &[PairPayload]) -> Result<Vec<TrainingPairInput>, StyleError> {
    pairs
        .iter()
        .take(MAX_PAIRS_SENT)
        .map(|p| -> Result<TrainingPairInput, StyleError> {
            Ok(TrainingPairInput {
                raw: decode_base64_image(&p.raw_base64)?,
                edited: decode_base64_image(&p.edited_base64)?,
            })
        })
        .collect()
}

/// Render an image through a profile's instructions; returns PNG base64.
#[tauri::command]
pub async fn render_style(request: RenderStyleRequest) -> Result<String, String> {
    let bytes = decode_base64_image(&request.image_base64)?;
    let instructions = request.instructions;
    // CPU-bound; keep it off the async runtime threads.
    tokio::task::spawn_blocking(move || render_base64(&bytes, &instructions))
        .await
        .map_err(|e| format!("Render task failed: {}", e))?
        .map_err(String::from)
}

#[tauri::command]
pub fn filter_preview(instructions: EditingInstructions) -> FilterPreview {
    let clamped = instructions.clamped();
    FilterPreview {
        css: FilterChain::from_instructions(&clamped).to_css(),
        instructions: clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(raw: &str, edited: &str) -> PairPayload {
        PairPayload {
            raw_base64: raw.to_string(),
            edited_base64: edited.to_string(),
        }
    }

    #[test]
    fn test_decode_pairs_skips_pairs_past_the_cap() {
        let pairs = vec![
            payload("AAEC", "AwQF"),
            payload("BgcI", "CQoL"),
            payload("DA0O", "DxAR"),
            payload("!!not base64!!", "!!"),
        ];
        let decoded = decode_pairs(&pairs).unwrap();
        assert_eq!(decoded.len(), MAX_PAIRS_SENT);
        assert_eq!(decoded[0].raw, vec![0, 1, 2]);
        assert_eq!(decoded[2].edited, vec![15, 16, 17]);
    }

    #[test]
    fn test_decode_pairs_rejects_bad_pair_within_cap() {
        let pairs = vec![payload("AAEC", "AwQF"), payload("!!", "AwQF")];
        assert!(matches!(
            decode_pairs(&pairs),
            Err(StyleError::InvalidImage(_))
        ));
    }
}

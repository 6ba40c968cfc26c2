//! Derives a [`StyleProfile`] from raw/edited training pairs.

use serde_json::Value;
use tracing::{error, info, warn};

use super::image_prep::prepare_image;
use super::instructions::{EditingInstructions, GRAIN, HUE_ROTATE, SEPIA, WARMTH};
use super::profile::{StyleProfile, TrainingPairInput};
use super::prompts::{build_style_analysis_prompt, style_instructions_schema, STYLE_SYSTEM_PROMPT};
use crate::ai::response::truncate_for_log;
use crate::ai::{strip_markdown_json, GenerationRequest, GenerativeModel, ImageAttachment};
use crate::error::StyleError;

/// Pairs required before analysis may run.
pub const MIN_PAIRS: usize = 3;

/// Pairs actually sent to the model; extra pairs are ignored.
pub const MAX_PAIRS_SENT: usize = 3;

pub struct StyleAnalyzer<'a> {
    model: &'a dyn GenerativeModel,
}

impl<'a> StyleAnalyzer<'a> {
    pub fn new(model: &'a dyn GenerativeModel) -> Self {
        Self { model }
    }

    /// Run one analysis. The only side effect of success is the returned
    /// profile; any failure leaves nothing behind.
    pub async fn analyze(
        &self,
        pairs: &[TrainingPairInput],
        name_hint: Option<String>,
    ) -> Result<StyleProfile, StyleError> {
        if pairs.len() < MIN_PAIRS {
            return Err(StyleError::InsufficientPairs {
                found: pairs.len(),
                required: MIN_PAIRS,
            });
        }

        let sent = &pairs[..MAX_PAIRS_SENT.min(pairs.len())];
        if pairs.len() > sent.len() {
            info!("Sending first {} of {} training pairs", sent.len(), pairs.len());
        }

        let attachments = build_attachments(sent)?;
        let request = GenerationRequest::new(build_style_analysis_prompt(sent.len()))
            .with_system(STYLE_SYSTEM_PROMPT)
            .with_attachments(attachments)
            .with_schema("style_instructions", style_instructions_schema());

        let response_text = self.model.generate(request).await.map_err(|e| {
            error!("Style analysis call failed: {}", e);
            StyleError::from(e)
        })?;

        let (model_name, instructions) = parse_style_response(&response_text)?;
        let profile = StyleProfile::create(model_name.or(name_hint), instructions);
        info!("Derived style profile '{}' ({})", profile.name, profile.id);
        Ok(profile)
    }
}

/// Interleave (raw, edited) attachments for each pair.
fn build_attachments(pairs: &[TrainingPairInput]) -> Result<Vec<ImageAttachment>, StyleError> {
    let mut attachments = Vec::with_capacity(pairs.len() * 2);
    for (idx, pair) in pairs.iter().enumerate() {
        let n = idx + 1;
        attachments.push(prepare_image(&pair.raw)?.into_attachment(format!("Pair {} RAW", n)));
        attachments.push(prepare_image(&pair.edited)?.into_attachment(format!("Pair {} EDITED", n)));
    }
    Ok(attachments)
}

/// Parse and validate the model's JSON reply.
///
/// brightness, contrast, saturation and description are required; missing
/// or mistyped required fields fail the analysis instead of defaulting.
/// Optional numeric fields fall back to neutral. Everything is clamped.
pub fn parse_style_response(
    text: &str,
) -> Result<(Option<String>, EditingInstructions), StyleError> {
    let cleaned = strip_markdown_json(text);
    let json: Value = serde_json::from_str(&cleaned).map_err(|e| {
        let msg = format!(
            "Failed to parse model response as JSON: {}. Raw response (first 500 chars): {}",
            e,
            truncate_for_log(&cleaned, 500)
        );
        error!("{}", msg);
        StyleError::AnalysisFailed(msg)
    })?;

    if !json.is_object() {
        return Err(StyleError::AnalysisFailed(
            "Model response is not a JSON object".to_string(),
        ));
    }

    let description = json["description"]
        .as_str()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| StyleError::AnalysisFailed("Missing 'description' field".to_string()))?
        .to_string();

    let instructions = EditingInstructions {
        brightness: required_number(&json, "brightness")?,
        contrast: required_number(&json, "contrast")?,
        saturation: required_number(&json, "saturation")?,
        warmth: optional_number(&json, "warmth", WARMTH.neutral)?,
        grain: optional_number(&json, "grain", GRAIN.neutral)?,
        sepia: optional_number(&json, "sepia", SEPIA.neutral)?,
        hue_rotate: match json.get("hue_rotate") {
            Some(_) => optional_number(&json, "hue_rotate", HUE_ROTATE.neutral)?,
            None => optional_number(&json, "hue_shift", HUE_ROTATE.neutral)?,
        },
        description,
    };

    let out_of_range = instructions.out_of_range_fields();
    if !out_of_range.is_empty() {
        warn!("Model returned out-of-range values, clamping: {:?}", out_of_range);
    }

    let name = json["name"]
        .as_str()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok((name, instructions.clamped()))
}

fn required_number(json: &Value, field: &str) -> Result<f32, StyleError> {
    match json.get(field) {
        None | Some(Value::Null) => Err(StyleError::AnalysisFailed(format!(
            "Missing '{}' field",
            field
        ))),
        Some(value) => as_number(value, field),
    }
}

fn optional_number(json: &Value, field: &str, neutral: f32) -> Result<f32, StyleError> {
    match json.get(field) {
        None | Some(Value::Null) => Ok(neutral),
        Some(value) => as_number(value, field),
    }
}

fn as_number(value: &Value, field: &str) -> Result<f32, StyleError> {
    value.as_f64().map(|v| v as f32).ok_or_else(|| {
        StyleError::AnalysisFailed(format!("Field '{}' is not a number: {}", field, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let text = r#"{
            "name": "Golden Hour Film",
            "brightness": 112,
            "contrast": 108.5,
            "saturation": 125,
            "warmth": 70,
            "grain": 3,
            "sepia": 15,
            "hue_rotate": -8,
            "description": "Warm, lifted film tones."
        }"#;
        let (name, i) = parse_style_response(text).unwrap();
        assert_eq!(name.as_deref(), Some("Golden Hour Film"));
        assert_eq!(i.brightness, 112.0);
        assert_eq!(i.contrast, 108.5);
        assert_eq!(i.saturation, 125.0);
        assert_eq!(i.warmth, 70.0);
        assert_eq!(i.grain, 3.0);
        assert_eq!(i.sepia, 15.0);
        assert_eq!(i.hue_rotate, -8.0);
        assert_eq!(i.description, "Warm, lifted film tones.");
    }

    #[test]
    fn test_parse_fenced_response_with_defaults() {
        let text = "```json\n{\"brightness\": 105, \"contrast\": 100, \"saturation\": 90, \"description\": \"Muted\"}\n```";
        let (name, i) = parse_style_response(text).unwrap();
        assert!(name.is_none());
        assert_eq!(i.warmth, 50.0);
        assert_eq!(i.grain, 0.0);
        assert_eq!(i.sepia, 0.0);
        assert_eq!(i.hue_rotate, 0.0);
    }

    #[test]
    fn test_missing_description_fails() {
        let text = r#"{"brightness": 105, "contrast": 100, "saturation": 90}"#;
        match parse_style_response(text) {
            Err(StyleError::AnalysisFailed(msg)) => assert!(msg.contains("description")),
            other => panic!("expected AnalysisFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_description_fails() {
        let text = r#"{"brightness": 105, "contrast": 100, "saturation": 90, "description": "  "}"#;
        assert!(matches!(
            parse_style_response(text),
            Err(StyleError::AnalysisFailed(_))
        ));
    }

    #[test]
    fn test_missing_required_numbers_fail() {
        for missing in ["brightness", "contrast", "saturation"] {
            let mut json = serde_json::json!({
                "brightness": 105,
                "contrast": 100,
                "saturation": 90,
                "description": "Muted"
            });
            json.as_object_mut().unwrap().remove(missing);
            match parse_style_response(&json.to_string()) {
                Err(StyleError::AnalysisFailed(msg)) => assert!(msg.contains(missing)),
                other => panic!("expected AnalysisFailed for {}, got {:?}", missing, other),
            }
        }
    }

    #[test]
    fn test_string_typed_number_fails() {
        let text = r#"{"brightness": "110", "contrast": 100, "saturation": 90, "description": "x"}"#;
        assert!(matches!(
            parse_style_response(text),
            Err(StyleError::AnalysisFailed(_))
        ));
    }

    #[test]
    fn test_invalid_json_fails() {
        assert!(matches!(
            parse_style_response("I think the style is warm"),
            Err(StyleError::AnalysisFailed(_))
        ));
        assert!(matches!(
            parse_style_response("[1, 2, 3]"),
            Err(StyleError::AnalysisFailed(_))
        ));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let text = r#"{"brightness": 400, "contrast": 20, "saturation": 90, "hue_rotate": 900, "description": "Loud"}"#;
        let (_, i) = parse_style_response(text).unwrap();
        assert_eq!(i.brightness, 150.0);
        assert_eq!(i.contrast, 80.0);
        assert_eq!(i.hue_rotate, 180.0);
    }

    #[test]
    fn test_hue_shift_alias_is_accepted() {
        let text = r#"{"brightness": 100, "contrast": 100, "saturation": 100, "hue_shift": 25, "description": "Teal"}"#;
        let (_, i) = parse_style_response(text).unwrap();
        assert_eq!(i.hue_rotate, 25.0);
    }
}
